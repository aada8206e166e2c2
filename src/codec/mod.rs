//! Bit codec and container format.
//!
//! This module provides:
//! - LSB embedding/extraction over RGB channels
//! - The `length || sha256 || blob` container framing

mod bits;
mod container;

pub use bits::{embed, extract, RandomSource};
pub use container::{deserialize, digest, read_header, serialize, ContainerHeader};
