//! Cryptographic operations for LSB Vault.
//!
//! This module provides:
//! - AES-256-CBC sealing with a random per-message IV
//! - SHA-256 password-to-key derivation

mod cipher;
mod kdf;

pub use cipher::{open, seal, Cipher};
pub use kdf::derive_key;
