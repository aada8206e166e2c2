//! LSB Vault
//!
//! Hides an arbitrary payload in the least-significant bits of an image's
//! red, green and blue channels, optionally behind a password.
//!
//! # Features
//!
//! - **LSB Embedding**: One bit per writable channel, alpha left untouched
//! - **Self-describing Container**: Length and SHA-256 header ahead of the blob
//! - **gzip Compression**: Blob compressed before it is framed
//! - **AES-256-CBC Encryption**: Optional, with a random IV per message
//! - **Random Padding**: Unused capacity filled with random bits
//!
//! # Architecture
//!
//! ```text
//! Payload → Encrypt (AES-256-CBC) → Compress (gzip) → Frame (len + SHA-256) → Embed (LSB)
//! ```
//!
//! # Example
//!
//! ```rust
//! use lsb_vault::{Carrier, Steganography};
//!
//! let cover = Carrier::rgba(64, 64, vec![128u8; 64 * 64 * 4]).unwrap();
//! let engine = Steganography::default();
//!
//! let encoded = engine.encode(&cover, b"Hidden data", Some("password")).unwrap();
//! let data = engine.decode(&encoded, Some("password")).unwrap();
//! assert_eq!(data, b"Hidden data");
//! ```

pub mod carrier;
pub mod codec;
pub mod compression;
pub mod config;
pub mod crypto;
pub mod engine;
pub mod error;
pub mod image_io;
pub mod payload;

pub use carrier::{available_space, maximum_capacity, CapacityReport, Carrier};
pub use config::{CodecConfig, CompressionMode};
pub use engine::{ContainerInfo, Steganography};
pub use error::{Error, Result};
pub use payload::{Payload, PayloadKind};
