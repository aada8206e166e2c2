//! Password to AES key derivation.
//!
//! The key is a single unsalted SHA-256 of the UTF-8 password. This keeps
//! the container compatible with existing encoded images, but it is not a
//! credential-grade KDF: there is no salt and no work factor, so an offline
//! attacker can test passwords at hash speed.

use crate::config::KEY_SIZE;
use sha2::{Digest, Sha256};

/// Derive the 256-bit AES key for `password`.
pub fn derive_key(password: &str) -> [u8; KEY_SIZE] {
    Sha256::digest(password.as_bytes()).into()
}
