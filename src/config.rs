//! Configuration constants and types for LSB Vault.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Channels per pixel for RGB rasters.
pub const RGB_CHANNELS: usize = 3;

/// Channels per pixel for RGBA rasters.
pub const RGBA_CHANNELS: usize = 4;

/// Writable channels per pixel (red, green, blue). Alpha is never touched.
pub const WRITABLE_CHANNELS: usize = 3;

/// Size of the big-endian blob length field.
pub const LENGTH_FIELD_SIZE: usize = 4;

/// Size of the SHA-256 digest stored after the length field.
pub const HASH_SIZE: usize = 32;

/// Fixed container header size: length field followed by hash.
pub const HEADER_SIZE: usize = LENGTH_FIELD_SIZE + HASH_SIZE;

/// Pixels needed to carry the header at one bit per writable channel.
pub const HEADER_PIXELS: usize = pixels_for_bytes(HEADER_SIZE);

/// AES-CBC initialization vector size.
pub const IV_SIZE: usize = 16;

/// AES-256 key size.
pub const KEY_SIZE: usize = 32;

/// Default gzip level.
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 6;

/// Highest gzip level accepted.
pub const MAX_COMPRESSION_LEVEL: u32 = 9;

/// Default ceiling on decompressed blob size (64 MiB).
pub const DEFAULT_MAX_PAYLOAD_SIZE: usize = 64 * 1024 * 1024;

/// Number of pixels whose writable channels hold `bytes` bytes.
pub const fn pixels_for_bytes(bytes: usize) -> usize {
    (bytes * 8).div_ceil(WRITABLE_CHANNELS)
}

/// How the container blob is compressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionMode {
    /// gzip stream. The reference wire format.
    #[default]
    Gzip,
    /// Blob stored as-is. Both sides must agree on this mode.
    Stored,
}

/// Codec configuration shared by the encoding and decoding side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Compression applied to the blob before it enters the container.
    #[serde(default)]
    pub compression: CompressionMode,

    /// gzip level (0-9). Ignored in stored mode.
    #[serde(default = "default_level")]
    pub compression_level: u32,

    /// Largest blob accepted out of the decompressor.
    #[serde(default = "default_max_payload")]
    pub max_payload_size: usize,
}

fn default_level() -> u32 {
    DEFAULT_COMPRESSION_LEVEL
}

fn default_max_payload() -> usize {
    DEFAULT_MAX_PAYLOAD_SIZE
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            compression: CompressionMode::Gzip,
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            max_payload_size: DEFAULT_MAX_PAYLOAD_SIZE,
        }
    }
}

impl CodecConfig {
    /// Create a new codec configuration.
    pub fn new(compression: CompressionMode, compression_level: u32) -> Self {
        Self {
            compression,
            compression_level: compression_level.min(MAX_COMPRESSION_LEVEL),
            max_payload_size: DEFAULT_MAX_PAYLOAD_SIZE,
        }
    }

    /// Override the decompressed size ceiling.
    pub fn with_max_payload_size(mut self, max_payload_size: usize) -> Self {
        self.max_payload_size = max_payload_size;
        self
    }

    /// Configuration that skips compression entirely.
    pub fn stored() -> Self {
        Self::new(CompressionMode::Stored, DEFAULT_COMPRESSION_LEVEL)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.compression_level > MAX_COMPRESSION_LEVEL {
            return Err(Error::InvalidConfig(format!(
                "Compression level must be between 0 and {}",
                MAX_COMPRESSION_LEVEL
            )));
        }
        if self.max_payload_size == 0 {
            return Err(Error::InvalidConfig(
                "Maximum payload size must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Load a configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: CodecConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
