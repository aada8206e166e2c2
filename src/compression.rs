//! Blob compression.
//!
//! The reference format is a gzip stream. Stored mode passes bytes through
//! untouched; the decoder has to be configured the same way as the encoder,
//! there is no marker byte telling the two apart.
//!
//! Inflation stops at `max_payload_size`; the container hash only proves the
//! stream is what some encoder wrote, not that it is small.

use crate::config::{CodecConfig, CompressionMode};
use crate::error::{Error, Result};
use flate2::read::{GzDecoder, GzEncoder};
use flate2::Compression;
use std::io::Read;

/// Compress `data` according to `config`.
pub fn compress(data: &[u8], config: &CodecConfig) -> Result<Vec<u8>> {
    match config.compression {
        CompressionMode::Stored => Ok(data.to_vec()),
        CompressionMode::Gzip => {
            let mut encoder = GzEncoder::new(data, Compression::new(config.compression_level));
            let mut compressed = Vec::new();
            encoder.read_to_end(&mut compressed)?;
            Ok(compressed)
        }
    }
}

/// Reverse [`compress`].
pub fn decompress(data: &[u8], config: &CodecConfig) -> Result<Vec<u8>> {
    match config.compression {
        CompressionMode::Stored => Ok(data.to_vec()),
        CompressionMode::Gzip => {
            let limit = config.max_payload_size;
            let mut decoder = GzDecoder::new(data).take(limit as u64 + 1);
            let mut decompressed = Vec::new();
            decoder
                .read_to_end(&mut decompressed)
                .map_err(|e| Error::CorruptData(e.to_string()))?;
            if decompressed.len() > limit {
                return Err(Error::CorruptData(format!(
                    "decompressed blob exceeds {} bytes",
                    limit
                )));
            }
            Ok(decompressed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gzip_roundtrip() {
        let config = CodecConfig::default();
        let data = b"Hello, this is a test message that should compress well. \
                     Hello, this is a test message that should compress well.";

        let compressed = compress(data, &config).unwrap();
        assert!(compressed.len() < data.len());
        assert_eq!(decompress(&compressed, &config).unwrap(), data.to_vec());
    }

    #[test]
    fn test_gzip_magic() {
        let compressed = compress(b"x", &CodecConfig::default()).unwrap();
        assert_eq!(&compressed[..2], &[0x1f, 0x8b]);
    }

    #[test]
    fn test_gzip_empty() {
        let config = CodecConfig::default();
        let compressed = compress(b"", &config).unwrap();
        assert!(!compressed.is_empty());
        assert!(decompress(&compressed, &config).unwrap().is_empty());
    }

    #[test]
    fn test_garbage_is_corrupt() {
        let result = decompress(b"definitely not gzip", &CodecConfig::default());
        assert!(matches!(result, Err(Error::CorruptData(_))));
    }

    #[test]
    fn test_checksum_mismatch_is_corrupt() {
        let config = CodecConfig::default();
        let mut compressed = compress(&[7u8; 500], &config).unwrap();
        // CRC32 trailer
        let crc_pos = compressed.len() - 8;
        compressed[crc_pos] ^= 0xFF;
        let result = decompress(&compressed, &config);
        assert!(matches!(result, Err(Error::CorruptData(_))));
    }

    #[test]
    fn test_stored_passthrough() {
        let config = CodecConfig::stored();
        assert_eq!(compress(b"abc", &config).unwrap(), b"abc".to_vec());
        assert_eq!(decompress(b"abc", &config).unwrap(), b"abc".to_vec());
    }

    #[test]
    fn test_level_zero_still_gzip() {
        let config = CodecConfig::new(CompressionMode::Gzip, 0);
        let data = vec![0u8; 1000];
        let compressed = compress(&data, &config).unwrap();
        assert!(compressed.len() > data.len());
        assert_eq!(decompress(&compressed, &config).unwrap(), data);
    }

    #[test]
    fn test_inflation_capped() {
        let data = vec![0u8; 100_000];
        let compressed = compress(&data, &CodecConfig::default()).unwrap();
        assert!(compressed.len() < 1000);

        let tight = CodecConfig::default().with_max_payload_size(99_999);
        let result = decompress(&compressed, &tight);
        assert!(matches!(result, Err(Error::CorruptData(_))));

        let exact = CodecConfig::default().with_max_payload_size(100_000);
        assert_eq!(decompress(&compressed, &exact).unwrap(), data);
    }
}
