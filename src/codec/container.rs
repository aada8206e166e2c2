//! Self-describing container embedded in the carrier.
//!
//! Layout: `length (u32 BE) || SHA-256(blob) || blob`.

use crate::codec::bits::{check_channels, extract};
use crate::config::{HASH_SIZE, HEADER_PIXELS, HEADER_SIZE, LENGTH_FIELD_SIZE};
use crate::error::{Error, Result};
use sha2::{Digest, Sha256};

/// Parsed fixed-size container header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerHeader {
    /// Blob length in bytes.
    pub length: u32,
    /// SHA-256 of the blob.
    pub hash: [u8; HASH_SIZE],
}

impl ContainerHeader {
    /// Build the header describing `blob`.
    pub fn for_blob(blob: &[u8]) -> Result<Self> {
        let length = u32::try_from(blob.len()).map_err(|_| Error::PayloadTooLarge(blob.len()))?;
        Ok(Self {
            length,
            hash: digest(blob),
        })
    }

    /// Parse the first [`HEADER_SIZE`] bytes.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(Error::Integrity);
        }
        let mut length = [0u8; LENGTH_FIELD_SIZE];
        length.copy_from_slice(&bytes[..LENGTH_FIELD_SIZE]);
        let mut hash = [0u8; HASH_SIZE];
        hash.copy_from_slice(&bytes[LENGTH_FIELD_SIZE..HEADER_SIZE]);

        Ok(Self {
            length: u32::from_be_bytes(length),
            hash,
        })
    }

    /// Header bytes as they appear in the carrier.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[..LENGTH_FIELD_SIZE].copy_from_slice(&self.length.to_be_bytes());
        out[LENGTH_FIELD_SIZE..].copy_from_slice(&self.hash);
        out
    }

    /// Whether `blob` matches this header.
    pub fn verify(&self, blob: &[u8]) -> bool {
        blob.len() == self.length as usize && digest(blob) == self.hash
    }
}

/// SHA-256 of `data`.
pub fn digest(data: &[u8]) -> [u8; HASH_SIZE] {
    Sha256::digest(data).into()
}

/// Frame `blob` as `length || hash || blob`.
pub fn serialize(blob: &[u8]) -> Result<Vec<u8>> {
    let header = ContainerHeader::for_blob(blob)?;
    let mut container = Vec::with_capacity(HEADER_SIZE + blob.len());
    container.extend_from_slice(&header.to_bytes());
    container.extend_from_slice(blob);
    Ok(container)
}

/// Read just the header from the first [`HEADER_PIXELS`] pixels.
pub fn read_header(pixels: &[u8], channels: usize) -> Result<ContainerHeader> {
    check_channels(channels)?;
    let pixel_count = pixels.len() / channels;
    if pixel_count < HEADER_PIXELS {
        return Err(Error::InvalidCarrier {
            pixels: pixel_count,
            required: HEADER_PIXELS,
        });
    }
    let header_bytes = extract(&pixels[..HEADER_PIXELS * channels], channels, Some(HEADER_SIZE))?;
    ContainerHeader::parse(&header_bytes)
}

/// Recover and verify the blob hidden in `pixels`.
///
/// Fails with [`Error::InvalidCarrier`] when the header does not fit and
/// with [`Error::Integrity`] when the stored length overruns the carrier or
/// the hash does not match.
pub fn deserialize(pixels: &[u8], channels: usize) -> Result<Vec<u8>> {
    let header = read_header(pixels, channels)?;
    let length = header.length as usize;

    let total = HEADER_SIZE.checked_add(length).ok_or(Error::Integrity)?;
    let extracted = extract(pixels, channels, Some(total))?;
    if extracted.len() < total {
        log::debug!(
            "container length {} overruns carrier ({} bytes readable)",
            length,
            extracted.len()
        );
        return Err(Error::Integrity);
    }

    let blob = extracted[HEADER_SIZE..].to_vec();
    if !header.verify(&blob) {
        return Err(Error::Integrity);
    }

    Ok(blob)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::bits::embed;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn carrier_pixels(pixels: usize) -> Vec<u8> {
        (0..pixels * 4).map(|i| (i % 251) as u8).collect()
    }

    #[test]
    fn test_serialize_layout() {
        let container = serialize(b"abc").unwrap();
        assert_eq!(container.len(), HEADER_SIZE + 3);
        assert_eq!(&container[..4], &[0, 0, 0, 3]);
        assert_eq!(&container[4..36], &digest(b"abc"));
        assert_eq!(&container[36..], b"abc");
    }

    #[test]
    fn test_serialize_empty_blob() {
        let container = serialize(b"").unwrap();
        assert_eq!(container.len(), HEADER_SIZE);
        let header = ContainerHeader::parse(&container).unwrap();
        assert_eq!(header.length, 0);
        assert!(header.verify(b""));
    }

    #[test]
    fn test_deserialize_roundtrip() {
        let pixels = carrier_pixels(200);
        let container = serialize(b"payload bytes").unwrap();
        let stego = embed(&pixels, 4, &container, &mut StdRng::seed_from_u64(3)).unwrap();

        assert_eq!(deserialize(&stego, 4).unwrap(), b"payload bytes".to_vec());
    }

    #[test]
    fn test_deserialize_fills_carrier_exactly() {
        // 10x10 -> 37 bytes: header plus a one-byte blob
        let pixels = carrier_pixels(100);
        let container = serialize(&[0x41]).unwrap();
        assert_eq!(container.len(), 37);
        let stego = embed(&pixels, 4, &container, &mut StdRng::seed_from_u64(3)).unwrap();

        assert_eq!(deserialize(&stego, 4).unwrap(), vec![0x41]);
    }

    #[test]
    fn test_deserialize_too_small() {
        let pixels = carrier_pixels(HEADER_PIXELS - 1);
        assert!(matches!(
            deserialize(&pixels, 4),
            Err(Error::InvalidCarrier {
                pixels: 95,
                required: 96
            })
        ));
    }

    #[test]
    fn test_deserialize_unencoded_image() {
        let pixels = carrier_pixels(500);
        assert!(matches!(deserialize(&pixels, 4), Err(Error::Integrity)));
    }

    #[test]
    fn test_hash_mismatch_detected() {
        let pixels = carrier_pixels(200);
        let container = serialize(b"payload bytes").unwrap();
        let mut stego = embed(&pixels, 4, &container, &mut StdRng::seed_from_u64(3)).unwrap();

        // first blob bit lives at bit 288 -> pixel 96, red
        stego[96 * 4] ^= 1;
        assert!(matches!(deserialize(&stego, 4), Err(Error::Integrity)));
    }

    #[test]
    fn test_header_parse_short_input() {
        assert!(matches!(
            ContainerHeader::parse(&[0u8; 10]),
            Err(Error::Integrity)
        ));
    }

    #[test]
    fn test_deserialize_rejects_two_channel_layout() {
        let pixels = vec![0u8; 2 * 500];
        assert!(matches!(
            deserialize(&pixels, 2),
            Err(Error::MalformedCarrier(_))
        ));
        assert!(matches!(read_header(&pixels, 0), Err(Error::MalformedCarrier(_))));
    }
}
