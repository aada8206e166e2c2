//! Steganography engine - the main interface.
//!
//! ```text
//! encode: payload → seal (if password) → compress → container → embed
//! decode: extract → verify container → decompress → open (if password)
//! ```

use crate::carrier::{maximum_capacity, CapacityReport, Carrier};
use crate::codec::{self, RandomSource};
use crate::compression::{compress, decompress};
use crate::config::{CodecConfig, HASH_SIZE, HEADER_PIXELS, HEADER_SIZE};
use crate::crypto::{open, seal};
use crate::error::{Error, Result};
use rand::rngs::OsRng;

/// Header summary read from a carrier without decoding the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerInfo {
    /// Blob length recorded in the header.
    pub length: u32,
    /// Hash recorded in the header.
    pub hash: [u8; HASH_SIZE],
    /// Whether the blob in the carrier matches the header.
    pub intact: bool,
}

/// Hides payloads in carriers and recovers them.
///
/// Holds no state besides its configuration; every call is independent.
#[derive(Debug, Clone, Default)]
pub struct Steganography {
    config: CodecConfig,
}

impl Steganography {
    /// Create an engine with the given codec configuration.
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// Codec configuration in use.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Capacity figures for `carrier`.
    pub fn capacity(&self, carrier: &Carrier) -> CapacityReport {
        CapacityReport::for_carrier(carrier)
    }

    /// Hide `payload` in a copy of `carrier`, using the OS random source.
    pub fn encode(
        &self,
        carrier: &Carrier,
        payload: &[u8],
        password: Option<&str>,
    ) -> Result<Carrier> {
        self.encode_with_rng(carrier, payload, password, &mut OsRng)
    }

    /// Hide `payload` in a copy of `carrier`.
    ///
    /// `rng` supplies the IV and the padding bits written past the container.
    /// The input carrier is never modified; the result keeps its dimensions
    /// and alpha channel.
    pub fn encode_with_rng<R: RandomSource + ?Sized>(
        &self,
        carrier: &Carrier,
        payload: &[u8],
        password: Option<&str>,
        rng: &mut R,
    ) -> Result<Carrier> {
        self.config.validate()?;

        let capacity = maximum_capacity(carrier);
        if capacity < HEADER_SIZE {
            return Err(Error::InvalidCarrier {
                pixels: carrier.pixel_count(),
                required: HEADER_PIXELS,
            });
        }

        let blob = match password {
            Some(password) => seal(password, payload, rng)?,
            None => payload.to_vec(),
        };
        let compressed = compress(&blob, &self.config)?;
        let container = codec::serialize(&compressed)?;

        log::debug!(
            "payload {} bytes, blob {} bytes, container {} of {} bytes",
            payload.len(),
            blob.len(),
            container.len(),
            capacity
        );

        if container.len() > capacity {
            return Err(Error::CapacityExceeded {
                needed: container.len(),
                available: capacity,
            });
        }

        let pixels = codec::embed(carrier.pixels(), carrier.channels(), &container, rng)?;
        carrier.with_pixels(pixels)
    }

    /// Recover the payload hidden in `carrier`.
    pub fn decode(&self, carrier: &Carrier, password: Option<&str>) -> Result<Vec<u8>> {
        self.config.validate()?;

        let compressed = codec::deserialize(carrier.pixels(), carrier.channels())
            .inspect_err(|e| log::warn!("container rejected: {}", e))?;
        let blob = decompress(&compressed, &self.config)?;

        log::debug!(
            "container blob {} bytes, decompressed {} bytes",
            compressed.len(),
            blob.len()
        );

        match password {
            Some(password) => {
                open(password, &blob).inspect_err(|_| log::warn!("padding check failed"))
            }
            None => Ok(blob),
        }
    }

    /// Read and verify the container header without decompressing.
    pub fn inspect(&self, carrier: &Carrier) -> Result<ContainerInfo> {
        let header = codec::read_header(carrier.pixels(), carrier.channels())?;
        let intact = codec::deserialize(carrier.pixels(), carrier.channels()).is_ok();
        Ok(ContainerInfo {
            length: header.length,
            hash: header.hash,
            intact,
        })
    }
}
