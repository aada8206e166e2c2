//! In-memory raster type.

use crate::config::{RGBA_CHANNELS, RGB_CHANNELS};
use crate::error::{Error, Result};

/// A decoded raster whose writable channels host the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carrier {
    width: u32,
    height: u32,
    channels: usize,
    pixels: Vec<u8>,
}

impl Carrier {
    /// Wrap a pixel buffer, checking it against the declared geometry.
    ///
    /// `channels` must be 3 (RGB) or 4 (RGBA), and `pixels` must hold exactly
    /// `width * height * channels` bytes.
    pub fn new(width: u32, height: u32, channels: usize, pixels: Vec<u8>) -> Result<Self> {
        if channels != RGB_CHANNELS && channels != RGBA_CHANNELS {
            return Err(Error::MalformedCarrier(format!(
                "unsupported channel count {}",
                channels
            )));
        }

        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(channels))
            .ok_or_else(|| Error::MalformedCarrier("dimensions overflow".to_string()))?;

        if pixels.len() != expected {
            return Err(Error::MalformedCarrier(format!(
                "buffer holds {} bytes, {}x{}x{} needs {}",
                pixels.len(),
                width,
                height,
                channels,
                expected
            )));
        }

        Ok(Self {
            width,
            height,
            channels,
            pixels,
        })
    }

    /// Build an RGBA carrier.
    pub fn rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        Self::new(width, height, RGBA_CHANNELS, pixels)
    }

    /// Build a carrier with the same geometry and a different buffer.
    pub(crate) fn with_pixels(&self, pixels: Vec<u8>) -> Result<Self> {
        Self::new(self.width, self.height, self.channels, pixels)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channels per pixel.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.pixels.len() / self.channels
    }

    /// Raw interleaved channel bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the carrier, returning its buffer.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Whether the raster has an alpha channel.
    pub fn has_alpha(&self) -> bool {
        self.channels == RGBA_CHANNELS
    }

    /// Alpha plane, one byte per pixel. Empty for RGB rasters.
    pub fn alpha(&self) -> Vec<u8> {
        if !self.has_alpha() {
            return Vec::new();
        }
        self.pixels
            .chunks_exact(self.channels)
            .map(|px| px[RGBA_CHANNELS - 1])
            .collect()
    }
}
