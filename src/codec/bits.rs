//! Bit-level embedding into channel LSBs.
//!
//! Pixels are visited in ascending buffer order and, within a pixel, the
//! red, green and blue channels in that order. Each data byte is written
//! most-significant bit first. This traversal order is the only thing tying
//! a writer to a reader and is not configurable.

use crate::config::WRITABLE_CHANNELS;
use crate::error::{Error, Result};
use rand::{CryptoRng, RngCore};

/// Cryptographically secure randomness for padding bits and IVs.
pub trait RandomSource: RngCore + CryptoRng {}

impl<T: RngCore + CryptoRng + ?Sized> RandomSource for T {}

/// Hands out random bits one at a time, 64 per draw.
struct PaddingBits<'a, R: RandomSource + ?Sized> {
    rng: &'a mut R,
    word: u64,
    remaining: u32,
}

impl<'a, R: RandomSource + ?Sized> PaddingBits<'a, R> {
    fn new(rng: &'a mut R) -> Self {
        Self {
            rng,
            word: 0,
            remaining: 0,
        }
    }

    fn next_bit(&mut self) -> u8 {
        if self.remaining == 0 {
            self.word = self.rng.next_u64();
            self.remaining = u64::BITS;
        }
        let bit = (self.word & 1) as u8;
        self.word >>= 1;
        self.remaining -= 1;
        bit
    }
}

/// Reject pixel layouts without a full set of writable channels.
pub(crate) fn check_channels(channels: usize) -> Result<()> {
    if channels < WRITABLE_CHANNELS {
        return Err(Error::MalformedCarrier(format!(
            "{} channels per pixel, at least {} required",
            channels, WRITABLE_CHANNELS
        )));
    }
    Ok(())
}

/// Number of bits the writable channels of `pixels` can hold.
fn capacity_bits(pixels: &[u8], channels: usize) -> usize {
    (pixels.len() / channels) * WRITABLE_CHANNELS
}

/// Embed `data` into the LSBs of a copy of `pixels`.
///
/// Every writable channel past the end of `data` receives a fresh random
/// bit, so the payload boundary is not visible in the LSB plane. All other
/// bits, and the whole alpha channel, are copied unchanged.
pub fn embed<R: RandomSource + ?Sized>(
    pixels: &[u8],
    channels: usize,
    data: &[u8],
    rng: &mut R,
) -> Result<Vec<u8>> {
    check_channels(channels)?;

    let total_bits = data.len() * 8;
    let available_bits = capacity_bits(pixels, channels);
    if total_bits > available_bits {
        return Err(Error::CapacityExceeded {
            needed: data.len(),
            available: available_bits / 8,
        });
    }

    let mut output = pixels.to_vec();
    let mut padding = PaddingBits::new(rng);
    let mut bit_index = 0usize;

    for pixel in output.chunks_exact_mut(channels) {
        for channel in pixel.iter_mut().take(WRITABLE_CHANNELS) {
            let bit = if bit_index < total_bits {
                (data[bit_index / 8] >> (7 - bit_index % 8)) & 1
            } else {
                padding.next_bit()
            };
            *channel = (*channel & 0xFE) | bit;
            bit_index += 1;
        }
    }

    Ok(output)
}

/// Read LSBs back into bytes.
///
/// Stops after `byte_count` bytes when given, otherwise at the end of the
/// buffer. Trailing bits that do not complete a byte are dropped. No
/// validation of the content happens here.
pub fn extract(pixels: &[u8], channels: usize, byte_count: Option<usize>) -> Result<Vec<u8>> {
    check_channels(channels)?;

    let max_bytes = capacity_bits(pixels, channels) / 8;
    let limit = byte_count.map_or(max_bytes, |n| n.min(max_bytes));

    let mut bytes = Vec::with_capacity(limit);
    let mut current = 0u8;
    let mut filled = 0u8;

    'outer: for pixel in pixels.chunks_exact(channels) {
        for channel in pixel.iter().take(WRITABLE_CHANNELS) {
            if bytes.len() == limit {
                break 'outer;
            }
            current = (current << 1) | (channel & 1);
            filled += 1;
            if filled == 8 {
                bytes.push(current);
                current = 0;
                filled = 0;
            }
        }
    }

    Ok(bytes)
}
