//! Capacity model.
//!
//! Capacity is derived from the pixel count only:
//! `usable_bytes = floor(pixels * 3 / 8)`, of which the first
//! [`HEADER_SIZE`] bytes are reserved for the container header.

use crate::carrier::Carrier;
use crate::config::{HEADER_SIZE, WRITABLE_CHANNELS};
use serde::Serialize;

/// Total container bytes the carrier can host.
pub fn maximum_capacity(carrier: &Carrier) -> usize {
    carrier.pixel_count() * WRITABLE_CHANNELS / 8
}

/// Bytes left for the (compressed) blob once the header is accounted for.
///
/// Zero when the carrier cannot hold the header at all.
pub fn available_space(carrier: &Carrier) -> usize {
    maximum_capacity(carrier).saturating_sub(HEADER_SIZE)
}

/// Capacity summary for a carrier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityReport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Number of pixels.
    pub total_pixels: usize,
    /// Total container bytes.
    pub maximum_capacity: usize,
    /// Bytes available for the blob.
    pub available_space: usize,
}

impl CapacityReport {
    /// Compute the report for a carrier.
    pub fn for_carrier(carrier: &Carrier) -> Self {
        Self {
            width: carrier.width(),
            height: carrier.height(),
            total_pixels: carrier.pixel_count(),
            maximum_capacity: maximum_capacity(carrier),
            available_space: available_space(carrier),
        }
    }

    /// Whether the carrier can hold at least the header.
    pub fn can_hold_header(&self) -> bool {
        self.maximum_capacity >= HEADER_SIZE
    }
}
