//! Carrier rasters and the capacity model.
//!
//! A carrier is a rectangular grid of 8-bit channel tuples. Only the red,
//! green and blue channels carry payload bits; alpha is left untouched.

mod capacity;
mod raster;

pub use capacity::{available_space, maximum_capacity, CapacityReport};
pub use raster::Carrier;
