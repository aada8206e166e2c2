//! PNG loading and saving.
//!
//! Any colour type the `image` crate can read is normalised to RGBA8. Output
//! is always PNG; a lossy format would destroy the LSB plane.

use crate::carrier::Carrier;
use crate::error::{Error, Result};
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::Path;

/// Load an image file as an RGBA carrier.
pub fn load_png(path: &Path) -> Result<Carrier> {
    let image = image::open(path)?;
    carrier_from_image(image)
}

/// Decode in-memory image bytes as an RGBA carrier.
pub fn carrier_from_bytes(bytes: &[u8]) -> Result<Carrier> {
    let image = image::load_from_memory(bytes)?;
    carrier_from_image(image)
}

/// Convert a decoded image into an RGBA carrier.
pub fn carrier_from_image(image: DynamicImage) -> Result<Carrier> {
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    Carrier::rgba(width, height, rgba.into_raw())
}

/// Write the carrier to `path` as PNG.
pub fn save_png(carrier: &Carrier, path: &Path) -> Result<()> {
    let bytes = carrier_to_png_bytes(carrier)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Encode the carrier as PNG bytes.
pub fn carrier_to_png_bytes(carrier: &Carrier) -> Result<Vec<u8>> {
    let image = to_dynamic_image(carrier)?;
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

fn to_dynamic_image(carrier: &Carrier) -> Result<DynamicImage> {
    let pixels = carrier.pixels().to_vec();
    if carrier.has_alpha() {
        RgbaImage::from_raw(carrier.width(), carrier.height(), pixels)
            .map(DynamicImage::ImageRgba8)
            .ok_or_else(|| Error::Image("pixel buffer does not match dimensions".to_string()))
    } else {
        image::RgbImage::from_raw(carrier.width(), carrier.height(), pixels)
            .map(DynamicImage::ImageRgb8)
            .ok_or_else(|| Error::Image("pixel buffer does not match dimensions".to_string()))
    }
}
