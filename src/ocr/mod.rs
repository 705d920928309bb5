pub mod engine;
pub mod preprocess;
pub mod setup;

pub use engine::recognize_image;
pub use setup::ensure_tesseract;

use anyhow::Result;
use image::{ImageBuffer, Rgba};

use crate::config::RelativeRect;
use crate::decode::TextBound;
use preprocess::{crop_region, threshold_bright_pixels};

/// High-level function: frame → region crop → preprocess → text bounds.
pub fn scan_region(
    img: &ImageBuffer<Rgba<u8>, Vec<u8>>,
    region: &RelativeRect,
    threshold: u8,
) -> Result<Vec<TextBound>> {
    let cropped = crop_region(img, region);
    let preprocessed = threshold_bright_pixels(&cropped, threshold);
    recognize_image(&preprocessed)
}
