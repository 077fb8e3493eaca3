/// Synthetic test images
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::path::{Path, PathBuf};

use super::encoder;

/// Busy RGB pattern so JPEG quality has a visible effect on size
pub fn pattern(width: u32, height: u32) -> DynamicImage {
    let image = RgbImage::from_fn(width, height, |x, y| {
        let noise = (x.wrapping_mul(7919) ^ y.wrapping_mul(104_729)).wrapping_mul(2_654_435_761) >> 24;
        Rgb([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            noise as u8,
        ])
    });
    DynamicImage::ImageRgb8(image)
}

pub fn write_jpeg(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    let bytes = encoder::encode_jpeg(&pattern(width, height), 100).unwrap();
    std::fs::write(&path, bytes).unwrap();
    path
}

pub fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    pattern(width, height)
        .save_with_format(&path, ImageFormat::Png)
        .unwrap();
    path
}
