use image::codecs::jpeg::JpegEncoder;
use image::{imageops::FilterType, DynamicImage, ImageFormat, ImageResult};

use crate::state::data::Resolution;

/// Which resampling filter to use for a resize
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resample {
    /// Interactive slider feedback: fast
    Preview,
    /// Written to disk: slow but sharp
    Export,
}

impl Resample {
    fn filter(self) -> FilterType {
        match self {
            Resample::Preview => FilterType::Nearest,
            Resample::Export => FilterType::Lanczos3,
        }
    }
}

/// Resize `image` to exactly `target`, skipping the work when nothing changes
pub fn resize(image: &DynamicImage, target: Resolution, resample: Resample) -> DynamicImage {
    if image.width() == target.width && image.height() == target.height {
        return image.clone();
    }
    image.resize_exact(target.width, target.height, resample.filter())
}

/// Encode as baseline JPEG at `quality` (1-100). Alpha is dropped.
pub fn encode_jpeg(image: &DynamicImage, quality: u8) -> ImageResult<Vec<u8>> {
    let rgb = image.to_rgb8();
    let mut buffer = Vec::new();
    JpegEncoder::new_with_quality(&mut buffer, quality).encode_image(&rgb)?;
    Ok(buffer)
}

pub fn decode_jpeg(bytes: &[u8]) -> ImageResult<DynamicImage> {
    image::load_from_memory_with_format(bytes, ImageFormat::Jpeg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::fixtures;

    #[test]
    fn test_resize_is_exact() {
        let image = fixtures::pattern(400, 300);
        for resample in [Resample::Preview, Resample::Export] {
            let resized = resize(&image, Resolution::new(200, 150), resample);
            assert_eq!((resized.width(), resized.height()), (200, 150));
        }
    }

    #[test]
    fn test_lower_quality_is_smaller() {
        let image = fixtures::pattern(120, 90);
        let high = encode_jpeg(&image, 100).unwrap();
        let low = encode_jpeg(&image, 50).unwrap();
        assert!(low.len() < high.len());
    }

    #[test]
    fn test_encode_is_deterministic() {
        let image = fixtures::pattern(64, 48);
        assert_eq!(encode_jpeg(&image, 75).unwrap(), encode_jpeg(&image, 75).unwrap());
    }

    #[test]
    fn test_encoded_bytes_decode_back() {
        let image = fixtures::pattern(33, 17);
        let bytes = encode_jpeg(&image, 80).unwrap();
        let decoded = decode_jpeg(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (33, 17));
    }
}
