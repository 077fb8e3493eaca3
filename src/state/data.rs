/// Shared data structures for the editing session
///
/// These structs represent the data model that flows between
/// the codec layer, the session and the UI layer.
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::fmt;
use std::path::{Path, PathBuf};

const SIZE_UNITS: [&str; 9] = ["B", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Pixel dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Both dimensions are at least one pixel
    pub fn is_valid(&self) -> bool {
        self.width >= 1 && self.height >= 1
    }

    /// Scale both dimensions by `numerator / denominator`, truncating.
    ///
    /// Integer arithmetic, so 400x300 at 50/100 is exactly 200x150.
    pub fn scaled(&self, numerator: u32, denominator: u32) -> Self {
        if denominator == 0 {
            return *self;
        }
        let scale = |v: u32| (u64::from(v) * u64::from(numerator) / u64::from(denominator)) as u32;
        Self::new(scale(self.width), scale(self.height))
    }

    /// Clamp each dimension up to one pixel
    pub fn at_least_one(self) -> Self {
        Self::new(self.width.max(1), self.height.max(1))
    }

    /// Width over height (1.0 for degenerate sizes)
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.width, self.height)
    }
}

/// The pristine image as loaded from disk. Never mutated.
#[derive(Debug, Clone)]
pub struct SourceImage {
    path: PathBuf,
    bytes: Vec<u8>,
    image: DynamicImage,
    format: ImageFormat,
}

impl SourceImage {
    pub(crate) fn new(path: PathBuf, bytes: Vec<u8>, image: DynamicImage, format: ImageFormat) -> Self {
        Self {
            path,
            bytes,
            image,
            format,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw file contents
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn resolution(&self) -> Resolution {
        Resolution::new(self.image.width(), self.image.height())
    }
}

/// The working rendition shown in the preview
#[derive(Debug, Clone)]
pub struct DerivedImage {
    pub resolution: Resolution,
    /// JPEG quality, 1-100
    pub quality: u8,
    /// Size of the encoded JPEG in bytes
    pub byte_size: u64,
    /// Decoded pixels of the encoded JPEG, artifacts included
    pub preview: RgbaImage,
}

/// Display strings for the info panel. Never authoritative.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionMetadata {
    pub original_resolution: String,
    pub new_resolution: String,
    pub save_path: String,
    pub quality: String,
    pub size: String,
}

impl SessionMetadata {
    pub fn project(
        source: Option<&SourceImage>,
        derived: Option<&DerivedImage>,
        save_path: Option<&Path>,
    ) -> Self {
        Self {
            original_resolution: source
                .map(|s| s.resolution().to_string())
                .unwrap_or_default(),
            new_resolution: derived
                .map(|d| d.resolution.to_string())
                .unwrap_or_default(),
            save_path: save_path
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            quality: derived
                .map(|d| format!("{}%", d.quality))
                .unwrap_or_default(),
            size: derived
                .map(|d| format_byte_count(d.byte_size))
                .unwrap_or_default(),
        }
    }

    /// Label/value pairs in display order
    pub fn entries(&self) -> [(&'static str, &str); 5] {
        [
            ("Original Image Resolution", self.original_resolution.as_str()),
            ("New Image Resolution", self.new_resolution.as_str()),
            ("Save path", self.save_path.as_str()),
            ("Quality", self.quality.as_str()),
            ("Size", self.size.as_str()),
        ]
    }
}

/// Human readable byte count using 1024-based units.
///
/// The value is rounded to two decimals, ties to even, and printed the
/// shortest way that round-trips, so 1536 is "1.5 KB" and 1024 is "1.0 KB".
pub fn format_byte_count(total_bytes: u64) -> String {
    if total_bytes == 0 {
        return "0B".to_string();
    }

    let mut power = 0;
    let mut divisor: u128 = 1;
    while power + 1 < SIZE_UNITS.len() && u128::from(total_bytes) >= divisor * 1024 {
        divisor *= 1024;
        power += 1;
    }

    let converted = total_bytes as f64 / divisor as f64;
    let rounded = (converted * 100.0).round_ties_even() / 100.0;
    format!("{:?} {}", rounded, SIZE_UNITS[power])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_bytes() {
        assert_eq!(format_byte_count(0), "0B");
    }

    #[test]
    fn test_unit_selection() {
        assert_eq!(format_byte_count(1), "1.0 B");
        assert_eq!(format_byte_count(1023), "1023.0 B");
        assert_eq!(format_byte_count(1024), "1.0 KB");
        assert_eq!(format_byte_count(1536), "1.5 KB");
        assert_eq!(format_byte_count(3 * 1024 * 1024), "3.0 MB");
        assert_eq!(format_byte_count(5 * 1024 * 1024 * 1024), "5.0 GB");
    }

    #[test]
    fn test_two_decimal_rounding() {
        // 1234 / 1024 = 1.205078...
        assert_eq!(format_byte_count(1234), "1.21 KB");
        // 1048575 / 1024 = 1023.999...
        assert_eq!(format_byte_count(1_048_575), "1024.0 KB");
    }

    #[test]
    fn test_exact_ties_round_to_even() {
        // 1152 / 1024 = 1.125, 1664 / 1024 = 1.625
        assert_eq!(format_byte_count(1152), "1.12 KB");
        assert_eq!(format_byte_count(1664), "1.62 KB");
        // 1408 / 1024 = 1.375
        assert_eq!(format_byte_count(1408), "1.38 KB");
    }

    #[test]
    fn test_largest_count_uses_exabytes() {
        assert!(format_byte_count(u64::MAX).ends_with(" EB"));
    }

    #[test]
    fn test_resolution_scaling_is_exact() {
        let original = Resolution::new(400, 300);
        assert_eq!(original.scaled(50, 100), Resolution::new(200, 150));
        assert_eq!(original.scaled(100, 100), original);
        assert_eq!(original.scaled(1, 100), Resolution::new(4, 3));
    }

    #[test]
    fn test_tiny_resolution_clamps_to_one() {
        let tiny = Resolution::new(3, 1).scaled(10, 100);
        assert!(!tiny.is_valid());
        assert_eq!(tiny.at_least_one(), Resolution::new(1, 1));
    }

    #[test]
    fn test_metadata_entries_are_ordered() {
        let metadata = SessionMetadata {
            original_resolution: "400 x 300".into(),
            new_resolution: "200 x 150".into(),
            save_path: "/tmp/modified_a.jpg".into(),
            quality: "50%".into(),
            size: "1.5 KB".into(),
        };
        let labels: Vec<_> = metadata.entries().iter().map(|(label, _)| *label).collect();
        assert_eq!(
            labels,
            ["Original Image Resolution", "New Image Resolution", "Save path", "Quality", "Size"]
        );
    }
}
