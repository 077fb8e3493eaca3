/// Source image loader
///
/// Validates a dropped or picked path and decodes it into a `SourceImage`.
/// Nothing here touches session state, so a failed load can't clobber the
/// image that is already on screen.
use image::ImageFormat;
use std::fs;
use std::path::Path;

use crate::error::LoadError;
use crate::state::data::SourceImage;

/// JPEG family extensions, always accepted
const JPEG_EXTENSIONS: [&str; 2] = ["jpg", "jpeg"];
const PNG_EXTENSION: &str = "png";

/// Extensions accepted for input
pub fn accepted_extensions(accept_png: bool) -> Vec<&'static str> {
    let mut extensions = JPEG_EXTENSIONS.to_vec();
    if accept_png {
        extensions.push(PNG_EXTENSION);
    }
    extensions
}

/// Hint shown to the user when a file is rejected
pub fn accepted_hint(accept_png: bool) -> &'static str {
    if accept_png {
        "Only JPEG and PNG images are supported"
    } else {
        "Only JPEGs are supported"
    }
}

/// Lowercased extension of `path`, if any
fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
}

/// Path exists, is a regular file and has an accepted extension
pub fn is_valid_image_path(path: &Path, accept_png: bool) -> bool {
    let Some(ext) = extension_of(path) else {
        return false;
    };

    path.is_file() && accepted_extensions(accept_png).contains(&ext.as_str())
}

/// Read and decode `path`
pub fn load_source(path: &Path, accept_png: bool) -> Result<SourceImage, LoadError> {
    if !is_valid_image_path(path, accept_png) {
        let name = path
            .file_name()
            .unwrap_or(path.as_os_str())
            .to_string_lossy()
            .to_string();
        return Err(LoadError::InvalidPath {
            name,
            accepted: accepted_hint(accept_png),
        });
    }

    let bytes = fs::read(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    // Trust the content over the extension; a .jpg that is really a PNG still decodes
    let format = image::guess_format(&bytes).map_err(LoadError::DecodeFailure)?;
    let decoded = image::load_from_memory_with_format(&bytes, format)
        .map_err(LoadError::DecodeFailure)?;

    tracing::debug!(
        "Decoded {} ({:?}, {}x{}, {} bytes)",
        path.display(),
        format,
        decoded.width(),
        decoded.height(),
        bytes.len()
    );

    Ok(SourceImage::new(path.to_path_buf(), bytes, decoded, format))
}

/// Whether the output needs a `.jpg` extension instead of the source one
pub fn needs_jpeg_extension(format: ImageFormat) -> bool {
    format != ImageFormat::Jpeg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::fixtures;

    #[test]
    fn test_accepts_jpeg_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixtures::write_jpeg(dir.path(), "PHOTO.JPG", 40, 30);

        assert!(is_valid_image_path(&path, false));
        let source = load_source(&path, false).unwrap();
        assert_eq!(source.format(), ImageFormat::Jpeg);
        assert_eq!(source.resolution().width, 40);
        assert_eq!(source.resolution().height, 30);
        assert_eq!(source.bytes().len() as u64, fs::metadata(&path).unwrap().len());
    }

    #[test]
    fn test_rejects_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("readme.txt");
        fs::write(&path, "hello").unwrap();

        let err = load_source(&path, false).unwrap_err();
        assert!(matches!(err, LoadError::InvalidPath { ref name, .. } if name == "readme.txt"));
        assert_eq!(err.to_string(), "Invalid image: readme.txt. Only JPEGs are supported");
    }

    #[test]
    fn test_rejects_missing_file_and_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!is_valid_image_path(&dir.path().join("missing.jpg"), false));

        let folder = dir.path().join("folder.jpg");
        fs::create_dir(&folder).unwrap();
        assert!(!is_valid_image_path(&folder, false));
    }

    #[test]
    fn test_png_only_when_enabled() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixtures::write_png(dir.path(), "shot.png", 8, 8);

        assert!(matches!(
            load_source(&path, false),
            Err(LoadError::InvalidPath { .. })
        ));
        let source = load_source(&path, true).unwrap();
        assert_eq!(source.format(), ImageFormat::Png);
        assert!(needs_jpeg_extension(source.format()));
    }

    #[test]
    fn test_corrupt_jpeg_is_decode_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        fs::write(&path, b"\xff\xd8\xff\xe0 definitely not a jpeg").unwrap();

        assert!(matches!(
            load_source(&path, false),
            Err(LoadError::DecodeFailure(_))
        ));
    }
}
