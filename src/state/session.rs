use std::fs;
use std::path::{Path, PathBuf};

use super::data::{DerivedImage, Resolution, SessionMetadata, SourceImage};
use crate::codec::encoder::{self, Resample};
use crate::codec::loader;
use crate::error::{DeriveError, LoadError, SaveError};

const MIN_QUALITY: u8 = 1;
const MAX_QUALITY: u8 = 100;
const SAVE_PREFIX: &str = "modified_";

/// Owns the loaded image and its working rendition.
///
/// The working rendition is always re-derived from the pristine source,
/// never from a previous rendition, so repeated slider drags don't stack
/// resampling and quantization loss.
#[derive(Debug, Default)]
pub struct Session {
    source: Option<SourceImage>,
    derived: Option<DerivedImage>,
    save_path: Option<PathBuf>,
    metadata: SessionMetadata,
    accept_png: bool,
}

impl Session {
    pub fn new(accept_png: bool) -> Self {
        Self {
            accept_png,
            ..Self::default()
        }
    }

    /// Load `path`, replacing the current image only on success.
    ///
    /// The working rendition is reset to full resolution at 100% quality,
    /// with the original file size as its byte size.
    pub fn load(&mut self, path: &Path) -> Result<&SourceImage, LoadError> {
        let source = loader::load_source(path, self.accept_png)?;

        self.derived = Some(DerivedImage {
            resolution: source.resolution(),
            quality: MAX_QUALITY,
            byte_size: source.bytes().len() as u64,
            preview: source.image().to_rgba8(),
        });
        self.save_path = Some(modified_path(&source));
        self.metadata = SessionMetadata::project(
            Some(&source),
            self.derived.as_ref(),
            self.save_path.as_deref(),
        );

        Ok(&*self.source.insert(source))
    }

    /// Re-encode the source at `quality`, resized to `target`.
    ///
    /// `None` keeps the current target resolution.
    pub fn rederive(
        &mut self,
        quality: u8,
        target: Option<Resolution>,
    ) -> Result<&DerivedImage, DeriveError> {
        let source = self.source.as_ref().ok_or(DeriveError::NoImage)?;

        if !(MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
            return Err(DeriveError::InvalidQuality(quality));
        }

        let target = target
            .or_else(|| self.derived.as_ref().map(|d| d.resolution))
            .unwrap_or_else(|| source.resolution());
        if !target.is_valid() {
            return Err(DeriveError::InvalidResolution(target));
        }

        let resized = encoder::resize(source.image(), target, Resample::Preview);
        let encoded = encoder::encode_jpeg(&resized, quality).map_err(DeriveError::Encode)?;
        let preview = encoder::decode_jpeg(&encoded)
            .map_err(DeriveError::Decode)?
            .to_rgba8();

        tracing::debug!(
            "Re-derived {} at {}% -> {} bytes",
            target,
            quality,
            encoded.len()
        );

        let derived = DerivedImage {
            resolution: target,
            quality,
            byte_size: encoded.len() as u64,
            preview,
        };
        self.metadata = SessionMetadata::project(
            self.source.as_ref(),
            Some(&derived),
            self.save_path.as_deref(),
        );

        Ok(&*self.derived.insert(derived))
    }

    /// Encode the source at the current resolution and quality with the
    /// export filter and write it to `path`.
    pub fn save_to(&self, path: &Path) -> Result<(), SaveError> {
        let source = self.source.as_ref().ok_or(SaveError::NoImage)?;
        let (target, quality) = match &self.derived {
            Some(derived) => (derived.resolution, derived.quality),
            None => (source.resolution(), MAX_QUALITY),
        };

        let resized = encoder::resize(source.image(), target, Resample::Export);
        let encoded = encoder::encode_jpeg(&resized, quality).map_err(SaveError::Encode)?;

        fs::write(path, &encoded).map_err(|source| SaveError::WriteFailure {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!(
            "Saved {} ({}, {}%, {} bytes)",
            path.display(),
            target,
            quality,
            encoded.len()
        );
        Ok(())
    }

    /// Save to the canonical `modified_<name>` sibling of the source
    pub fn save(&self) -> Result<PathBuf, SaveError> {
        let path = self.save_path.clone().ok_or(SaveError::NoImage)?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    pub fn derived(&self) -> Option<&DerivedImage> {
        self.derived.as_ref()
    }

    pub fn save_path(&self) -> Option<&Path> {
        self.save_path.as_deref()
    }

    pub fn metadata(&self) -> &SessionMetadata {
        &self.metadata
    }
}

/// `<dir>/modified_<name>`. Non-JPEG sources get a `.jpg` extension since
/// the output is always JPEG.
fn modified_path(source: &SourceImage) -> PathBuf {
    let path = source.path();
    let directory = path.parent().unwrap_or_else(|| Path::new(""));
    let mut file_name = PathBuf::from(format!(
        "{SAVE_PREFIX}{}",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    if loader::needs_jpeg_extension(source.format()) {
        file_name.set_extension("jpg");
    }

    directory.join(file_name)
}
