/// Error types for the load / derive / save operations
///
/// Every variant is recoverable: the editor turns them into a toast and
/// goes back to idle.
use std::path::PathBuf;
use thiserror::Error;

use crate::state::data::Resolution;

/// Failure while loading a dropped or picked file
#[derive(Debug, Error)]
pub enum LoadError {
    /// Missing file, not a regular file, or an extension we don't accept
    #[error("Invalid image: {name}. {accepted}")]
    InvalidPath { name: String, accepted: &'static str },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode image: {0}")]
    DecodeFailure(#[source] image::ImageError),
}

/// Failure while re-deriving the working image
#[derive(Debug, Error)]
pub enum DeriveError {
    #[error("No image loaded")]
    NoImage,

    #[error("Quality must be between 1 and 100, got {0}")]
    InvalidQuality(u8),

    #[error("Invalid target resolution {0}")]
    InvalidResolution(Resolution),

    #[error("Failed to encode JPEG: {0}")]
    Encode(#[source] image::ImageError),

    #[error("Failed to decode re-encoded JPEG: {0}")]
    Decode(#[source] image::ImageError),
}

/// Failure while writing the modified copy
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("No image loaded")]
    NoImage,

    #[error("Failed to encode JPEG: {0}")]
    Encode(#[source] image::ImageError),

    #[error("Failed to write {path}: {source}")]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unable to locate configuration directory")]
    MissingConfigDir,
}
