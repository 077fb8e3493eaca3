/// Image codec module
///
/// This module handles:
/// - Validating dropped paths and decoding source images (loader.rs)
/// - Resizing and JPEG re-encoding at a given quality (encoder.rs)

pub mod encoder;
pub mod loader;

#[cfg(test)]
pub(crate) mod fixtures;
