//! Static fallback image for the live feed.
//!
//! Resolved once at startup and immutable afterwards. Viewers see it
//! whenever no live frame is available, so the feed degrades to a still
//! image instead of freezing or breaking.

use crate::error::{Result, ServerError};
use bytes::Bytes;
use image::{imageops::FilterType, DynamicImage, ImageOutputFormat, RgbImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Placeholder frames are normalized to this size before encoding.
pub const PLACEHOLDER_WIDTH: u32 = 640;
/// See [`PLACEHOLDER_WIDTH`].
pub const PLACEHOLDER_HEIGHT: u32 = 480;

const JPEG_QUALITY: u8 = 80;

/// A pre-encoded JPEG shown when no live frame is available.
#[derive(Debug, Clone)]
pub struct PlaceholderImage {
    bytes: Bytes,
}

impl PlaceholderImage {
    /// Resolve the placeholder from an ordered list of candidate paths.
    ///
    /// The first candidate that exists and decodes wins; it is resized to
    /// 640x480 and re-encoded as JPEG. If no candidate works, a black
    /// fallback is synthesized; if even that fails to encode, the
    /// placeholder is empty and the stream loop suspends until live
    /// frames arrive.
    pub fn load(candidates: &[PathBuf]) -> Self {
        for path in candidates {
            if !path.is_file() {
                continue;
            }
            match Self::load_file(path) {
                Ok(bytes) => {
                    info!("Loaded placeholder image from {:?}", path);
                    return Self { bytes };
                }
                Err(e) => {
                    warn!("Skipping placeholder candidate {:?}: {}", path, e);
                }
            }
        }

        warn!("No usable placeholder image found, using black fallback");
        Self::fallback()
    }

    /// Build a placeholder directly from pre-encoded bytes.
    ///
    /// Empty bytes are allowed and mean "no placeholder at all"; the
    /// stream loop then suspends until live frames arrive instead of
    /// emitting parts.
    pub fn from_bytes(bytes: Bytes) -> Self {
        Self { bytes }
    }

    /// Synthesize a black 640x480 JPEG placeholder.
    pub fn fallback() -> Self {
        let black = RgbImage::new(PLACEHOLDER_WIDTH, PLACEHOLDER_HEIGHT);
        match encode_jpeg(&DynamicImage::ImageRgb8(black)) {
            Ok(bytes) => Self { bytes },
            Err(e) => {
                warn!("Failed to encode fallback placeholder: {}", e);
                Self { bytes: Bytes::new() }
            }
        }
    }

    fn load_file(path: &Path) -> Result<Bytes> {
        let raw = std::fs::read(path)?;
        let img = image::load_from_memory(&raw)
            .map_err(|e| ServerError::image_error(format!("decode failed: {}", e)))?;
        let resized = img.resize_exact(PLACEHOLDER_WIDTH, PLACEHOLDER_HEIGHT, FilterType::Triangle);
        encode_jpeg(&resized)
    }

    /// The encoded placeholder bytes. Empty only if even the synthesized
    /// fallback could not be encoded.
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Whether any placeholder bytes are available at all.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

fn encode_jpeg(img: &DynamicImage) -> Result<Bytes> {
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageOutputFormat::Jpeg(JPEG_QUALITY))
        .map_err(|e| ServerError::image_error(format!("encode failed: {}", e)))?;
    Ok(Bytes::from(out.into_inner()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_preserves_emptiness() {
        let empty = PlaceholderImage::from_bytes(Bytes::new());
        assert!(empty.is_empty());

        let preset = PlaceholderImage::from_bytes(Bytes::from_static(b"jpeg"));
        assert!(!preset.is_empty());
        assert_eq!(&preset.bytes()[..], b"jpeg");
    }

    #[test]
    fn test_fallback_is_a_jpeg() {
        let placeholder = PlaceholderImage::fallback();
        assert!(!placeholder.is_empty());
        // JPEG SOI marker
        assert_eq!(&placeholder.bytes()[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_missing_candidates_fall_back() {
        let candidates = vec![
            PathBuf::from("/nonexistent/placeholder.jpg"),
            PathBuf::from("/also/nonexistent/loading.png"),
        ];
        let placeholder = PlaceholderImage::load(&candidates);
        assert!(!placeholder.is_empty());
        assert_eq!(&placeholder.bytes()[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_undecodable_candidate_is_skipped() {
        let dir = std::env::temp_dir();
        let bogus = dir.join("crashwatch_test_bogus_placeholder.jpg");
        std::fs::write(&bogus, b"not an image at all").unwrap();

        let placeholder = PlaceholderImage::load(&[bogus.clone()]);
        assert!(!placeholder.is_empty());

        std::fs::remove_file(bogus).ok();
    }

    #[test]
    fn test_valid_candidate_wins() {
        let dir = std::env::temp_dir();
        let path = dir.join("crashwatch_test_valid_placeholder.png");

        // A tiny PNG; load() should decode it, resize, and re-encode as JPEG.
        let img = RgbImage::from_pixel(8, 8, image::Rgb([255, 0, 0]));
        img.save(&path).unwrap();

        let placeholder = PlaceholderImage::load(&[path.clone()]);
        assert!(!placeholder.is_empty());
        assert_eq!(&placeholder.bytes()[..2], &[0xFF, 0xD8]);

        std::fs::remove_file(path).ok();
    }
}
