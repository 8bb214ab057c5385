//! Common types for the background removal module

use std::path::PathBuf;

use image::RgbaImage;
use thiserror::Error;

/// Background removal error types
#[derive(Debug, Error)]
pub enum BackgroundError {
    #[error("Image not found: {0}")]
    ImageNotFound(PathBuf),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BackgroundError>;

/// Outcome of processing a single image.
///
/// Skips are deliberate no-op signals, not errors: a batch caller logs them
/// and moves on without writing any output for the image.
#[derive(Debug)]
pub enum RemovalOutcome {
    /// None of the four corners is near-white; the image keeps its border
    /// (protects images with colored or dark edges from unwanted stripping).
    NoEligibleBackground,
    /// Flood fill marked every pixel; there is nothing left to keep.
    EmptyAfterRemoval,
    /// Border made transparent and the result cropped to the opaque content.
    Cropped(RgbaImage),
}

impl RemovalOutcome {
    /// True for either skip variant
    pub fn is_skip(&self) -> bool {
        !matches!(self, RemovalOutcome::Cropped(_))
    }
}

/// Inclusive pixel bounding box (left/top/right/bottom all lie inside the box)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl BoundingBox {
    pub fn width(&self) -> u32 {
        self.right - self.left + 1
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_dimensions() {
        let bbox = BoundingBox {
            left: 1,
            top: 2,
            right: 8,
            bottom: 7,
        };
        assert_eq!(bbox.width(), 8);
        assert_eq!(bbox.height(), 6);
    }

    #[test]
    fn test_bounding_box_single_pixel() {
        let bbox = BoundingBox {
            left: 3,
            top: 3,
            right: 3,
            bottom: 3,
        };
        assert_eq!(bbox.width(), 1);
        assert_eq!(bbox.height(), 1);
    }

    #[test]
    fn test_outcome_is_skip() {
        assert!(RemovalOutcome::NoEligibleBackground.is_skip());
        assert!(RemovalOutcome::EmptyAfterRemoval.is_skip());
        assert!(!RemovalOutcome::Cropped(RgbaImage::new(1, 1)).is_skip());
    }

    #[test]
    fn test_error_display_messages() {
        let err1 = BackgroundError::ImageNotFound(PathBuf::from("/test/path.png"));
        assert!(err1.to_string().contains("not found"));

        let err2 = BackgroundError::InvalidImage("bad format".to_string());
        assert!(err2.to_string().contains("Invalid"));

        let _err3: BackgroundError = std::io::Error::other("test").into();
    }
}
