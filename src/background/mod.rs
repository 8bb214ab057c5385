//! Edge-connected background removal
//!
//! Makes the light-colored border of a screenshot transparent and crops the
//! result to its opaque content, while leaving near-white regions that are
//! enclosed by content (white text, icons) untouched.
//!
//! # Algorithm
//!
//! 1. Sample the four corner pixels as background candidates (near-white only)
//! 2. Flood fill from every border pixel that matches the background criteria
//! 3. Only pixels reached by the fill become transparent
//! 4. Crop the resulting transparent border
//!
//! Distinguishing "background" (edge-connected) from "internal light color"
//! (topologically interior) is a connectivity problem, which is why this is a
//! flood fill and not a global color threshold.
//!
//! # Example
//!
//! ```rust,no_run
//! use cardcrop::{BackgroundRemover, RemovalOptions, RemovalOutcome};
//! use std::path::Path;
//!
//! let options = RemovalOptions::default();
//! let outcome = BackgroundRemover::process_file(Path::new("card.png"), &options).unwrap();
//!
//! match outcome {
//!     RemovalOutcome::Cropped(image) => image.save("card_cropped.png").unwrap(),
//!     skip => println!("skipped: {:?}", skip),
//! }
//! ```

// Submodules
mod classifier;
mod crop;
mod flood;
mod types;

// Re-export public API
pub use classifier::BackgroundClassifier;
pub use crop::{apply_and_crop, opaque_bounds};
pub use flood::{flood_mark, VisitedMask};
pub use types::{BackgroundError, BoundingBox, RemovalOutcome, Result};

use std::path::Path;

use image::RgbaImage;
use tracing::debug;

// ============================================================
// Constants
// ============================================================

/// Default per-channel tolerance for background matching (0-255)
pub const DEFAULT_TOLERANCE: u8 = 15;

/// Tolerance for the strict preset
const STRICT_TOLERANCE: u8 = 8;

/// Tolerance for the permissive preset
const PERMISSIVE_TOLERANCE: u8 = 40;

// ============================================================
// Options
// ============================================================

/// Background removal options
#[derive(Debug, Clone)]
pub struct RemovalOptions {
    /// Per-channel absolute-difference threshold (0-255). Two colors are
    /// close iff every channel differs by at most this much.
    pub tolerance: u8,
}

impl Default for RemovalOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl RemovalOptions {
    /// Create a new options builder
    pub fn builder() -> RemovalOptionsBuilder {
        RemovalOptionsBuilder::default()
    }

    /// Options for clean renders with uniform backgrounds
    pub fn strict() -> Self {
        Self {
            tolerance: STRICT_TOLERANCE,
        }
    }

    /// Options for heavily compressed screenshots with noisy backgrounds
    pub fn permissive() -> Self {
        Self {
            tolerance: PERMISSIVE_TOLERANCE,
        }
    }
}

/// Builder for RemovalOptions
#[derive(Debug, Default)]
pub struct RemovalOptionsBuilder {
    options: RemovalOptions,
}

impl RemovalOptionsBuilder {
    /// Set the per-channel tolerance (0-255)
    #[must_use]
    pub fn tolerance(mut self, tolerance: u8) -> Self {
        self.options.tolerance = tolerance;
        self
    }

    /// Build the options
    #[must_use]
    pub fn build(self) -> RemovalOptions {
        self.options
    }
}

// ============================================================
// Background Remover
// ============================================================

/// Edge-connected background remover
pub struct BackgroundRemover;

impl BackgroundRemover {
    /// Process a single decoded image.
    ///
    /// Pure and deterministic; the input is not modified. Skip outcomes mean
    /// the caller should keep the original image as-is.
    pub fn process(image: &RgbaImage, options: &RemovalOptions) -> RemovalOutcome {
        let Some(classifier) = BackgroundClassifier::from_corners(image, options.tolerance) else {
            debug!("no near-white corner, leaving image untouched");
            return RemovalOutcome::NoEligibleBackground;
        };

        let mask = flood_mark(image, &classifier);
        debug!(
            references = classifier.reference_count(),
            marked = mask.marked_count(),
            "flood fill complete"
        );

        match apply_and_crop(image.clone(), &mask) {
            Some(cropped) => RemovalOutcome::Cropped(cropped),
            None => RemovalOutcome::EmptyAfterRemoval,
        }
    }

    /// Decode an image file and process it.
    ///
    /// Decode failures are per-file errors; a batch caller logs them and
    /// continues.
    pub fn process_file(path: &Path, options: &RemovalOptions) -> Result<RemovalOutcome> {
        if !path.exists() {
            return Err(BackgroundError::ImageNotFound(path.to_path_buf()));
        }

        let image = image::open(path)
            .map_err(|e| BackgroundError::InvalidImage(e.to_string()))?
            .to_rgba8();

        Ok(Self::process(&image, options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const RED: Rgba<u8> = Rgba([200, 0, 0, 255]);

    #[test]
    fn test_default_options() {
        let opts = RemovalOptions::default();
        assert_eq!(opts.tolerance, 15);
    }

    #[test]
    fn test_builder_pattern() {
        let opts = RemovalOptions::builder().tolerance(30).build();
        assert_eq!(opts.tolerance, 30);
    }

    #[test]
    fn test_presets() {
        assert!(RemovalOptions::strict().tolerance < RemovalOptions::default().tolerance);
        assert!(RemovalOptions::permissive().tolerance > RemovalOptions::default().tolerance);
    }

    #[test]
    fn test_all_white_is_empty_after_removal() {
        let image = RgbaImage::from_pixel(10, 10, WHITE);
        let outcome = BackgroundRemover::process(&image, &RemovalOptions::default());
        assert!(matches!(outcome, RemovalOutcome::EmptyAfterRemoval));
    }

    #[test]
    fn test_white_border_red_interior() {
        let mut image = RgbaImage::from_pixel(10, 10, RED);
        for x in 0..10 {
            for y in 0..10 {
                if x == 0 || y == 0 || x == 9 || y == 9 {
                    image.put_pixel(x, y, WHITE);
                }
            }
        }

        let outcome = BackgroundRemover::process(&image, &RemovalOptions::default());
        let RemovalOutcome::Cropped(cropped) = outcome else {
            panic!("expected cropped output");
        };

        assert_eq!(cropped.dimensions(), (8, 8));
        for pixel in cropped.pixels() {
            assert_eq!(*pixel, RED);
        }
    }

    #[test]
    fn test_dark_corners_skip() {
        // Corners are black, interior is white: protected from stripping
        let mut image = RgbaImage::from_pixel(10, 10, WHITE);
        for (x, y) in [(0, 0), (9, 0), (0, 9), (9, 9)] {
            image.put_pixel(x, y, Rgba([0, 0, 0, 255]));
        }

        let outcome = BackgroundRemover::process(&image, &RemovalOptions::default());
        assert!(matches!(outcome, RemovalOutcome::NoEligibleBackground));
    }

    #[test]
    fn test_enclosed_white_island_preserved() {
        // White border, white moat, red ring, white island. Moat goes
        // transparent, island stays opaque.
        let mut image = RgbaImage::from_pixel(11, 11, WHITE);
        for x in 2..9 {
            for y in 2..9 {
                if x == 2 || y == 2 || x == 8 || y == 8 {
                    image.put_pixel(x, y, RED);
                }
            }
        }

        let outcome = BackgroundRemover::process(&image, &RemovalOptions::default());
        let RemovalOutcome::Cropped(cropped) = outcome else {
            panic!("expected cropped output");
        };

        // Cropped to the 7x7 ring-plus-island region
        assert_eq!(cropped.dimensions(), (7, 7));
        assert_eq!(*cropped.get_pixel(0, 0), RED);
        // Island center: opaque white
        assert_eq!(*cropped.get_pixel(3, 3), WHITE);
    }

    #[test]
    fn test_idempotent_on_own_output() {
        // An image whose border is already transparent white re-processes to
        // the same content without marking additional opaque pixels.
        let mut image = RgbaImage::from_pixel(10, 10, RED);
        for x in 0..10 {
            for y in 0..10 {
                if x == 0 || y == 0 || x == 9 || y == 9 {
                    image.put_pixel(x, y, Rgba([255, 255, 255, 0]));
                }
            }
        }

        let outcome = BackgroundRemover::process(&image, &RemovalOptions::default());
        let RemovalOutcome::Cropped(cropped) = outcome else {
            panic!("expected cropped output");
        };

        assert_eq!(cropped.dimensions(), (8, 8));
        for pixel in cropped.pixels() {
            assert_eq!(*pixel, RED);
        }
    }

    #[test]
    fn test_process_keeps_input_unchanged() {
        let image = RgbaImage::from_pixel(10, 10, WHITE);
        let before = image.clone();
        let _ = BackgroundRemover::process(&image, &RemovalOptions::default());
        assert_eq!(image, before);
    }

    #[test]
    fn test_process_file_not_found() {
        let result = BackgroundRemover::process_file(
            Path::new("/nonexistent/image.png"),
            &RemovalOptions::default(),
        );
        assert!(matches!(result, Err(BackgroundError::ImageNotFound(_))));
    }

    #[test]
    fn test_process_file_invalid_image() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("not_an_image.png");
        std::fs::write(&path, b"this is not a png").unwrap();

        let result = BackgroundRemover::process_file(&path, &RemovalOptions::default());
        assert!(matches!(result, Err(BackgroundError::InvalidImage(_))));
    }
}
