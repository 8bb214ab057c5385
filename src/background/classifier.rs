//! Background color classification
//!
//! Decides whether a pixel counts as background, given reference colors
//! sampled from the image corners and a per-channel tolerance.

use image::{Rgba, RgbaImage};

/// Classifier built from the near-white corner colors of one image.
///
/// Construction samples exactly the four corner pixels and keeps those that
/// pass the near-white test. Zero qualifying corners means the image has no
/// eligible background and must not be stripped.
#[derive(Debug, Clone)]
pub struct BackgroundClassifier {
    references: Vec<[u8; 3]>,
    tolerance: u8,
}

impl BackgroundClassifier {
    /// Sample the four corners of `image` and build a classifier from the
    /// near-white ones. Returns `None` when no corner qualifies.
    pub fn from_corners(image: &RgbaImage, tolerance: u8) -> Option<Self> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return None;
        }

        let corners = [
            (0, 0),
            (width - 1, 0),
            (0, height - 1),
            (width - 1, height - 1),
        ];

        let mut references: Vec<[u8; 3]> = Vec::with_capacity(corners.len());
        for (x, y) in corners {
            let rgb = rgb_of(image.get_pixel(x, y));
            if is_near_white(rgb, tolerance) && !references.contains(&rgb) {
                references.push(rgb);
            }
        }

        if references.is_empty() {
            None
        } else {
            Some(Self {
                references,
                tolerance,
            })
        }
    }

    /// True iff the pixel is within tolerance of any reference color, or
    /// independently near-white. The fallback catches light background pixels
    /// that drifted from the corner samples (compression noise). Alpha is
    /// ignored.
    pub fn is_background(&self, pixel: &Rgba<u8>) -> bool {
        let rgb = rgb_of(pixel);

        if self
            .references
            .iter()
            .any(|reference| within_tolerance(rgb, *reference, self.tolerance))
        {
            return true;
        }

        is_near_white(rgb, self.tolerance)
    }

    /// Number of distinct reference colors (1-4)
    pub fn reference_count(&self) -> usize {
        self.references.len()
    }

    /// Per-channel tolerance this classifier was built with
    pub fn tolerance(&self) -> u8 {
        self.tolerance
    }
}

/// Every channel within `tolerance` of 255
pub(crate) fn is_near_white(rgb: [u8; 3], tolerance: u8) -> bool {
    rgb.iter().all(|&channel| channel >= 255 - tolerance)
}

fn within_tolerance(a: [u8; 3], b: [u8; 3], tolerance: u8) -> bool {
    a.iter()
        .zip(b.iter())
        .all(|(&x, &y)| x.abs_diff(y) <= tolerance)
}

fn rgb_of(pixel: &Rgba<u8>) -> [u8; 3] {
    [pixel.0[0], pixel.0[1], pixel.0[2]]
}
