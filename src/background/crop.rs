//! Transparency application and content cropping
//!
//! Consumes the visited mask produced by the flood fill: marked pixels get
//! their alpha zeroed (RGB untouched), then the image is cropped to the
//! minimal bounding box of the remaining opaque pixels.

use image::{imageops, RgbaImage};

use super::flood::VisitedMask;
use super::types::BoundingBox;

/// Zero the alpha of every masked pixel and crop to the opaque content.
///
/// Returns `None` when no opaque pixel remains, i.e. the whole image was
/// background.
pub fn apply_and_crop(mut image: RgbaImage, mask: &VisitedMask) -> Option<RgbaImage> {
    debug_assert_eq!(image.dimensions(), mask.dimensions());

    for (x, y, pixel) in image.enumerate_pixels_mut() {
        if mask.get(x, y) {
            pixel.0[3] = 0;
        }
    }

    let bbox = opaque_bounds(&image)?;

    let (width, height) = image.dimensions();
    if bbox.width() == width && bbox.height() == height {
        return Some(image);
    }

    Some(imageops::crop_imm(&image, bbox.left, bbox.top, bbox.width(), bbox.height()).to_image())
}

/// Minimal bounding box over pixels with non-zero alpha; `None` for a fully
/// transparent image.
pub fn opaque_bounds(image: &RgbaImage) -> Option<BoundingBox> {
    let mut bbox: Option<BoundingBox> = None;

    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel.0[3] == 0 {
            continue;
        }
        match bbox.as_mut() {
            None => {
                bbox = Some(BoundingBox {
                    left: x,
                    top: y,
                    right: x,
                    bottom: y,
                });
            }
            Some(b) => {
                b.left = b.left.min(x);
                b.top = b.top.min(y);
                b.right = b.right.max(x);
                b.bottom = b.bottom.max(y);
            }
        }
    }

    bbox
}
