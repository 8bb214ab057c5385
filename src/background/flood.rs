//! Edge-seeded flood fill
//!
//! Multi-source breadth-first expansion over the pixel grid, seeded from
//! every border pixel that classifies as background. A pixel ends up marked
//! iff a 4-connected path of background-classified pixels links it to such a
//! border pixel, which is what separates removable background from interior
//! near-white regions (white text or icons inside the content).

use std::collections::VecDeque;

use image::RgbaImage;

use super::classifier::BackgroundClassifier;

/// Mask of background-connected pixels, row-major, same dimensions as the
/// image it was built from. Allocated fresh per image and consumed once by
/// the transparency pass.
#[derive(Debug, Clone)]
pub struct VisitedMask {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl VisitedMask {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![false; (width * height) as usize],
        }
    }

    pub fn get(&self, x: u32, y: u32) -> bool {
        self.cells[(y * self.width + x) as usize]
    }

    fn set(&mut self, x: u32, y: u32) {
        self.cells[(y * self.width + x) as usize] = true;
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of marked pixels
    pub fn marked_count(&self) -> usize {
        self.cells.iter().filter(|&&visited| visited).count()
    }

    /// True when every pixel is marked
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&visited| visited)
    }
}

/// 4-connected neighborhood; diagonals are deliberately excluded so the fill
/// cannot leak through single-pixel-wide non-background edges.
const NEIGHBORS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Mark every pixel reachable from a background-classified border pixel
/// through 4-connected background-classified pixels.
///
/// Iterative with an explicit queue; each pixel is enqueued at most once, so
/// total work is O(w*h) and there is no recursion depth to worry about on
/// large images. Does not mutate the image.
pub fn flood_mark(image: &RgbaImage, classifier: &BackgroundClassifier) -> VisitedMask {
    let (width, height) = image.dimensions();
    let mut mask = VisitedMask::new(width, height);
    let mut queue: VecDeque<(u32, u32)> = VecDeque::new();

    // Seed from all four borders
    for x in 0..width {
        seed(image, classifier, &mut mask, &mut queue, x, 0);
        seed(image, classifier, &mut mask, &mut queue, x, height - 1);
    }
    for y in 0..height {
        seed(image, classifier, &mut mask, &mut queue, 0, y);
        seed(image, classifier, &mut mask, &mut queue, width - 1, y);
    }

    while let Some((x, y)) = queue.pop_front() {
        for (dx, dy) in NEIGHBORS {
            let nx = x as i32 + dx;
            let ny = y as i32 + dy;

            if nx >= 0 && nx < width as i32 && ny >= 0 && ny < height as i32 {
                let nx = nx as u32;
                let ny = ny as u32;

                if !mask.get(nx, ny) && classifier.is_background(image.get_pixel(nx, ny)) {
                    mask.set(nx, ny);
                    queue.push_back((nx, ny));
                }
            }
        }
    }

    mask
}

fn seed(
    image: &RgbaImage,
    classifier: &BackgroundClassifier,
    mask: &mut VisitedMask,
    queue: &mut VecDeque<(u32, u32)>,
    x: u32,
    y: u32,
) {
    if !mask.get(x, y) && classifier.is_background(image.get_pixel(x, y)) {
        mask.set(x, y);
        queue.push_back((x, y));
    }
}
