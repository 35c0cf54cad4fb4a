//! Full-image float scratch buffer for one diffusion call.

use crate::image::RgbImage;

/// Mutable grid of accumulated `f32` RGB values.
///
/// Starts as a copy of the input image; diffusion adds weighted residuals
/// to cells that have not been visited yet. Owned by a single call and
/// dropped with it.
#[derive(Debug, Clone)]
pub struct WorkingBuffer {
    width: usize,
    height: usize,
    cells: Vec<[f32; 3]>,
}

impl WorkingBuffer {
    pub fn from_image(image: &RgbImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            cells: image.pixels().iter().map(|p| p.to_f32()).collect(),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Accumulated value at `(x, y)`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> [f32; 3] {
        self.cells[y * self.width + x]
    }

    /// Mutable cell at `(x, y)`, or `None` outside the image.
    #[inline]
    pub fn cell_mut(&mut self, x: usize, y: usize) -> Option<&mut [f32; 3]> {
        if x < self.width && y < self.height {
            self.cells.get_mut(y * self.width + x)
        } else {
            None
        }
    }
}
