//! Rolling-window diffusion engine.

use super::{
    neighbour_x, residual, scan_order, spread, DitherEngine, DitherOptions, DitherProgress,
    EngineError, Kernel,
};
use crate::color::Rgb;
use crate::image::RgbImage;
use crate::matcher::ColorMatcher;

/// Deepest kernel the window supports (rows below the current one).
const MAX_KERNEL_DEPTH: usize = 4;

/// Sliding window of accumulated rows.
///
/// Only the rows the kernel can reach are kept: `rows[0]` is the current
/// row, `rows[k]` the row `k` below. Rows enter the window holding the
/// input pixels, so values match a full working buffer exactly.
#[derive(Debug)]
struct RowWindow<'a> {
    image: &'a RgbImage,
    rows: Vec<Vec<[f32; 3]>>,
    /// Image row held in `rows[0]`.
    top: usize,
}

impl<'a> RowWindow<'a> {
    fn new(image: &'a RgbImage, depth: usize) -> Self {
        let rows = (0..depth)
            .map(|k| Self::load(image, k))
            .collect();
        Self {
            image,
            rows,
            top: 0,
        }
    }

    fn load(image: &RgbImage, y: usize) -> Vec<[f32; 3]> {
        if y < image.height() {
            image.row(y).iter().map(|p| p.to_f32()).collect()
        } else {
            vec![[0.0; 3]; image.width()]
        }
    }

    #[inline]
    fn get(&self, x: usize) -> [f32; 3] {
        self.rows[0][x]
    }

    #[inline]
    fn cell_mut(&mut self, x: usize, row_offset: usize) -> Option<&mut [f32; 3]> {
        if self.top + row_offset >= self.image.height() {
            return None;
        }
        self.rows.get_mut(row_offset).and_then(|row| row.get_mut(x))
    }

    /// Drop the current row and pull the next input row into the bottom.
    fn advance_row(&mut self) {
        // Rotate left: [0,1,2] -> [1,2,0]
        self.rows.rotate_left(1);
        self.top += 1;
        let incoming = self.top + self.rows.len() - 1;
        let fresh = Self::load(self.image, incoming);
        if let Some(last) = self.rows.last_mut() {
            *last = fresh;
        }
    }
}

/// Diffusion over a rolling row window with direct cache lookups.
///
/// Keeps `max_dy + 1` rows in memory instead of the whole image, and skips
/// the per-call memo: every pixel goes straight to the shared lookup cache.
/// Output is identical to [`ReferenceDitherer`](super::ReferenceDitherer).
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowedDitherer;

impl DitherEngine for WindowedDitherer {
    fn name(&self) -> &'static str {
        "windowed"
    }

    fn diffuse(
        &self,
        image: &RgbImage,
        matcher: &ColorMatcher,
        kernel: &Kernel,
        options: &DitherOptions,
        progress: &mut dyn FnMut(DitherProgress),
    ) -> Result<Vec<u8>, EngineError> {
        if !kernel.is_causal() {
            return Err(EngineError::NonCausalKernel {
                kernel: kernel.name,
            });
        }
        if kernel.max_dy > MAX_KERNEL_DEPTH {
            return Err(EngineError::UnsupportedKernel {
                kernel: kernel.name,
                rows: kernel.max_dy,
                max: MAX_KERNEL_DEPTH,
            });
        }

        let (width, height) = (image.width(), image.height());
        let palette = matcher.palette();
        let mut window = RowWindow::new(image, kernel.max_dy + 1);
        let mut output = vec![0u8; width * height];

        for y in 0..height {
            let reverse = options.is_reversed(y);

            for x in scan_order(width, reverse) {
                let accumulated = window.get(x);
                let position = matcher.closest_position(Rgb::from_f32_rounded(accumulated));
                output[y * width + x] = position as u8;

                let error = residual(accumulated, palette.entry(position).rgb());
                for (dx, dy, fraction) in kernel.offsets(reverse) {
                    let Some(nx) = neighbour_x(x, dx, width) else {
                        continue;
                    };
                    if let Some(cell) = window.cell_mut(nx, dy) {
                        spread(cell, error, fraction);
                    }
                }
            }

            window.advance_row();
            progress(DitherProgress {
                rows_done: y + 1,
                total_rows: height,
            });
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::dither::{ReferenceDitherer, FLOYD_STEINBERG, JARVIS_JUDICE_NINKE};
    use crate::palette::Palette;

    fn gradient(width: usize, height: usize) -> RgbImage {
        let span = |n: usize| n.saturating_sub(1).max(1);
        let pixels = (0..width * height)
            .map(|i| {
                let (x, y) = (i % width, i / width);
                Rgb::new(
                    (x * 255 / span(width)) as u8,
                    (y * 255 / span(height)) as u8,
                    ((x * 7 + y * 13) % 256) as u8,
                )
            })
            .collect();
        RgbImage::new(width, height, pixels).unwrap()
    }

    #[test]
    fn test_window_rotation() {
        let img = gradient(4, 5);
        let mut window = RowWindow::new(&img, 3);
        assert_eq!(window.get(1), img.get(1, 0).to_f32());
        window.advance_row();
        assert_eq!(window.get(1), img.get(1, 1).to_f32());
        window.advance_row();
        window.advance_row();
        // Now at row 3, row 5 is past the end.
        assert!(window.cell_mut(0, 1).is_some());
        assert!(window.cell_mut(0, 2).is_none());
    }

    #[test]
    fn test_matches_reference() {
        let matcher = ColorMatcher::new(Arc::new(Palette::seven_color()), 4).unwrap();
        for (w, h) in [(1, 1), (1, 7), (7, 1), (13, 9), (32, 24)] {
            let img = gradient(w, h);
            for kernel in [&FLOYD_STEINBERG, &JARVIS_JUDICE_NINKE] {
                for serpentine in [true, false] {
                    let options = DitherOptions::new().serpentine(serpentine);
                    let expected = ReferenceDitherer.run(&img, &matcher, kernel, &options, &mut |_| {});
                    let actual = WindowedDitherer
                        .diffuse(&img, &matcher, kernel, &options, &mut |_| {})
                        .unwrap();
                    assert_eq!(actual, expected, "{w}x{h} {} serpentine={serpentine}", kernel.name);
                }
            }
        }
    }

    #[test]
    fn test_rejects_deep_kernel() {
        const DEEP: Kernel = Kernel {
            name: "deep",
            entries: &[(0, 5, 1)],
            divisor: 1,
            max_dy: 5,
        };
        let matcher = ColorMatcher::new(Arc::new(Palette::monochrome()), 4).unwrap();
        let img = gradient(3, 3);
        let err = WindowedDitherer
            .diffuse(&img, &matcher, &DEEP, &DitherOptions::new(), &mut |_| {})
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::UnsupportedKernel {
                kernel: "deep",
                rows: 5,
                max: MAX_KERNEL_DEPTH
            }
        );
    }
}
