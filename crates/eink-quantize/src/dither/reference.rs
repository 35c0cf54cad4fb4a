//! Reference error diffusion engine.

use std::collections::HashMap;

use super::{
    neighbour_x, residual, scan_order, spread, DitherEngine, DitherOptions, DitherProgress,
    EngineError, Kernel, WorkingBuffer,
};
use crate::color::Rgb;
use crate::image::RgbImage;
use crate::matcher::ColorMatcher;

/// Straightforward full-buffer diffusion with a per-call memo.
///
/// For each pixel in scan order:
///
/// 1. read the accumulated value from the [`WorkingBuffer`]
/// 2. round it to 8-bit RGB and resolve the palette entry, memoized per call
/// 3. diffuse `accumulated - chosen` to every in-bounds kernel neighbour,
///    clamping each neighbour into [0, 255] right after the addition
///
/// This engine is the correctness baseline; it never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceDitherer;

impl ReferenceDitherer {
    /// Run diffusion. Infallible counterpart of [`DitherEngine::diffuse`].
    pub fn run(
        &self,
        image: &RgbImage,
        matcher: &ColorMatcher,
        kernel: &Kernel,
        options: &DitherOptions,
        progress: &mut dyn FnMut(DitherProgress),
    ) -> Vec<u8> {
        let (width, height) = (image.width(), image.height());
        let palette = matcher.palette();
        let mut buffer = WorkingBuffer::from_image(image);
        let mut output = vec![0u8; width * height];

        let mut memo: HashMap<Rgb, u8> = HashMap::new();
        let mut hits = 0usize;

        for y in 0..height {
            let reverse = options.is_reversed(y);

            for x in scan_order(width, reverse) {
                let accumulated = buffer.get(x, y);
                let key = Rgb::from_f32_rounded(accumulated);

                let position = match memo.get(&key) {
                    Some(&p) => {
                        hits += 1;
                        p
                    }
                    None => {
                        let p = matcher.closest_position(key) as u8;
                        memo.insert(key, p);
                        p
                    }
                };
                output[y * width + x] = position;

                let error = residual(accumulated, palette.entry(position as usize).rgb());
                for (dx, dy, fraction) in kernel.offsets(reverse) {
                    let Some(nx) = neighbour_x(x, dx, width) else {
                        continue;
                    };
                    if let Some(cell) = buffer.cell_mut(nx, y + dy) {
                        spread(cell, error, fraction);
                    }
                }
            }

            progress(DitherProgress {
                rows_done: y + 1,
                total_rows: height,
            });
        }

        let total = width * height;
        tracing::debug!(
            unique_colors = memo.len(),
            hit_rate = format!("{:.1}%", 100.0 * hits as f64 / total as f64),
            "Memo cache performance"
        );

        output
    }
}

impl DitherEngine for ReferenceDitherer {
    fn name(&self) -> &'static str {
        "reference"
    }

    fn diffuse(
        &self,
        image: &RgbImage,
        matcher: &ColorMatcher,
        kernel: &Kernel,
        options: &DitherOptions,
        progress: &mut dyn FnMut(DitherProgress),
    ) -> Result<Vec<u8>, EngineError> {
        Ok(self.run(image, matcher, kernel, options, progress))
    }
}
