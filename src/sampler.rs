use crate::{color_space::ColorSpace, histogram::Histogram, matcher::Matcher, raster::Raster};
use rand::Rng;

pub const DEFAULT_PRECISION: u8 = 30;
pub const DEFAULT_THRESHOLD: f32 = 30.0;
pub const MAX_PRECISION: u8 = 100;

/// Walks an image's pixels, keeping a random share of them, and counts which named color each kept pixel matches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampler {
    precision: u8,
    threshold: f32,
}

impl Sampler {
    /// `precision` is the share of pixels to keep, in percent. `threshold` is the largest distance (exclusive) a pixel
    /// may be from a named color and still count for it.
    pub fn new(precision: u8, threshold: f32) -> Self {
        Self { precision, threshold }
    }

    pub fn precision(self) -> u8 {
        self.precision
    }

    pub fn threshold(self) -> f32 {
        self.threshold
    }

    /// Run one pass over the `width` x `height` top-left area of `raster`. Both are clamped to the raster's size.
    ///
    /// Every pixel draws a number between 0 and 99 and is skipped if it's larger than the precision, so a pixel is
    /// kept with a probability of `(precision + 1) / 100`.
    pub fn sample<R, S, M, G>(self, raster: &R, width: u32, height: u32, space: &S, matcher: &M, rng: &mut G) -> Histogram
    where
        R: Raster + ?Sized,
        S: ColorSpace,
        M: Matcher + ?Sized,
        G: Rng,
    {
        let width = width.min(raster.width());
        let height = height.min(raster.height());

        let mut histogram = Histogram::new();
        let mut kept = 0u64;

        for x in 0..width {
            for y in 0..height {
                if rng.gen_range(0..100u8) > self.precision {
                    continue;
                }

                kept += 1;
                let sample = space.to_lab(raster.pixel_at(x, y));

                if let Some(name) = matcher.best_color(&sample, self.threshold) {
                    histogram.increment(name);
                }
            }
        }

        tracing::debug!(
            width,
            height,
            kept,
            matched = histogram.total(),
            colors = histogram.len(),
            "sampled image"
        );

        histogram
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new(DEFAULT_PRECISION, DEFAULT_THRESHOLD)
    }
}
