use crate::{
    color_space::{Cie76, ColorSpace, Lab},
    reference::{ReferenceColor, ReferencePalette},
};
use std::sync::Arc;

/// A trait used to decide which named color a sampled pixel belongs to.
///
/// The sampler calls this once for every pixel it keeps. Returning `None` leaves the pixel out of the histogram.
pub trait Matcher {
    /// Return the name of the color nearest to `sample`, or `None` if nothing is closer than `threshold`.
    fn best_color(&self, sample: &Lab, threshold: f32) -> Option<&str>;
}

/// Matches samples against a [`ReferencePalette`] with the distance of a [`ColorSpace`].
#[derive(Debug, Clone)]
pub struct PaletteMatcher<S = Cie76> {
    palette: Arc<ReferencePalette>,
    space: S,
}

impl PaletteMatcher {
    pub fn new(palette: Arc<ReferencePalette>) -> Self {
        Self::with_space(palette, Cie76)
    }
}

impl<S> PaletteMatcher<S>
where
    S: ColorSpace,
{
    pub fn with_space(palette: Arc<ReferencePalette>, space: S) -> Self {
        Self { palette, space }
    }

    pub fn palette(&self) -> &ReferencePalette {
        &self.palette
    }
}

impl<S> Matcher for PaletteMatcher<S>
where
    S: ColorSpace,
{
    fn best_color(&self, sample: &Lab, threshold: f32) -> Option<&str> {
        let (color, distance) = nearest(self.palette.colors(), sample, &self.space)?;

        if distance < threshold {
            Some(color.name())
        } else {
            None
        }
    }
}

/// Find the color closest to `sample` along with its distance. Returns `None` only if `colors` is empty.
///
/// When several colors are equally close, the one that comes first in `colors` wins.
pub fn nearest<'a, S>(colors: &'a [ReferenceColor], sample: &Lab, space: &S) -> Option<(&'a ReferenceColor, f32)>
where
    S: ColorSpace,
{
    let mut min_distance = f32::INFINITY;
    let mut best = None;

    for color in colors {
        let distance = space.distance(sample, &color.lab());

        // strictly less, so a later color at the same distance never replaces an earlier one
        if best.is_none() || distance < min_distance {
            best = Some(color);
            min_distance = distance;
        }
    }

    best.map(|color| (color, min_distance))
}
