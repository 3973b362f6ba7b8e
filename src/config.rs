use crate::{
    decoder::DecoderMap,
    error::{Error, Result},
    reference::{default_palette, ReferencePalette},
    sampler::{Sampler, DEFAULT_PRECISION, DEFAULT_THRESHOLD, MAX_PRECISION},
};
use std::sync::Arc;

/// Settings for analysing one [`crate::ColorImage`].
///
/// ```
/// let config = imagehue::Config::default().precision(60).threshold(20.0);
/// assert_eq!(config.get_precision(), 60);
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    precision: u8,
    threshold: f32,
    palette: Arc<ReferencePalette>,
    decoders: DecoderMap,
}

impl Config {
    /// Percent of pixels to sample, from 0 to 100. Lower is faster but less accurate.
    pub fn precision(self, precision: u8) -> Self {
        Self { precision, ..self }
    }

    /// Largest distance (exclusive) between a pixel and a reference color for the pixel to count as that color. Lower
    /// is stricter.
    pub fn threshold(self, threshold: f32) -> Self {
        Self { threshold, ..self }
    }

    /// Use `palette` instead of the default reference colors.
    pub fn palette(self, palette: impl Into<Arc<ReferencePalette>>) -> Self {
        Self {
            palette: palette.into(),
            ..self
        }
    }

    pub fn decoders(self, decoders: DecoderMap) -> Self {
        Self { decoders, ..self }
    }

    pub fn get_precision(&self) -> u8 {
        self.precision
    }

    pub fn get_threshold(&self) -> f32 {
        self.threshold
    }

    pub fn get_palette(&self) -> &Arc<ReferencePalette> {
        &self.palette
    }

    pub fn get_decoders(&self) -> &DecoderMap {
        &self.decoders
    }

    pub fn decoders_mut(&mut self) -> &mut DecoderMap {
        &mut self.decoders
    }

    pub fn validate(&self) -> Result<()> {
        validate_sampling(self.precision, self.threshold)
    }

    pub(crate) fn sampler(&self) -> Sampler {
        Sampler::new(self.precision, self.threshold)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            threshold: DEFAULT_THRESHOLD,
            palette: default_palette(),
            decoders: DecoderMap::default(),
        }
    }
}

pub(crate) fn validate_sampling(precision: u8, threshold: f32) -> Result<()> {
    if precision > MAX_PRECISION {
        return Err(Error::InvalidPrecision(precision));
    }

    // also rejects NaN
    if !(threshold >= 0.0) {
        return Err(Error::InvalidThreshold(threshold));
    }

    Ok(())
}
