// Copyright 2022 Spanfile
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A library to rank the dominant named colors of an image.
//!
//! A share of the image's pixels is sampled at random. Every sampled pixel is converted into CIE L*a*b* and matched to
//! the nearest color of a fixed, named reference palette, as long as it's close enough. The matches are tallied into a
//! [`Histogram`], which ranks the image's primary colors and tells whether the image is dark or light.
//!
//! ```no_run
//! use imagehue::{ColorImage, Flag};
//!
//! let mut image = ColorImage::load("flowers.png")?;
//!
//! for swatch in image.primary_colors(3)? {
//!     println!("{} {}", swatch.name(), swatch.population());
//! }
//!
//! println!("dark: {}", image.is(Flag::Dark)?);
//! # Ok::<(), imagehue::Error>(())
//! ```

mod classifier;
mod color_space;
mod config;
mod decoder;
mod error;
mod histogram;
mod matcher;
mod raster;
mod reference;
mod sampler;
mod swatch;

pub use crate::{
    classifier::{is_dark, Flag, DARK_MAX_LIGHTNESS},
    color_space::{Cie76, ColorSpace, Lab},
    config::Config,
    decoder::{Decoder, DecoderMap, FormatDecoder},
    error::{Error, Result},
    histogram::Histogram,
    matcher::{nearest, Matcher, PaletteMatcher},
    raster::Raster,
    reference::{default_palette, ReferenceColor, ReferencePalette, DEFAULT_COLORS},
    sampler::{Sampler, DEFAULT_PRECISION, DEFAULT_THRESHOLD, MAX_PRECISION},
    swatch::Swatch,
};
pub use image;
pub use palette;

use image::DynamicImage;
use rand::Rng;
use std::{
    collections::HashMap,
    fmt,
    path::{Path, PathBuf},
};

pub const WIDTH_KEY: &str = "width";
pub const HEIGHT_KEY: &str = "height";

/// Where a [`ColorImage`] gets its pixels from.
pub enum ImageSource {
    /// A file on disk, decoded with the decoder registered for its extension.
    Path(PathBuf),
    /// An image that is already decoded.
    Raster(Box<dyn Raster>),
}

/// A value stored with [`ColorImage::set_data`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum DataValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

/// A decoded image along with everything learned about it so far.
///
/// The first query that needs the histogram samples the image; every later query reuses that histogram. Sampling again
/// takes a new `ColorImage`.
pub struct ColorImage<S = Cie76> {
    raster: Box<dyn Raster>,
    config: Config,
    space: S,
    data: HashMap<String, DataValue>,
    histogram: Option<Histogram>,
}

impl ColorImage {
    pub fn load(source: impl Into<ImageSource>) -> Result<Self> {
        Self::load_with(source, Config::default())
    }

    pub fn load_with(source: impl Into<ImageSource>, config: Config) -> Result<Self> {
        config.validate()?;

        let raster: Box<dyn Raster> = match source.into() {
            ImageSource::Path(path) => Box::new(open(&path, config.get_decoders())?),
            ImageSource::Raster(raster) => raster,
        };

        Ok(Self {
            raster,
            config,
            space: Cie76,
            data: HashMap::new(),
            histogram: None,
        })
    }

    pub fn from_raster<R>(raster: R) -> Self
    where
        R: Raster + 'static,
    {
        Self {
            raster: Box::new(raster),
            config: Config::default(),
            space: Cie76,
            data: HashMap::new(),
            histogram: None,
        }
    }
}

impl<S> ColorImage<S>
where
    S: ColorSpace,
{
    /// Convert pixels and measure distances with `space` instead.
    pub fn with_color_space<T>(self, space: T) -> ColorImage<T>
    where
        T: ColorSpace,
    {
        ColorImage {
            raster: self.raster,
            config: self.config,
            space,
            data: self.data,
            histogram: self.histogram,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn raster(&self) -> &dyn Raster {
        self.raster.as_ref()
    }

    /// Get a stored value. `"width"` and `"height"` are read from the image the first time they're asked for and
    /// stored from then on.
    pub fn data(&mut self, key: &str) -> Option<&DataValue> {
        if !self.data.contains_key(key) {
            let value = match key {
                WIDTH_KEY => self.raster.width(),
                HEIGHT_KEY => self.raster.height(),
                _ => return None,
            };

            self.data.insert(key.to_string(), DataValue::from(value));
        }

        self.data.get(key)
    }

    /// Store a value, replacing anything stored under `key` before. Overriding `"width"` or `"height"` limits the area
    /// that gets sampled.
    pub fn set_data(&mut self, key: impl Into<String>, value: impl Into<DataValue>) -> Option<DataValue> {
        self.data.insert(key.into(), value.into())
    }

    pub fn width(&mut self) -> u32 {
        let fallback = self.raster.width();
        self.data(WIDTH_KEY).and_then(DataValue::as_u32).unwrap_or(fallback)
    }

    pub fn height(&mut self) -> u32 {
        let fallback = self.raster.height();
        self.data(HEIGHT_KEY).and_then(DataValue::as_u32).unwrap_or(fallback)
    }

    /// The histogram of the image, sampled with the configured precision and threshold.
    pub fn histogram(&mut self) -> Result<&Histogram> {
        let sampler = self.config.sampler();
        self.sample(sampler.precision(), sampler.threshold())
    }

    /// Sample the image with the given precision and threshold.
    ///
    /// Only the first call samples. Later calls return the histogram from the first one, whatever they're given.
    pub fn sample(&mut self, precision: u8, threshold: f32) -> Result<&Histogram> {
        let histogram = match self.histogram.take() {
            Some(histogram) => histogram,
            None => {
                config::validate_sampling(precision, threshold)?;

                let (width, height) = (self.width(), self.height());
                let matcher = PaletteMatcher::with_space(self.config.get_palette().clone(), &self.space);

                self.run(Sampler::new(precision, threshold), width, height, &matcher, &mut rand::thread_rng())
            }
        };

        let histogram: &Histogram = self.histogram.insert(histogram);
        Ok(histogram)
    }

    /// Sample the image with the configured precision and threshold, but with a different matcher and random number
    /// generator. Just like [`Self::sample`], only the first call samples.
    pub fn histogram_with<M, G>(&mut self, matcher: &M, rng: &mut G) -> &Histogram
    where
        M: Matcher + ?Sized,
        G: Rng,
    {
        let histogram = match self.histogram.take() {
            Some(histogram) => histogram,
            None => {
                let (width, height) = (self.width(), self.height());
                self.run(self.config.sampler(), width, height, matcher, rng)
            }
        };

        self.histogram.insert(histogram)
    }

    /// Replace the histogram, as if the image had been sampled already.
    pub fn set_histogram(&mut self, histogram: Histogram) {
        self.histogram = Some(histogram);
    }

    /// The `count` most common colors of the image, most common first. A `count` of zero returns all of them.
    pub fn primary_colors(&mut self, count: usize) -> Result<Vec<Swatch>> {
        Ok(self.histogram()?.top(count))
    }

    /// Check a [`Flag`] against the image.
    ///
    /// Fails with [`Error::EmptyHistogram`] if no sampled pixel matched any reference color.
    pub fn is(&mut self, flag: Flag) -> Result<bool> {
        let palette = self.config.get_palette().clone();
        flag.test(self.histogram()?, &palette)
    }

    fn run<M, G>(&self, sampler: Sampler, width: u32, height: u32, matcher: &M, rng: &mut G) -> Histogram
    where
        M: Matcher + ?Sized,
        G: Rng,
    {
        sampler.sample(&self.raster, width, height, &self.space, matcher, rng)
    }
}

impl<S> fmt::Debug for ColorImage<S>
where
    S: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColorImage")
            .field("width", &self.raster.width())
            .field("height", &self.raster.height())
            .field("config", &self.config)
            .field("space", &self.space)
            .field("data", &self.data)
            .field("histogram", &self.histogram)
            .finish()
    }
}

impl DataValue {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            DataValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        self.as_i64().and_then(|value| u32::try_from(value).ok())
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DataValue::Integer(value) => Some(*value as f64),
            DataValue::Float(value) => Some(*value),
            DataValue::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DataValue::Text(value) => Some(value),
            _ => None,
        }
    }
}

impl From<u32> for DataValue {
    fn from(value: u32) -> Self {
        DataValue::Integer(value.into())
    }
}

impl From<i64> for DataValue {
    fn from(value: i64) -> Self {
        DataValue::Integer(value)
    }
}

impl From<f64> for DataValue {
    fn from(value: f64) -> Self {
        DataValue::Float(value)
    }
}

impl From<&str> for DataValue {
    fn from(value: &str) -> Self {
        DataValue::Text(value.to_string())
    }
}

impl From<String> for DataValue {
    fn from(value: String) -> Self {
        DataValue::Text(value)
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::Integer(value) => write!(f, "{value}"),
            DataValue::Float(value) => write!(f, "{value}"),
            DataValue::Text(value) => f.write_str(value),
        }
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        ImageSource::Path(path)
    }
}

impl From<&Path> for ImageSource {
    fn from(path: &Path) -> Self {
        ImageSource::Path(path.to_path_buf())
    }
}

impl From<&str> for ImageSource {
    fn from(path: &str) -> Self {
        ImageSource::Path(path.into())
    }
}

impl From<String> for ImageSource {
    fn from(path: String) -> Self {
        ImageSource::Path(path.into())
    }
}

impl From<Box<dyn Raster>> for ImageSource {
    fn from(raster: Box<dyn Raster>) -> Self {
        ImageSource::Raster(raster)
    }
}

impl From<DynamicImage> for ImageSource {
    fn from(image: DynamicImage) -> Self {
        ImageSource::Raster(Box::new(image))
    }
}

impl From<image::RgbImage> for ImageSource {
    fn from(image: image::RgbImage) -> Self {
        ImageSource::Raster(Box::new(image))
    }
}

impl From<image::RgbaImage> for ImageSource {
    fn from(image: image::RgbaImage) -> Self {
        ImageSource::Raster(Box::new(image))
    }
}

impl fmt::Debug for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::Path(path) => f.debug_tuple("Path").field(path).finish(),
            ImageSource::Raster(raster) => f
                .debug_struct("Raster")
                .field("width", &raster.width())
                .field("height", &raster.height())
                .finish(),
        }
    }
}

fn open(path: &Path, decoders: &DecoderMap) -> Result<DynamicImage> {
    if !path.exists() {
        return Err(Error::NotFound(path.to_path_buf()));
    }

    let extension = path.extension().and_then(|extension| extension.to_str()).unwrap_or_default();
    let decoder = decoders
        .get(extension)
        .ok_or_else(|| Error::UnsupportedExtension(extension.to_string()))?;

    tracing::debug!(path = %path.display(), extension, "decoding image");
    decoder.decode(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn data_reads_dimensions_lazily() {
        let mut image = ColorImage::from_raster(RgbImage::new(10, 5));

        assert_eq!(image.data("width"), Some(&DataValue::Integer(10)));
        assert_eq!(image.data("height"), Some(&DataValue::Integer(5)));
        assert_eq!(image.data("foo"), None);
    }

    #[test]
    fn data_can_be_overridden() {
        let mut image = ColorImage::from_raster(RgbImage::new(10, 5));
        assert_eq!(image.width(), 10);

        image.set_data("width", 20u32);
        image.set_data("height", 40u32);
        image.set_data("foo", "bar");

        assert_eq!(image.width(), 20);
        assert_eq!(image.height(), 40);
        assert_eq!(image.data("foo").and_then(DataValue::as_str), Some("bar"));
    }

    #[test]
    fn non_numeric_dimension_falls_back_to_the_raster() {
        let mut image = ColorImage::from_raster(RgbImage::new(7, 3));
        image.set_data("width", "wide");

        assert_eq!(image.width(), 7);
    }

    #[test]
    fn overridden_dimensions_limit_sampling() {
        let mut image = ColorImage::load_with(RgbImage::from_pixel(10, 10, Rgb([0, 0, 0])), Config::default().precision(100))
            .expect("valid config");
        image.set_data("width", 2u32);
        image.set_data("height", 3u32);

        assert_eq!(image.histogram().map(Histogram::total).ok(), Some(6));
    }

    #[test]
    fn invalid_config_is_rejected_on_load() {
        let result = ColorImage::load_with(RgbImage::new(1, 1), Config::default().precision(120));

        assert!(matches!(result, Err(Error::InvalidPrecision(120))));
    }
}
