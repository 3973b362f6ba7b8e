use crate::{
    error::{Error, Result},
    histogram::Histogram,
    reference::ReferencePalette,
};
use std::{fmt, str::FromStr};

/// Average lightness below which an image counts as dark.
pub const DARK_MAX_LIGHTNESS: f32 = 50.0;

/// A yes/no property of an image that can be asked about with [`crate::ColorImage::is`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Flag {
    Dark,
    /// Same as [`Flag::Dark`].
    Black,
    Light,
    /// Same as [`Flag::Light`].
    White,
}

impl Flag {
    /// Answer the flag for a histogram, whose names are looked up in `palette`.
    pub fn test(self, histogram: &Histogram, palette: &ReferencePalette) -> Result<bool> {
        let dark = is_dark(histogram, palette)?;

        Ok(match self {
            Flag::Dark | Flag::Black => dark,
            Flag::Light | Flag::White => !dark,
        })
    }
}

impl FromStr for Flag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "dark" => Ok(Flag::Dark),
            "black" => Ok(Flag::Black),
            "light" => Ok(Flag::Light),
            "white" => Ok(Flag::White),
            other => Err(Error::UnknownFlag(other.to_string())),
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Flag::Dark => "dark",
            Flag::Black => "black",
            Flag::Light => "light",
            Flag::White => "white",
        })
    }
}

/// Whether the average lightness of the matched colors, weighted by their counts, is below [`DARK_MAX_LIGHTNESS`].
///
/// Fails with [`Error::EmptyHistogram`] when nothing was counted, and with [`Error::UnknownColor`] when a counted name
/// isn't in `palette`.
pub fn is_dark(histogram: &Histogram, palette: &ReferencePalette) -> Result<bool> {
    let total = histogram.total();

    if total == 0 {
        return Err(Error::EmptyHistogram);
    }

    let mut total_lightness = 0.0f64;

    for (name, count) in histogram.iter() {
        let color = palette
            .get(name)
            .ok_or_else(|| Error::UnknownColor(name.to_string()))?;

        total_lightness += count as f64 * color.lightness() as f64;
    }

    Ok(total_lightness / (total as f64) < DARK_MAX_LIGHTNESS as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        color_space::Lab,
        reference::{default_palette, ReferenceColor},
    };

    fn palette(lightness: &[(&str, f32)]) -> ReferencePalette {
        ReferencePalette::from_lab(
            lightness
                .iter()
                .map(|&(name, l)| ReferenceColor::new(name, Lab::new(l, 0.0, 0.0))),
        )
    }

    fn assert_flags(histogram: &Histogram, palette: &ReferencePalette, dark: bool) {
        assert_eq!(Flag::Dark.test(histogram, palette).ok(), Some(dark));
        assert_eq!(Flag::Black.test(histogram, palette).ok(), Some(dark));
        assert_eq!(Flag::Light.test(histogram, palette).ok(), Some(!dark));
        assert_eq!(Flag::White.test(histogram, palette).ok(), Some(!dark));
    }

    #[test]
    fn dark_image() {
        let histogram: Histogram = [("red", 10)].into_iter().collect();

        assert_flags(&histogram, &palette(&[("red", 40.0)]), true);
    }

    #[test]
    fn light_image() {
        let histogram: Histogram = [("red", 10)].into_iter().collect();

        assert_flags(&histogram, &palette(&[("red", 80.0)]), false);
    }

    #[test]
    fn weighted_average_decides() {
        // (20 * 80 + 30 * 20 + 30 * 0) / 80 = 27.5
        let histogram: Histogram = [("red", 20), ("yellow", 30), ("blue", 30)].into_iter().collect();
        let palette = palette(&[("red", 80.0), ("yellow", 20.0), ("blue", 0.0)]);

        assert_flags(&histogram, &palette, true);
    }

    #[test]
    fn exactly_fifty_is_light() {
        let histogram: Histogram = [("gray", 3)].into_iter().collect();

        assert_flags(&histogram, &palette(&[("gray", 50.0)]), false);
    }

    #[test]
    fn default_palette_black_and_white() {
        let palette = default_palette();
        let black: Histogram = [("black", 5), ("white", 1)].into_iter().collect();
        let white: Histogram = [("black", 1), ("white", 5)].into_iter().collect();

        assert_eq!(is_dark(&black, &palette).ok(), Some(true));
        assert_eq!(is_dark(&white, &palette).ok(), Some(false));
    }

    #[test]
    fn empty_histogram_is_an_error() {
        let result = is_dark(&Histogram::new(), &default_palette());

        assert!(matches!(result, Err(Error::EmptyHistogram)));
    }

    #[test]
    fn unknown_color_is_an_error() {
        let histogram: Histogram = [("pink", 1)].into_iter().collect();
        let result = Flag::Light.test(&histogram, &palette(&[("red", 40.0)]));

        assert!(matches!(result, Err(Error::UnknownColor(name)) if name == "pink"));
    }

    #[test]
    fn parse_flags() {
        assert_eq!("dark".parse::<Flag>().ok(), Some(Flag::Dark));
        assert_eq!("white".parse::<Flag>().ok(), Some(Flag::White));
        assert!(matches!("Dark".parse::<Flag>(), Err(Error::UnknownFlag(_))));
        assert_eq!(Flag::Black.to_string(), "black");
    }
}
