use crate::color_space::{rgb_to_lab, unpack_rgb, Lab};
use std::sync::{Arc, OnceLock};

/// The reference colors every image is matched against by default, as packed `0xRRGGBB` integers.
pub const DEFAULT_COLORS: [(&str, u32); 33] = [
    ("black", 0x000000),
    ("white", 0xFFFFFF),
    ("gray", 0x999999),
    ("light-gray", 0xCCCCCC),
    ("maroon", 0x620804),
    ("red", 0xC41C0E),
    ("light-red", 0xC43431),
    ("dark-red", 0x931208),
    ("orange", 0xF66914),
    ("dark-orange", 0xC66826),
    ("light-orange", 0xF89B11),
    ("brown", 0x633303),
    ("light-brown", 0x966829),
    ("tan", 0xE6D9AC),
    ("yellow", 0xFBCF0C),
    ("light-yellow", 0xF3E107),
    ("sb-yellow", 0xFEFE04),
    ("olive", 0x999B00),
    ("dark-olive", 0x676800),
    ("light-olive", 0xCCCF02),
    ("green", 0x6C9C00),
    ("dark-green", 0x396800),
    ("lime", 0x80CF00),
    ("blue", 0x1F5FD3),
    ("baby-blue", 0x74CCCD),
    ("sky-blue", 0x2E96D1),
    ("light-blue", 0xACBBDD),
    ("purple", 0x632A9F),
    ("blue-purple", 0x322A9F),
    ("gray-purple", 0x424055),
    ("voilet", 0x932C9F),
    ("pink", 0xE14A8B),
    ("light-pink", 0xF8ACC9),
];

/// A named reference color, already converted into [`Lab`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReferenceColor {
    name: String,
    lab: Lab,
}

/// An ordered set of named reference colors.
///
/// Colors are installed as raw `0xRRGGBB` integers and converted into [`Lab`] the first time they're asked for. The
/// conversion runs once per installed set; [`ReferencePalette::set`] replaces the whole set and resets it.
#[derive(Debug, Clone, Default)]
pub struct ReferencePalette {
    raw: Vec<(String, u32)>,
    converted: OnceLock<Vec<ReferenceColor>>,
}

impl ReferenceColor {
    pub fn new(name: impl Into<String>, lab: Lab) -> Self {
        Self { name: name.into(), lab }
    }

    pub fn from_rgb(name: impl Into<String>, rgb: (u8, u8, u8)) -> Self {
        Self::new(name, rgb_to_lab(rgb))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lab(&self) -> Lab {
        self.lab
    }

    /// The L* channel of the color, between 0 (black) and 100 (white).
    pub fn lightness(&self) -> f32 {
        self.lab.l
    }
}

impl ReferencePalette {
    pub fn new<I, S>(colors: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let mut palette = Self::default();
        palette.set(colors);
        palette
    }

    /// Build a palette out of colors that are already in [`Lab`]. Nothing is left to convert.
    pub fn from_lab<I>(colors: I) -> Self
    where
        I: IntoIterator<Item = ReferenceColor>,
    {
        let mut converted: Vec<ReferenceColor> = Vec::new();

        for color in colors {
            match converted.iter_mut().find(|existing| existing.name == color.name) {
                Some(existing) => existing.lab = color.lab,
                None => converted.push(color),
            }
        }

        Self {
            raw: Vec::new(),
            converted: OnceLock::from(converted),
        }
    }

    /// Replace every color in the palette. The new colors are converted lazily on the next [`Self::colors`] call.
    ///
    /// A name given more than once keeps the position of its first occurrence and the value of its last one.
    pub fn set<I, S>(&mut self, colors: I)
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let mut raw: Vec<(String, u32)> = Vec::new();

        for (name, value) in colors {
            let name = name.into();

            match raw.iter_mut().find(|(existing, _)| *existing == name) {
                Some((_, existing)) => *existing = value,
                None => raw.push((name, value)),
            }
        }

        self.raw = raw;
        self.converted = OnceLock::new();
    }

    /// The raw colors installed with [`Self::new`] or [`Self::set`]. Empty for palettes built with
    /// [`Self::from_lab`].
    pub fn raw(&self) -> &[(String, u32)] {
        &self.raw
    }

    pub fn colors(&self) -> &[ReferenceColor] {
        self.converted.get_or_init(|| {
            tracing::trace!(count = self.raw.len(), "converting reference colors to lab");

            self.raw
                .iter()
                .map(|(name, value)| ReferenceColor::from_rgb(name.clone(), unpack_rgb(*value)))
                .collect()
        })
    }

    pub fn get(&self, name: &str) -> Option<&ReferenceColor> {
        self.colors().iter().find(|color| color.name == name)
    }

    pub fn len(&self) -> usize {
        self.colors().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_converted(&self) -> bool {
        self.converted.get().is_some()
    }
}

/// The process-wide palette built from [`DEFAULT_COLORS`]. Every call returns the same instance.
pub fn default_palette() -> Arc<ReferencePalette> {
    static DEFAULT: OnceLock<Arc<ReferencePalette>> = OnceLock::new();

    DEFAULT
        .get_or_init(|| Arc::new(ReferencePalette::new(DEFAULT_COLORS)))
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_keeps_table_order() {
        let palette = default_palette();
        let names: Vec<_> = palette.colors().iter().map(ReferenceColor::name).collect();

        assert_eq!(names.len(), DEFAULT_COLORS.len());
        assert_eq!(names.first(), Some(&"black"));
        assert_eq!(names.last(), Some(&"light-pink"));
        assert!(names.iter().zip(DEFAULT_COLORS.iter()).all(|(a, (b, _))| a == b));
    }

    #[test]
    fn default_palette_is_shared() {
        assert!(Arc::ptr_eq(&default_palette(), &default_palette()));
    }

    #[test]
    fn conversion_is_lazy_and_happens_once() {
        let palette = ReferencePalette::new([("black", 0x000000), ("white", 0xFFFFFF)]);
        assert!(!palette.is_converted());

        let first = palette.colors().as_ptr();
        assert!(palette.is_converted());
        assert_eq!(palette.colors().as_ptr(), first);

        let white = palette.get("white").expect("white is in the palette");
        assert!((white.lightness() - 100.0).abs() < 0.01);
    }

    #[test]
    fn set_replaces_instead_of_merging() {
        let mut palette = ReferencePalette::new(DEFAULT_COLORS);
        assert_eq!(palette.len(), 33);

        palette.set([("black", 0x000000), ("white", 0xFFFFFF)]);

        assert!(!palette.is_converted());
        assert_eq!(palette.len(), 2);
        assert!(palette.get("red").is_none());
    }

    #[test]
    fn duplicate_names_stay_unique() {
        let palette = ReferencePalette::new([("a", 0x000000), ("b", 0x808080), ("a", 0xFFFFFF)]);

        assert_eq!(palette.raw(), &[("a".to_string(), 0xFFFFFF), ("b".to_string(), 0x808080)]);
        assert_eq!(palette.len(), 2);
    }

    #[test]
    fn from_lab_is_already_converted() {
        let palette = ReferencePalette::from_lab([ReferenceColor::new("red", Lab::new(40.0, 0.0, 0.0))]);

        assert!(palette.is_converted());
        assert!(palette.raw().is_empty());
        assert_eq!(palette.get("red").map(ReferenceColor::lightness), Some(40.0));
    }
}
