use palette::IntoColor;

/// The perceptually uniform color representation every sampled pixel and reference color is compared in. CIE L*a*b*
/// with a D65 white point.
pub type Lab = palette::Lab;

/// Converts pixels into [`Lab`] and measures how far apart two [`Lab`] colors are.
///
/// The matcher only relies on the distance being non-negative and symmetric, so any metric works. The default
/// implementation is [`Cie76`].
pub trait ColorSpace {
    fn to_lab(&self, rgb: (u8, u8, u8)) -> Lab;

    fn distance(&self, lhs: &Lab, rhs: &Lab) -> f32;
}

/// Plain sRGB to Lab conversion, compared with the euclidean distance between the two colors (CIE76 delta E).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cie76;

impl ColorSpace for Cie76 {
    fn to_lab(&self, rgb: (u8, u8, u8)) -> Lab {
        rgb_to_lab(rgb)
    }

    fn distance(&self, lhs: &Lab, rhs: &Lab) -> f32 {
        let delta_e = (lhs.l - rhs.l).powi(2) + (lhs.a - rhs.a).powi(2) + (lhs.b - rhs.b).powi(2);
        delta_e.sqrt()
    }
}

impl<C> ColorSpace for &C
where
    C: ColorSpace + ?Sized,
{
    fn to_lab(&self, rgb: (u8, u8, u8)) -> Lab {
        (**self).to_lab(rgb)
    }

    fn distance(&self, lhs: &Lab, rhs: &Lab) -> f32 {
        (**self).distance(lhs, rhs)
    }
}

pub(crate) fn rgb_to_lab(rgb: (u8, u8, u8)) -> Lab {
    let raw = palette::Srgb::from_components(rgb);
    let raw_float: palette::Srgb<f32> = raw.into_format();

    raw_float.into_color()
}

/// Split a packed `0xRRGGBB` integer into its channels. Anything above the low 24 bits is ignored.
pub(crate) fn unpack_rgb(value: u32) -> (u8, u8, u8) {
    (((value >> 16) & 0xff) as u8, ((value >> 8) & 0xff) as u8, (value & 0xff) as u8)
}
