use image::{DynamicImage, GenericImageView, Pixel};

/// A decoded, pixel addressable image.
///
/// `pixel_at` is only called with coordinates inside `width` x `height`. Any alpha channel is dropped.
pub trait Raster {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    fn pixel_at(&self, x: u32, y: u32) -> (u8, u8, u8);
}

impl Raster for DynamicImage {
    fn width(&self) -> u32 {
        GenericImageView::width(self)
    }

    fn height(&self) -> u32 {
        GenericImageView::height(self)
    }

    fn pixel_at(&self, x: u32, y: u32) -> (u8, u8, u8) {
        pixel_to_rgb(&self.get_pixel(x, y))
    }
}

impl Raster for image::RgbImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn pixel_at(&self, x: u32, y: u32) -> (u8, u8, u8) {
        pixel_to_rgb(self.get_pixel(x, y))
    }
}

impl Raster for image::RgbaImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn pixel_at(&self, x: u32, y: u32) -> (u8, u8, u8) {
        pixel_to_rgb(self.get_pixel(x, y))
    }
}

impl<R> Raster for Box<R>
where
    R: Raster + ?Sized,
{
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn pixel_at(&self, x: u32, y: u32) -> (u8, u8, u8) {
        (**self).pixel_at(x, y)
    }
}

impl<R> Raster for &R
where
    R: Raster + ?Sized,
{
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn pixel_at(&self, x: u32, y: u32) -> (u8, u8, u8) {
        (**self).pixel_at(x, y)
    }
}

fn pixel_to_rgb<P>(pixel: &P) -> (u8, u8, u8)
where
    P: Pixel<Subpixel = u8>,
{
    let rgb = pixel.to_rgb();
    (rgb.0[0], rgb.0[1], rgb.0[2])
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn rgb_image_dimensions_and_pixels() {
        let mut img = RgbImage::new(10, 5);
        img.put_pixel(3, 4, Rgb([15, 30, 45]));

        assert_eq!((Raster::width(&img), Raster::height(&img)), (10, 5));
        assert_eq!(img.pixel_at(3, 4), (15, 30, 45));
        assert_eq!(img.pixel_at(0, 0), (0, 0, 0));
    }

    #[test]
    fn alpha_is_dropped() {
        let mut img = RgbaImage::new(1, 1);
        img.put_pixel(0, 0, Rgba([200, 100, 50, 0]));

        assert_eq!(img.pixel_at(0, 0), (200, 100, 50));
    }

    #[test]
    fn dynamic_image_through_a_box() {
        let mut img = RgbImage::new(2, 3);
        img.put_pixel(1, 2, Rgb([1, 2, 3]));
        let boxed: Box<dyn Raster> = Box::new(DynamicImage::ImageRgb8(img));

        assert_eq!((boxed.width(), boxed.height()), (2, 3));
        assert_eq!(boxed.pixel_at(1, 2), (1, 2, 3));
    }
}
