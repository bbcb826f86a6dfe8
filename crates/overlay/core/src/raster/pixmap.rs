//! Conversions between straight-alpha `RgbaImage` buffers and tiny-skia's
//! premultiplied `Pixmap`.
use image::{Rgba, RgbaImage};
use tiny_skia::{Color, ColorU8, Pixmap};

/// `None` for zero-sized images, which tiny-skia cannot represent.
pub(crate) fn to_pixmap(image: &RgbaImage) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(image.width(), image.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        let Rgba([r, g, b, a]) = *src;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Some(pixmap)
}

pub(crate) fn to_image(pixmap: &Pixmap) -> RgbaImage {
    let mut image = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in image.pixels_mut().zip(pixmap.pixels()) {
        let color = src.demultiply();
        *dst = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
    }
    image
}

pub(crate) fn color(rgba: Rgba<u8>) -> Color {
    let Rgba([r, g, b, a]) = rgba;
    Color::from_rgba8(r, g, b, a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_and_clear_pixels_survive_a_round_trip() {
        let mut image = RgbaImage::from_pixel(3, 2, Rgba([0, 0, 0, 0]));
        image.put_pixel(1, 1, Rgba([12, 200, 99, 255]));

        let pixmap = to_pixmap(&image).expect("non-empty image");
        assert_eq!(to_image(&pixmap), image);
    }

    #[test]
    fn empty_image_has_no_pixmap() {
        assert!(to_pixmap(&RgbaImage::new(0, 4)).is_none());
    }
}
