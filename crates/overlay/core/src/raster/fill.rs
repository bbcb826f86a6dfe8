//! Solid marker rasters.
use image::{Rgba, RgbaImage};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Rect, Transform};

use super::pixmap;

pub fn filled_rectangle(color: Rgba<u8>, width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, color)
}

/// Ellipse inscribed in a `width × height` box, filled without
/// anti-aliasing: pixels whose centre falls outside stay transparent.
pub fn filled_ellipse(color: Rgba<u8>, width: u32, height: u32) -> RgbaImage {
    let Some(mut canvas) = Pixmap::new(width, height) else {
        return RgbaImage::new(width, height);
    };
    let oval = Rect::from_xywh(0.0, 0.0, width as f32, height as f32)
        .and_then(PathBuilder::from_oval);

    if let Some(path) = oval {
        let mut paint = Paint::default();
        paint.set_color(pixmap::color(color));
        paint.anti_alias = false;
        canvas.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    pixmap::to_image(&canvas)
}

#[cfg(test)]
mod tests {
    use super::*;

    const YELLOW: Rgba<u8> = Rgba([255, 255, 0, 255]);

    #[test]
    fn rectangle_is_solid() {
        let rect = filled_rectangle(YELLOW, 3, 2);
        assert_eq!(rect.dimensions(), (3, 2));
        assert!(rect.pixels().all(|p| *p == YELLOW));
    }

    #[test]
    fn ellipse_fills_centre_and_clears_corners() {
        let ellipse = filled_ellipse(YELLOW, 9, 5);
        assert_eq!(ellipse.dimensions(), (9, 5));
        assert_eq!(*ellipse.get_pixel(4, 2), YELLOW);
        assert_eq!(ellipse.get_pixel(0, 0)[3], 0);
        assert_eq!(ellipse.get_pixel(8, 4)[3], 0);
    }

    #[test]
    fn degenerate_ellipse_is_empty() {
        assert_eq!(filled_ellipse(YELLOW, 0, 5).dimensions(), (0, 5));
    }
}
