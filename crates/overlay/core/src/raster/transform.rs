//! Geometry-changing raster operations.
//!
//! Each operation takes the raster and the tracked point together and returns
//! both, so a caller cannot move one without the other.
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use tiny_skia::{FilterQuality, Pixmap, PixmapPaint, Transform};

use super::pixmap;
use crate::geometry::{Affine2, Point};

/// Rotates `image` clockwise by `angle_degrees` around its centre.
///
/// - `upsize_allowed || !clip_allowed`: the canvas grows to the bounding box
///   of the rotated rectangle.
/// - `!upsize_allowed && !clip_allowed`: the canvas keeps its size and the
///   content is shrunk uniformly to fit.
/// - otherwise the canvas keeps its size and corners are clipped.
///
/// The tracked point is rotated around the integer centres of the old and new
/// canvases and truncated. It never receives the shrink factor applied to the
/// content.
pub fn rotate(
    image: &RgbaImage,
    angle_degrees: f32,
    upsize_allowed: bool,
    clip_allowed: bool,
    background: Rgba<u8>,
    point: Point,
) -> (RgbaImage, Point) {
    if angle_degrees == 0.0 {
        return (image.clone(), point);
    }

    let (old_width, old_height) = image.dimensions();
    let radians = f64::from(angle_degrees).to_radians();
    let (sin, cos) = radians.sin_cos();

    let mut new_width = old_width;
    let mut new_height = old_height;
    let mut scale_factor = 1.0;

    if upsize_allowed || !clip_allowed {
        let (w, h) = (f64::from(old_width), f64::from(old_height));
        new_width = (w * cos.abs() + h * sin.abs()).round() as u32;
        new_height = (w * sin.abs() + h * cos.abs()).round() as u32;
    }

    if !upsize_allowed && !clip_allowed {
        if new_width > 0 && new_height > 0 {
            scale_factor = (f64::from(old_width) / f64::from(new_width))
                .min(f64::from(old_height) / f64::from(new_height));
        }
        new_width = old_width;
        new_height = old_height;
    }

    let Some(mut canvas) = Pixmap::new(new_width, new_height) else {
        return (RgbaImage::new(new_width, new_height), point);
    };
    if background[3] != 0 {
        canvas.fill(pixmap::color(background));
    }

    let mut transform =
        Transform::from_translate(new_width as f32 / 2.0, new_height as f32 / 2.0);
    if scale_factor != 1.0 {
        transform = transform.pre_scale(scale_factor as f32, scale_factor as f32);
    }
    let transform = transform
        .pre_rotate(angle_degrees)
        .pre_translate(-(old_width as f32) / 2.0, -(old_height as f32) / 2.0);

    if let Some(source) = pixmap::to_pixmap(image) {
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        canvas.draw_pixmap(0, 0, source.as_ref(), &paint, transform, None);
    }
    let canvas = pixmap::to_image(&canvas);

    let old_center = Point::new((old_width / 2) as i32, (old_height / 2) as i32);
    let new_center = Point::new((new_width / 2) as i32, (new_height / 2) as i32);
    let moved = Affine2::from_sin_cos(sin, cos).apply_truncated(point - old_center) + new_center;

    (canvas, moved)
}

/// Crops to the bounding box of fully opaque pixels.
///
/// Returns the cropped raster and the top-left corner of the box in the input
/// raster's coordinates; subtract it from any point expressed in the input.
/// The box spans `max - min` pixels per axis, so a single opaque pixel yields
/// an empty raster anchored at that pixel. A raster with no opaque pixel
/// yields an empty raster at the origin.
pub fn crop(image: &RgbaImage) -> (RgbaImage, Point) {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;

    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel[3] != u8::MAX {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((min_x, min_y, max_x, max_y)) => {
                (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
            }
        });
    }

    let Some((min_x, min_y, max_x, max_y)) = bounds else {
        return (RgbaImage::new(0, 0), Point::ORIGIN);
    };

    let cropped = imageops::crop_imm(image, min_x, min_y, max_x - min_x, max_y - min_y).to_image();
    (cropped, Point::new(min_x as i32, min_y as i32))
}

/// Scales both dimensions by `multiplier` with Catmull-Rom resampling.
///
/// Dimensions and the tracked point are truncated after scaling.
pub fn resize(image: &RgbaImage, multiplier: f64, point: Point) -> (RgbaImage, Point) {
    let width = (f64::from(image.width()) * multiplier) as u32;
    let height = (f64::from(image.height()) * multiplier) as u32;
    let point = Affine2::scale(multiplier).apply_truncated(point);

    let resized = if (width, height) == image.dimensions() {
        image.clone()
    } else if width == 0 || height == 0 {
        RgbaImage::new(width, height)
    } else {
        imageops::resize(image, width, height, FilterType::CatmullRom)
    };

    (resized, point)
}
