//! Raster transform pipeline with a co-transformed tracked point.
//!
//! The free functions in [`transform`] are the primitives; [`MapRaster`]
//! chains them so the player marker always follows the map geometry.
mod fill;
mod pixmap;
mod transform;

use image::imageops;
use image::{Rgba, RgbaImage};

use crate::geometry::Point;

pub use fill::{filled_ellipse, filled_rectangle};
pub use transform::{crop, resize, rotate};

/// A map raster and the player position expressed in its pixel space.
#[derive(Clone, Debug, PartialEq)]
pub struct MapRaster {
    image: RgbaImage,
    tracked: Point,
}

impl MapRaster {
    pub fn new(image: RgbaImage, tracked: Point) -> Self {
        Self { image, tracked }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn tracked(&self) -> Point {
        self.tracked
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Integer centre of the raster.
    pub fn half_extents(&self) -> Point {
        let (width, height) = self.image.dimensions();
        Point::new((width / 2) as i32, (height / 2) as i32)
    }

    pub fn is_empty(&self) -> bool {
        self.image.width() == 0 || self.image.height() == 0
    }

    pub fn into_parts(self) -> (RgbaImage, Point) {
        (self.image, self.tracked)
    }

    pub fn rotate(
        self,
        angle_degrees: f32,
        upsize_allowed: bool,
        clip_allowed: bool,
        background: Rgba<u8>,
    ) -> Self {
        let (image, tracked) = rotate(
            &self.image,
            angle_degrees,
            upsize_allowed,
            clip_allowed,
            background,
            self.tracked,
        );
        Self { image, tracked }
    }

    /// Crops to opaque bounds and re-anchors the tracked point.
    pub fn crop(self) -> Self {
        let (image, offset) = crop(&self.image);
        Self {
            image,
            tracked: self.tracked - offset,
        }
    }

    pub fn resize(self, multiplier: f64) -> Self {
        let (image, tracked) = resize(&self.image, multiplier, self.tracked);
        Self { image, tracked }
    }

    /// Composites `marker` centred on the tracked point.
    pub fn stamp_marker(&mut self, marker: &RgbaImage) {
        let x = i64::from(self.tracked.x) - i64::from(marker.width() / 2);
        let y = i64::from(self.tracked.y) - i64::from(marker.height() / 2);
        imageops::overlay(&mut self.image, marker, x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WALL: Rgba<u8> = Rgba([200, 200, 200, 255]);
    const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

    #[test]
    fn crop_reanchors_tracked_point() {
        let mut image = RgbaImage::from_pixel(20, 20, CLEAR);
        image.put_pixel(4, 6, WALL);
        image.put_pixel(14, 16, WALL);

        let raster = MapRaster::new(image, Point::new(10, 10)).crop();

        assert_eq!(raster.dimensions(), (10, 10));
        assert_eq!(raster.tracked(), Point::new(6, 4));
    }

    #[test]
    fn pipeline_keeps_marker_on_same_pixel() {
        // A single opaque pixel under the tracked point must still be under
        // it after a half turn and a 2x resize.
        let mut image = RgbaImage::from_pixel(11, 11, CLEAR);
        image.put_pixel(8, 2, WALL);

        let raster = MapRaster::new(image, Point::new(8, 2))
            .rotate(180.0, true, false, CLEAR)
            .resize(2.0);

        let tracked = raster.tracked();
        let hit = (-2..=2).any(|dx| {
            (-2..=2).any(|dy| {
                let (x, y) = (tracked.x + dx, tracked.y + dy);
                x >= 0
                    && y >= 0
                    && (x as u32) < raster.image().width()
                    && (y as u32) < raster.image().height()
                    && raster.image().get_pixel(x as u32, y as u32)[3] > 0
            })
        });
        assert!(hit, "no content near tracked point {tracked:?}");
    }

    #[test]
    fn rotated_block_stays_under_tracked_point() {
        let mut image = RgbaImage::from_pixel(15, 11, CLEAR);
        for x in 9..12 {
            for y in 2..5 {
                image.put_pixel(x, y, WALL);
            }
        }

        for angle in [30.0, -30.0, 90.0, 135.0] {
            let raster = MapRaster::new(image.clone(), Point::new(10, 3))
                .rotate(angle, true, false, CLEAR);
            let tracked = raster.tracked();
            let (width, height) = raster.dimensions();
            let covered = (-1..=1).any(|dx| {
                (-1..=1).any(|dy| {
                    let (x, y) = (tracked.x + dx, tracked.y + dy);
                    x >= 0
                        && y >= 0
                        && (x as u32) < width
                        && (y as u32) < height
                        && raster.image().get_pixel(x as u32, y as u32)[3] > 0
                })
            });
            assert!(covered, "{angle}° left {tracked:?} off the block");
        }
    }

    #[test]
    fn marker_is_centred_on_tracked_point() {
        let mut raster = MapRaster::new(RgbaImage::from_pixel(10, 10, CLEAR), Point::new(5, 5));
        raster.stamp_marker(&filled_rectangle(WALL, 3, 3));

        assert_eq!(*raster.image().get_pixel(4, 4), WALL);
        assert_eq!(*raster.image().get_pixel(6, 6), WALL);
        assert_eq!(raster.image().get_pixel(7, 7)[3], 0);
        assert_eq!(raster.image().get_pixel(3, 3)[3], 0);
    }
}
