//! Where the map raster is placed on the overlay surface.
use overlay_core::{Affine2, MapPosition, MapRaster, OverlaySettings, Point, Rect};

/// Top-left corner of the raster for a fixed `position`.
pub fn base_anchor(position: MapPosition, screen: Rect, raster_size: (u32, u32)) -> Point {
    let (width, height) = (screen.width as i32, screen.height as i32);
    let (raster_width, raster_height) = (raster_size.0 as i32, raster_size.1 as i32);

    match position {
        MapPosition::Middle => Point::new((width - raster_width) / 2, (height - raster_height) / 2),
        MapPosition::TopRight => Point::new(width - raster_width, 0),
        MapPosition::TopLeft => Point::ORIGIN,
    }
}

/// Anchor that keeps the player centred on screen.
///
/// With rotation the player's offset from the raster centre is rotated back
/// by the map angle and added to `base`; without rotation the raster is simply
/// shifted so the player sits at the screen centre.
pub fn autoscroll_anchor(
    base: Point,
    screen: Rect,
    raster: &MapRaster,
    rotate_radians: f64,
) -> Point {
    if rotate_radians != 0.0 {
        let offset = raster.tracked() - raster.half_extents();
        base + Affine2::rotation(-rotate_radians).apply_rounded(offset)
    } else {
        screen.half_extents() - raster.tracked()
    }
}

pub fn compute_anchor(settings: &OverlaySettings, screen: Rect, raster: &MapRaster) -> Point {
    let base = base_anchor(settings.map_position, screen, raster.dimensions());
    if settings.auto_scroll {
        autoscroll_anchor(base, screen, raster, settings.rotate_radians)
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use overlay_core::{Rgba, RgbaImage};

    use super::*;

    const SCREEN: Rect = Rect::new(0, 0, 1000, 800);

    fn raster(width: u32, height: u32, tracked: Point) -> MapRaster {
        MapRaster::new(RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0])), tracked)
    }

    #[test]
    fn fixed_positions() {
        assert_eq!(
            base_anchor(MapPosition::Middle, SCREEN, (200, 100)),
            Point::new(400, 350)
        );
        assert_eq!(
            base_anchor(MapPosition::TopRight, SCREEN, (200, 100)),
            Point::new(800, 0)
        );
        assert_eq!(
            base_anchor(MapPosition::TopLeft, SCREEN, (200, 100)),
            Point::ORIGIN
        );
    }

    #[test]
    fn unrotated_autoscroll_centres_player() {
        let map = raster(200, 100, Point::new(30, 40));
        let anchor = autoscroll_anchor(Point::new(800, 0), SCREEN, &map, 0.0);
        assert_eq!(anchor, Point::new(470, 360));
        assert_eq!(anchor + map.tracked(), SCREEN.half_extents());
    }

    #[test]
    fn rotated_autoscroll_applies_inverse_rotation() {
        // Offset from the raster centre is (10, 0); rotating back a quarter
        // turn gives (0, -10).
        let map = raster(100, 100, Point::new(60, 50));
        let base = Point::new(450, 350);
        let anchor = autoscroll_anchor(base, SCREEN, &map, FRAC_PI_2);
        assert_eq!(anchor, Point::new(450, 340));
    }

    #[test]
    fn settings_select_mode() {
        let map = raster(200, 100, Point::new(30, 40));
        let mut settings = OverlaySettings {
            map_position: MapPosition::TopLeft,
            auto_scroll: false,
            ..OverlaySettings::default()
        };
        assert_eq!(compute_anchor(&settings, SCREEN, &map), Point::ORIGIN);

        settings.auto_scroll = true;
        assert_eq!(compute_anchor(&settings, SCREEN, &map), Point::new(470, 360));
    }
}
