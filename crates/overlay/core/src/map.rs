//! Per-area collision maps served by the map provider.
use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::raster::MapRaster;
use crate::snapshot::TilePosition;

/// Terrain grid for one area.
///
/// `area_origin` is the world tile of `map_rows[0][0]`; the player's raster
/// position is their world tile minus this origin.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapData {
    #[serde(default)]
    pub area_origin: Point,
    #[serde(default)]
    pub map_rows: Vec<Vec<i32>>,
}

impl MapData {
    /// True when there is nothing to draw: no rows, or an empty first row.
    pub fn is_empty(&self) -> bool {
        self.map_rows.first().is_none_or(|row| row.is_empty())
    }

    pub fn width(&self) -> u32 {
        self.map_rows.iter().map(Vec::len).max().unwrap_or(0) as u32
    }

    pub fn height(&self) -> u32 {
        self.map_rows.len() as u32
    }

    /// Player position in this grid's pixel space.
    pub fn local_position(&self, player: TilePosition) -> Point {
        player.to_point() - self.area_origin
    }

    pub fn to_image(&self, palette: &MapPalette) -> RgbaImage {
        let mut image = RgbaImage::from_pixel(self.width(), self.height(), palette.floor);
        for (y, row) in self.map_rows.iter().enumerate() {
            for (x, &code) in row.iter().enumerate() {
                image.put_pixel(x as u32, y as u32, palette.color_for(code));
            }
        }
        image
    }

    /// Renders the grid and tracks the player's position inside it.
    pub fn to_raster(&self, palette: &MapPalette, player: TilePosition) -> MapRaster {
        MapRaster::new(self.to_image(palette), self.local_position(player))
    }
}

/// Colours used when rendering terrain codes.
///
/// Non-negative codes with the low bit set are blocked cells and drawn as
/// walls; everything else (walkable or unexplored `-1`) uses `floor`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapPalette {
    pub wall: Rgba<u8>,
    pub floor: Rgba<u8>,
}

impl MapPalette {
    pub fn color_for(&self, code: i32) -> Rgba<u8> {
        if code >= 0 && code & 1 == 1 {
            self.wall
        } else {
            self.floor
        }
    }
}

impl Default for MapPalette {
    fn default() -> Self {
        Self {
            wall: Rgba([170, 170, 170, 255]),
            floor: Rgba([0, 0, 0, 0]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_provider_payload() {
        let json = r#"{"areaOrigin":{"x":5000,"y":4800},"mapRows":[[1,0,-1],[0,1]]}"#;
        let data: MapData = serde_json::from_str(json).expect("valid payload");

        assert_eq!(data.area_origin, Point::new(5000, 4800));
        assert_eq!((data.width(), data.height()), (3, 2));
        assert!(!data.is_empty());
    }

    #[test]
    fn missing_rows_are_empty() {
        let data: MapData = serde_json::from_str("{}").expect("defaults apply");
        assert!(data.is_empty());

        let data = MapData {
            area_origin: Point::ORIGIN,
            map_rows: vec![vec![]],
        };
        assert!(data.is_empty());
    }

    #[test]
    fn walls_are_opaque_and_floor_is_clear() {
        let data = MapData {
            area_origin: Point::new(100, 200),
            map_rows: vec![vec![1, 0], vec![-1, 5]],
        };
        let palette = MapPalette::default();
        let raster = data.to_raster(&palette, TilePosition::new(101, 201));

        assert_eq!(raster.tracked(), Point::new(1, 1));
        assert_eq!(*raster.image().get_pixel(0, 0), palette.wall);
        assert_eq!(raster.image().get_pixel(1, 0)[3], 0);
        assert_eq!(raster.image().get_pixel(0, 1)[3], 0);
        assert_eq!(*raster.image().get_pixel(1, 1), palette.wall);
    }
}
