//! Overlay presentation settings and tunable parameters.
use std::str::FromStr;

use image::Rgba;
use thiserror::Error;

use crate::map::MapPalette;

/// Where the map is anchored on the monitor before autoscroll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display)]
pub enum MapPosition {
    Middle,
    #[default]
    TopRight,
    TopLeft,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown map position `{0}` (expected middle, top-right or top-left)")]
pub struct ParseMapPositionError(pub String);

impl FromStr for MapPosition {
    type Err = ParseMapPositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "middle" | "center" | "centre" => Ok(Self::Middle),
            "topright" => Ok(Self::TopRight),
            "topleft" => Ok(Self::TopLeft),
            _ => Err(ParseMapPositionError(s.to_string())),
        }
    }
}

/// Player marker drawn on top of the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarkerStyle {
    pub color: Rgba<u8>,
    pub size: u32,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            color: Rgba([255, 255, 0, 255]),
            size: 6,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OverlaySettings {
    /// Surface opacity in `0.0..=1.0`.
    pub opacity: f32,
    pub update_interval_ms: u64,
    pub always_on_top: bool,
    pub hide_in_town: bool,
    /// Only show the overlay while the in-game automap is open.
    pub toggle_via_in_game_map: bool,
    /// Treat the game window as foreground regardless of focus.
    pub debug_mode: bool,
    pub map_position: MapPosition,
    pub auto_scroll: bool,
    /// Map rotation; `0.0` disables rotation.
    pub rotate_radians: f64,
    /// Uniform size multiplier applied after rotation and cropping.
    pub scale: f64,
    pub marker: MarkerStyle,
    pub palette: MapPalette,
}

impl OverlaySettings {
    pub const DEFAULT_OPACITY: f32 = 0.6;
    pub const DEFAULT_UPDATE_INTERVAL_MS: u64 = 100;
    pub const MIN_UPDATE_INTERVAL_MS: u64 = 10;

    pub fn new() -> Self {
        Self {
            opacity: Self::DEFAULT_OPACITY,
            update_interval_ms: Self::DEFAULT_UPDATE_INTERVAL_MS,
            always_on_top: true,
            hide_in_town: true,
            toggle_via_in_game_map: true,
            debug_mode: false,
            map_position: MapPosition::default(),
            auto_scroll: false,
            rotate_radians: 0.0,
            scale: 1.0,
            marker: MarkerStyle::default(),
            palette: MapPalette::default(),
        }
    }

    pub fn rotate_degrees(&self) -> f32 {
        self.rotate_radians.to_degrees() as f32
    }
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_position_accepts_common_spellings() {
        assert_eq!("Middle".parse(), Ok(MapPosition::Middle));
        assert_eq!("top-right".parse(), Ok(MapPosition::TopRight));
        assert_eq!("TOP_LEFT".parse(), Ok(MapPosition::TopLeft));
        assert!("bottom".parse::<MapPosition>().is_err());
    }
}
