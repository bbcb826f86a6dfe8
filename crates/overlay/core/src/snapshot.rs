//! Point-in-time game state read out of the game process.
use std::fmt;

use crate::area::AreaId;
use crate::geometry::Point;

/// Opaque OS window reference (the raw `HWND` value on Windows).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct WindowHandle(pub isize);

impl WindowHandle {
    pub const NULL: Self = Self(0);

    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

/// Game difficulty as stored in the act misc struct.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::FromRepr, strum::Display, strum::EnumIter,
)]
#[repr(u8)]
pub enum Difficulty {
    Normal = 0,
    Nightmare = 1,
    Hell = 2,
}

/// Player tile coordinates in world space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct TilePosition {
    pub x: u16,
    pub y: u16,
}

impl TilePosition {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    pub fn to_point(self) -> Point {
        Point::new(i32::from(self.x), i32::from(self.y))
    }
}

impl fmt::Display for TilePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Fully populated read of the game state.
///
/// A snapshot only exists when every field was decoded from a successful
/// read chain; there is no partially filled variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSnapshot {
    pub player_name: String,
    pub player_position: TilePosition,
    /// Map seed of the current game, `0` when no game is active.
    pub map_seed: u32,
    pub area: AreaId,
    pub act: u32,
    pub difficulty: Difficulty,
    /// Whether the in-game automap is currently shown.
    pub map_shown: bool,
    pub window: WindowHandle,
}

impl GameSnapshot {
    pub fn has_active_game(&self) -> bool {
        self.map_seed != 0
    }

    pub fn is_in_town(&self) -> bool {
        self.area.is_town()
    }
}
