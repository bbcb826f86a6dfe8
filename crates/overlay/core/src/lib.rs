//! Deterministic overlay types shared across the runtime and clients.
//!
//! `overlay-core` defines what a game snapshot looks like, the geometry used
//! to place a map on screen, and the raster transform pipeline that keeps the
//! player marker aligned while the map is rotated, cropped and rescaled. The
//! crate performs no I/O; the runtime supplies snapshots and map payloads.
pub mod area;
pub mod config;
pub mod geometry;
pub mod map;
pub mod raster;
pub mod snapshot;

pub use area::{Area, AreaId};
pub use config::{MapPosition, MarkerStyle, OverlaySettings, ParseMapPositionError};
pub use geometry::{Affine2, Point, Rect};
pub use map::{MapData, MapPalette};
pub use raster::{MapRaster, crop, filled_ellipse, filled_rectangle, resize, rotate};
pub use snapshot::{Difficulty, GameSnapshot, TilePosition, WindowHandle};

/// Re-exported so downstream crates name pixel types without a direct
/// dependency on `image`.
pub use image::{Rgba, RgbaImage};
