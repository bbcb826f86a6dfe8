//! Turns overlay frames into pixels on the overlay surface.
//!
//! The renderer is driven by published [`OverlayFrame`]s and never touches
//! orchestrator state directly.
mod anchor;
mod surface;

pub use anchor::{autoscroll_anchor, base_anchor, compute_anchor};
pub use surface::{MemorySurface, OverlaySurface, SurfaceState};

use std::sync::Arc;

use overlay_core::{
    MapData, MapRaster, OverlaySettings, Point, Rgba, TilePosition, filled_ellipse,
};
use tracing::{debug, trace};

use crate::api::SurfaceError;
use crate::orchestrator::OverlayFrame;
use crate::window::WindowSystem;

/// What a render pass did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    Hidden,
    NoMapData,
    NoMonitor,
    Drawn { anchor: Point, size: (u32, u32) },
}

pub struct OverlayRenderer {
    settings: Arc<OverlaySettings>,
    windows: Arc<dyn WindowSystem>,
    surface: Box<dyn OverlaySurface>,
}

impl OverlayRenderer {
    pub fn new(
        settings: Arc<OverlaySettings>,
        windows: Arc<dyn WindowSystem>,
        surface: Box<dyn OverlaySurface>,
    ) -> Self {
        Self {
            settings,
            windows,
            surface,
        }
    }

    /// One-time surface setup: opacity and, if configured, topmost.
    pub fn prepare_surface(&mut self) {
        self.surface.set_opacity(self.settings.opacity);
        if !self.settings.always_on_top {
            return;
        }
        match self.surface.window() {
            Some(window) if self.windows.set_always_on_top(window) => {
                debug!("overlay pinned on top");
            }
            Some(_) => debug!("window system refused always-on-top"),
            None => trace!("surface has no native window to pin"),
        }
    }

    pub fn render(&mut self, frame: &OverlayFrame) -> Result<RenderOutcome, SurfaceError> {
        if frame.hidden {
            self.surface.set_visible(false);
            return Ok(RenderOutcome::Hidden);
        }

        let Some(map) = frame.map.as_deref().filter(|map| !map.is_empty()) else {
            return Ok(RenderOutcome::NoMapData);
        };

        let Some(screen) = self.windows.monitor_work_area(frame.snapshot.window) else {
            return Ok(RenderOutcome::NoMonitor);
        };
        self.surface.set_geometry(screen);

        let raster = build_display_raster(map, frame.snapshot.player_position, &self.settings);
        if raster.is_empty() {
            debug!("map has no walls to draw");
            return Ok(RenderOutcome::NoMapData);
        }
        let anchor = compute_anchor(&self.settings, screen, &raster);

        self.surface.set_visible(true);
        self.surface.draw(raster.image(), anchor)?;
        Ok(RenderOutcome::Drawn {
            anchor,
            size: raster.dimensions(),
        })
    }

    pub fn surface(&self) -> &dyn OverlaySurface {
        self.surface.as_ref()
    }
}

/// Map raster as it appears on screen: rotated, cropped, scaled and marked.
pub fn build_display_raster(
    map: &MapData,
    player: TilePosition,
    settings: &OverlaySettings,
) -> MapRaster {
    let mut raster = map.to_raster(&settings.palette, player);

    if settings.rotate_radians != 0.0 {
        raster = raster.rotate(settings.rotate_degrees(), true, false, Rgba([0, 0, 0, 0]));
    }
    raster = raster.crop().resize(settings.scale);

    let marker = settings.marker;
    if marker.size > 0 {
        raster.stamp_marker(&filled_ellipse(marker.color, marker.size, marker.size));
    }
    raster
}
