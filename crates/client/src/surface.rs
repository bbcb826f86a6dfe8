//! Overlay surfaces available to the client binary.
//!
//! [`FrameDumpSurface`] composes each frame the way a layered overlay window
//! would show it and writes it to disk as PNG; [`HeadlessSurface`] only logs.
use std::fs;
use std::path::{Path, PathBuf};

use image::imageops;
use overlay_core::{Point, Rect, RgbaImage};
use runtime::{OverlaySurface, SurfaceError};
use tracing::{debug, trace, warn};

const FRAME_FILE: &str = "overlay.png";

/// Writes the composed overlay to `<dir>/overlay.png` on every draw.
///
/// The file is replaced atomically so viewers never read a partial frame.
/// Hiding the surface writes a fully transparent frame.
pub struct FrameDumpSurface {
    dir: PathBuf,
    geometry: Rect,
    opacity: f32,
    visible: bool,
}

impl FrameDumpSurface {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, SurfaceError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            geometry: Rect::default(),
            opacity: 1.0,
            visible: false,
        })
    }

    pub fn frame_path(&self) -> PathBuf {
        self.dir.join(FRAME_FILE)
    }

    fn canvas(&self) -> RgbaImage {
        RgbaImage::new(self.geometry.width, self.geometry.height)
    }

    fn write(&self, frame: &RgbaImage) -> Result<(), SurfaceError> {
        let path = self.frame_path();
        let staging = self.dir.join(format!("{FRAME_FILE}.tmp"));
        frame
            .save_with_format(&staging, image::ImageFormat::Png)
            .map_err(|e| SurfaceError::Encode(e.to_string()))?;
        fs::rename(&staging, &path)?;
        trace!(path = %path.display(), "frame written");
        Ok(())
    }
}

/// Places `raster` at `anchor` on `canvas` and scales alpha by `opacity`.
pub fn compose(canvas: &mut RgbaImage, raster: &RgbaImage, anchor: Point, opacity: f32) {
    imageops::overlay(canvas, raster, i64::from(anchor.x), i64::from(anchor.y));
    if opacity < 1.0 {
        let opacity = opacity.clamp(0.0, 1.0);
        for pixel in canvas.pixels_mut() {
            pixel[3] = (f32::from(pixel[3]) * opacity).round() as u8;
        }
    }
}

impl OverlaySurface for FrameDumpSurface {
    fn set_visible(&mut self, visible: bool) {
        if self.visible && !visible {
            if let Err(error) = self.write(&self.canvas()) {
                warn!(%error, "failed to clear frame");
            }
        }
        self.visible = visible;
    }

    fn set_geometry(&mut self, area: Rect) {
        if self.geometry != area {
            debug!(?area, "overlay geometry changed");
            self.geometry = area;
        }
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
    }

    fn draw(&mut self, raster: &RgbaImage, anchor: Point) -> Result<(), SurfaceError> {
        let mut canvas = self.canvas();
        compose(&mut canvas, raster, anchor, self.opacity);
        self.write(&canvas)
    }
}

/// Surface for running without any output, e.g. to watch the logs.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    visible: bool,
}

impl OverlaySurface for HeadlessSurface {
    fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            debug!(visible, "overlay visibility changed");
            self.visible = visible;
        }
    }

    fn set_geometry(&mut self, _area: Rect) {}

    fn set_opacity(&mut self, _opacity: f32) {}

    fn draw(&mut self, raster: &RgbaImage, anchor: Point) -> Result<(), SurfaceError> {
        trace!(size = ?raster.dimensions(), ?anchor, "frame ready");
        Ok(())
    }
}

/// Pick the frame-dump surface when a directory is configured.
pub fn surface_for(frame_dir: Option<&Path>) -> Result<Box<dyn OverlaySurface>, SurfaceError> {
    Ok(match frame_dir {
        Some(dir) => Box::new(FrameDumpSurface::new(dir)?),
        None => Box::new(HeadlessSurface::default()),
    })
}
