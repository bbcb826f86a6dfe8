//! Presentation target for overlay frames.
use std::sync::{Arc, Mutex};

use overlay_core::{Point, Rect, RgbaImage, WindowHandle};

use crate::api::SurfaceError;

/// A transparent, click-through window (or stand-in) the map is drawn on.
///
/// Coordinates passed to [`draw`](Self::draw) are relative to the geometry
/// last set with [`set_geometry`](Self::set_geometry).
pub trait OverlaySurface: Send {
    fn set_visible(&mut self, visible: bool);

    fn set_geometry(&mut self, area: Rect);

    fn set_opacity(&mut self, opacity: f32);

    /// Native window backing the surface, if it has one.
    fn window(&self) -> Option<WindowHandle> {
        None
    }

    /// Replace the surface contents with `raster` placed at `anchor`.
    fn draw(&mut self, raster: &RgbaImage, anchor: Point) -> Result<(), SurfaceError>;
}

impl<T: OverlaySurface + ?Sized> OverlaySurface for Box<T> {
    fn set_visible(&mut self, visible: bool) {
        (**self).set_visible(visible);
    }

    fn set_geometry(&mut self, area: Rect) {
        (**self).set_geometry(area);
    }

    fn set_opacity(&mut self, opacity: f32) {
        (**self).set_opacity(opacity);
    }

    fn window(&self) -> Option<WindowHandle> {
        (**self).window()
    }

    fn draw(&mut self, raster: &RgbaImage, anchor: Point) -> Result<(), SurfaceError> {
        (**self).draw(raster, anchor)
    }
}

/// Everything a [`MemorySurface`] has been told so far.
#[derive(Clone, Debug, Default)]
pub struct SurfaceState {
    pub visible: bool,
    pub geometry: Option<Rect>,
    pub opacity: Option<f32>,
    pub last_draw: Option<(RgbaImage, Point)>,
    pub draw_count: usize,
}

/// In-memory surface; clones share state so a copy can be inspected while
/// another is owned by the renderer.
#[derive(Clone, Debug, Default)]
pub struct MemorySurface {
    state: Arc<Mutex<SurfaceState>>,
    window: Option<WindowHandle>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_window(mut self, window: WindowHandle) -> Self {
        self.window = Some(window);
        self
    }

    pub fn state(&self) -> SurfaceState {
        self.state.lock().map(|state| state.clone()).unwrap_or_default()
    }

    fn update(&self, apply: impl FnOnce(&mut SurfaceState)) {
        if let Ok(mut state) = self.state.lock() {
            apply(&mut state);
        }
    }
}

impl OverlaySurface for MemorySurface {
    fn set_visible(&mut self, visible: bool) {
        self.update(|state| state.visible = visible);
    }

    fn set_geometry(&mut self, area: Rect) {
        self.update(|state| state.geometry = Some(area));
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.update(|state| state.opacity = Some(opacity));
    }

    fn window(&self) -> Option<WindowHandle> {
        self.window
    }

    fn draw(&mut self, raster: &RgbaImage, anchor: Point) -> Result<(), SurfaceError> {
        self.update(|state| {
            state.last_draw = Some((raster.clone(), anchor));
            state.draw_count += 1;
        });
        Ok(())
    }
}
