//! OS window queries used for visibility and overlay placement.
#[cfg(windows)]
mod windows;

#[cfg(windows)]
pub use windows::Win32WindowSystem;

use overlay_core::{Rect, WindowHandle};

pub trait WindowSystem: Send + Sync {
    /// Window that currently has input focus.
    fn foreground_window(&self) -> Option<WindowHandle>;

    /// Working area (monitor minus taskbars) of the monitor showing `window`.
    fn monitor_work_area(&self, window: WindowHandle) -> Option<Rect>;

    /// Whether `window` currently has focus.
    fn is_foreground(&self, window: WindowHandle) -> bool {
        !window.is_null() && self.foreground_window() == Some(window)
    }

    /// Pin `window` above other windows and let input pass through it.
    /// Returns false if the OS refused.
    fn set_always_on_top(&self, window: WindowHandle) -> bool;
}

/// A single fixed-size display.
///
/// Used on platforms without a native backend and when rendering frames
/// off-screen, where the game window cannot be identified. With
/// `assume_focused` every window counts as foreground.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedDisplay {
    work_area: Rect,
    foreground: Option<WindowHandle>,
    assume_focused: bool,
}

impl FixedDisplay {
    pub fn new(work_area: Rect) -> Self {
        Self {
            work_area,
            foreground: None,
            assume_focused: false,
        }
    }

    /// Report `window` as the focused window.
    pub fn with_foreground(mut self, window: WindowHandle) -> Self {
        self.foreground = Some(window);
        self
    }

    pub fn assume_focused(mut self, assume: bool) -> Self {
        self.assume_focused = assume;
        self
    }
}

impl WindowSystem for FixedDisplay {
    fn foreground_window(&self) -> Option<WindowHandle> {
        self.foreground
    }

    fn is_foreground(&self, window: WindowHandle) -> bool {
        self.assume_focused || (!window.is_null() && self.foreground == Some(window))
    }

    fn monitor_work_area(&self, _window: WindowHandle) -> Option<Rect> {
        Some(self.work_area)
    }

    fn set_always_on_top(&self, _window: WindowHandle) -> bool {
        true
    }
}

/// Window system for the current platform.
pub fn default_window_system(fallback_work_area: Rect) -> Box<dyn WindowSystem> {
    #[cfg(windows)]
    {
        let _ = fallback_work_area;
        Box::new(Win32WindowSystem)
    }
    #[cfg(not(windows))]
    {
        Box::new(FixedDisplay::new(fallback_work_area).assume_focused(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_display_focus() {
        let area = Rect::new(0, 0, 800, 600);
        let game = WindowHandle(0x42);

        let display = FixedDisplay::new(area);
        assert!(!display.is_foreground(game));

        let display = display.with_foreground(game);
        assert!(display.is_foreground(game));
        assert!(!display.is_foreground(WindowHandle(0x43)));
        assert!(!display.is_foreground(WindowHandle::NULL));

        assert!(FixedDisplay::new(area).assume_focused(true).is_foreground(WindowHandle::NULL));
        assert_eq!(display.monitor_work_area(game), Some(area));
    }
}
