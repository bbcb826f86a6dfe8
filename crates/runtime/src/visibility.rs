//! Whether the overlay should be hidden for the current snapshot.
use overlay_core::{GameSnapshot, OverlaySettings};

use crate::window::WindowSystem;

/// `game_in_foreground` is the raw OS answer; `debug_mode` overrides it.
pub fn should_hide_map(
    snapshot: &GameSnapshot,
    settings: &OverlaySettings,
    game_in_foreground: bool,
) -> bool {
    if !snapshot.has_active_game() {
        return true;
    }
    if !(game_in_foreground || settings.debug_mode) {
        return true;
    }
    if settings.hide_in_town && snapshot.is_in_town() {
        return true;
    }
    settings.toggle_via_in_game_map && !snapshot.map_shown
}

/// True when the snapshot's game window is the foreground window.
pub fn game_in_foreground(snapshot: &GameSnapshot, windows: &dyn WindowSystem) -> bool {
    windows.is_foreground(snapshot.window)
}
