//! Client configuration structures and loaders.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use overlay_core::{MapPosition, OverlaySettings, Rect};
use runtime::probe::schema::ProbeOffsets;
use runtime::{ProbeConfig, RuntimeConfig};

pub const DEFAULT_MAP_SERVER_URL: &str = "http://localhost:8080";

/// Configuration required to bootstrap the overlay.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub runtime: RuntimeConfig,
    pub probe: ProbeConfig,
    pub map_server_url: String,
    /// Write composed frames as PNG here instead of presenting them.
    pub frame_dir: Option<PathBuf>,
    /// Work area used where the OS cannot report one.
    pub screen: Rect,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            runtime: RuntimeConfig::default(),
            probe: ProbeConfig::default(),
            map_server_url: DEFAULT_MAP_SERVER_URL.to_string(),
            frame_dir: None,
            screen: Rect::new(0, 0, 1920, 1080),
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Unset or unparsable variables keep their defaults.
    ///
    /// Environment variables:
    /// - `OVERLAY_OPACITY` - Surface opacity, `0.0..=1.0` (default: 0.6)
    /// - `OVERLAY_UPDATE_INTERVAL_MS` - Tick period (default: 100, min: 10)
    /// - `OVERLAY_ALWAYS_ON_TOP` - Pin the overlay above other windows (default: true)
    /// - `OVERLAY_HIDE_IN_TOWN` - Hide in town areas (default: true)
    /// - `OVERLAY_TOGGLE_VIA_IN_GAME_MAP` - Follow the in-game automap (default: true)
    /// - `OVERLAY_DEBUG` - Ignore window focus (default: false)
    /// - `OVERLAY_MAP_POSITION` - `middle`, `top-right` or `top-left` (default: top-right)
    /// - `OVERLAY_AUTO_SCROLL` - Keep the player centred (default: false)
    /// - `OVERLAY_ROTATE_RADIANS` - Map rotation (default: 0)
    /// - `OVERLAY_SCALE` - Map size multiplier (default: 1.0)
    /// - `PROBE_PROCESS_NAME` - Game executable name (default: D2R)
    /// - `PROBE_PLAYER_UNIT_OFFSET` / `PROBE_IN_GAME_MAP_OFFSET` - Root offsets, hex or decimal
    /// - `MAP_SERVER_URL` - Map server root (default: http://localhost:8080)
    /// - `MAP_FETCH_TIMEOUT_MS` - Per-request timeout (default: 10000)
    /// - `OVERLAY_FRAME_DIR` - Dump frames as PNG into this directory
    /// - `OVERLAY_SCREEN_WIDTH` / `OVERLAY_SCREEN_HEIGHT` - Fallback work area
    pub fn from_env() -> Self {
        let mut config = Self::default();
        let settings = &mut config.runtime.settings;

        if let Some(opacity) = read_env::<f32>("OVERLAY_OPACITY") {
            settings.opacity = opacity.clamp(0.0, 1.0);
        }
        if let Some(interval) = read_env::<u64>("OVERLAY_UPDATE_INTERVAL_MS") {
            settings.update_interval_ms = interval.max(OverlaySettings::MIN_UPDATE_INTERVAL_MS);
        }
        if let Some(enable) = read_env::<bool>("OVERLAY_ALWAYS_ON_TOP") {
            settings.always_on_top = enable;
        }
        if let Some(enable) = read_env::<bool>("OVERLAY_HIDE_IN_TOWN") {
            settings.hide_in_town = enable;
        }
        if let Some(enable) = read_env::<bool>("OVERLAY_TOGGLE_VIA_IN_GAME_MAP") {
            settings.toggle_via_in_game_map = enable;
        }
        if let Some(enable) = read_env::<bool>("OVERLAY_DEBUG") {
            settings.debug_mode = enable;
        }
        if let Some(position) = read_env::<MapPosition>("OVERLAY_MAP_POSITION") {
            settings.map_position = position;
        }
        if let Some(enable) = read_env::<bool>("OVERLAY_AUTO_SCROLL") {
            settings.auto_scroll = enable;
        }
        if let Some(radians) = read_env::<f64>("OVERLAY_ROTATE_RADIANS").filter(|r| r.is_finite()) {
            settings.rotate_radians = radians;
        }
        if let Some(scale) =
            read_env::<f64>("OVERLAY_SCALE").filter(|s| s.is_finite() && *s > 0.0)
        {
            settings.scale = scale;
        }

        if let Ok(name) = env::var("PROBE_PROCESS_NAME") {
            if !name.trim().is_empty() {
                config.probe.process_name = name.trim().to_string();
            }
        }
        let defaults = ProbeOffsets::default();
        config.probe.offsets = ProbeOffsets {
            player_unit: read_offset_env("PROBE_PLAYER_UNIT_OFFSET")
                .unwrap_or(defaults.player_unit),
            in_game_map: read_offset_env("PROBE_IN_GAME_MAP_OFFSET")
                .unwrap_or(defaults.in_game_map),
        };

        if let Ok(url) = env::var("MAP_SERVER_URL") {
            config.map_server_url = url;
        }
        if let Some(timeout) = read_env::<u64>("MAP_FETCH_TIMEOUT_MS") {
            config.runtime.fetch_timeout = Duration::from_millis(timeout.max(1));
        }

        config.frame_dir = env::var("OVERLAY_FRAME_DIR").ok().map(PathBuf::from);

        if let Some(width) = read_env::<u32>("OVERLAY_SCREEN_WIDTH") {
            config.screen.width = width;
        }
        if let Some(height) = read_env::<u32>("OVERLAY_SCREEN_HEIGHT") {
            config.screen.height = height;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.trim().parse().ok()
}

/// Offsets are usually written in hex; accept `0x`-prefixed or decimal.
fn read_offset_env(key: &str) -> Option<u64> {
    parse_offset(&env::var(key).ok()?)
}

fn parse_offset(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => raw.parse().ok(),
    }
}
