//! Unified error types surfaced by the runtime API.
//!
//! Probe, provider and surface failures are logged by the workers that hit
//! them; only runtime assembly and shutdown return [`RuntimeError`].
use std::time::Duration;

use overlay_core::AreaId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("runtime requires a {0} before building")]
    MissingComponent(&'static str),

    #[error("runtime worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

}

/// Failures while attaching to or reading the game process.
///
/// Every variant means "no snapshot this tick"; the probe never retries on
/// its own.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("process `{0}` is not running")]
    ProcessNotFound(String),

    #[error("access to process {pid} denied")]
    AccessDenied { pid: u32 },

    #[error("module `{name}` not mapped in process {pid}")]
    ModuleNotFound { pid: u32, name: String },

    #[error("failed to read {len} bytes at {address:#x}")]
    ReadFailed { address: u64, len: usize },

    #[error("address {base:#x} + {offset:#x} overflows")]
    AddressOverflow { base: u64, offset: u64 },

    #[error("no active game (level pointer is null)")]
    NoActiveGame,

    #[error("unknown difficulty byte {0}")]
    UnknownDifficulty(u8),

    #[error("offset schema has no `{0}` field")]
    MissingField(&'static str),

    #[error("process probing is not supported on this platform")]
    Unsupported,

    #[error("process I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures while talking to the map data provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("no map session is open")]
    NoSession,

    #[error("map request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("map server answered {status} for {url}")]
    Status { status: u16, url: String },

    #[error("map data for {0} is unavailable")]
    AreaUnavailable(AreaId),

    #[error("map request timed out after {0:?}")]
    Timeout(Duration),

    #[error("map request cancelled by shutdown")]
    Cancelled,
}

/// Failures while presenting a frame.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("surface I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode frame: {0}")]
    Encode(String),
}
