//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! other layers can stay focused on orchestration, workers, or platform glue.

pub mod errors;
pub mod handle;
pub mod providers;

pub use errors::{ProbeError, ProviderError, Result, RuntimeError, SurfaceError};
pub use handle::{CancelSource, CancelToken, RuntimeHandle};
pub use providers::{MapDataProvider, SessionRequest};
