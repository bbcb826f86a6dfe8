//! Runtime orchestration for the map overlay.
//!
//! This crate wires together the process probe, the map provider
//! abstraction, the fetch orchestrator and the renderer into a cohesive
//! runtime API. Consumers embed [`Runtime`] to run the overlay and observe it
//! through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the builder and worker lifecycle
//! - [`api`] exposes the types downstream clients interact with
//! - [`probe`] reads game state out of the game process
//! - [`orchestrator`] decides when to open sessions and fetch maps
//! - [`render`] and [`visibility`] turn frames into pixels
//! - [`providers`] and [`window`] hold concrete platform and network adapters
pub mod api;
pub mod orchestrator;
pub mod probe;
pub mod providers;
pub mod render;
pub mod runtime;
pub mod visibility;
pub mod window;

mod workers;

pub use api::{
    CancelSource, CancelToken, MapDataProvider, ProbeError, ProviderError, Result, RuntimeError,
    RuntimeHandle, SessionRequest, SurfaceError,
};
pub use orchestrator::{MapFetchOrchestrator, OrchestratorState, OverlayFrame, TickPlan};
pub use probe::{
    InMemoryAttacher, InMemoryProcess, ProbeConfig, ProcessAttacher, SnapshotSource, SparseMemory,
    StateProbe, default_attacher,
};
pub use providers::{HttpMapProvider, ProviderCall, StaticMapProvider};
pub use render::{MemorySurface, OverlayRenderer, OverlaySurface, RenderOutcome, SurfaceState};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use visibility::should_hide_map;
pub use window::{FixedDisplay, WindowSystem, default_window_system};
pub use workers::TickWorker;
