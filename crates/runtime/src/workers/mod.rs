//! Worker tasks that back the runtime orchestration.
//!
//! The tick worker captures snapshots and drives map fetching; the render
//! worker turns published frames into pixels. They only share the frame
//! channel.

mod render;
mod tick;

pub use render::RenderWorker;
pub use tick::TickWorker;
