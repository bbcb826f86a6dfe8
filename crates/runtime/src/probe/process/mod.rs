//! Locating the game process and opening its memory for reading.
//!
//! Platform backends live in submodules; [`default_attacher`] picks the one
//! for the current target.
#[cfg(target_os = "linux")]
mod procfs;
#[cfg(windows)]
mod windows;

#[cfg(target_os = "linux")]
pub use procfs::ProcfsAttacher;
#[cfg(windows)]
pub use windows::ToolhelpAttacher;

use std::sync::Arc;

use overlay_core::WindowHandle;

use super::memory::{MemoryReader, SparseMemory};
use crate::api::ProbeError;

/// An attached game process. Dropping it releases the OS handle.
pub trait GameProcess: MemoryReader + Send {
    fn pid(&self) -> u32;

    /// Load address of the game's main module.
    fn module_base(&self) -> u64;

    /// Top-level window owned by the process, or [`WindowHandle::NULL`].
    fn main_window(&self) -> WindowHandle;
}

/// Finds a running process by executable name and attaches to it.
pub trait ProcessAttacher: Send + Sync {
    fn attach(&self, process_name: &str) -> Result<Box<dyn GameProcess>, ProbeError>;
}

impl<T: ProcessAttacher + ?Sized> ProcessAttacher for Box<T> {
    fn attach(&self, process_name: &str) -> Result<Box<dyn GameProcess>, ProbeError> {
        (**self).attach(process_name)
    }
}

/// Attacher for the current platform.
pub fn default_attacher() -> Box<dyn ProcessAttacher> {
    #[cfg(windows)]
    {
        Box::new(ToolhelpAttacher)
    }
    #[cfg(target_os = "linux")]
    {
        Box::new(ProcfsAttacher)
    }
    #[cfg(not(any(windows, target_os = "linux")))]
    {
        Box::new(UnsupportedAttacher)
    }
}

/// Attacher for targets without a process backend.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnsupportedAttacher;

impl ProcessAttacher for UnsupportedAttacher {
    fn attach(&self, _process_name: &str) -> Result<Box<dyn GameProcess>, ProbeError> {
        Err(ProbeError::Unsupported)
    }
}

/// A fake process backed by [`SparseMemory`].
#[derive(Clone, Debug)]
pub struct InMemoryProcess {
    pub pid: u32,
    pub module_base: u64,
    pub window: WindowHandle,
    pub memory: SparseMemory,
}

impl MemoryReader for InMemoryProcess {
    fn read_at(&self, address: u64, buf: &mut [u8]) -> Result<(), ProbeError> {
        self.memory.read_at(address, buf)
    }
}

impl GameProcess for InMemoryProcess {
    fn pid(&self) -> u32 {
        self.pid
    }

    fn module_base(&self) -> u64 {
        self.module_base
    }

    fn main_window(&self) -> WindowHandle {
        self.window
    }
}

/// Attacher that hands out clones of a shared [`InMemoryProcess`].
///
/// The process can be swapped between captures to script game state.
#[derive(Clone, Debug, Default)]
pub struct InMemoryAttacher {
    process: Arc<std::sync::Mutex<Option<InMemoryProcess>>>,
}

impl InMemoryAttacher {
    pub fn new(process: InMemoryProcess) -> Self {
        let attacher = Self::default();
        attacher.replace(Some(process));
        attacher
    }

    /// Swap the visible process; `None` simulates the game not running.
    pub fn replace(&self, process: Option<InMemoryProcess>) {
        if let Ok(mut slot) = self.process.lock() {
            *slot = process;
        }
    }
}

impl ProcessAttacher for InMemoryAttacher {
    fn attach(&self, process_name: &str) -> Result<Box<dyn GameProcess>, ProbeError> {
        let process = self
            .process
            .lock()
            .ok()
            .and_then(|slot| slot.clone())
            .ok_or_else(|| ProbeError::ProcessNotFound(process_name.to_string()))?;
        Ok(Box::new(process))
    }
}
