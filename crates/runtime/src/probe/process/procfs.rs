//! `/proc` backend: finds the process by name and reads `/proc/<pid>/mem`.
//!
//! Covers the game running under Wine/Proton, where the Windows module shows
//! up as a file mapping in `/proc/<pid>/maps`.
use std::fs::{self, File};
use std::io::ErrorKind;
use std::os::unix::fs::FileExt;
use std::path::Path;

use overlay_core::WindowHandle;
use tracing::debug;

use super::{GameProcess, ProcessAttacher};
use crate::api::ProbeError;
use crate::probe::memory::MemoryReader;

#[derive(Clone, Copy, Debug, Default)]
pub struct ProcfsAttacher;

impl ProcessAttacher for ProcfsAttacher {
    fn attach(&self, process_name: &str) -> Result<Box<dyn GameProcess>, ProbeError> {
        let pid = find_pid(process_name)?;
        let maps =
            fs::read_to_string(format!("/proc/{pid}/maps")).map_err(|e| access_error(pid, e))?;
        let module_base =
            module_base(&maps, process_name).ok_or_else(|| ProbeError::ModuleNotFound {
                pid,
                name: process_name.to_string(),
            })?;
        let mem = File::open(format!("/proc/{pid}/mem")).map_err(|e| access_error(pid, e))?;

        debug!(pid, module_base = format_args!("{module_base:#x}"), "attached via procfs");
        Ok(Box::new(ProcfsProcess {
            pid,
            module_base,
            mem,
        }))
    }
}

struct ProcfsProcess {
    pid: u32,
    module_base: u64,
    mem: File,
}

impl MemoryReader for ProcfsProcess {
    fn read_at(&self, address: u64, buf: &mut [u8]) -> Result<(), ProbeError> {
        self.mem
            .read_exact_at(buf, address)
            .map_err(|_| ProbeError::ReadFailed {
                address,
                len: buf.len(),
            })
    }
}

impl GameProcess for ProcfsProcess {
    fn pid(&self) -> u32 {
        self.pid
    }

    fn module_base(&self) -> u64 {
        self.module_base
    }

    fn main_window(&self) -> WindowHandle {
        WindowHandle::NULL
    }
}

fn access_error(pid: u32, error: std::io::Error) -> ProbeError {
    match error.kind() {
        ErrorKind::PermissionDenied => ProbeError::AccessDenied { pid },
        _ => ProbeError::Io(error),
    }
}

fn find_pid(process_name: &str) -> Result<u32, ProbeError> {
    for entry in fs::read_dir("/proc")? {
        let Ok(entry) = entry else { continue };
        let Some(pid) = entry.file_name().to_str().and_then(|s| s.parse::<u32>().ok()) else {
            continue;
        };

        let comm = fs::read_to_string(entry.path().join("comm")).unwrap_or_default();
        let cmdline = fs::read(entry.path().join("cmdline")).unwrap_or_default();
        let argv0 = cmdline.split(|&b| b == 0).next().map(String::from_utf8_lossy);

        if matches_name(comm.trim(), process_name)
            || argv0.is_some_and(|arg| matches_name(&file_name(&arg), process_name))
        {
            return Ok(pid);
        }
    }
    Err(ProbeError::ProcessNotFound(process_name.to_string()))
}

/// Case-insensitive match that tolerates a trailing `.exe`.
fn matches_name(candidate: &str, process_name: &str) -> bool {
    let strip = |s: &str| {
        let lower = s.to_ascii_lowercase();
        lower.strip_suffix(".exe").map(str::to_string).unwrap_or(lower)
    };
    !candidate.is_empty() && strip(candidate) == strip(process_name)
}

/// Last path component, accepting both `/` and `\` separators.
fn file_name(path: &str) -> String {
    path.rsplit(['/', '\\']).next().unwrap_or(path).to_string()
}

/// Lowest mapping whose backing file is the game module.
fn module_base(maps: &str, process_name: &str) -> Option<u64> {
    maps.lines()
        .filter_map(|line| {
            let mut parts = line.split_whitespace();
            let range = parts.next()?;
            let path = parts.nth(4)?;
            let name = Path::new(path).file_name()?.to_str()?;
            if !matches_name(name, process_name) {
                return None;
            }
            let start = range.split('-').next()?;
            u64::from_str_radix(start, 16).ok()
        })
        .min()
}
