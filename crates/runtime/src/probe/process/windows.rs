//! Win32 backend: ToolHelp snapshots to find the process and its main module,
//! `ReadProcessMemory` for reads.
use std::ffi::c_void;
use std::mem::{size_of, zeroed};

use overlay_core::WindowHandle;
use tracing::debug;
use windows_sys::Win32::Foundation::{CloseHandle, BOOL, HANDLE, HWND, INVALID_HANDLE_VALUE, LPARAM};
use windows_sys::Win32::System::Diagnostics::Debug::ReadProcessMemory;
use windows_sys::Win32::System::Diagnostics::ToolHelp::{
    CreateToolhelp32Snapshot, MODULEENTRY32W, Module32FirstW, PROCESSENTRY32W, Process32FirstW,
    Process32NextW, TH32CS_SNAPMODULE, TH32CS_SNAPMODULE32, TH32CS_SNAPPROCESS,
};
use windows_sys::Win32::System::Threading::{
    OpenProcess, PROCESS_QUERY_LIMITED_INFORMATION, PROCESS_VM_READ,
};
use windows_sys::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GW_OWNER, GetWindow, GetWindowThreadProcessId, IsWindowVisible,
};

use super::{GameProcess, ProcessAttacher};
use crate::api::ProbeError;
use crate::probe::memory::MemoryReader;

#[derive(Clone, Copy, Debug, Default)]
pub struct ToolhelpAttacher;

impl ProcessAttacher for ToolhelpAttacher {
    fn attach(&self, process_name: &str) -> Result<Box<dyn GameProcess>, ProbeError> {
        let pid = find_pid(process_name)?;
        let module_base = main_module_base(pid).ok_or_else(|| ProbeError::ModuleNotFound {
            pid,
            name: process_name.to_string(),
        })?;

        // SAFETY: plain FFI call; a null handle is checked below.
        let handle = unsafe {
            OpenProcess(PROCESS_VM_READ | PROCESS_QUERY_LIMITED_INFORMATION, 0, pid)
        };
        if handle.is_null() {
            return Err(ProbeError::AccessDenied { pid });
        }

        let window = main_window(pid);
        debug!(pid, module_base = format_args!("{module_base:#x}"), "attached via toolhelp");
        Ok(Box::new(Win32Process {
            pid,
            module_base,
            handle,
            window,
        }))
    }
}

struct Win32Process {
    pid: u32,
    module_base: u64,
    handle: HANDLE,
    window: WindowHandle,
}

// SAFETY: process handles are usable from any thread.
unsafe impl Send for Win32Process {}

impl Drop for Win32Process {
    fn drop(&mut self) {
        // SAFETY: the handle was returned by OpenProcess and is closed once.
        unsafe {
            CloseHandle(self.handle);
        }
    }
}

impl MemoryReader for Win32Process {
    fn read_at(&self, address: u64, buf: &mut [u8]) -> Result<(), ProbeError> {
        let len = buf.len();
        let mut read = 0usize;
        // SAFETY: `buf` is valid for `len` bytes and outlives the call.
        let ok = unsafe {
            ReadProcessMemory(
                self.handle,
                address as usize as *const c_void,
                buf.as_mut_ptr().cast(),
                len,
                &mut read,
            )
        };
        if ok == 0 || read != len {
            return Err(ProbeError::ReadFailed { address, len });
        }
        Ok(())
    }
}

impl GameProcess for Win32Process {
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

/// Closes a ToolHelp snapshot on drop.
struct Snapshot(HANDLE);

impl Snapshot {
    fn new(flags: u32, pid: u32) -> Option<Self> {
        // SAFETY: plain FFI call; the result is validated.
        let handle = unsafe { CreateToolhelp32Snapshot(flags, pid) };
        (handle != INVALID_HANDLE_VALUE && !handle.is_null()).then_some(Self(handle))
    }
}

impl Drop for Snapshot {
    fn drop(&mut self) {
        // SAFETY: the snapshot handle is owned by this guard.
        unsafe {
            CloseHandle(self.0);
        }
    }
}

fn wide_to_string(wide: &[u16]) -> String {
    let end = wide.iter().position(|&c| c == 0).unwrap_or(wide.len());
    String::from_utf16_lossy(&wide[..end])
}

fn matches_name(candidate: &str, process_name: &str) -> bool {
    let strip = |s: &str| {
        let lower = s.to_ascii_lowercase();
        lower.strip_suffix(".exe").map(str::to_string).unwrap_or(lower)
    };
    strip(candidate) == strip(process_name)
}

fn find_pid(process_name: &str) -> Result<u32, ProbeError> {
    let not_found = || ProbeError::ProcessNotFound(process_name.to_string());
    let snapshot = Snapshot::new(TH32CS_SNAPPROCESS, 0).ok_or_else(not_found)?;

    // SAFETY: PROCESSENTRY32W is plain data; dwSize is set before use.
    let mut entry: PROCESSENTRY32W = unsafe { zeroed() };
    entry.dwSize = size_of::<PROCESSENTRY32W>() as u32;

    // SAFETY: `entry` is a properly sized out-parameter.
    let mut more = unsafe { Process32FirstW(snapshot.0, &mut entry) };
    while more != 0 {
        if matches_name(&wide_to_string(&entry.szExeFile), process_name) {
            return Ok(entry.th32ProcessID);
        }
        // SAFETY: as above.
        more = unsafe { Process32NextW(snapshot.0, &mut entry) };
    }
    Err(not_found())
}

/// The first module in a module snapshot is the executable itself.
fn main_module_base(pid: u32) -> Option<u64> {
    let snapshot = Snapshot::new(TH32CS_SNAPMODULE | TH32CS_SNAPMODULE32, pid)?;

    // SAFETY: MODULEENTRY32W is plain data; dwSize is set before use.
    let mut entry: MODULEENTRY32W = unsafe { zeroed() };
    entry.dwSize = size_of::<MODULEENTRY32W>() as u32;

    // SAFETY: `entry` is a properly sized out-parameter.
    let found = unsafe { Module32FirstW(snapshot.0, &mut entry) };
    (found != 0).then_some(entry.modBaseAddr as u64)
}

struct WindowSearch {
    pid: u32,
    found: HWND,
}

unsafe extern "system" fn enum_window(hwnd: HWND, lparam: LPARAM) -> BOOL {
    // SAFETY: `lparam` points at the WindowSearch owned by `main_window`.
    let search = unsafe { &mut *(lparam as *mut WindowSearch) };
    let mut owner_pid = 0u32;
    // SAFETY: plain FFI calls on a window handle supplied by EnumWindows.
    let (visible, unowned) = unsafe {
        GetWindowThreadProcessId(hwnd, &mut owner_pid);
        (IsWindowVisible(hwnd) != 0, GetWindow(hwnd, GW_OWNER).is_null())
    };
    if owner_pid == search.pid && visible && unowned {
        search.found = hwnd;
        return 0;
    }
    1
}

/// First visible, unowned top-level window of `pid`.
fn main_window(pid: u32) -> WindowHandle {
    let mut search = WindowSearch {
        pid,
        found: std::ptr::null_mut(),
    };
    // SAFETY: `search` outlives the synchronous enumeration.
    unsafe {
        EnumWindows(Some(enum_window), &mut search as *mut WindowSearch as LPARAM);
    }
    WindowHandle(search.found as isize)
}
