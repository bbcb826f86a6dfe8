//! Win32 implementation of [`WindowSystem`].
use std::mem::{size_of, zeroed};

use overlay_core::{Rect, WindowHandle};
use windows_sys::Win32::Foundation::HWND;
use windows_sys::Win32::Graphics::Gdi::{
    GetMonitorInfoW, MONITOR_DEFAULTTONEAREST, MONITORINFO, MonitorFromWindow,
};
use windows_sys::Win32::UI::WindowsAndMessaging::{
    GWL_EXSTYLE, GetForegroundWindow, GetWindowLongW, HWND_TOPMOST, SWP_NOMOVE, SWP_NOSIZE,
    SetWindowLongW, SetWindowPos, WS_EX_LAYERED, WS_EX_TRANSPARENT,
};

use super::WindowSystem;

#[derive(Clone, Copy, Debug, Default)]
pub struct Win32WindowSystem;

fn hwnd(window: WindowHandle) -> HWND {
    window.0 as HWND
}

/// Extended style that lets mouse input fall through to the game.
fn click_through(ex_style: u32) -> u32 {
    ex_style | WS_EX_LAYERED | WS_EX_TRANSPARENT
}

impl WindowSystem for Win32WindowSystem {
    fn foreground_window(&self) -> Option<WindowHandle> {
        // SAFETY: no arguments; returns null when no window is focused.
        let handle = unsafe { GetForegroundWindow() };
        (!handle.is_null()).then(|| WindowHandle(handle as isize))
    }

    fn monitor_work_area(&self, window: WindowHandle) -> Option<Rect> {
        // SAFETY: MonitorFromWindow accepts any handle, falling back to the
        // nearest monitor.
        let monitor = unsafe { MonitorFromWindow(hwnd(window), MONITOR_DEFAULTTONEAREST) };
        if monitor.is_null() {
            return None;
        }

        // SAFETY: MONITORINFO is plain data; cbSize is set before the call.
        let mut info: MONITORINFO = unsafe { zeroed() };
        info.cbSize = size_of::<MONITORINFO>() as u32;
        // SAFETY: `info` is a properly sized out-parameter.
        if unsafe { GetMonitorInfoW(monitor, &mut info) } == 0 {
            return None;
        }

        let work = info.rcWork;
        Some(Rect::new(
            work.left,
            work.top,
            (work.right - work.left).max(0) as u32,
            (work.bottom - work.top).max(0) as u32,
        ))
    }

    fn set_always_on_top(&self, window: WindowHandle) -> bool {
        let handle = hwnd(window);
        // SAFETY: plain FFI calls; invalid handles make them return 0.
        unsafe {
            let ex_style = GetWindowLongW(handle, GWL_EXSTYLE) as u32;
            SetWindowLongW(handle, GWL_EXSTYLE, click_through(ex_style) as i32);
            SetWindowPos(handle, HWND_TOPMOST, 0, 0, 0, 0, SWP_NOMOVE | SWP_NOSIZE) != 0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_through_keeps_existing_flags() {
        let style = click_through(0x8);
        assert_eq!(style & 0x8, 0x8);
        assert_eq!(style & WS_EX_LAYERED, WS_EX_LAYERED);
        assert_eq!(style & WS_EX_TRANSPARENT, WS_EX_TRANSPARENT);
    }
}
