//! Windows capture target enumeration
//!
//! Screens come from `EnumDisplayMonitors`; windows from `EnumWindows`,
//! keeping only visible windows that carry a title.

use super::traits::{CaptureTarget, HostError, TargetKind};
use windows::Win32::Foundation::{BOOL, HWND, LPARAM, RECT};
use windows::Win32::Graphics::Gdi::{
    EnumDisplayMonitors, GetMonitorInfoW, HDC, HMONITOR, MONITORINFOEXW,
};
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GetWindowTextLengthW, GetWindowTextW, IsWindowVisible,
};

/// List capture targets of the requested kinds
pub fn list_targets(kinds: &[TargetKind]) -> Result<Vec<CaptureTarget>, HostError> {
    let mut targets = Vec::new();
    for kind in kinds {
        match kind {
            TargetKind::Window => targets.extend(list_windows()),
            TargetKind::Screen => targets.extend(list_screens()),
        }
    }
    Ok(targets)
}

fn list_screens() -> Vec<CaptureTarget> {
    use std::mem::zeroed;

    let mut targets = Vec::new();
    let targets_ptr = &mut targets as *mut Vec<CaptureTarget>;

    unsafe extern "system" fn enum_monitors_callback(
        hmonitor: HMONITOR,
        _hdc: HDC,
        _rect: *mut RECT,
        lparam: LPARAM,
    ) -> BOOL {
        let targets = &mut *(lparam.0 as *mut Vec<CaptureTarget>);

        let mut monitor_info: MONITORINFOEXW = unsafe { zeroed() };
        monitor_info.monitorInfo.cbSize = std::mem::size_of::<MONITORINFOEXW>() as u32;

        if unsafe { GetMonitorInfoW(hmonitor, &mut monitor_info.monitorInfo) }.as_bool() {
            let is_primary = (monitor_info.monitorInfo.dwFlags & 1) != 0; // MONITORINFOF_PRIMARY

            let name_len = monitor_info
                .szDevice
                .iter()
                .position(|&c| c == 0)
                .unwrap_or(monitor_info.szDevice.len());
            let device_name = String::from_utf16_lossy(&monitor_info.szDevice[..name_len]);

            let label = if is_primary {
                "Primary Display".to_string()
            } else {
                device_name
            };

            targets.push(CaptureTarget::new(
                format!("screen:{}", targets.len()),
                label,
                TargetKind::Screen,
            ));
        }

        BOOL::from(true)
    }

    unsafe {
        let _ = EnumDisplayMonitors(
            HDC::default(),
            None,
            Some(enum_monitors_callback),
            LPARAM(targets_ptr as isize),
        );
    }

    if targets.is_empty() {
        targets.push(CaptureTarget::new(
            "screen:0",
            "Primary Display",
            TargetKind::Screen,
        ));
    }

    targets
}

fn list_windows() -> Vec<CaptureTarget> {
    unsafe extern "system" fn enum_windows_callback(hwnd: HWND, lparam: LPARAM) -> BOOL {
        let targets = unsafe { &mut *(lparam.0 as *mut Vec<CaptureTarget>) };

        if !unsafe { IsWindowVisible(hwnd) }.as_bool() {
            return BOOL::from(true);
        }

        let title_len = unsafe { GetWindowTextLengthW(hwnd) };
        if title_len == 0 {
            return BOOL::from(true);
        }

        let mut buffer = vec![0u16; title_len as usize + 1];
        let copied = unsafe { GetWindowTextW(hwnd, &mut buffer) };
        if copied > 0 {
            let title = String::from_utf16_lossy(&buffer[..copied as usize]);
            targets.push(CaptureTarget::new(
                format!("window:{}", hwnd.0 as usize),
                title,
                TargetKind::Window,
            ));
        }

        BOOL::from(true)
    }

    let mut targets = Vec::new();
    unsafe {
        let _ = EnumWindows(
            Some(enum_windows_callback),
            LPARAM(&mut targets as *mut Vec<CaptureTarget> as isize),
        );
    }
    targets
}
