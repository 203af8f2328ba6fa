use std::mem;

use sidedock_core::monitor::sort_primary_first;
use sidedock_core::{Monitor, Rect, WindowResult};
use windows::Win32::Foundation::{LPARAM, RECT};
use windows::Win32::Graphics::Gdi::{
    EnumDisplayMonitors, GetMonitorInfoW, HDC, HMONITOR, MONITORINFO,
};
use windows::core::BOOL;

use crate::dpi;

/// `MONITORINFOF_PRIMARY`
const MONITORINFOF_PRIMARY: u32 = 0x1;

/// Snapshots every attached display, primary first.
///
/// Enumeration order is otherwise the system's; the rest is stable, so
/// a saved screen index keeps pointing at the same display as long as
/// the configuration does not change.
pub fn enumerate_monitors() -> WindowResult<Vec<Monitor>> {
    let mut monitors: Vec<Monitor> = Vec::new();

    // SAFETY: the callback only runs during this call, so the pointer to
    // the local Vec stays valid for its whole lifetime.
    let ok = unsafe {
        EnumDisplayMonitors(
            None,
            None,
            Some(enum_monitor_proc),
            LPARAM(&mut monitors as *mut Vec<Monitor> as isize),
        )
    };

    if !ok.as_bool() {
        return Err("EnumDisplayMonitors failed".into());
    }
    if monitors.is_empty() {
        return Err("no monitors reported by the system".into());
    }

    sort_primary_first(&mut monitors);
    Ok(monitors)
}

unsafe extern "system" fn enum_monitor_proc(
    monitor: HMONITOR,
    _hdc: HDC,
    _clip: *mut RECT,
    lparam: LPARAM,
) -> BOOL {
    // SAFETY: lparam is the &mut Vec passed by enumerate_monitors.
    let monitors = unsafe { &mut *(lparam.0 as *mut Vec<Monitor>) };

    if let Some(snapshot) = snapshot(monitor) {
        monitors.push(snapshot);
    }
    BOOL(1)
}

fn snapshot(monitor: HMONITOR) -> Option<Monitor> {
    let mut info = MONITORINFO {
        cbSize: mem::size_of::<MONITORINFO>() as u32,
        ..Default::default()
    };

    // SAFETY: GetMonitorInfoW fills the MONITORINFO struct. We set
    // cbSize as required by the API.
    let success = unsafe { GetMonitorInfoW(monitor, &mut info) };
    if !success.as_bool() {
        sidedock_core::log_warn!("GetMonitorInfoW failed, skipping monitor");
        return None;
    }

    let (dpi_x, dpi_y) = dpi::monitor_dpi(monitor);
    Some(Monitor {
        rect: to_rect(info.rcMonitor),
        work_area: to_rect(info.rcWork),
        dpi_x,
        dpi_y,
        is_primary: info.dwFlags & MONITORINFOF_PRIMARY != 0,
    })
}

pub(crate) fn to_rect(rc: RECT) -> Rect {
    Rect::new(rc.left, rc.top, rc.right, rc.bottom)
}

pub(crate) fn to_win_rect(rect: Rect) -> RECT {
    RECT {
        left: rect.left,
        top: rect.top,
        right: rect.right,
        bottom: rect.bottom,
    }
}
