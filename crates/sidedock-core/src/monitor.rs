use serde::Serialize;

use crate::Rect;

/// DPI value that corresponds to 100% scaling.
pub const BASE_DPI: u32 = 96;

/// A snapshot of one display, taken during enumeration.
///
/// Snapshots are rebuilt on every enumeration and never persisted;
/// indices into a monitor list are only meaningful for that list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Monitor {
    /// Full monitor bounds in physical pixels.
    pub rect: Rect,
    /// Bounds minus space reserved by the taskbar and other app-bars.
    pub work_area: Rect,
    pub dpi_x: u32,
    pub dpi_y: u32,
    pub is_primary: bool,
}

impl Monitor {
    pub fn scale_x(&self) -> f64 {
        f64::from(self.dpi_x) / f64::from(BASE_DPI)
    }

    pub fn scale_y(&self) -> f64 {
        f64::from(self.dpi_y) / f64::from(BASE_DPI)
    }

    pub fn inverse_scale_x(&self) -> f64 {
        1.0 / self.scale_x()
    }

    pub fn inverse_scale_y(&self) -> f64 {
        1.0 / self.scale_y()
    }
}

/// Orders monitors primary first, keeping the enumeration order of the rest.
pub fn sort_primary_first(monitors: &mut [Monitor]) {
    monitors.sort_by_key(|m| !m.is_primary);
}

/// Returns the primary monitor.
///
/// Falls back to the first entry when no monitor carries the primary
/// flag, which can happen transiently while displays are reconfigured.
pub fn primary(monitors: &[Monitor]) -> Option<&Monitor> {
    monitors
        .iter()
        .find(|m| m.is_primary)
        .or_else(|| monitors.first())
}

/// Resolves a configured screen index to a monitor.
///
/// An index past the end is treated as stale configuration (a monitor
/// was unplugged) and resolves to the primary monitor. Returns the index
/// actually used alongside the monitor.
pub fn select(monitors: &[Monitor], index: usize) -> Option<(usize, &Monitor)> {
    if let Some(monitor) = monitors.get(index) {
        return Some((index, monitor));
    }
    let fallback = monitors
        .iter()
        .position(|m| m.is_primary)
        .unwrap_or(0);
    monitors.get(fallback).map(|m| (fallback, m))
}

#[cfg(test)]
pub(crate) fn test_monitor(rect: Rect, work_area: Rect, dpi: u32, is_primary: bool) -> Monitor {
    Monitor {
        rect,
        work_area,
        dpi_x: dpi,
        dpi_y: dpi,
        is_primary,
    }
}
