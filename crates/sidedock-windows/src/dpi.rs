use sidedock_core::monitor::BASE_DPI;
use windows::Win32::Graphics::Gdi::HMONITOR;
use windows::Win32::UI::HiDpi::{
    DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2, GetDpiForMonitor, MDT_EFFECTIVE_DPI,
    SetProcessDpiAwarenessContext,
};

/// Declares this process as per-monitor DPI aware (V2).
///
/// Without this, Windows virtualizes coordinates to the primary
/// monitor's DPI and the panel lands in the wrong place on mixed-DPI
/// setups. Must be called once before any window is created.
pub fn enable_dpi_awareness() {
    // SAFETY: SetProcessDpiAwarenessContext is safe to call once at startup.
    // If it fails (e.g. already set via manifest), we ignore the error.
    unsafe {
        let _ = SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2);
    }
}

/// Effective DPI of a monitor, falling back to 96 when the query fails.
pub fn monitor_dpi(monitor: HMONITOR) -> (u32, u32) {
    let mut dpi_x = 0u32;
    let mut dpi_y = 0u32;

    // SAFETY: GetDpiForMonitor only writes the two out-parameters.
    let result = unsafe { GetDpiForMonitor(monitor, MDT_EFFECTIVE_DPI, &mut dpi_x, &mut dpi_y) };

    match result {
        Ok(()) if dpi_x > 0 && dpi_y > 0 => (dpi_x, dpi_y),
        Ok(()) => (BASE_DPI, BASE_DPI),
        Err(e) => {
            sidedock_core::log_debug!("GetDpiForMonitor failed, assuming 96: {e}");
            (BASE_DPI, BASE_DPI)
        }
    }
}
