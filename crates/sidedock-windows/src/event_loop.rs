use sidedock_core::config::{Settings, SettingsStore};
use sidedock_core::{WindowResult, log_info};
use windows::Win32::UI::WindowsAndMessaging::{DispatchMessageW, GetMessageW, MSG, TranslateMessage};

use crate::panel::{self, Panel, RepaintContent};
use crate::{ctrl_c, dpi};

/// Creates the panel on the calling thread and pumps messages until it
/// closes.
///
/// Everything the panel owns is released before this returns, including
/// its app-bar slot, so the desktop work area is restored even when the
/// pump ends through Ctrl+C.
pub fn run(settings: Settings, store: Box<dyn SettingsStore>) -> WindowResult<()> {
    dpi::enable_dpi_awareness();

    let hwnd = Panel::create(settings, store, |window| Box::new(RepaintContent::new(window)))?;
    if let Err(e) = ctrl_c::set_handler(hwnd) {
        sidedock_core::log_warn!("Ctrl+C handler not installed: {e}");
    }

    run_message_pump();

    panel::release();
    log_info!("Message pump stopped");
    Ok(())
}

/// The Win32 message pump. Blocks until WM_QUIT is received.
fn run_message_pump() {
    let mut msg = MSG::default();

    // SAFETY: standard message loop over this thread's queue.
    while unsafe { GetMessageW(&mut msg, None, 0, 0).as_bool() } {
        unsafe {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}
