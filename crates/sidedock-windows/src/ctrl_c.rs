//! Ctrl+C signal handler using `SetConsoleCtrlHandler`.

use std::ffi::c_void;
use std::sync::atomic::{AtomicUsize, Ordering};

use sidedock_core::WindowResult;
use sidedock_core::message::WM_SHUTDOWN;
use windows::Win32::Foundation::{HWND, LPARAM, WPARAM};
use windows::Win32::System::Console::{CTRL_BREAK_EVENT, CTRL_C_EVENT, SetConsoleCtrlHandler};
use windows::Win32::UI::WindowsAndMessaging::PostMessageW;

/// Panel window to close, written by `set_handler`, read by the callback.
static TARGET: AtomicUsize = AtomicUsize::new(0);

/// Closes the panel cleanly on Ctrl+C, so its app-bar space is released.
///
/// The handler runs on a console thread, so it only posts a message to
/// the panel.
pub fn set_handler(panel: HWND) -> WindowResult<()> {
    TARGET.store(panel.0 as usize, Ordering::SeqCst);

    // SAFETY: the handler is a plain function that only touches the atomic.
    unsafe { SetConsoleCtrlHandler(Some(handler), true)? };
    Ok(())
}

unsafe extern "system" fn handler(ctrl_type: u32) -> windows::core::BOOL {
    if ctrl_type != CTRL_C_EVENT && ctrl_type != CTRL_BREAK_EVENT {
        return windows::core::BOOL(0);
    }

    let target = TARGET.load(Ordering::SeqCst);
    if target != 0 {
        // SAFETY: PostMessageW only queues the message; it fails harmlessly
        // if the window is already gone.
        unsafe {
            let _ = PostMessageW(
                Some(HWND(target as *mut c_void)),
                WM_SHUTDOWN,
                WPARAM(0),
                LPARAM(0),
            );
        }
    }
    windows::core::BOOL(1)
}
