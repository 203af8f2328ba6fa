use std::cell::Cell;
use std::ffi::c_void;
use std::mem;

use sidedock_core::{MoveLock, Rect, StyleBackend, WindowResult, ZOrder};
use windows::Win32::Foundation::{HWND, LPARAM};
use windows::Win32::Graphics::Dwm::{DWMWA_EXCLUDED_FROM_PEEK, DwmSetWindowAttribute};
use windows::Win32::Graphics::Gdi::InvalidateRect;
use windows::Win32::UI::WindowsAndMessaging::{
    GWL_EXSTYLE, GetClassNameW, GetWindowLongPtrW, HWND_BOTTOM, HWND_NOTOPMOST, HWND_TOPMOST,
    SET_WINDOW_POS_FLAGS, SW_HIDE, SW_SHOWNOACTIVATE, SWP_FRAMECHANGED,
    SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE, SWP_NOZORDER, SetWindowLongPtrW, SetWindowPos,
    ShowWindow, WINDOWPOS,
};
use windows::core::BOOL;

// The panel thread's move lock. Read by the window procedure while a
// `SetWindowPos` issued by the panel is still on the stack.
thread_local! {
    static MOVE_LOCK: Cell<MoveLock> = const { Cell::new(MoveLock::new()) };
}

/// Blocks moves the panel did not request.
pub fn lock_moves() {
    MOVE_LOCK.with(|cell| {
        let mut lock = cell.get();
        lock.lock();
        cell.set(lock);
    });
}

/// Applies the move lock to a `WM_WINDOWPOSCHANGING` message.
///
/// # Safety
///
/// `lparam` must be the `WINDOWPOS` pointer of a `WM_WINDOWPOSCHANGING`
/// message currently being handled.
pub unsafe fn filter_position_changing(lparam: LPARAM) {
    let pos = lparam.0 as *mut WINDOWPOS;
    if pos.is_null() {
        return;
    }
    let lock = MOVE_LOCK.with(Cell::get);

    // SAFETY: the caller guarantees `pos` points at the live WINDOWPOS.
    unsafe {
        (*pos).flags = SET_WINDOW_POS_FLAGS(lock.filter((*pos).flags.0));
    }
}

/// Moves and resizes `hwnd` with the move lock released for the call.
pub fn move_unlocked(hwnd: HWND, bounds: Rect) -> WindowResult<()> {
    sidedock_core::log_debug!(
        "move 0x{:X}: ({},{})-({},{})",
        hwnd.0 as usize,
        bounds.left,
        bounds.top,
        bounds.right,
        bounds.bottom
    );

    MOVE_LOCK.with(|cell| {
        MoveLock::allow_during(cell, || {
            // SAFETY: SetWindowPos with a valid HWND is safe. It re-enters
            // the window procedure, which sees the lock released.
            unsafe {
                SetWindowPos(
                    hwnd,
                    None,
                    bounds.left,
                    bounds.top,
                    bounds.width(),
                    bounds.height(),
                    SWP_NOZORDER | SWP_NOACTIVATE,
                )
            }
        })
    })?;
    Ok(())
}

/// Class name of any window, empty if it cannot be read.
pub fn class_name(hwnd: HWND) -> String {
    let mut buf = [0u16; 256];

    // SAFETY: GetClassNameW writes at most buf.len() characters.
    let len = unsafe { GetClassNameW(hwnd, &mut buf) };
    if len <= 0 {
        return String::new();
    }
    String::from_utf16_lossy(&buf[..len as usize])
}

/// The panel's top-level window.
#[derive(Debug, Clone, Copy)]
pub struct PanelWindow {
    hwnd: HWND,
}

impl PanelWindow {
    pub fn new(hwnd: HWND) -> Self {
        Self { hwnd }
    }

    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }

    pub fn show(&self) {
        // SAFETY: ShowWindow is safe with a valid HWND.
        unsafe {
            let _ = ShowWindow(self.hwnd, SW_SHOWNOACTIVATE);
        }
    }

    pub fn hide(&self) {
        // SAFETY: ShowWindow is safe with a valid HWND.
        unsafe {
            let _ = ShowWindow(self.hwnd, SW_HIDE);
        }
    }

    pub fn invalidate(&self) {
        // SAFETY: InvalidateRect only queues a WM_PAINT.
        unsafe {
            let _ = InvalidateRect(Some(self.hwnd), None, true);
        }
    }

    /// Keeps the panel visible while Aero Peek previews the desktop.
    pub fn exclude_from_peek(&self) -> WindowResult<()> {
        let excluded = BOOL(1);

        // SAFETY: the attribute value is a BOOL living on this stack frame.
        unsafe {
            DwmSetWindowAttribute(
                self.hwnd,
                DWMWA_EXCLUDED_FROM_PEEK,
                &excluded as *const BOOL as *const c_void,
                mem::size_of::<BOOL>() as u32,
            )?;
        }
        Ok(())
    }
}

impl StyleBackend for PanelWindow {
    fn ex_style(&self) -> u32 {
        // SAFETY: GetWindowLongPtrW is a read-only query on a valid HWND.
        unsafe { GetWindowLongPtrW(self.hwnd, GWL_EXSTYLE) as u32 }
    }

    fn set_ex_style(&mut self, ex_style: u32) -> WindowResult<()> {
        // SAFETY: SetWindowLongPtrW replaces the extended style; the
        // follow-up SetWindowPos makes the frame pick it up.
        unsafe {
            SetWindowLongPtrW(self.hwnd, GWL_EXSTYLE, ex_style as isize);
            SetWindowPos(
                self.hwnd,
                None,
                0,
                0,
                0,
                0,
                SWP_NOMOVE | SWP_NOSIZE | SWP_NOZORDER | SWP_NOACTIVATE | SWP_FRAMECHANGED,
            )?;
        }
        Ok(())
    }

    fn set_z_order(&mut self, order: ZOrder, activate: bool) -> WindowResult<()> {
        let insert_after = match order {
            ZOrder::Topmost => HWND_TOPMOST,
            ZOrder::NotTopmost => HWND_NOTOPMOST,
            ZOrder::Bottom => HWND_BOTTOM,
        };
        let mut flags = SWP_NOMOVE | SWP_NOSIZE;
        if !activate {
            flags |= SWP_NOACTIVATE;
        }

        // SAFETY: SetWindowPos with a valid HWND is safe.
        unsafe { SetWindowPos(self.hwnd, Some(insert_after), 0, 0, 0, 0, flags)? };
        Ok(())
    }
}
