use std::cell::Cell;
use std::ffi::c_void;

use sidedock_core::WindowResult;
use sidedock_core::hook::GlobalHook;
use sidedock_core::message::WM_FOREGROUND;
use windows::Win32::Foundation::{HWND, LPARAM, WPARAM};
use windows::Win32::UI::Accessibility::{HWINEVENTHOOK, SetWinEventHook, UnhookWinEvent};
use windows::Win32::UI::WindowsAndMessaging::{
    EVENT_SYSTEM_FOREGROUND, PostMessageW, WINEVENT_OUTOFCONTEXT,
};

// Window the callback forwards foreground changes to. The hook is
// out-of-context, so the callback runs on the thread that installed it.
thread_local! {
    static TARGET: Cell<usize> = const { Cell::new(0) };
}

/// System-wide `EVENT_SYSTEM_FOREGROUND` hook that posts `WM_FOREGROUND`
/// to the panel.
pub struct ForegroundHook {
    target: HWND,
    hook: Option<HWINEVENTHOOK>,
}

impl ForegroundHook {
    pub fn new(target: HWND) -> Self {
        Self { target, hook: None }
    }
}

impl GlobalHook for ForegroundHook {
    fn install(&mut self) -> WindowResult<()> {
        TARGET.with(|t| t.set(self.target.0 as usize));

        // SAFETY: SetWinEventHook registers our callback for foreground
        // changes only. WINEVENT_OUTOFCONTEXT means it runs in our process
        // on this thread.
        let hook = unsafe {
            SetWinEventHook(
                EVENT_SYSTEM_FOREGROUND,
                EVENT_SYSTEM_FOREGROUND,
                None,
                Some(foreground_proc),
                0,
                0,
                WINEVENT_OUTOFCONTEXT,
            )
        };
        if hook.is_invalid() {
            TARGET.with(|t| t.set(0));
            return Err("Failed to set foreground WinEvent hook".into());
        }

        self.hook = Some(hook);
        Ok(())
    }

    fn uninstall(&mut self) {
        if let Some(hook) = self.hook.take() {
            // SAFETY: the handle came from SetWinEventHook and is unhooked once.
            unsafe {
                let _ = UnhookWinEvent(hook);
            }
        }
        TARGET.with(|t| t.set(0));
    }
}

unsafe extern "system" fn foreground_proc(
    _hook: HWINEVENTHOOK,
    _event: u32,
    hwnd: HWND,
    _id_object: i32,
    _id_child: i32,
    _event_thread: u32,
    _event_time: u32,
) {
    let target = TARGET.with(Cell::get);
    if target == 0 || hwnd.is_invalid() {
        return;
    }

    // Posted rather than handled here: the panel may be mid-update when
    // the hook fires from inside a nested message loop.
    // SAFETY: PostMessageW only queues the message.
    unsafe {
        let _ = PostMessageW(
            Some(HWND(target as *mut c_void)),
            WM_FOREGROUND,
            WPARAM(0),
            LPARAM(hwnd.0 as isize),
        );
    }
}
