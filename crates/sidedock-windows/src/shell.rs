use std::mem;

use sidedock_core::{AppBarShell, DockEdge, Rect, WindowResult};
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::Shell::{
    ABE_BOTTOM, ABE_LEFT, ABE_RIGHT, ABE_TOP, ABM_NEW, ABM_QUERYPOS, ABM_REMOVE, ABM_SETPOS,
    APPBARDATA, SHAppBarMessage,
};
use windows::Win32::UI::WindowsAndMessaging::RegisterWindowMessageW;
use windows::core::w;

use crate::monitor::{to_rect, to_win_rect};
use crate::window;

/// The real shell, talking through `SHAppBarMessage` on behalf of one window.
pub struct Win32Shell {
    hwnd: HWND,
}

impl Win32Shell {
    pub fn new(hwnd: HWND) -> Self {
        Self { hwnd }
    }

    fn data(&self) -> APPBARDATA {
        APPBARDATA {
            cbSize: mem::size_of::<APPBARDATA>() as u32,
            hWnd: self.hwnd,
            ..Default::default()
        }
    }

    /// Sends a positioning message and returns the rectangle the shell
    /// wrote back.
    fn position(&self, message: u32, edge: DockEdge, proposed: Rect) -> Rect {
        let mut data = self.data();
        data.uEdge = edge_code(edge);
        data.rc = to_win_rect(proposed);

        // SAFETY: data is a fully initialized APPBARDATA for our window;
        // the shell only adjusts its rc field.
        unsafe { SHAppBarMessage(message, &mut data) };
        to_rect(data.rc)
    }
}

fn edge_code(edge: DockEdge) -> u32 {
    match edge {
        DockEdge::Left => ABE_LEFT,
        DockEdge::Top => ABE_TOP,
        DockEdge::Bottom => ABE_BOTTOM,
        DockEdge::Right | DockEdge::None => ABE_RIGHT,
    }
}

impl AppBarShell for Win32Shell {
    fn register_callback_message(&mut self) -> WindowResult<u32> {
        // SAFETY: RegisterWindowMessageW takes a static wide string.
        let id = unsafe { RegisterWindowMessageW(w!("AppBarMessage")) };
        if id == 0 {
            return Err("RegisterWindowMessageW failed".into());
        }
        Ok(id)
    }

    fn create(&mut self, callback_message: u32) -> WindowResult<()> {
        let mut data = self.data();
        data.uCallbackMessage = callback_message;

        // SAFETY: data is a fully initialized APPBARDATA for our window.
        let created = unsafe { SHAppBarMessage(ABM_NEW, &mut data) };
        if created == 0 {
            return Err("shell refused ABM_NEW".into());
        }
        Ok(())
    }

    fn query_position(&mut self, edge: DockEdge, proposed: Rect) -> WindowResult<Rect> {
        Ok(self.position(ABM_QUERYPOS, edge, proposed))
    }

    fn set_position(&mut self, edge: DockEdge, proposed: Rect) -> WindowResult<Rect> {
        Ok(self.position(ABM_SETPOS, edge, proposed))
    }

    fn remove(&mut self) -> WindowResult<()> {
        let mut data = self.data();

        // SAFETY: data is a fully initialized APPBARDATA for our window.
        unsafe { SHAppBarMessage(ABM_REMOVE, &mut data) };
        Ok(())
    }

    fn move_window(&mut self, bounds: Rect) -> WindowResult<()> {
        window::move_unlocked(self.hwnd, bounds)
    }
}
