use sidedock_core::WindowResult;
use sidedock_core::hotkey::{HotkeyRegistrar, Modifiers};
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    HOT_KEY_MODIFIERS, MOD_ALT, MOD_CONTROL, MOD_NOREPEAT, MOD_SHIFT, MOD_WIN, RegisterHotKey,
    UnregisterHotKey,
};

/// Registers hotkeys against the panel window, so `WM_HOTKEY` arrives
/// through its window procedure.
pub struct Win32HotkeyRegistrar {
    hwnd: HWND,
}

impl Win32HotkeyRegistrar {
    pub fn new(hwnd: HWND) -> Self {
        Self { hwnd }
    }
}

fn to_win_modifiers(modifiers: Modifiers) -> HOT_KEY_MODIFIERS {
    let mut flags = MOD_NOREPEAT;
    if modifiers.alt {
        flags |= MOD_ALT;
    }
    if modifiers.ctrl {
        flags |= MOD_CONTROL;
    }
    if modifiers.shift {
        flags |= MOD_SHIFT;
    }
    if modifiers.win {
        flags |= MOD_WIN;
    }
    flags
}

impl HotkeyRegistrar for Win32HotkeyRegistrar {
    fn register(&mut self, slot: i32, modifiers: Modifiers, virtual_key: u32) -> WindowResult<()> {
        // SAFETY: RegisterHotKey registers a system-wide hotkey for our
        // window. Slots are unique within the manager.
        unsafe { RegisterHotKey(Some(self.hwnd), slot, to_win_modifiers(modifiers), virtual_key)? };
        Ok(())
    }

    fn unregister(&mut self, slot: i32) {
        // SAFETY: UnregisterHotKey with an ID we registered is safe. It
        // fails harmlessly if the window is already gone.
        unsafe {
            let _ = UnregisterHotKey(Some(self.hwnd), slot);
        }
    }
}
