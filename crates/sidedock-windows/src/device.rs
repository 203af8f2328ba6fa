use std::ffi::c_void;
use std::mem;

use sidedock_core::WindowResult;
use sidedock_core::hook::GlobalHook;
use windows::Win32::Foundation::{HANDLE, HWND};
use windows::Win32::UI::WindowsAndMessaging::{
    DEV_BROADCAST_DEVICEINTERFACE_W, DEVICE_NOTIFY_ALL_INTERFACE_CLASSES,
    DEVICE_NOTIFY_WINDOW_HANDLE, HDEVNOTIFY, RegisterDeviceNotificationW,
    UnregisterDeviceNotification,
};

/// `DBT_DEVTYP_DEVICEINTERFACE`
const DBT_DEVTYP_DEVICEINTERFACE: u32 = 5;

/// Subscribes the panel window to device-interface arrival and removal
/// for every interface class, delivered as `WM_DEVICECHANGE`.
pub struct DeviceHook {
    hwnd: HWND,
    handle: Option<HDEVNOTIFY>,
}

impl DeviceHook {
    pub fn new(hwnd: HWND) -> Self {
        Self { hwnd, handle: None }
    }
}

impl GlobalHook for DeviceHook {
    fn install(&mut self) -> WindowResult<()> {
        let filter = DEV_BROADCAST_DEVICEINTERFACE_W {
            dbcc_size: mem::size_of::<DEV_BROADCAST_DEVICEINTERFACE_W>() as u32,
            dbcc_devicetype: DBT_DEVTYP_DEVICEINTERFACE,
            ..Default::default()
        };

        // SAFETY: the filter lives on this stack frame for the duration of
        // the call; the OS copies what it needs.
        let handle = unsafe {
            RegisterDeviceNotificationW(
                HANDLE(self.hwnd.0),
                &filter as *const DEV_BROADCAST_DEVICEINTERFACE_W as *const c_void,
                DEVICE_NOTIFY_WINDOW_HANDLE | DEVICE_NOTIFY_ALL_INTERFACE_CLASSES,
            )?
        };

        self.handle = Some(handle);
        Ok(())
    }

    fn uninstall(&mut self) {
        if let Some(handle) = self.handle.take() {
            // SAFETY: the handle came from RegisterDeviceNotificationW and
            // is released once.
            unsafe {
                let _ = UnregisterDeviceNotification(handle);
            }
        }
    }
}
