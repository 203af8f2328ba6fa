//! Window messages the panel reacts to, decoded into one enum.

use crate::appbar::AppBarNotification;
use crate::device::DeviceEvent;

pub const WM_CLOSE: u32 = 0x0010;
pub const WM_WINDOWPOSCHANGING: u32 = 0x0046;
pub const WM_DISPLAYCHANGE: u32 = 0x007E;
pub const WM_TIMER: u32 = 0x0113;
pub const WM_DEVICECHANGE: u32 = 0x0219;
pub const WM_HOTKEY: u32 = 0x0312;
pub const WM_APP: u32 = 0x8000;

/// Posted when a debounced action has fired and is waiting in the channel.
pub const WM_DEFERRED: u32 = WM_APP + 1;
/// Posted by the foreground hook; `lParam` carries the new foreground window.
pub const WM_FOREGROUND: u32 = WM_APP + 2;
/// Posted from outside the panel thread (Ctrl+C) to close the panel.
pub const WM_SHUTDOWN: u32 = WM_APP + 3;
/// Posted by a settings UI while the offset sliders move. `wParam` and
/// `lParam` carry the signed x and y offsets.
pub const WM_PREVIEW_OFFSET: u32 = WM_APP + 4;

/// Timer id of the one-shot delay after the first app-bar registration.
pub const SETTLE_TIMER_ID: usize = 1;

/// A debounced action handed back to the window's thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// The shell moved something; re-negotiate the app-bar.
    ShellPositionChanged,
    /// A device arrived or left; reload content.
    DeviceChanged,
    /// The user is dragging the offset sliders; persist and reposition.
    OffsetChanged { x: i32, y: i32 },
}

/// Decoded panel window message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelMessage {
    PositionChanging,
    AppBar(AppBarNotification),
    Hotkey { slot: i32 },
    Device(DeviceEvent),
    DisplayChanged,
    Deferred,
    Foreground { hwnd: isize },
    SettleTimer,
    PreviewOffset { x: i32, y: i32 },
    /// Close and tear everything down.
    Shutdown,
    Other,
}

/// Decodes a raw message.
///
/// `appbar_callback` is the registered shell callback id, if one has
/// been claimed. It is checked first because registered ids are not
/// known until runtime.
pub fn decode(msg: u32, wparam: usize, lparam: isize, appbar_callback: Option<u32>) -> PanelMessage {
    if appbar_callback == Some(msg) {
        return PanelMessage::AppBar(AppBarNotification::decode(wparam, lparam));
    }
    match msg {
        WM_WINDOWPOSCHANGING => PanelMessage::PositionChanging,
        WM_HOTKEY => PanelMessage::Hotkey {
            slot: wparam as i32,
        },
        WM_DEVICECHANGE => PanelMessage::Device(DeviceEvent::decode(wparam)),
        WM_DISPLAYCHANGE => PanelMessage::DisplayChanged,
        WM_DEFERRED => PanelMessage::Deferred,
        WM_FOREGROUND => PanelMessage::Foreground { hwnd: lparam },
        WM_TIMER if wparam == SETTLE_TIMER_ID => PanelMessage::SettleTimer,
        WM_PREVIEW_OFFSET => PanelMessage::PreviewOffset {
            x: wparam as isize as i32,
            y: lparam as i32,
        },
        WM_CLOSE | WM_SHUTDOWN => PanelMessage::Shutdown,
        _ => PanelMessage::Other,
    }
}
