#![cfg(windows)]

/// Ctrl+C handling for the console that launched the panel.
pub mod ctrl_c;

/// Device-change notification registration.
pub mod device;

/// DPI awareness and per-monitor DPI queries.
pub mod dpi;

/// Panel thread: window creation and message pump.
pub mod event_loop;

/// Foreground-change WinEvent hook.
pub mod foreground;

/// `RegisterHotKey` bindings.
pub mod hotkey;

/// Display enumeration.
pub mod monitor;

/// The docked panel and its window procedure.
pub mod panel;

/// `SHAppBarMessage` bindings.
pub mod shell;

/// Panel window handle: styles, z-order and the move lock.
pub mod window;

pub use event_loop::run;
pub use monitor::enumerate_monitors;
pub use panel::Panel;
