pub mod actions;
pub mod appbar;
pub mod config;
pub mod debounce;
pub mod device;
pub mod edge;
pub mod error;
pub mod foreground;
pub mod geometry;
pub mod hook;
pub mod hotkey;
pub mod keys;
pub mod log;
pub mod message;
pub mod monitor;
pub mod move_lock;
pub mod rect;
pub mod style;

#[cfg(test)]
mod tests;

pub use actions::{ContentHost, PanelControl};
pub use appbar::{AppBarRegistrar, AppBarShell};
pub use config::Settings;
pub use edge::DockEdge;
pub use error::{DockError, DockResult, WindowResult};
pub use geometry::{Layout, Reservation, compute_layout};
pub use monitor::Monitor;
pub use move_lock::MoveLock;
pub use rect::{Rect, WorkArea};
pub use style::{StyleBackend, StyleController, WindowStyleFlags, ZOrder};
