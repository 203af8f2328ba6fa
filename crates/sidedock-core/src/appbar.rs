//! Shell app-bar negotiation.
//!
//! The registrar owns the panel's app-bar slot and walks it through
//! `Unregistered -> Registering -> Registered -> Unregistering`. The shell
//! itself sits behind [`AppBarShell`] so the protocol can be exercised
//! without a desktop.

use std::time::Duration;

use crate::debounce::{Debouncer, Fired};
use crate::geometry::{Layout, Reservation};
use crate::message::Deferred;
use crate::style::{StyleBackend, StyleController};
use crate::{DockEdge, DockError, DockResult, Rect, WindowResult};

/// Delay after the first registration before shell notifications are
/// handled. The shell sends a burst of its own while it settles.
pub const FIRST_REGISTRATION_SETTLE: Duration = Duration::from_millis(500);

/// Quiet period for coalescing position-changed notifications.
pub const POSITION_CHANGED_DEBOUNCE: Duration = Duration::from_millis(100);

const ABN_STATECHANGE: usize = 0;
const ABN_POSCHANGED: usize = 1;
const ABN_FULLSCREENAPP: usize = 2;
const ABN_WINDOWARRANGE: usize = 3;

/// Shell operations used by the registrar.
pub trait AppBarShell {
    /// Claims the process-unique message id the shell calls back with.
    fn register_callback_message(&mut self) -> WindowResult<u32>;
    /// Asks the shell for a new app-bar slot (`ABM_NEW`).
    fn create(&mut self, callback_message: u32) -> WindowResult<()>;
    /// Lets the shell adjust a proposed rectangle (`ABM_QUERYPOS`).
    fn query_position(&mut self, edge: DockEdge, proposed: Rect) -> WindowResult<Rect>;
    /// Commits a rectangle and returns what the shell granted (`ABM_SETPOS`).
    fn set_position(&mut self, edge: DockEdge, proposed: Rect) -> WindowResult<Rect>;
    /// Releases the slot (`ABM_REMOVE`).
    fn remove(&mut self) -> WindowResult<()>;
    /// Moves the panel window, bypassing the move lock.
    fn move_window(&mut self, bounds: Rect) -> WindowResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppBarPhase {
    Unregistered,
    Registering,
    Registered,
    Unregistering,
}

/// Registration state of the panel's app-bar slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppBarState {
    pub phase: AppBarPhase,
    pub screen: usize,
    pub edge: DockEdge,
    /// Extent the shell granted across the docked edge, physical pixels.
    pub reserved_width: i32,
    /// Message id the shell calls back with, once claimed.
    pub callback_message: Option<u32>,
}

impl Default for AppBarState {
    fn default() -> Self {
        Self {
            phase: AppBarPhase::Unregistered,
            screen: 0,
            edge: DockEdge::None,
            reserved_width: 0,
            callback_message: None,
        }
    }
}

/// A shell notification, decoded from the callback message's `wParam`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppBarNotification {
    /// Another app-bar or the taskbar changed size or position.
    PositionChanged,
    /// A full-screen app opened (`true`) or closed (`false`).
    FullScreen(bool),
    StateChanged,
    WindowArrange(bool),
    Unknown(usize),
}

impl AppBarNotification {
    pub fn decode(wparam: usize, lparam: isize) -> Self {
        match wparam {
            ABN_STATECHANGE => Self::StateChanged,
            ABN_POSCHANGED => Self::PositionChanged,
            ABN_FULLSCREENAPP => Self::FullScreen(lparam != 0),
            ABN_WINDOWARRANGE => Self::WindowArrange(lparam != 0),
            other => Self::Unknown(other),
        }
    }
}

/// What [`AppBarRegistrar::dock`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// A new slot was created. Arm the settle timer, then call
    /// [`AppBarRegistrar::start_listening`].
    First,
    Repositioned,
}

/// Drives the app-bar protocol for one window.
pub struct AppBarRegistrar<S: AppBarShell> {
    shell: S,
    state: AppBarState,
    listening: bool,
    was_topmost: bool,
    reposition: Debouncer<Deferred>,
}

impl<S: AppBarShell> AppBarRegistrar<S> {
    /// Creates an unregistered registrar.
    ///
    /// `sink` receives the debounced position-changed action on a timer
    /// thread and must hand it back to the window's thread.
    pub fn new(shell: S, sink: impl Fn(Fired<Deferred>) + Send + Sync + 'static) -> Self {
        Self {
            shell,
            state: AppBarState::default(),
            listening: false,
            was_topmost: false,
            reposition: Debouncer::new(POSITION_CHANGED_DEBOUNCE, sink),
        }
    }

    pub fn state(&self) -> AppBarState {
        self.state
    }

    pub fn is_registered(&self) -> bool {
        self.state.phase == AppBarPhase::Registered
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn callback_message(&self) -> Option<u32> {
        self.state.callback_message
    }

    pub fn shell(&self) -> &S {
        &self.shell
    }

    /// The space currently held, for compensating the next layout.
    pub fn reservation(&self) -> Option<Reservation> {
        self.is_registered().then_some(Reservation {
            screen: self.state.screen,
            edge: self.state.edge,
            extent: self.state.reserved_width,
        })
    }

    /// Claims a slot and docks the window at `layout`.
    ///
    /// Returns `Ok(false)` without touching the shell when a slot is
    /// already held.
    pub fn register(&mut self, layout: &Layout) -> DockResult<bool> {
        if !layout.edge.is_dockable() {
            return Err(DockError::InvalidDockEdge);
        }
        if self.state.phase != AppBarPhase::Unregistered {
            crate::log_debug!("App-bar already registered, ignoring register");
            return Ok(false);
        }

        self.state.phase = AppBarPhase::Registering;
        if let Err(e) = self.claim_slot() {
            self.state.phase = AppBarPhase::Unregistered;
            return Err(e);
        }
        if let Err(e) = self.negotiate(layout) {
            if let Err(remove_err) = self.shell.remove() {
                crate::log_warn!("Failed to release app-bar after error: {remove_err}");
            }
            self.state.phase = AppBarPhase::Unregistered;
            return Err(e);
        }

        self.state.phase = AppBarPhase::Registered;
        crate::log_info!(
            "App-bar registered on screen {} ({}), reserved {}px",
            self.state.screen,
            self.state.edge,
            self.state.reserved_width
        );
        Ok(true)
    }

    /// Re-negotiates an existing slot without recreating it.
    ///
    /// Returns the rectangle the shell granted, or `None` when nothing is
    /// registered (a late debounced callback after `unregister`).
    pub fn reposition(&mut self, layout: &Layout) -> DockResult<Option<Rect>> {
        if !layout.edge.is_dockable() {
            return Err(DockError::InvalidDockEdge);
        }
        if !self.is_registered() {
            return Ok(None);
        }
        self.negotiate(layout).map(Some)
    }

    /// Registers, or repositions when already registered.
    pub fn dock(&mut self, layout: &Layout) -> DockResult<RegisterOutcome> {
        if self.register(layout)? {
            Ok(RegisterOutcome::First)
        } else {
            self.reposition(layout)?;
            Ok(RegisterOutcome::Repositioned)
        }
    }

    /// Starts handling shell notifications. Call once the settle delay
    /// after the first registration has passed.
    pub fn start_listening(&mut self) {
        if self.is_registered() {
            self.listening = true;
        }
    }

    /// Reacts to a shell notification.
    ///
    /// Position changes are debounced. Full-screen transitions push the
    /// panel to the bottom and later restore topmost, but only if it was
    /// topmost when the full-screen app appeared.
    pub fn handle_notification<B: StyleBackend>(
        &mut self,
        notification: AppBarNotification,
        style: &mut StyleController<B>,
    ) -> WindowResult<()> {
        if !self.listening {
            return Ok(());
        }
        match notification {
            AppBarNotification::PositionChanged => {
                self.reposition.schedule(Deferred::ShellPositionChanged);
            }
            AppBarNotification::FullScreen(true) => {
                self.was_topmost = style.is_topmost();
                if self.was_topmost {
                    style.set_bottom(false)?;
                }
            }
            AppBarNotification::FullScreen(false) => {
                if self.was_topmost {
                    self.was_topmost = false;
                    style.set_topmost(false)?;
                }
            }
            AppBarNotification::StateChanged
            | AppBarNotification::WindowArrange(_)
            | AppBarNotification::Unknown(_) => {}
        }
        Ok(())
    }

    /// Queues a re-dock through the same debounce as shell notifications.
    /// Used for display-configuration changes.
    pub fn schedule_reposition(&mut self) {
        if self.is_registered() {
            self.reposition.schedule(Deferred::ShellPositionChanged);
        }
    }

    /// Accepts a fired position-changed action on the window's thread.
    ///
    /// Returns `true` when the caller should recompute the layout and
    /// call [`reposition`](Self::reposition).
    pub fn accept_reposition(&mut self, fired: Fired<Deferred>) -> bool {
        self.reposition.settle(fired).is_some() && self.is_registered()
    }

    pub fn has_pending_reposition(&self) -> bool {
        self.reposition.is_pending()
    }

    /// Releases the slot. Safe to call when nothing is registered.
    pub fn unregister(&mut self) -> DockResult<()> {
        self.listening = false;
        self.reposition.cancel();
        if self.state.phase != AppBarPhase::Registered {
            return Ok(());
        }

        self.state.phase = AppBarPhase::Unregistering;
        let result = self.shell.remove();
        self.state.phase = AppBarPhase::Unregistered;
        self.state.reserved_width = 0;
        result.map_err(DockError::from)?;
        crate::log_info!("App-bar released");
        Ok(())
    }

    fn claim_slot(&mut self) -> DockResult<()> {
        let callback = match self.state.callback_message {
            Some(id) => id,
            None => {
                let id = self.shell.register_callback_message()?;
                self.state.callback_message = Some(id);
                id
            }
        };
        self.shell.create(callback)?;
        Ok(())
    }

    fn negotiate(&mut self, layout: &Layout) -> DockResult<Rect> {
        let queried = self.shell.query_position(layout.edge, layout.appbar_rect())?;
        let granted = self.shell.set_position(layout.edge, queried)?;

        self.state.screen = layout.screen;
        self.state.edge = layout.edge;
        self.state.reserved_width = match layout.edge {
            DockEdge::Top | DockEdge::Bottom => granted.height(),
            _ => granted.width(),
        };

        // The window may be wider than what is reserved from other apps.
        self.shell.move_window(layout.window_bounds())?;
        Ok(granted)
    }
}

impl<S: AppBarShell> Drop for AppBarRegistrar<S> {
    fn drop(&mut self) {
        if let Err(e) = self.unregister() {
            crate::log_warn!("Failed to release app-bar on drop: {e}");
        }
    }
}

#[cfg(test)]
#[path = "appbar_tests.rs"]
mod tests;
