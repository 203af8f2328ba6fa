//! Device arrival/removal, debounced into a content reload.

use std::time::Duration;

use crate::WindowResult;
use crate::debounce::{Debouncer, Fired};
use crate::hook::{GlobalHook, Subscription};
use crate::message::Deferred;

/// Quiet period before a burst of device events triggers a reload.
pub const DEVICE_CHANGE_DEBOUNCE: Duration = Duration::from_secs(1);

const DBT_DEVICEARRIVAL: usize = 0x8000;
const DBT_DEVICEREMOVECOMPLETE: usize = 0x8004;

/// `WM_DEVICECHANGE` event type from `wParam`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceEvent {
    Arrival,
    RemoveComplete,
    Other(usize),
}

impl DeviceEvent {
    pub fn decode(wparam: usize) -> Self {
        match wparam {
            DBT_DEVICEARRIVAL => Self::Arrival,
            DBT_DEVICEREMOVECOMPLETE => Self::RemoveComplete,
            other => Self::Other(other),
        }
    }

    /// Whether the event should reload content. Query and pending
    /// events are followed by a complete one, so only those count.
    pub fn qualifies(self) -> bool {
        matches!(self, Self::Arrival | Self::RemoveComplete)
    }
}

pub struct DeviceWatcher<H: GlobalHook> {
    subscription: Subscription<H>,
    reload: Debouncer<Deferred>,
}

impl<H: GlobalHook> DeviceWatcher<H> {
    pub fn new(hook: H, sink: impl Fn(Fired<Deferred>) + Send + Sync + 'static) -> Self {
        Self {
            subscription: Subscription::new(hook),
            reload: Debouncer::new(DEVICE_CHANGE_DEBOUNCE, sink),
        }
    }

    pub fn start(&mut self) -> WindowResult<()> {
        self.subscription.start()
    }

    /// Stops listening and drops any reload still waiting.
    pub fn stop(&mut self) {
        self.reload.cancel();
        self.subscription.stop();
    }

    pub fn is_running(&self) -> bool {
        self.subscription.is_active()
    }

    /// Feeds one event in. Returns whether a reload was (re)scheduled.
    pub fn on_event(&mut self, event: DeviceEvent) -> bool {
        if !self.is_running() || !event.qualifies() {
            return false;
        }
        self.reload.schedule(Deferred::DeviceChanged);
        true
    }

    /// Accepts a fired reload on the window's thread.
    pub fn accept(&mut self, fired: Fired<Deferred>) -> bool {
        self.reload.settle(fired).is_some() && self.is_running()
    }

    pub fn has_pending_reload(&self) -> bool {
        self.reload.is_pending()
    }
}
