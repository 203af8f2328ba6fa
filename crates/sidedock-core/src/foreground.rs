//! Show-desktop detection.
//!
//! When the panel is not pinned always-on-top it sits below normal
//! windows, which would hide it whenever the user shows the desktop.
//! Watching foreground changes lets it come forward over the bare
//! desktop and drop back once a real window takes focus.

use crate::WindowResult;
use crate::hook::{GlobalHook, Subscription};
use crate::style::{StyleBackend, StyleController};

/// Window class of the desktop background container.
pub const DESKTOP_CLASS: &str = "WorkerW";

/// Z-order response to a foreground change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZOrderChange {
    ForceTopmost,
    DemoteToBottom,
    None,
}

/// Decides what a foreground change means for the panel.
pub fn classify(class_name: &str, panel_topmost: bool) -> ZOrderChange {
    if class_name == DESKTOP_CLASS {
        ZOrderChange::ForceTopmost
    } else if panel_topmost {
        ZOrderChange::DemoteToBottom
    } else {
        ZOrderChange::None
    }
}

/// Applies [`classify`] to every foreground change while started.
pub struct ForegroundWatcher<H: GlobalHook> {
    subscription: Subscription<H>,
}

impl<H: GlobalHook> ForegroundWatcher<H> {
    pub fn new(hook: H) -> Self {
        Self {
            subscription: Subscription::new(hook),
        }
    }

    pub fn start(&mut self) -> WindowResult<()> {
        self.subscription.start()
    }

    pub fn stop(&mut self) {
        self.subscription.stop();
    }

    pub fn is_running(&self) -> bool {
        self.subscription.is_active()
    }

    /// Handles a foreground change to a window of class `class_name`.
    pub fn on_foreground<B: StyleBackend>(
        &self,
        class_name: &str,
        style: &mut StyleController<B>,
    ) -> WindowResult<ZOrderChange> {
        if !self.is_running() {
            return Ok(ZOrderChange::None);
        }
        let change = classify(class_name, style.is_topmost());
        match change {
            ZOrderChange::ForceTopmost => style.set_topmost(false)?,
            ZOrderChange::DemoteToBottom => style.set_bottom(false)?,
            ZOrderChange::None => {}
        }
        Ok(change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::ZOrder;
    use crate::tests::fakes::{FakeHook, FakeWindow};

    #[test]
    fn desktop_forces_topmost() {
        // Assert
        assert_eq!(classify("WorkerW", false), ZOrderChange::ForceTopmost);
        assert_eq!(classify("WorkerW", true), ZOrderChange::ForceTopmost);
    }

    #[test]
    fn other_window_demotes_topmost_panel() {
        // Assert
        assert_eq!(classify("Notepad", true), ZOrderChange::DemoteToBottom);
    }

    #[test]
    fn other_window_leaves_non_topmost_panel() {
        // Assert
        assert_eq!(classify("Notepad", false), ZOrderChange::None);
        assert_eq!(classify("workerw", false), ZOrderChange::None);
    }

    #[test]
    fn show_desktop_then_app_round_trip() {
        // Arrange
        let mut watcher = ForegroundWatcher::new(FakeHook::default());
        let mut style = StyleController::new(FakeWindow::default());
        watcher.start().unwrap();

        // Act
        let first = watcher.on_foreground("WorkerW", &mut style).unwrap();
        let second = watcher.on_foreground("Chrome_WidgetWin_1", &mut style).unwrap();
        let third = watcher.on_foreground("Chrome_WidgetWin_1", &mut style).unwrap();

        // Assert
        assert_eq!(first, ZOrderChange::ForceTopmost);
        assert_eq!(second, ZOrderChange::DemoteToBottom);
        assert_eq!(third, ZOrderChange::None);
        assert_eq!(
            style.backend().z_orders,
            vec![ZOrder::Topmost, ZOrder::Bottom]
        );
    }

    #[test]
    fn stopped_watcher_ignores_changes() {
        // Arrange
        let mut watcher = ForegroundWatcher::new(FakeHook::default());
        let mut style = StyleController::new(FakeWindow::default());
        watcher.start().unwrap();
        watcher.stop();

        // Act
        let change = watcher.on_foreground("WorkerW", &mut style).unwrap();

        // Assert
        assert_eq!(change, ZOrderChange::None);
        assert!(style.backend().z_orders.is_empty());
    }
}
