//! What hotkeys and deferred actions do to the panel.

use crate::config::Settings;
use crate::hotkey::HotkeyAction;
use crate::message::Deferred;

/// The operations the panel window exposes to hotkeys, watchers and
/// debounced callbacks.
///
/// Callers check [`is_ready`](Self::is_ready) first; it is `false` while
/// the panel is starting up, reloading or tearing down.
pub trait PanelControl {
    fn is_ready(&self) -> bool;
    fn is_visible(&self) -> bool;
    /// Shows the panel and claims its app-bar slot.
    fn show(&mut self);
    /// Hides the panel and releases its app-bar slot.
    fn hide(&mut self);
    /// Re-applies every setting and reloads content.
    fn reload(&mut self);
    fn reload_content(&mut self);
    fn close(&mut self);
    /// Recomputes the layout and re-docks.
    fn reposition(&mut self);
    fn monitor_count(&self) -> usize;
    fn settings_mut(&mut self) -> &mut Settings;
    /// Persists the current settings. Failures are logged, not returned.
    fn save_settings(&mut self);
}

/// Whatever renders the panel's content.
pub trait ContentHost {
    fn reload(&mut self);
    fn pause(&mut self);
    fn resume(&mut self);
}

/// Monitor index after `current`, wrapping to 0 past the last.
pub fn next_screen(current: usize, count: usize) -> usize {
    if count > 0 && current < count - 1 {
        current + 1
    } else {
        0
    }
}

/// Runs a hotkey action. Returns whether anything was done.
pub fn execute(action: HotkeyAction, panel: &mut impl PanelControl) -> bool {
    if !panel.is_ready() {
        crate::log_debug!("Panel not ready, dropping {action:?}");
        return false;
    }

    match action {
        HotkeyAction::Toggle => {
            if panel.is_visible() {
                panel.hide();
            } else {
                panel.show();
            }
        }
        HotkeyAction::Show => panel.show(),
        HotkeyAction::Hide => panel.hide(),
        HotkeyAction::Reload => panel.reload(),
        HotkeyAction::Close => panel.close(),
        HotkeyAction::CycleEdge => {
            if !panel.is_visible() {
                return false;
            }
            let settings = panel.settings_mut();
            settings.panel.edge = settings.panel.edge.cycled();
            panel.save_settings();
            panel.reposition();
        }
        HotkeyAction::CycleScreen => {
            if !panel.is_visible() {
                return false;
            }
            let count = panel.monitor_count();
            let settings = panel.settings_mut();
            settings.panel.screen = next_screen(settings.panel.screen, count);
            panel.save_settings();
            panel.reposition();
        }
        HotkeyAction::ReserveSpace => {
            let settings = panel.settings_mut();
            settings.behavior.use_appbar = !settings.behavior.use_appbar;
            panel.save_settings();
            panel.reposition();
        }
    }
    true
}

/// Applies a debounced action that has already passed its site's
/// cancellation check. Returns whether anything was done.
pub fn apply_deferred(deferred: Deferred, panel: &mut impl PanelControl) -> bool {
    if !panel.is_ready() {
        return false;
    }
    match deferred {
        Deferred::ShellPositionChanged => panel.reposition(),
        Deferred::DeviceChanged => panel.reload_content(),
        Deferred::OffsetChanged { x, y } => {
            let settings = panel.settings_mut();
            settings.panel.x_offset = x;
            settings.panel.y_offset = y;
            panel.save_settings();
            panel.reposition();
        }
    }
    true
}
