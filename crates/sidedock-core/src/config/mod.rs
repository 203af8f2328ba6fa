pub mod hotkeys;
mod loader;
pub mod template;

use serde::{Deserialize, Serialize};

use crate::DockEdge;
use crate::log::LogConfig;

pub use hotkeys::{HotkeyBinding, Modifier};
pub use loader::{FileSettingsStore, config_dir, config_path, load, try_load};

/// Where the panel reads and persists its settings.
pub trait SettingsStore {
    /// Reads the stored settings. `Ok(None)` means nothing is stored yet.
    fn load(&self) -> Result<Option<Settings>, String>;
    /// Persists settings changed by the panel itself (e.g. hotkey actions).
    fn save(&self, settings: &Settings) -> Result<(), String>;
}

/// Top-level configuration for Sidedock.
///
/// Loaded from `~/.config/sidedock/config.toml`. Missing sections
/// fall back to defaults thanks to `#[serde(default)]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where the panel is docked and how large it is.
    pub panel: PanelConfig,
    /// Window behavior flags.
    pub behavior: BehaviorConfig,
    /// File logging.
    pub logging: LogConfig,
    /// Global keyboard shortcuts.
    #[serde(rename = "hotkey", skip_serializing_if = "Vec::is_empty")]
    pub hotkeys: Vec<HotkeyBinding>,
}

/// Panel placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Screen edge to dock against: "left" or "right" (also "top"/"bottom").
    pub edge: DockEdge,
    /// Index into the monitor list, primary monitor first.
    pub screen: usize,
    /// Panel width in logical pixels, before `ui_scale`.
    pub width: i32,
    /// Extra scale applied to the panel width (1.0 = 100%).
    pub ui_scale: f64,
    /// Horizontal offset in pixels applied after docking.
    pub x_offset: i32,
    /// Vertical offset in pixels applied after docking.
    pub y_offset: i32,
}

/// Window behavior flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Reserve the panel's strip so maximized windows don't cover it.
    pub use_appbar: bool,
    /// Keep the panel above other windows.
    pub always_top: bool,
    /// Let mouse input pass through to the windows beneath.
    pub click_through: bool,
    /// Show the panel in the Alt+Tab switcher.
    pub show_in_alt_tab: bool,
    /// Start hidden; a hotkey brings it back.
    pub initially_hidden: bool,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            edge: DockEdge::Right,
            screen: 0,
            width: 180,
            ui_scale: 1.0,
            x_offset: 0,
            y_offset: 0,
        }
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            use_appbar: true,
            always_top: true,
            click_through: false,
            show_in_alt_tab: false,
            initially_hidden: false,
        }
    }
}

impl Settings {
    /// Clamps values to safe ranges.
    ///
    /// A `none` edge is replaced with the right edge so a hand-edited
    /// file can never put the panel into an undockable state.
    pub fn validate(&mut self) {
        self.panel.width = self.panel.width.clamp(40, 2000);
        if !self.panel.ui_scale.is_finite() {
            self.panel.ui_scale = 1.0;
        }
        self.panel.ui_scale = self.panel.ui_scale.clamp(0.5, 4.0);
        self.panel.x_offset = self.panel.x_offset.clamp(-10_000, 10_000);
        self.panel.y_offset = self.panel.y_offset.clamp(-10_000, 10_000);
        if !self.panel.edge.is_dockable() {
            self.panel.edge = DockEdge::Right;
        }
    }
}
