use serde::{Deserialize, Serialize};

use crate::hotkey::{Hotkey, HotkeyAction, Modifiers};
use crate::keys;

/// A user-configured shortcut that maps a key combination to an action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotkeyBinding {
    /// The action to trigger.
    pub action: HotkeyAction,
    /// Key name (e.g. "S", "F9", "Space").
    pub key: String,
    /// Modifier keys (e.g. ["ctrl", "alt"]).
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
}

/// Keyboard modifier keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Alt,
    Shift,
    Ctrl,
    Win,
}

impl HotkeyBinding {
    /// Resolves the key name to a virtual key code.
    ///
    /// Returns `None` for unknown key names; the caller logs and skips.
    pub fn resolve(&self) -> Option<Hotkey> {
        let vk = keys::vk_from_name(&self.key)?;
        let mut modifiers = Modifiers::default();
        for m in &self.modifiers {
            match m {
                Modifier::Alt => modifiers.alt = true,
                Modifier::Ctrl => modifiers.ctrl = true,
                Modifier::Shift => modifiers.shift = true,
                Modifier::Win => modifiers.win = true,
            }
        }
        Some(Hotkey::new(self.action, vk, modifiers))
    }
}

/// Resolves every binding, logging and dropping the ones with unknown keys.
pub fn resolve_all(bindings: &[HotkeyBinding]) -> Vec<Hotkey> {
    bindings
        .iter()
        .filter_map(|b| {
            let hotkey = b.resolve();
            if hotkey.is_none() {
                crate::log_warn!("Unknown key name in hotkey binding: {:?}", b.key);
            }
            hotkey
        })
        .collect()
}

/// Suggested shortcuts written by `sidedock init`.
///
/// Ctrl+Alt+S toggles the panel, Ctrl+Alt+R reloads it,
/// Ctrl+Alt+E / Ctrl+Alt+M cycle the dock edge and monitor.
pub fn suggested() -> Vec<HotkeyBinding> {
    use Modifier::{Alt, Ctrl};

    vec![
        bind(HotkeyAction::Toggle, "S", &[Ctrl, Alt]),
        bind(HotkeyAction::Reload, "R", &[Ctrl, Alt]),
        bind(HotkeyAction::CycleEdge, "E", &[Ctrl, Alt]),
        bind(HotkeyAction::CycleScreen, "M", &[Ctrl, Alt]),
        bind(HotkeyAction::ReserveSpace, "A", &[Ctrl, Alt]),
    ]
}

fn bind(action: HotkeyAction, key: &str, modifiers: &[Modifier]) -> HotkeyBinding {
    HotkeyBinding {
        action,
        key: key.into(),
        modifiers: modifiers.to_vec(),
    }
}
