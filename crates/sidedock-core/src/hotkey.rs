//! Global hotkey bookkeeping.
//!
//! The [`HotkeyManager`] owns the active key set and its slot numbers.
//! Slots are the ids handed to the OS, so a `WM_HOTKEY` carrying a slot
//! maps straight back to an action. The OS side sits behind
//! [`HotkeyRegistrar`].

use serde::{Deserialize, Serialize};

use crate::WindowResult;

/// What a hotkey does when pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HotkeyAction {
    Toggle,
    Show,
    Hide,
    Reload,
    Close,
    CycleEdge,
    CycleScreen,
    ReserveSpace,
}

/// Modifier keys held with a hotkey.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub alt: bool,
    pub ctrl: bool,
    pub shift: bool,
    pub win: bool,
}

/// A resolved hotkey: action, virtual-key code and modifiers.
///
/// `slot` is `None` until a [`HotkeyManager`] takes the hotkey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hotkey {
    pub action: HotkeyAction,
    pub virtual_key: u32,
    pub modifiers: Modifiers,
    pub slot: Option<i32>,
}

impl Hotkey {
    pub fn new(action: HotkeyAction, virtual_key: u32, modifiers: Modifiers) -> Self {
        Self {
            action,
            virtual_key,
            modifiers,
            slot: None,
        }
    }
}

/// OS registration of global hotkeys.
pub trait HotkeyRegistrar {
    /// Registers `virtual_key` + `modifiers` under `slot`.
    fn register(&mut self, slot: i32, modifiers: Modifiers, virtual_key: u32) -> WindowResult<()>;
    /// Releases `slot`. Releasing an unknown slot is harmless.
    fn unregister(&mut self, slot: i32);
}

/// Manages the active hotkey set for the panel window.
pub struct HotkeyManager<R: HotkeyRegistrar> {
    registrar: R,
    hotkeys: Vec<Hotkey>,
    registered: Vec<i32>,
    hooked: bool,
    enabled: bool,
}

impl<R: HotkeyRegistrar> HotkeyManager<R> {
    pub fn new(registrar: R) -> Self {
        Self {
            registrar,
            hotkeys: Vec::new(),
            registered: Vec::new(),
            hooked: false,
            enabled: false,
        }
    }

    /// Replaces the active set, registering it when `enable` is set.
    ///
    /// Slots are assigned `0..n` in set order. An empty set leaves the
    /// manager disposed. With `enable` off the set is bound but stays
    /// silent until [`enable`](Self::enable).
    pub fn initialize(&mut self, keyset: &[Hotkey], enable: bool) {
        self.dispose();
        if keyset.is_empty() {
            return;
        }

        self.hotkeys = keyset
            .iter()
            .enumerate()
            .map(|(i, hotkey)| Hotkey {
                slot: Some(i as i32),
                ..hotkey.clone()
            })
            .collect();
        self.hooked = true;
        if enable {
            self.enable();
        }
    }

    /// Registers every hotkey with the OS. No-op when already enabled.
    ///
    /// Combinations the OS refuses (typically taken by another program)
    /// are logged and skipped.
    pub fn enable(&mut self) {
        if !self.hooked || self.enabled {
            return;
        }
        for hotkey in &self.hotkeys {
            let Some(slot) = hotkey.slot else { continue };
            match self
                .registrar
                .register(slot, hotkey.modifiers, hotkey.virtual_key)
            {
                Ok(()) => self.registered.push(slot),
                Err(e) => crate::log_warn!(
                    "Failed to register hotkey {:?} (vk=0x{:02X}): {e}",
                    hotkey.action,
                    hotkey.virtual_key
                ),
            }
        }
        self.enabled = true;
    }

    /// Releases the OS registrations but keeps the slot bookkeeping.
    pub fn disable(&mut self) {
        if !self.enabled {
            return;
        }
        for slot in self.registered.drain(..) {
            self.registrar.unregister(slot);
        }
        self.enabled = false;
    }

    /// Tears everything down.
    pub fn dispose(&mut self) {
        self.disable();
        self.hotkeys.clear();
        self.hooked = false;
    }

    /// Looks up the action bound to `slot`.
    ///
    /// Returns `None` once the manager has been disposed so a late
    /// `WM_HOTKEY` is dropped.
    pub fn dispatch(&self, slot: i32) -> Option<HotkeyAction> {
        if !self.hooked {
            return None;
        }
        self.hotkeys
            .iter()
            .find(|h| h.slot == Some(slot))
            .map(|h| h.action)
    }

    pub fn hotkeys(&self) -> &[Hotkey] {
        &self.hotkeys
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_hooked(&self) -> bool {
        self.hooked
    }

    pub fn registrar(&self) -> &R {
        &self.registrar
    }
}

impl<R: HotkeyRegistrar> Drop for HotkeyManager<R> {
    fn drop(&mut self) {
        self.dispose();
    }
}
