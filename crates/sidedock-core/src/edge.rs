use std::fmt;

use serde::{Deserialize, Serialize};

/// The screen edge the panel is anchored to.
///
/// `None` exists so a configuration can express "not docked", but every
/// docking operation rejects it with [`DockError::InvalidDockEdge`].
///
/// [`DockError::InvalidDockEdge`]: crate::DockError::InvalidDockEdge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DockEdge {
    Left,
    Top,
    #[default]
    Right,
    Bottom,
    None,
}

impl DockEdge {
    /// Whether this edge can be used for docking.
    pub fn is_dockable(self) -> bool {
        self != Self::None
    }

    /// The edge the cycle-edge hotkey moves to.
    ///
    /// The panel is vertical, so cycling only ever flips between the
    /// right and left edges. Any other value lands on the right.
    pub fn cycled(self) -> Self {
        match self {
            Self::Right => Self::Left,
            _ => Self::Right,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::None => "none",
        }
    }
}

impl fmt::Display for DockEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
