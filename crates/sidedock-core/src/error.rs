use std::fmt;

/// A boxed error type for calls that cross into the OS.
///
/// Platform code returns whatever the underlying API produced; the
/// docking logic only needs to know that the call failed.
pub type WindowResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Result alias for docking operations.
pub type DockResult<T> = Result<T, DockError>;

/// Errors raised by docking operations.
///
/// Stale configuration (an out-of-range screen index), failed DPI
/// queries and redundant register/lock/hook calls are recovered where
/// they happen and never surface here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DockError {
    /// `DockEdge::None` was passed to an operation that docks the panel.
    InvalidDockEdge,
    /// Monitor enumeration returned nothing to dock against.
    NoMonitors,
    /// An OS call failed in a way the caller cannot recover from.
    Os(String),
}

impl fmt::Display for DockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDockEdge => f.write_str("dock edge cannot be 'none'"),
            Self::NoMonitors => f.write_str("no monitors available to dock against"),
            Self::Os(msg) => write!(f, "OS call failed: {msg}"),
        }
    }
}

impl std::error::Error for DockError {}

impl From<Box<dyn std::error::Error>> for DockError {
    fn from(err: Box<dyn std::error::Error>) -> Self {
        Self::Os(err.to_string())
    }
}
