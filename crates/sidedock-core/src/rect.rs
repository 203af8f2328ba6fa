use serde::{Deserialize, Serialize};

use crate::edge::DockEdge;

/// A rectangle in physical pixels, stored as its four edges.
///
/// This matches the layout the OS reports for monitors and work areas,
/// so values can be copied across without conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// Scratch geometry used while computing the panel layout.
///
/// Unlike [`Rect`] this uses floating point, because the window rectangle
/// passes through DPI scaling before it is rounded back to pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WorkArea {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl WorkArea {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn from_rect(rect: Rect) -> Self {
        Self::new(
            f64::from(rect.left),
            f64::from(rect.top),
            f64::from(rect.right),
            f64::from(rect.bottom),
        )
    }

    /// Rounds each edge to the nearest pixel.
    pub fn to_rect(&self) -> Rect {
        Rect::new(
            self.left.round() as i32,
            self.top.round() as i32,
            self.right.round() as i32,
            self.bottom.round() as i32,
        )
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Multiplies every edge by the given factors.
    pub fn scale(&mut self, x: f64, y: f64) {
        self.left *= x;
        self.top *= y;
        self.right *= x;
        self.bottom *= y;
    }

    /// Translates the area without changing its size.
    pub fn offset(&mut self, x: f64, y: f64) {
        self.left += x;
        self.top += y;
        self.right += x;
        self.bottom += y;
    }

    /// Returns the size measured across the docked edge: width for
    /// left/right docking, height for top/bottom.
    pub fn extent(&self, edge: DockEdge) -> f64 {
        match edge {
            DockEdge::Top | DockEdge::Bottom => self.height(),
            _ => self.width(),
        }
    }

    /// Resizes the area across the docked edge.
    ///
    /// The edge touching the screen border stays put and the free edge
    /// moves. `DockEdge::None` leaves the area untouched.
    pub fn set_extent(&mut self, edge: DockEdge, size: f64) {
        match edge {
            DockEdge::Left => self.right = self.left + size,
            DockEdge::Right => self.left = self.right - size,
            DockEdge::Top => self.bottom = self.top + size,
            DockEdge::Bottom => self.top = self.bottom - size,
            DockEdge::None => {}
        }
    }
}
