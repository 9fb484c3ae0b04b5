//! Endpoint handles for pinned drags.

use crate::geometry;
use crate::shapes::{LineId, Pin};
use kurbo::Point;

/// A circular handle on one endpoint of a line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    /// Line the handle belongs to.
    pub line_id: LineId,
    /// Which endpoint it controls.
    pub pin: Pin,
    /// Position in canvas coordinates.
    pub position: Point,
    /// Hit radius.
    pub radius: f64,
}

impl Handle {
    /// Create a new handle.
    pub fn new(line_id: LineId, pin: Pin, position: Point, radius: f64) -> Self {
        Self {
            line_id,
            pin,
            position,
            radius,
        }
    }

    /// Check if a point hits this handle.
    pub fn hit_test(&self, point: Point) -> bool {
        geometry::distance(point, self.position) <= self.radius
    }
}
