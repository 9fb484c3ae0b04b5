//! Line segment.

use super::{GroupId, LineId, Pin};
use crate::geometry::{self, LineEquation};
use kurbo::{Line as KurboLine, Point, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A straight segment between two endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub(crate) id: LineId,
    /// First endpoint.
    pub p1: Point,
    /// Second endpoint.
    pub p2: Point,
    /// Group this line belongs to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) group_id: Option<GroupId>,
}

impl Line {
    /// Create a new ungrouped line with a fresh id.
    pub fn new(p1: Point, p2: Point) -> Self {
        Self::with_id(Uuid::new_v4(), p1, p2)
    }

    /// Create a line with a specific id (for storage and tests).
    pub fn with_id(id: LineId, p1: Point, p2: Point) -> Self {
        Self {
            id,
            p1,
            p2,
            group_id: None,
        }
    }

    pub fn id(&self) -> LineId {
        self.id
    }

    pub fn group_id(&self) -> Option<GroupId> {
        self.group_id
    }

    /// Get one endpoint.
    pub fn endpoint(&self, pin: Pin) -> Point {
        match pin {
            Pin::P1 => self.p1,
            Pin::P2 => self.p2,
        }
    }

    fn endpoint_mut(&mut self, pin: Pin) -> &mut Point {
        match pin {
            Pin::P1 => &mut self.p1,
            Pin::P2 => &mut self.p2,
        }
    }

    /// Move both endpoints by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        self.p1 += delta;
        self.p2 += delta;
    }

    /// Move a single endpoint by `delta`, leaving the other in place.
    pub fn move_endpoint(&mut self, pin: Pin, delta: Vec2) {
        *self.endpoint_mut(pin) += delta;
    }

    /// Get the length of the line.
    pub fn length(&self) -> f64 {
        geometry::distance(self.p1, self.p2)
    }

    /// Get the midpoint of the line.
    pub fn midpoint(&self) -> Point {
        self.p1.midpoint(self.p2)
    }

    /// Whether both endpoints coincide.
    pub fn is_degenerate(&self) -> bool {
        self.p1 == self.p2
    }

    /// Get as a kurbo Line.
    pub fn as_kurbo(&self) -> KurboLine {
        KurboLine::new(self.p1, self.p2)
    }

    /// Implicit equation of the line through both endpoints.
    pub fn equation(&self) -> LineEquation {
        geometry::line_equation(self.as_kurbo())
    }

    /// Check if a point lies within `tolerance` of the segment.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        geometry::distance_to_segment(point, self.as_kurbo()) <= tolerance
    }

    /// The endpoint closest to `point` when it is within `threshold`.
    /// Ties go to `p1`.
    pub fn nearest_endpoint(&self, point: Point, threshold: f64) -> Option<Pin> {
        let d1 = geometry::distance(point, self.p1);
        let d2 = geometry::distance(point, self.p2);
        if d1 <= threshold && d1 <= d2 {
            Some(Pin::P1)
        } else if d2 <= threshold {
            Some(Pin::P2)
        } else {
            None
        }
    }

    /// Marquee test against the rectangle spanned by `a` and `b`.
    pub fn intersects_rect(&self, a: Point, b: Point) -> bool {
        geometry::line_intersects_rect(self.as_kurbo(), a, b)
    }
}
