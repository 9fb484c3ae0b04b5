//! Editing modes and the transient state of in-progress gestures.
//!
//! Nothing in this module is recorded in history. Undo and redo leave it
//! untouched.

use crate::geometry;
use crate::shapes::{LineId, Pin};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// How pointer gestures on the canvas are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Pointer-down on the canvas starts a new segment.
    #[default]
    Create,
    /// Lines can be selected, hovered and dragged. Stored documents that
    /// still say `"focus"` land here.
    #[serde(alias = "focus")]
    Edit,
    /// Clicking a line deletes it.
    Delete,
}

impl Mode {
    /// Human-readable name for toolbars and status lines.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Create => "create",
            Mode::Edit => "edit",
            Mode::Delete => "delete",
        }
    }
}

/// A segment being drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TempLine {
    pub start: Point,
    pub end: Point,
}

/// An active drag gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    /// Resolved drag set.
    pub ids: Vec<LineId>,
    /// Pointer position of the previous update.
    pub last: Point,
    /// Endpoint restriction; `None` translates whole segments.
    pub pin: Option<Pin>,
}

/// A rectangular selection in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marquee {
    pub start: Point,
    pub end: Point,
}

impl Marquee {
    /// The normalized rectangle covered by the marquee.
    pub fn rect(&self) -> Rect {
        geometry::normalized_rect(self.start, self.end)
    }
}

/// Transient interaction state owned by the editor.
#[derive(Debug, Clone, Default)]
pub struct Interaction {
    pub temp: Option<TempLine>,
    pub drag: Option<DragState>,
    pub marquee: Option<Marquee>,
    pub hover_line: Option<LineId>,
    pub hover_point: Option<Point>,
    pub shift_select_active: bool,
}
