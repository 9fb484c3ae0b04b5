//! Drawable entities: line segments and the groups that bind them.

mod group;
mod line;

pub use group::Group;
pub use line::Line;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for lines.
pub type LineId = Uuid;

/// Unique identifier for groups.
pub type GroupId = Uuid;

/// One endpoint of a segment, used for endpoint-handle drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pin {
    P1,
    P2,
}
