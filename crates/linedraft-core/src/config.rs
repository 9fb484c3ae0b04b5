//! Editor tuning knobs.

use crate::history::DEFAULT_HISTORY_LIMIT;
use serde::{Deserialize, Serialize};

/// Endpoint hover radius in canvas units.
pub const DEFAULT_HOVER_THRESHOLD: f64 = 8.0;
/// Endpoint handle radius in canvas units.
pub const DEFAULT_HANDLE_RADIUS: f64 = 5.0;
/// Distance within which a pointer counts as being on a line.
pub const DEFAULT_HIT_TOLERANCE: f64 = 4.0;

/// Configuration for an [`Editor`](crate::Editor).
///
/// Every field has a default, so a partial JSON object is enough to
/// override a single value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Maximum number of history snapshots. Values below 1 are treated as 1.
    pub history_limit: usize,
    /// Radius around an endpoint that snaps the hover point onto it.
    pub hover_threshold: f64,
    /// Radius of the endpoint handles shown in edit mode.
    pub handle_radius: f64,
    /// Pointer-to-segment distance that still counts as a hit.
    pub hit_tolerance: f64,
    /// Whether the coordinate axes are shown initially.
    pub show_axes: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            hover_threshold: DEFAULT_HOVER_THRESHOLD,
            handle_radius: DEFAULT_HANDLE_RADIUS,
            hit_tolerance: DEFAULT_HIT_TOLERANCE,
            show_axes: true,
        }
    }
}
