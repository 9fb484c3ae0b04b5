//! Per-line display state derived from the editor.
//!
//! Lines remain pure data. Everything here is recomputed from the editor on
//! demand for the rendering layer and never stored.

mod handles;
mod state;

pub use handles::Handle;
pub use state::WidgetState;

use crate::editor::Editor;
use crate::shapes::{LineId, Pin};
use crate::tools::Mode;
use kurbo::Point;

impl Editor {
    /// Display state of a line. Hover and selection highlights only show in
    /// edit mode, and hover wins over selection.
    pub fn widget_state(&self, id: LineId) -> WidgetState {
        if self.mode() != Mode::Edit {
            return WidgetState::Normal;
        }
        if self.hovered_lines().contains(&id) {
            WidgetState::Hovered
        } else if self.highlighted_selection().contains(&id) {
            WidgetState::Selected
        } else {
            WidgetState::Normal
        }
    }

    /// Endpoint handles of every line, shown in edit mode only.
    pub fn handles(&self) -> Vec<Handle> {
        if self.mode() != Mode::Edit {
            return Vec::new();
        }
        let radius = self.config().handle_radius;
        self.lines()
            .iter()
            .flat_map(|line| {
                [Pin::P1, Pin::P2]
                    .map(|pin| Handle::new(line.id(), pin, line.endpoint(pin), radius))
            })
            .collect()
    }

    /// The topmost endpoint handle under `point`, if any.
    pub fn handle_at(&self, point: Point) -> Option<(LineId, Pin)> {
        self.handles()
            .into_iter()
            .rev()
            .find(|h| h.hit_test(point))
            .map(|h| (h.line_id, h.pin))
    }
}
