//! Serializable editor commands.
//!
//! A [`Command`] is one `(command, arguments)` call on the editor. The input
//! layer produces them, scripts replay them, and [`Editor::apply`] runs them.

use crate::editor::Editor;
use crate::shapes::{LineId, Pin};
use crate::tools::Mode;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// One editor command with its arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Command {
    SetMode {
        mode: Mode,
    },
    SetShiftSelectActive {
        active: bool,
    },
    BeginLine {
        point: Point,
    },
    UpdateTempEnd {
        point: Point,
    },
    CommitLine,
    CancelTemp,
    BeginMarquee {
        point: Point,
    },
    UpdateMarquee {
        point: Point,
    },
    CommitMarquee,
    CancelMarquee,
    ToggleSelectLine {
        id: LineId,
        #[serde(default)]
        additive: bool,
    },
    ClearSelection,
    CreateGroupFromSelection,
    UngroupSelected,
    BeginDragFromLine {
        line_id: LineId,
        start: Point,
        #[serde(default)]
        pin: Option<Pin>,
    },
    UpdateDrag {
        current: Point,
        #[serde(default)]
        pin: Option<Pin>,
    },
    EndDrag,
    DeleteLine {
        id: LineId,
    },
    Clear,
    Undo,
    Redo,
    ToggleAxes,
    SetHoverLine {
        id: Option<LineId>,
    },
    SetHoverPoint {
        point: Option<Point>,
    },
    HoverAt {
        point: Point,
    },
}

impl Command {
    /// Whether the command may add a history entry.
    pub fn is_committing(&self) -> bool {
        matches!(
            self,
            Command::CommitLine
                | Command::CommitMarquee
                | Command::ToggleSelectLine { .. }
                | Command::ClearSelection
                | Command::CreateGroupFromSelection
                | Command::UngroupSelected
                | Command::EndDrag
                | Command::DeleteLine { .. }
                | Command::Clear
        )
    }
}

impl Editor {
    /// Run one command.
    pub fn apply(&mut self, command: Command) {
        log::trace!("apply {:?}", command);
        match command {
            Command::SetMode { mode } => self.set_mode(mode),
            Command::SetShiftSelectActive { active } => self.set_shift_select_active(active),
            Command::BeginLine { point } => self.begin_line(point),
            Command::UpdateTempEnd { point } => self.update_temp_end(point),
            Command::CommitLine => {
                self.commit_line();
            }
            Command::CancelTemp => self.cancel_temp(),
            Command::BeginMarquee { point } => self.begin_marquee(point),
            Command::UpdateMarquee { point } => self.update_marquee(point),
            Command::CommitMarquee => {
                self.commit_marquee();
            }
            Command::CancelMarquee => self.cancel_marquee(),
            Command::ToggleSelectLine { id, additive } => self.toggle_select_line(id, additive),
            Command::ClearSelection => self.clear_selection(),
            Command::CreateGroupFromSelection => {
                self.create_group_from_selection();
            }
            Command::UngroupSelected => {
                self.ungroup_selected();
            }
            Command::BeginDragFromLine {
                line_id,
                start,
                pin,
            } => self.begin_drag_from_line(line_id, start, pin),
            Command::UpdateDrag { current, pin } => {
                self.update_drag(current, pin);
            }
            Command::EndDrag => {
                self.end_drag();
            }
            Command::DeleteLine { id } => {
                self.delete_line(id);
            }
            Command::Clear => self.clear(),
            Command::Undo => {
                self.undo();
            }
            Command::Redo => {
                self.redo();
            }
            Command::ToggleAxes => self.toggle_axes(),
            Command::SetHoverLine { id } => self.set_hover_line(id),
            Command::SetHoverPoint { point } => self.set_hover_point(point),
            Command::HoverAt { point } => self.hover_at(point),
        }
    }
}
