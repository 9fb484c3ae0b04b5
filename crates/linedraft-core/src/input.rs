//! Translation of canvas input events into editor commands.
//!
//! Points are already in canvas coordinates; mapping from screen space
//! happens in the host. The meaning of a gesture depends on the mode and is
//! decided by a single `match` in [`translate`].

use crate::command::Command;
use crate::editor::Editor;
use crate::tools::Mode;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    #[serde(default)]
    pub shift: bool,
}

impl Modifiers {
    pub const SHIFT: Modifiers = Modifiers { shift: true };
}

/// Keys the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Escape,
    Shift,
}

/// A pointer or keyboard event in canvas coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InputEvent {
    PointerDown {
        point: Point,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerMove {
        point: Point,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerUp {
        point: Point,
    },
    /// Press and release at the same spot, delivered after `PointerUp`.
    Click {
        point: Point,
        #[serde(default)]
        modifiers: Modifiers,
    },
    KeyDown {
        key: Key,
    },
    KeyUp {
        key: Key,
    },
}

/// Work out which commands an event stands for, given the current state.
pub fn translate(editor: &Editor, event: &InputEvent) -> Vec<Command> {
    match *event {
        InputEvent::PointerDown { point, modifiers } => {
            if editor.shift_select_active() || modifiers.shift {
                return vec![Command::BeginMarquee { point }];
            }
            match editor.mode() {
                Mode::Create => vec![Command::BeginLine { point }],
                Mode::Edit => drag_start(editor, point).into_iter().collect(),
                Mode::Delete => Vec::new(),
            }
        }
        InputEvent::PointerMove { point, .. } => {
            if editor.marquee().is_some() {
                return vec![Command::UpdateMarquee { point }];
            }
            match editor.mode() {
                Mode::Create if editor.temp_line().is_some() => {
                    vec![Command::UpdateTempEnd { point }]
                }
                Mode::Edit if editor.is_dragging() => vec![Command::UpdateDrag {
                    current: point,
                    pin: None,
                }],
                Mode::Edit => vec![Command::HoverAt { point }],
                _ => Vec::new(),
            }
        }
        InputEvent::PointerUp { .. } => {
            if let Some(marquee) = editor.marquee() {
                // A marquee that never grew is a plain click.
                if marquee.start == marquee.end {
                    return vec![Command::CancelMarquee];
                }
                return vec![Command::CommitMarquee];
            }
            match editor.mode() {
                Mode::Create if editor.temp_line().is_some() => vec![Command::CommitLine],
                Mode::Edit if editor.is_dragging() => vec![Command::EndDrag],
                _ => Vec::new(),
            }
        }
        InputEvent::Click { point, modifiers } => {
            let Some(id) = editor.line_at(point) else {
                return Vec::new();
            };
            let shift = editor.shift_select_active() || modifiers.shift;
            match editor.mode() {
                Mode::Delete => vec![Command::DeleteLine { id }],
                _ if shift => vec![Command::ToggleSelectLine { id, additive: true }],
                Mode::Edit => vec![Command::ToggleSelectLine { id, additive: false }],
                Mode::Create => Vec::new(),
            }
        }
        InputEvent::KeyDown { key: Key::Escape } => {
            vec![Command::CancelTemp, Command::CancelMarquee]
        }
        InputEvent::KeyDown { key: Key::Shift } => {
            vec![Command::SetShiftSelectActive { active: true }]
        }
        InputEvent::KeyUp { key: Key::Shift } => {
            vec![Command::SetShiftSelectActive { active: false }]
        }
        InputEvent::KeyUp { key: Key::Escape } => Vec::new(),
    }
}

/// Drag start in edit mode: an endpoint handle pins the drag, otherwise a
/// hit on the segment translates it.
fn drag_start(editor: &Editor, point: Point) -> Option<Command> {
    if let Some((line_id, pin)) = editor.handle_at(point) {
        return Some(Command::BeginDragFromLine {
            line_id,
            start: point,
            pin: Some(pin),
        });
    }
    editor.line_at(point).map(|line_id| Command::BeginDragFromLine {
        line_id,
        start: point,
        pin: None,
    })
}

impl Editor {
    /// Translate an input event and apply the resulting commands.
    /// Returns the number of commands applied.
    pub fn handle_input(&mut self, event: &InputEvent) -> usize {
        let commands = translate(self, event);
        let count = commands.len();
        for command in commands {
            self.apply(command);
        }
        count
    }
}
