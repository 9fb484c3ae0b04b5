//! Editor state and the commands that mutate it.
//!
//! [`Editor`] is the single owner of lines, groups, selection and history.
//! Commands that "commit" push exactly one snapshot; preview updates
//! (drawing, dragging, marquee resizing) only touch transient state until the
//! matching commit. Commands whose preconditions are not met are silent
//! no-ops and record nothing.

use crate::config::EditorConfig;
use crate::geometry::LineEquation;
use crate::history::{History, Snapshot};
use crate::shapes::{Group, GroupId, Line, LineId, Pin};
use crate::tools::{DragState, Interaction, Marquee, Mode, TempLine};
use kurbo::{Point, Rect};
use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

/// A broken invariant found by [`Editor::check_invariants`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("line id {0} is used more than once")]
    DuplicateLine(LineId),
    #[error("group id {0} is used more than once")]
    DuplicateGroup(GroupId),
    #[error("group {0} has fewer than two members")]
    UndersizedGroup(GroupId),
    #[error("group {group} lists {line} more than once")]
    DuplicateMember { group: GroupId, line: LineId },
    #[error("group {group} lists missing line {line}")]
    MissingMember { group: GroupId, line: LineId },
    #[error("line {line} is listed by group {group} but points elsewhere")]
    MemberMismatch { group: GroupId, line: LineId },
    #[error("line {line} references group {group} which does not list it")]
    DanglingGroupRef { line: LineId, group: GroupId },
    #[error("selection lists {0} more than once")]
    DuplicateSelection(LineId),
    #[error("selection lists missing line {0}")]
    MissingSelection(LineId),
    #[error("live state differs from the current history snapshot")]
    HistoryOutOfSync,
}

/// Data shown in the status bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusInfo {
    pub mode: Mode,
    pub hover_point: Option<Point>,
    /// Equation of the hovered line, if any.
    pub equation: Option<LineEquation>,
}

/// The editor store.
#[derive(Debug, Clone)]
pub struct Editor {
    mode: Mode,
    lines: Vec<Line>,
    groups: Vec<Group>,
    selection: Vec<LineId>,
    show_axes: bool,
    history: History,
    interaction: Interaction,
    config: EditorConfig,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// Create an empty editor with default configuration.
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    /// Create an empty editor. History starts with one empty snapshot.
    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            mode: Mode::default(),
            lines: Vec::new(),
            groups: Vec::new(),
            selection: Vec::new(),
            show_axes: config.show_axes,
            history: History::new(Snapshot::default(), config.history_limit),
            interaction: Interaction::default(),
            config,
        }
    }

    /// Assemble an editor from already-validated parts.
    pub(crate) fn from_parts(
        mode: Mode,
        snapshot: Snapshot,
        show_axes: bool,
        history: History,
        config: EditorConfig,
    ) -> Self {
        let editor = Self {
            mode,
            lines: snapshot.lines,
            groups: snapshot.groups,
            selection: snapshot.selected_line_ids,
            show_axes,
            history,
            interaction: Interaction::default(),
            config,
        };
        debug_assert!(
            editor.check_invariants().is_empty(),
            "editor assembled from inconsistent parts: {:?}",
            editor.check_invariants()
        );
        editor
    }
}

/// Read-only queries.
impl Editor {
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Lines in insertion order (back to front).
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line(&self, id: LineId) -> Option<&Line> {
        self.lines.iter().find(|l| l.id == id)
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// The group a line belongs to.
    pub fn group_of(&self, line_id: LineId) -> Option<&Group> {
        self.line(line_id)
            .and_then(|l| l.group_id)
            .and_then(|gid| self.group(gid))
    }

    pub fn selected_line_ids(&self) -> &[LineId] {
        &self.selection
    }

    pub fn is_selected(&self, id: LineId) -> bool {
        self.selection.contains(&id)
    }

    pub fn show_axes(&self) -> bool {
        self.show_axes
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// The segment being drawn, if any.
    pub fn temp_line(&self) -> Option<TempLine> {
        self.interaction.temp
    }

    pub fn marquee(&self) -> Option<Marquee> {
        self.interaction.marquee
    }

    /// The normalized marquee rectangle, if a marquee is active.
    pub fn marquee_rect(&self) -> Option<Rect> {
        self.interaction.marquee.map(|m| m.rect())
    }

    pub fn drag(&self) -> Option<&DragState> {
        self.interaction.drag.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.interaction.drag.is_some()
    }

    pub fn hover_line(&self) -> Option<LineId> {
        self.interaction.hover_line
    }

    pub fn hover_point(&self) -> Option<Point> {
        self.interaction.hover_point
    }

    pub fn shift_select_active(&self) -> bool {
        self.interaction.shift_select_active
    }

    /// Copy of the persisted editing state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            lines: self.lines.clone(),
            groups: self.groups.clone(),
            selected_line_ids: self.selection.clone(),
        }
    }

    /// Topmost line within the configured hit tolerance of `point`.
    pub fn line_at(&self, point: Point) -> Option<LineId> {
        self.lines
            .iter()
            .rev()
            .find(|l| l.hit_test(point, self.config.hit_tolerance))
            .map(|l| l.id)
    }

    /// Selection expanded with every member of each selected line's group.
    pub fn highlighted_selection(&self) -> Vec<LineId> {
        let mut result = self.selection.clone();
        for &id in &self.selection {
            if let Some(group) = self.group_of(id) {
                for &m in group.member_ids() {
                    if !result.contains(&m) {
                        result.push(m);
                    }
                }
            }
        }
        result
    }

    /// Lines highlighted by the current hover: the hovered line's whole group,
    /// or the line alone when ungrouped.
    pub fn hovered_lines(&self) -> Vec<LineId> {
        let Some(id) = self.interaction.hover_line else {
            return Vec::new();
        };
        match self.group_of(id) {
            Some(group) => group.member_ids().to_vec(),
            None => vec![id],
        }
    }

    /// Mode, hover point and the hovered line's equation.
    pub fn status(&self) -> StatusInfo {
        let equation = self
            .interaction
            .hover_line
            .and_then(|id| self.line(id))
            .map(|l| l.equation());
        StatusInfo {
            mode: self.mode,
            hover_point: self.interaction.hover_point,
            equation,
        }
    }
}

/// Invariant checking and history bookkeeping.
impl Editor {
    /// Check every structural invariant. An empty result means the state is
    /// consistent.
    pub fn check_invariants(&self) -> Vec<InvariantViolation> {
        let mut violations = Vec::new();

        let mut line_ids = HashSet::new();
        for line in &self.lines {
            if !line_ids.insert(line.id) {
                violations.push(InvariantViolation::DuplicateLine(line.id));
            }
        }

        let mut group_ids = HashSet::new();
        for group in &self.groups {
            if !group_ids.insert(group.id) {
                violations.push(InvariantViolation::DuplicateGroup(group.id));
            }
            if !group.is_viable() {
                violations.push(InvariantViolation::UndersizedGroup(group.id));
            }
            let mut seen = HashSet::new();
            for &m in group.member_ids() {
                if !seen.insert(m) {
                    violations.push(InvariantViolation::DuplicateMember {
                        group: group.id,
                        line: m,
                    });
                }
                match self.line(m) {
                    None => violations.push(InvariantViolation::MissingMember {
                        group: group.id,
                        line: m,
                    }),
                    Some(line) if line.group_id != Some(group.id) => {
                        violations.push(InvariantViolation::MemberMismatch {
                            group: group.id,
                            line: m,
                        })
                    }
                    Some(_) => {}
                }
            }
        }

        for line in &self.lines {
            if let Some(gid) = line.group_id {
                let listed = self.group(gid).is_some_and(|g| g.contains(line.id));
                if !listed {
                    violations.push(InvariantViolation::DanglingGroupRef {
                        line: line.id,
                        group: gid,
                    });
                }
            }
        }

        let mut seen = HashSet::new();
        for &id in &self.selection {
            if !seen.insert(id) {
                violations.push(InvariantViolation::DuplicateSelection(id));
            }
            if !line_ids.contains(&id) {
                violations.push(InvariantViolation::MissingSelection(id));
            }
        }

        let current = self.history.current();
        if current.lines != self.lines
            || current.groups != self.groups
            || current.selected_line_ids != self.selection
        {
            violations.push(InvariantViolation::HistoryOutOfSync);
        }

        violations
    }

    /// Record the live state as a new history entry.
    fn commit(&mut self, op: &str) {
        self.history.commit(self.snapshot());
        log::debug!(
            "{}: {} lines, {} groups, {} selected (history {}/{})",
            op,
            self.lines.len(),
            self.groups.len(),
            self.selection.len(),
            self.history.index() + 1,
            self.history.len()
        );
        debug_assert!(
            self.check_invariants().is_empty(),
            "{} broke invariants: {:?}",
            op,
            self.check_invariants()
        );
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.lines = snapshot.lines;
        self.groups = snapshot.groups;
        self.selection = snapshot.selected_line_ids;
    }

    /// Step back one history entry. Transient gesture state is kept.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo().cloned() else {
            return false;
        };
        self.restore(snapshot);
        log::debug!("undo: history {}/{}", self.history.index() + 1, self.history.len());
        true
    }

    /// Step forward one history entry. Transient gesture state is kept.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo().cloned() else {
            return false;
        };
        self.restore(snapshot);
        log::debug!("redo: history {}/{}", self.history.index() + 1, self.history.len());
        true
    }
}

/// View state. None of it is recorded in history.
impl Editor {
    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            log::debug!("mode: {} -> {}", self.mode.label(), mode.label());
            self.mode = mode;
        }
    }

    pub fn set_shift_select_active(&mut self, active: bool) {
        self.interaction.shift_select_active = active;
    }

    /// Flip the axes display flag. Not undoable.
    pub fn toggle_axes(&mut self) {
        self.show_axes = !self.show_axes;
    }

    pub fn set_hover_line(&mut self, id: Option<LineId>) {
        if self.interaction.hover_line != id {
            log::trace!("hover line: {:?}", id);
        }
        self.interaction.hover_line = id;
    }

    pub fn set_hover_point(&mut self, point: Option<Point>) {
        self.interaction.hover_point = point;
    }

    /// Update hover state for a pointer at `point`. In edit mode the topmost
    /// line under the pointer becomes the hover line and the hover point snaps
    /// to its nearest endpoint when close enough. Other modes clear both.
    pub fn hover_at(&mut self, point: Point) {
        if self.mode != Mode::Edit {
            self.set_hover_line(None);
            self.set_hover_point(None);
            return;
        }
        let hit = self.line_at(point);
        let snapped = hit.and_then(|id| self.line(id)).and_then(|line| {
            line.nearest_endpoint(point, self.config.hover_threshold)
                .map(|pin| line.endpoint(pin))
        });
        self.set_hover_line(hit);
        self.set_hover_point(snapped);
    }
}

/// Drawing a new segment.
impl Editor {
    /// Start drawing a segment. Both endpoints begin at `point`.
    pub fn begin_line(&mut self, point: Point) {
        self.interaction.temp = Some(TempLine {
            start: point,
            end: point,
        });
    }

    /// Move the free end of the segment being drawn.
    pub fn update_temp_end(&mut self, point: Point) {
        if let Some(temp) = self.interaction.temp.as_mut() {
            temp.end = point;
            log::trace!("temp end: ({}, {})", point.x, point.y);
        }
    }

    /// Turn the segment being drawn into a real line. Zero-length segments
    /// are accepted.
    pub fn commit_line(&mut self) -> Option<LineId> {
        let temp = self.interaction.temp.take()?;
        let line = Line::new(temp.start, temp.end);
        let id = line.id;
        self.lines.push(line);
        self.commit("commit_line");
        Some(id)
    }

    /// Discard the segment being drawn.
    pub fn cancel_temp(&mut self) {
        self.interaction.temp = None;
    }
}

/// Rectangular marquee selection.
impl Editor {
    pub fn begin_marquee(&mut self, point: Point) {
        self.interaction.marquee = Some(Marquee {
            start: point,
            end: point,
        });
    }

    pub fn update_marquee(&mut self, point: Point) {
        if let Some(marquee) = self.interaction.marquee.as_mut() {
            marquee.end = point;
        }
    }

    /// Replace the selection with every line touching the marquee.
    pub fn commit_marquee(&mut self) -> bool {
        let Some(marquee) = self.interaction.marquee.take() else {
            return false;
        };
        self.selection = self
            .lines
            .iter()
            .filter(|l| l.intersects_rect(marquee.start, marquee.end))
            .map(|l| l.id)
            .collect();
        self.commit("commit_marquee");
        true
    }

    pub fn cancel_marquee(&mut self) {
        self.interaction.marquee = None;
    }
}

/// Click selection.
impl Editor {
    /// Click selection. Non-additive: select only `id`, or deselect it if it
    /// is already the sole selection. Additive: toggle `id` and keep the rest.
    /// Unknown ids are ignored.
    pub fn toggle_select_line(&mut self, id: LineId, additive: bool) {
        if self.line(id).is_none() {
            return;
        }
        if additive {
            if self.selection.contains(&id) {
                self.selection.retain(|&s| s != id);
            } else {
                self.selection.push(id);
            }
        } else if self.selection == [id] {
            self.selection.clear();
        } else {
            self.selection = vec![id];
        }
        self.commit("toggle_select_line");
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.commit("clear_selection");
    }
}

/// Grouping and ungrouping.
impl Editor {
    /// Group the selection together with every member of any group a
    /// selected line already belongs to. Overlapping groups are dissolved into
    /// one new group, which also becomes the selection.
    pub fn create_group_from_selection(&mut self) -> Option<GroupId> {
        if self.selection.len() < 2 {
            return None;
        }

        let mut merged = self.selection.clone();
        for &id in &self.selection {
            if let Some(group) = self.group_of(id) {
                for &m in group.member_ids() {
                    if !merged.contains(&m) {
                        merged.push(m);
                    }
                }
            }
        }

        let overlapped: HashSet<GroupId> = self
            .groups
            .iter()
            .filter(|g| g.member_ids().iter().any(|m| merged.contains(m)))
            .map(|g| g.id)
            .collect();

        let group = Group::new(merged.iter().copied());
        let group_id = group.id;

        self.groups.retain(|g| !overlapped.contains(&g.id));
        for line in &mut self.lines {
            if merged.contains(&line.id) {
                line.group_id = Some(group_id);
            } else if line.group_id.is_some_and(|g| overlapped.contains(&g)) {
                line.group_id = None;
            }
        }
        self.groups.push(group);
        self.selection = merged;

        self.commit("create_group");
        Some(group_id)
    }

    /// Dissolve every group touched by the selection. The selection itself is
    /// unchanged. Returns false when no selected line is grouped.
    pub fn ungroup_selected(&mut self) -> bool {
        let involved: HashSet<GroupId> = self
            .selection
            .iter()
            .filter_map(|&id| self.line(id).and_then(|l| l.group_id))
            .collect();
        if involved.is_empty() {
            return false;
        }

        for line in &mut self.lines {
            if line.group_id.is_some_and(|g| involved.contains(&g)) {
                line.group_id = None;
            }
        }
        self.groups.retain(|g| !involved.contains(&g.id));

        self.commit("ungroup");
        true
    }
}

/// Dragging lines and endpoints.
impl Editor {
    /// Which lines move when `line_id` is dragged: its group if it has one,
    /// otherwise the selection if the line is part of it, otherwise the line
    /// alone.
    pub fn resolve_drag_set(&self, line_id: LineId) -> Vec<LineId> {
        if let Some(group) = self.group_of(line_id) {
            group.member_ids().to_vec()
        } else if self.selection.contains(&line_id) {
            self.selection.clone()
        } else {
            vec![line_id]
        }
    }

    /// Start a drag on `line_id`. With a pin, only that endpoint of each line
    /// in the drag set moves. Unknown ids are ignored.
    pub fn begin_drag_from_line(&mut self, line_id: LineId, start: Point, pin: Option<Pin>) {
        if self.line(line_id).is_none() {
            return;
        }
        let ids = self.resolve_drag_set(line_id);
        log::trace!("drag start: {} lines, pin {:?}", ids.len(), pin);
        self.interaction.drag = Some(DragState {
            ids,
            last: start,
            pin,
        });
    }

    /// Move the drag set by the pointer delta since the last update. A pin
    /// given here overrides the one from [`begin_drag_from_line`](Self::begin_drag_from_line).
    /// Returns false when nothing moved.
    pub fn update_drag(&mut self, current: Point, pin: Option<Pin>) -> bool {
        let Some(drag) = self.interaction.drag.as_mut() else {
            return false;
        };
        let delta = current - drag.last;
        if delta.x == 0.0 && delta.y == 0.0 {
            return false;
        }
        let pin = pin.or(drag.pin);
        for line in self.lines.iter_mut().filter(|l| drag.ids.contains(&l.id)) {
            match pin {
                Some(pin) => line.move_endpoint(pin, delta),
                None => line.translate(delta),
            }
        }
        drag.last = current;
        true
    }

    /// Finish the drag, recording the whole gesture as one history entry.
    /// Without an active drag this does nothing.
    pub fn end_drag(&mut self) -> bool {
        if self.interaction.drag.take().is_none() {
            return false;
        }
        self.commit("end_drag");
        true
    }
}

/// Deleting lines.
impl Editor {
    /// Delete a line, shrinking its group and dissolving the group if fewer
    /// than two members remain. Unknown ids are ignored.
    pub fn delete_line(&mut self, id: LineId) -> bool {
        let Some(pos) = self.lines.iter().position(|l| l.id == id) else {
            return false;
        };
        self.lines.remove(pos);

        for group in &mut self.groups {
            group.remove_member(id);
        }
        let dropped: HashSet<GroupId> = self
            .groups
            .iter()
            .filter(|g| !g.is_viable())
            .map(|g| g.id)
            .collect();
        self.groups.retain(|g| !dropped.contains(&g.id));
        for line in &mut self.lines {
            if line.group_id.is_some_and(|g| dropped.contains(&g)) {
                line.group_id = None;
            }
        }
        self.selection.retain(|&s| s != id);

        if self.interaction.hover_line == Some(id) {
            self.interaction.hover_line = None;
        }
        if let Some(drag) = self.interaction.drag.as_mut() {
            drag.ids.retain(|&d| d != id);
        }

        self.commit("delete_line");
        true
    }

    /// Remove all lines, groups and selection. In-progress gestures are left
    /// for the caller to cancel.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.groups.clear();
        self.selection.clear();
        self.commit("clear");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::DEFAULT_HISTORY_LIMIT;

    fn assert_consistent(editor: &Editor) {
        assert_eq!(editor.check_invariants(), Vec::new());
    }

    fn draw(editor: &mut Editor, x0: f64, y0: f64, x1: f64, y1: f64) -> LineId {
        editor.begin_line(Point::new(x0, y0));
        editor.update_temp_end(Point::new(x1, y1));
        editor.commit_line().expect("temp line was started")
    }

    #[test]
    fn test_new_editor() {
        let editor = Editor::new();
        assert!(editor.lines().is_empty());
        assert_eq!(editor.history().len(), 1);
        assert_eq!(editor.history().index(), 0);
        assert_eq!(editor.mode(), Mode::Create);
        assert!(editor.show_axes());
        assert_consistent(&editor);
    }

    #[test]
    fn test_draw_line() {
        let mut editor = Editor::new();
        editor.begin_line(Point::new(1.0, 2.0));
        assert_eq!(
            editor.temp_line(),
            Some(TempLine {
                start: Point::new(1.0, 2.0),
                end: Point::new(1.0, 2.0)
            })
        );
        editor.update_temp_end(Point::new(5.0, 6.0));
        assert_eq!(editor.history().len(), 1);

        let id = editor.commit_line().unwrap();
        let line = editor.line(id).unwrap();
        assert_eq!(line.p1, Point::new(1.0, 2.0));
        assert_eq!(line.p2, Point::new(5.0, 6.0));
        assert!(line.group_id().is_none());
        assert!(editor.temp_line().is_none());
        assert_eq!(editor.history().len(), 2);
        assert_consistent(&editor);
    }

    #[test]
    fn test_zero_length_line_is_committed() {
        let mut editor = Editor::new();
        editor.begin_line(Point::new(3.0, 3.0));
        let id = editor.commit_line().unwrap();
        assert!(editor.line(id).unwrap().is_degenerate());
    }

    #[test]
    fn test_commit_without_temp_is_noop() {
        let mut editor = Editor::new();
        editor.update_temp_end(Point::new(1.0, 1.0));
        assert!(editor.temp_line().is_none());
        assert!(editor.commit_line().is_none());
        assert_eq!(editor.history().len(), 1);
    }

    #[test]
    fn test_cancel_temp() {
        let mut editor = Editor::new();
        editor.begin_line(Point::new(0.0, 0.0));
        editor.cancel_temp();
        assert!(editor.commit_line().is_none());
        assert!(editor.lines().is_empty());
        assert_eq!(editor.history().len(), 1);
    }

    #[test]
    fn test_marquee_selects_intersecting_lines_only() {
        let mut editor = Editor::new();
        let l1 = draw(&mut editor, 0.0, 0.0, 10.0, 10.0);
        let _l2 = draw(&mut editor, 100.0, 100.0, 110.0, 110.0);

        editor.begin_marquee(Point::new(0.0, 0.0));
        editor.update_marquee(Point::new(20.0, 20.0));
        assert_eq!(editor.marquee_rect(), Some(Rect::new(0.0, 0.0, 20.0, 20.0)));
        assert!(editor.commit_marquee());

        assert_eq!(editor.selected_line_ids(), &[l1]);
        assert!(editor.marquee().is_none());
        assert_consistent(&editor);
    }

    #[test]
    fn test_marquee_replaces_selection() {
        let mut editor = Editor::new();
        let l1 = draw(&mut editor, 0.0, 0.0, 10.0, 10.0);
        let l2 = draw(&mut editor, 100.0, 100.0, 110.0, 110.0);
        editor.toggle_select_line(l1, false);

        editor.begin_marquee(Point::new(120.0, 120.0));
        editor.update_marquee(Point::new(90.0, 90.0));
        editor.commit_marquee();
        assert_eq!(editor.selected_line_ids(), &[l2]);
    }

    #[test]
    fn test_cancel_marquee() {
        let mut editor = Editor::new();
        draw(&mut editor, 0.0, 0.0, 10.0, 10.0);
        let before = editor.history().len();
        editor.begin_marquee(Point::new(0.0, 0.0));
        editor.cancel_marquee();
        assert!(!editor.commit_marquee());
        assert_eq!(editor.history().len(), before);
    }

    #[test]
    fn test_toggle_select_non_additive() {
        let mut editor = Editor::new();
        let a = draw(&mut editor, 0.0, 0.0, 1.0, 1.0);
        let b = draw(&mut editor, 2.0, 2.0, 3.0, 3.0);

        editor.toggle_select_line(a, false);
        assert_eq!(editor.selected_line_ids(), &[a]);
        editor.toggle_select_line(b, true);
        assert_eq!(editor.selected_line_ids(), &[a, b]);

        // Replaces a multi-selection.
        editor.toggle_select_line(a, false);
        assert_eq!(editor.selected_line_ids(), &[a]);

        // Clicking the sole selection deselects it, and still commits.
        let before = editor.history().len();
        editor.toggle_select_line(a, false);
        assert!(editor.selected_line_ids().is_empty());
        assert_eq!(editor.history().len(), before + 1);
    }

    #[test]
    fn test_toggle_select_additive() {
        let mut editor = Editor::new();
        let a = draw(&mut editor, 0.0, 0.0, 1.0, 1.0);
        let b = draw(&mut editor, 2.0, 2.0, 3.0, 3.0);
        let c = draw(&mut editor, 4.0, 4.0, 5.0, 5.0);

        editor.toggle_select_line(a, true);
        editor.toggle_select_line(b, true);
        editor.toggle_select_line(c, true);
        editor.toggle_select_line(b, true);
        assert_eq!(editor.selected_line_ids(), &[a, c]);
        assert_consistent(&editor);
    }

    #[test]
    fn test_toggle_select_unknown_id_is_ignored() {
        let mut editor = Editor::new();
        editor.toggle_select_line(uuid::Uuid::new_v4(), false);
        assert!(editor.selected_line_ids().is_empty());
        assert_eq!(editor.history().len(), 1);
    }

    #[test]
    fn test_clear_selection_always_commits() {
        let mut editor = Editor::new();
        editor.clear_selection();
        assert_eq!(editor.history().len(), 2);
    }

    #[test]
    fn test_group_requires_two_selected() {
        let mut editor = Editor::new();
        let a = draw(&mut editor, 0.0, 0.0, 1.0, 1.0);
        editor.toggle_select_line(a, false);
        let before = editor.history().len();
        assert!(editor.create_group_from_selection().is_none());
        assert_eq!(editor.history().len(), before);
        assert!(editor.groups().is_empty());
    }

    #[test]
    fn test_group_merge_pulls_in_existing_members() {
        let mut editor = Editor::new();
        let a = draw(&mut editor, 0.0, 0.0, 1.0, 1.0);
        let b = draw(&mut editor, 2.0, 2.0, 3.0, 3.0);
        let c = draw(&mut editor, 4.0, 4.0, 5.0, 5.0);
        let d = draw(&mut editor, 6.0, 6.0, 7.0, 7.0);

        editor.toggle_select_line(a, false);
        editor.toggle_select_line(b, true);
        let g1 = editor.create_group_from_selection().unwrap();

        editor.toggle_select_line(b, false);
        editor.toggle_select_line(c, true);
        let g2 = editor.create_group_from_selection().unwrap();

        assert_ne!(g1, g2);
        assert!(editor.group(g1).is_none());
        assert_eq!(editor.groups().len(), 1);
        let members: HashSet<LineId> = editor.group(g2).unwrap().member_ids().iter().copied().collect();
        assert_eq!(members, HashSet::from([a, b, c]));
        for id in [a, b, c] {
            assert_eq!(editor.line(id).unwrap().group_id(), Some(g2));
        }
        assert!(editor.line(d).unwrap().group_id().is_none());

        let selected: HashSet<LineId> = editor.selected_line_ids().iter().copied().collect();
        assert_eq!(selected, members);
        assert_consistent(&editor);
    }

    #[test]
    fn test_group_merges_two_groups() {
        let mut editor = Editor::new();
        let ids: Vec<LineId> = (0..4)
            .map(|i| draw(&mut editor, i as f64, 0.0, i as f64, 1.0))
            .collect();

        editor.toggle_select_line(ids[0], false);
        editor.toggle_select_line(ids[1], true);
        editor.create_group_from_selection();
        editor.toggle_select_line(ids[2], false);
        editor.toggle_select_line(ids[3], true);
        editor.create_group_from_selection();
        assert_eq!(editor.groups().len(), 2);

        editor.toggle_select_line(ids[1], false);
        editor.toggle_select_line(ids[2], true);
        let merged = editor.create_group_from_selection().unwrap();
        assert_eq!(editor.groups().len(), 1);
        assert_eq!(editor.group(merged).unwrap().len(), 4);
        assert_consistent(&editor);
    }

    #[test]
    fn test_ungroup_selected() {
        let mut editor = Editor::new();
        let a = draw(&mut editor, 0.0, 0.0, 1.0, 1.0);
        let b = draw(&mut editor, 2.0, 2.0, 3.0, 3.0);
        editor.toggle_select_line(a, false);
        editor.toggle_select_line(b, true);
        editor.create_group_from_selection();

        editor.toggle_select_line(a, false);
        assert!(editor.ungroup_selected());
        assert!(editor.groups().is_empty());
        assert!(editor.line(a).unwrap().group_id().is_none());
        assert!(editor.line(b).unwrap().group_id().is_none());
        assert_eq!(editor.selected_line_ids(), &[a]);
        assert_consistent(&editor);
    }

    #[test]
    fn test_ungroup_without_groups_is_noop() {
        let mut editor = Editor::new();
        let a = draw(&mut editor, 0.0, 0.0, 1.0, 1.0);
        editor.toggle_select_line(a, false);
        let before = editor.history().len();
        assert!(!editor.ungroup_selected());
        assert_eq!(editor.history().len(), before);
    }

    #[test]
    fn test_drag_set_resolution() {
        let mut editor = Editor::new();
        let l1 = draw(&mut editor, 0.0, 0.0, 1.0, 1.0);
        let l2 = draw(&mut editor, 2.0, 2.0, 3.0, 3.0);
        let l3 = draw(&mut editor, 4.0, 4.0, 5.0, 5.0);
        let l4 = draw(&mut editor, 6.0, 6.0, 7.0, 7.0);

        editor.toggle_select_line(l1, false);
        editor.toggle_select_line(l2, true);
        editor.create_group_from_selection();
        editor.toggle_select_line(l3, false);

        editor.begin_drag_from_line(l1, Point::ZERO, None);
        let ids: HashSet<LineId> = editor.drag().unwrap().ids.iter().copied().collect();
        assert_eq!(ids, HashSet::from([l1, l2]));
        editor.end_drag();

        editor.begin_drag_from_line(l3, Point::ZERO, None);
        assert_eq!(editor.drag().unwrap().ids, vec![l3]);
        editor.end_drag();

        editor.toggle_select_line(l4, true);
        editor.begin_drag_from_line(l4, Point::ZERO, None);
        assert_eq!(editor.drag().unwrap().ids, vec![l3, l4]);
        editor.end_drag();

        editor.toggle_select_line(l3, false);
        editor.begin_drag_from_line(l4, Point::ZERO, None);
        assert_eq!(editor.drag().unwrap().ids, vec![l4]);
    }

    #[test]
    fn test_drag_translates_and_commits_once() {
        let mut editor = Editor::new();
        let a = draw(&mut editor, 0.0, 0.0, 10.0, 0.0);
        let before = editor.history().len();

        editor.begin_drag_from_line(a, Point::new(5.0, 0.0), None);
        assert!(editor.update_drag(Point::new(6.0, 1.0), None));
        assert!(!editor.update_drag(Point::new(6.0, 1.0), None));
        assert!(editor.update_drag(Point::new(8.0, 3.0), None));
        assert_eq!(editor.history().len(), before);

        assert!(editor.end_drag());
        assert_eq!(editor.history().len(), before + 1);
        let line = editor.line(a).unwrap();
        assert_eq!(line.p1, Point::new(3.0, 3.0));
        assert_eq!(line.p2, Point::new(13.0, 3.0));
        assert!(!editor.is_dragging());
        assert_consistent(&editor);
    }

    #[test]
    fn test_pinned_drag_moves_one_endpoint_per_line() {
        let mut editor = Editor::new();
        let a = draw(&mut editor, 0.0, 0.0, 10.0, 0.0);
        let b = draw(&mut editor, 0.0, 5.0, 10.0, 5.0);
        editor.toggle_select_line(a, false);
        editor.toggle_select_line(b, true);

        editor.begin_drag_from_line(a, Point::new(10.0, 0.0), Some(Pin::P2));
        editor.update_drag(Point::new(12.0, -1.0), None);
        editor.end_drag();

        let la = editor.line(a).unwrap();
        let lb = editor.line(b).unwrap();
        assert_eq!(la.p1, Point::new(0.0, 0.0));
        assert_eq!(la.p2, Point::new(12.0, -1.0));
        assert_eq!(lb.p1, Point::new(0.0, 5.0));
        assert_eq!(lb.p2, Point::new(12.0, 4.0));
    }

    #[test]
    fn test_update_drag_pin_override() {
        let mut editor = Editor::new();
        let a = draw(&mut editor, 0.0, 0.0, 10.0, 0.0);
        editor.begin_drag_from_line(a, Point::ZERO, None);
        editor.update_drag(Point::new(1.0, 1.0), Some(Pin::P1));
        let line = editor.line(a).unwrap();
        assert_eq!(line.p1, Point::new(1.0, 1.0));
        assert_eq!(line.p2, Point::new(10.0, 0.0));
    }

    #[test]
    fn test_drag_without_begin_is_noop() {
        let mut editor = Editor::new();
        draw(&mut editor, 0.0, 0.0, 10.0, 0.0);
        let before = editor.history().len();
        assert!(!editor.update_drag(Point::new(3.0, 3.0), None));
        assert!(!editor.end_drag());
        assert_eq!(editor.history().len(), before);
    }

    #[test]
    fn test_delete_cascades_group_removal() {
        let mut editor = Editor::new();
        let l1 = draw(&mut editor, 0.0, 0.0, 1.0, 1.0);
        let l2 = draw(&mut editor, 2.0, 2.0, 3.0, 3.0);
        editor.toggle_select_line(l1, false);
        editor.toggle_select_line(l2, true);
        editor.create_group_from_selection();

        assert!(editor.delete_line(l1));
        assert!(editor.groups().is_empty());
        assert!(editor.line(l2).unwrap().group_id().is_none());
        assert_eq!(editor.selected_line_ids(), &[l2]);
        assert_consistent(&editor);
    }

    #[test]
    fn test_delete_keeps_viable_group() {
        let mut editor = Editor::new();
        let ids: Vec<LineId> = (0..3)
            .map(|i| draw(&mut editor, i as f64, 0.0, i as f64, 1.0))
            .collect();
        for &id in &ids {
            editor.toggle_select_line(id, true);
        }
        let g = editor.create_group_from_selection().unwrap();

        editor.delete_line(ids[0]);
        assert_eq!(editor.group(g).unwrap().member_ids(), &ids[1..]);
        assert_consistent(&editor);
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        let mut editor = Editor::new();
        assert!(!editor.delete_line(uuid::Uuid::new_v4()));
        assert_eq!(editor.history().len(), 1);
    }

    #[test]
    fn test_clear_leaves_gestures() {
        let mut editor = Editor::new();
        draw(&mut editor, 0.0, 0.0, 1.0, 1.0);
        editor.begin_line(Point::new(9.0, 9.0));
        editor.clear();
        assert!(editor.lines().is_empty());
        assert!(editor.temp_line().is_some());
        assert!(editor.undo());
        assert_eq!(editor.lines().len(), 1);
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let mut editor = Editor::new();
        let a = draw(&mut editor, 0.0, 0.0, 1.0, 1.0);
        let b = draw(&mut editor, 2.0, 2.0, 3.0, 3.0);
        editor.toggle_select_line(a, false);
        editor.toggle_select_line(b, true);
        editor.create_group_from_selection();
        editor.begin_drag_from_line(a, Point::ZERO, None);
        editor.update_drag(Point::new(4.0, 4.0), None);
        editor.end_drag();
        editor.delete_line(b);
        let final_state = editor.snapshot();

        let mut steps = 0;
        while editor.undo() {
            steps += 1;
            assert_consistent(&editor);
        }
        assert_eq!(steps, 7);
        assert_eq!(editor.snapshot(), Snapshot::default());

        while editor.redo() {
            assert_consistent(&editor);
        }
        assert_eq!(editor.snapshot(), final_state);
    }

    #[test]
    fn test_new_commit_after_undo_discards_future() {
        let mut editor = Editor::new();
        draw(&mut editor, 0.0, 0.0, 1.0, 1.0);
        draw(&mut editor, 2.0, 2.0, 3.0, 3.0);
        assert_eq!(editor.history().index(), 2);

        editor.undo();
        assert_eq!(editor.history().index(), 1);
        draw(&mut editor, 5.0, 5.0, 6.0, 6.0);

        assert_eq!(editor.history().len(), 3);
        assert_eq!(editor.history().index(), 2);
        assert!(!editor.redo());
        assert_eq!(editor.lines()[1].p1, Point::new(5.0, 5.0));
    }

    #[test]
    fn test_undo_keeps_transient_state() {
        let mut editor = Editor::new();
        draw(&mut editor, 0.0, 0.0, 1.0, 1.0);
        editor.begin_marquee(Point::new(1.0, 1.0));
        editor.set_hover_point(Some(Point::new(2.0, 2.0)));
        editor.undo();
        assert!(editor.marquee().is_some());
        assert_eq!(editor.hover_point(), Some(Point::new(2.0, 2.0)));
    }

    #[test]
    fn test_history_cap() {
        let mut editor = Editor::new();
        for _ in 0..250 {
            editor.clear_selection();
        }
        assert_eq!(editor.history().len(), DEFAULT_HISTORY_LIMIT);
        assert_eq!(editor.history().index(), DEFAULT_HISTORY_LIMIT - 1);
    }

    #[test]
    fn test_history_cap_custom_limit() {
        let mut editor = Editor::with_config(EditorConfig {
            history_limit: 5,
            ..Default::default()
        });
        let ids: Vec<LineId> = (0..8)
            .map(|i| draw(&mut editor, i as f64, 0.0, i as f64, 1.0))
            .collect();
        assert_eq!(editor.history().len(), 5);
        let mut undone = 0;
        while editor.undo() {
            undone += 1;
        }
        assert_eq!(undone, 4);
        assert_eq!(editor.lines().len(), 4);
        assert_eq!(editor.lines()[3].id(), ids[3]);
    }

    #[test]
    fn test_toggle_axes_not_historied() {
        let mut editor = Editor::new();
        editor.toggle_axes();
        assert!(!editor.show_axes());
        assert_eq!(editor.history().len(), 1);
        editor.undo();
        assert!(!editor.show_axes());
    }

    #[test]
    fn test_hover_in_edit_mode() {
        let mut editor = Editor::new();
        let a = draw(&mut editor, 0.0, 0.0, 100.0, 0.0);
        let b = draw(&mut editor, 0.0, 50.0, 100.0, 50.0);
        editor.toggle_select_line(a, false);
        editor.toggle_select_line(b, true);
        editor.create_group_from_selection();

        editor.hover_at(Point::new(50.0, 1.0));
        assert!(editor.hover_line().is_none());

        editor.set_mode(Mode::Edit);
        editor.hover_at(Point::new(50.0, 1.0));
        assert_eq!(editor.hover_line(), Some(a));
        assert!(editor.hover_point().is_none());
        let hovered: HashSet<LineId> = editor.hovered_lines().into_iter().collect();
        assert_eq!(hovered, HashSet::from([a, b]));

        editor.hover_at(Point::new(2.0, 2.0));
        assert_eq!(editor.hover_point(), Some(Point::new(0.0, 0.0)));

        editor.hover_at(Point::new(50.0, 25.0));
        assert!(editor.hover_line().is_none());
        assert!(editor.hover_point().is_none());
    }

    #[test]
    fn test_status_equation() {
        let mut editor = Editor::new();
        let a = draw(&mut editor, 0.0, 0.0, 10.0, 10.0);
        assert!(editor.status().equation.is_none());
        editor.set_hover_line(Some(a));
        let status = editor.status();
        assert_eq!(status.mode, Mode::Create);
        assert_eq!(
            status.equation,
            Some(LineEquation {
                a: 10.0,
                b: -10.0,
                c: 0.0
            })
        );
    }

    #[test]
    fn test_highlighted_selection_includes_group() {
        let mut editor = Editor::new();
        let a = draw(&mut editor, 0.0, 0.0, 1.0, 1.0);
        let b = draw(&mut editor, 2.0, 2.0, 3.0, 3.0);
        let c = draw(&mut editor, 4.0, 4.0, 5.0, 5.0);
        editor.toggle_select_line(a, false);
        editor.toggle_select_line(b, true);
        editor.create_group_from_selection();
        editor.toggle_select_line(a, false);
        editor.toggle_select_line(c, true);

        let highlighted: HashSet<LineId> = editor.highlighted_selection().into_iter().collect();
        assert_eq!(highlighted, HashSet::from([a, b, c]));
    }

    #[test]
    fn test_line_at_prefers_topmost() {
        let mut editor = Editor::new();
        let _bottom = draw(&mut editor, 0.0, 0.0, 10.0, 0.0);
        let top = draw(&mut editor, 5.0, -5.0, 5.0, 5.0);
        assert_eq!(editor.line_at(Point::new(5.0, 0.0)), Some(top));
        assert!(editor.line_at(Point::new(50.0, 50.0)).is_none());
    }
}
