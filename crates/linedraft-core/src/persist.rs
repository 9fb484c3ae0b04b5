//! JSON layout of a saved editor and loading with validation.
//!
//! The stored object carries the top-level editing state plus the full
//! history. On load the editing state is repaired if it breaks a structural
//! invariant, and the history is re-seeded with a single snapshot whenever it
//! is missing or does not agree with the top-level state.

use crate::config::EditorConfig;
use crate::editor::Editor;
use crate::history::{DEFAULT_HISTORY_LIMIT, History, Snapshot};
use crate::shapes::{Group, GroupId, Line, LineId};
use crate::tools::Mode;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Errors raised while loading a saved editor.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("History limit must be at least 1")]
    InvalidHistoryLimit,
}

fn default_show_axes() -> bool {
    true
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

/// Serialized form of an [`Editor`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub lines: Vec<Line>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default = "default_show_axes")]
    pub show_axes: bool,
    #[serde(default)]
    pub selected_line_ids: Vec<LineId>,
    #[serde(default)]
    pub history: Vec<Snapshot>,
    #[serde(default)]
    pub history_index: usize,
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl From<&Editor> for PersistedState {
    fn from(editor: &Editor) -> Self {
        let snapshot = editor.snapshot();
        Self {
            mode: editor.mode(),
            lines: snapshot.lines,
            groups: snapshot.groups,
            show_axes: editor.show_axes(),
            selected_line_ids: snapshot.selected_line_ids,
            history: editor.history().entries().to_vec(),
            history_index: editor.history().index(),
            history_limit: editor.history().limit(),
        }
    }
}

/// Bring a snapshot back in line with the structural invariants. Group
/// membership lists are authoritative; each line keeps the first group that
/// lists it. Returns the repaired snapshot and whether anything changed.
pub fn repair_snapshot(snapshot: &Snapshot) -> (Snapshot, bool) {
    let mut seen_lines = HashSet::new();
    let mut lines: Vec<Line> = snapshot
        .lines
        .iter()
        .filter(|l| seen_lines.insert(l.id()))
        .cloned()
        .collect();

    let mut owner: HashMap<LineId, GroupId> = HashMap::new();
    let mut seen_groups = HashSet::new();
    let mut groups = Vec::new();
    for group in &snapshot.groups {
        if !seen_groups.insert(group.id()) {
            continue;
        }
        let members: Vec<LineId> = group
            .member_ids()
            .iter()
            .copied()
            .filter(|m| seen_lines.contains(m) && !owner.contains_key(m))
            .collect();
        let repaired = Group::with_id(group.id(), members);
        if repaired.is_viable() {
            for &m in repaired.member_ids() {
                owner.insert(m, repaired.id());
            }
            groups.push(repaired);
        }
    }

    for line in &mut lines {
        line.group_id = owner.get(&line.id()).copied();
    }

    let mut seen_selected = HashSet::new();
    let selected_line_ids = snapshot
        .selected_line_ids
        .iter()
        .copied()
        .filter(|id| seen_lines.contains(id) && seen_selected.insert(*id))
        .collect();

    let repaired = Snapshot {
        lines,
        groups,
        selected_line_ids,
    };
    let changed = repaired != *snapshot;
    (repaired, changed)
}

impl Editor {
    /// The serializable form of this editor.
    pub fn to_persisted(&self) -> PersistedState {
        PersistedState::from(self)
    }

    /// Serialize the editor to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.to_persisted())
    }

    /// Deserialize an editor from JSON using the default configuration.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let state: PersistedState = serde_json::from_str(json)?;
        Self::from_persisted(state, EditorConfig::default())
    }

    /// Rebuild an editor from its persisted form. The stored history limit
    /// takes precedence over the one in `config`.
    pub fn from_persisted(state: PersistedState, mut config: EditorConfig) -> Result<Self, LoadError> {
        if state.history_limit == 0 {
            return Err(LoadError::InvalidHistoryLimit);
        }
        config.history_limit = state.history_limit;

        let top = Snapshot {
            lines: state.lines,
            groups: state.groups,
            selected_line_ids: state.selected_line_ids,
        };
        let (top, repaired) = repair_snapshot(&top);
        if repaired {
            log::warn!("Loaded editor state violated invariants and was repaired");
        }

        let history = restore_history(state.history, state.history_index, &top, state.history_limit)
            .unwrap_or_else(|| {
                log::warn!("Stored history unusable, re-seeding from loaded state");
                History::new(top.clone(), state.history_limit)
            });

        log::info!(
            "Loaded editor: {} lines, {} groups, history {}/{}",
            top.lines.len(),
            top.groups.len(),
            history.index() + 1,
            history.len()
        );
        Ok(Self::from_parts(state.mode, top, state.show_axes, history, config))
    }
}

/// Accept the stored history only if every entry is consistent and the
/// current entry matches the loaded top-level state.
fn restore_history(entries: Vec<Snapshot>, index: usize, top: &Snapshot, limit: usize) -> Option<History> {
    if entries.get(index) != Some(top) {
        return None;
    }
    if entries.iter().any(|s| repair_snapshot(s).1) {
        return None;
    }
    History::from_parts(entries, index, limit)
}
