//! Snapshot-based undo/redo history.

use crate::shapes::{Group, Line, LineId};
use serde::{Deserialize, Serialize};

/// Default maximum number of snapshots kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 200;

/// A deep copy of the editing state: lines, groups and selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub lines: Vec<Line>,
    pub groups: Vec<Group>,
    pub selected_line_ids: Vec<LineId>,
}

/// Linear history of snapshots with a cursor.
///
/// `entries[index]` is the current state. Committing truncates everything
/// after the cursor, so redo is unavailable until the next undo.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Snapshot>,
    index: usize,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(Snapshot::default(), DEFAULT_HISTORY_LIMIT)
    }
}

impl History {
    /// Start a history seeded with one snapshot.
    pub fn new(initial: Snapshot, limit: usize) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
            limit: limit.max(1),
        }
    }

    /// Rebuild a history from stored parts. Returns `None` if the cursor is
    /// out of range or there are no entries. Oversized histories are capped.
    pub fn from_parts(entries: Vec<Snapshot>, index: usize, limit: usize) -> Option<Self> {
        if index >= entries.len() {
            return None;
        }
        let mut history = Self {
            entries,
            index,
            limit: limit.max(1),
        };
        history.enforce_limit();
        Some(history)
    }

    /// Append a snapshot after the cursor, dropping any redoable future.
    pub fn commit(&mut self, snapshot: Snapshot) {
        self.entries.truncate(self.index + 1);
        self.entries.push(snapshot);
        self.index = self.entries.len() - 1;
        self.enforce_limit();
    }

    /// Drop the oldest snapshots beyond the limit, keeping the cursor on the
    /// same logical entry. The redo tail is only cut when the past alone
    /// cannot absorb the excess.
    fn enforce_limit(&mut self) {
        if self.entries.len() <= self.limit {
            return;
        }
        let excess = self.entries.len() - self.limit;
        let from_front = excess.min(self.index);
        self.entries.drain(..from_front);
        self.index -= from_front;
        self.entries.truncate(self.limit);
    }

    /// Step back one snapshot. Returns the new current snapshot, or `None` at
    /// the oldest entry.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(&self.entries[self.index])
    }

    /// Step forward one snapshot. Returns the new current snapshot, or `None`
    /// at the newest entry.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(&self.entries[self.index])
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// The snapshot at the cursor.
    pub fn current(&self) -> &Snapshot {
        &self.entries[self.index]
    }

    pub fn entries(&self) -> &[Snapshot] {
        &self.entries
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}
