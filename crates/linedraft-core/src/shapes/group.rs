//! Group of lines that move and select together.

use super::{GroupId, LineId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named set of lines. Member order is insertion order and ids are unique.
///
/// The editor keeps every live group at two or more existing members; a bare
/// `Group` does not enforce that on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub(crate) id: GroupId,
    pub(crate) member_ids: Vec<LineId>,
}

impl Group {
    /// Create a group with a fresh id. Duplicate members are dropped.
    pub fn new(member_ids: impl IntoIterator<Item = LineId>) -> Self {
        Self::with_id(Uuid::new_v4(), member_ids)
    }

    /// Create a group with a specific id.
    pub fn with_id(id: GroupId, member_ids: impl IntoIterator<Item = LineId>) -> Self {
        let mut members: Vec<LineId> = Vec::new();
        for m in member_ids {
            if !members.contains(&m) {
                members.push(m);
            }
        }
        Self {
            id,
            member_ids: members,
        }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    /// Member line ids in insertion order.
    pub fn member_ids(&self) -> &[LineId] {
        &self.member_ids
    }

    pub fn contains(&self, id: LineId) -> bool {
        self.member_ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.member_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.member_ids.is_empty()
    }

    /// Remove a member. Returns true if it was present.
    pub fn remove_member(&mut self, id: LineId) -> bool {
        let before = self.member_ids.len();
        self.member_ids.retain(|&m| m != id);
        self.member_ids.len() != before
    }

    /// Whether the group still satisfies the two-member minimum.
    pub fn is_viable(&self) -> bool {
        self.member_ids.len() >= 2
    }
}
