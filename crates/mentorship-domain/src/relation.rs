//! Mentorship relation lifecycle types.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a mentorship relation.
///
/// Wire and storage format: integer code (1 = Pending .. 5 = Completed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub enum RelationState {
    Pending = 1,
    Accepted = 2,
    Rejected = 3,
    Cancelled = 4,
    Completed = 5,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown relation state code {0}")]
pub struct UnknownRelationState(pub i16);

impl RelationState {
    pub const ALL: [RelationState; 5] = [
        Self::Pending,
        Self::Accepted,
        Self::Rejected,
        Self::Cancelled,
        Self::Completed,
    ];

    pub fn as_i16(self) -> i16 {
        self as i16
    }
}

impl TryFrom<i16> for RelationState {
    type Error = UnknownRelationState;

    fn try_from(v: i16) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_i16() == v)
            .ok_or(UnknownRelationState(v))
    }
}

impl From<RelationState> for i16 {
    fn from(state: RelationState) -> Self {
        state.as_i16()
    }
}
