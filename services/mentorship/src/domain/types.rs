use chrono::{DateTime, Utc};
use uuid::Uuid;

use mentorship_domain::relation::RelationState;

/// Shortest period a relation may be proposed for (four weeks).
pub const MIN_RELATION_PERIOD_DAYS: i64 = 28;
/// Longest period a relation may be proposed for (six months).
pub const MAX_RELATION_PERIOD_DAYS: i64 = 183;

/// User profile with mentoring availability.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub email: String,
    pub need_mentoring: bool,
    pub available_to_mentor: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial profile update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub username: Option<String>,
    pub need_mentoring: Option<bool>,
    pub available_to_mentor: Option<bool>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.username.is_none()
            && self.need_mentoring.is_none()
            && self.available_to_mentor.is_none()
    }
}

/// A proposed or active pairing between a mentor and a mentee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentorshipRelation {
    pub id: Uuid,
    /// User who sent the request.
    pub action_user_id: Uuid,
    pub mentor_id: Uuid,
    pub mentee_id: Uuid,
    pub state: RelationState,
    pub creation_date: DateTime<Utc>,
    pub accept_date: Option<DateTime<Utc>>,
    pub end_date: DateTime<Utc>,
    pub notes: String,
}

impl MentorshipRelation {
    pub fn involves(&self, user_id: Uuid) -> bool {
        self.mentor_id == user_id || self.mentee_id == user_id
    }

    /// The participant that is not `user_id`.
    pub fn counterpart(&self, user_id: Uuid) -> Uuid {
        if self.mentor_id == user_id {
            self.mentee_id
        } else {
            self.mentor_id
        }
    }

    pub fn sent_by(&self, user_id: Uuid) -> bool {
        self.action_user_id == user_id
    }

    /// Accepted and not yet past its end date.
    pub fn is_current(&self, now: DateTime<Utc>) -> bool {
        self.state == RelationState::Accepted && self.end_date > now
    }
}

/// Which of a user's relations a listing returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationFilter {
    All,
    State(RelationState),
    /// Pending requests that have not run past their end date.
    Pending(DateTime<Utc>),
    /// The accepted relation that has not run past its end date.
    Current(DateTime<Utc>),
    /// Relations whose end date has passed, whatever their state.
    Past(DateTime<Utc>),
}

impl RelationFilter {
    pub fn matches(&self, relation: &MentorshipRelation) -> bool {
        match *self {
            Self::All => true,
            Self::State(state) => relation.state == state,
            Self::Pending(now) => {
                relation.state == RelationState::Pending && relation.end_date > now
            }
            Self::Current(now) => relation.is_current(now),
            Self::Past(now) => relation.end_date < now,
        }
    }
}
