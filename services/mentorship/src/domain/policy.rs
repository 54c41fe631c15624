//! Guards evaluated before a relation changes state or is removed.
//!
//! Each guard only reads the stored relation; the repository re-applies the
//! state precondition in the mutating statement itself.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use mentorship_domain::relation::RelationState;

use crate::domain::types::{MAX_RELATION_PERIOD_DAYS, MIN_RELATION_PERIOD_DAYS, MentorshipRelation};
use crate::error::MentorshipServiceError;

/// Only the user who sent a request may delete it, and only while it is pending.
pub fn authorize_delete(
    relation: &MentorshipRelation,
    requester: Uuid,
) -> Result<(), MentorshipServiceError> {
    if !relation.sent_by(requester) {
        return Err(MentorshipServiceError::NotRequestCreator);
    }
    if relation.state != RelationState::Pending {
        return Err(MentorshipServiceError::NotPending);
    }
    Ok(())
}

/// The receiving participant may accept a pending request.
pub fn authorize_accept(
    relation: &MentorshipRelation,
    requester: Uuid,
) -> Result<(), MentorshipServiceError> {
    if relation.state != RelationState::Pending {
        return Err(MentorshipServiceError::NotPending);
    }
    if relation.sent_by(requester) {
        return Err(MentorshipServiceError::AcceptOwnRequest);
    }
    if !relation.involves(requester) {
        return Err(MentorshipServiceError::AcceptNotInvolved);
    }
    Ok(())
}

/// The receiving participant may reject a pending request.
pub fn authorize_reject(
    relation: &MentorshipRelation,
    requester: Uuid,
) -> Result<(), MentorshipServiceError> {
    if relation.state != RelationState::Pending {
        return Err(MentorshipServiceError::NotPending);
    }
    if relation.sent_by(requester) {
        return Err(MentorshipServiceError::RejectOwnRequest);
    }
    if !relation.involves(requester) {
        return Err(MentorshipServiceError::RejectNotInvolved);
    }
    Ok(())
}

/// Either participant may cancel an accepted relation.
pub fn authorize_cancel(
    relation: &MentorshipRelation,
    requester: Uuid,
) -> Result<(), MentorshipServiceError> {
    if relation.state != RelationState::Accepted {
        return Err(MentorshipServiceError::NotAccepted);
    }
    if !relation.involves(requester) {
        return Err(MentorshipServiceError::CancelNotInvolved);
    }
    Ok(())
}

/// Validate who is asking and for how long, before any user lookups.
pub fn validate_request(
    requester: Uuid,
    mentor_id: Uuid,
    mentee_id: Uuid,
    end_date: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<(), MentorshipServiceError> {
    if requester != mentor_id && requester != mentee_id {
        return Err(MentorshipServiceError::RequesterNotParticipant);
    }
    if mentor_id == mentee_id {
        return Err(MentorshipServiceError::SelfRelation);
    }
    if end_date <= now {
        return Err(MentorshipServiceError::InvalidEndDate);
    }
    let period = end_date - now;
    if period < Duration::days(MIN_RELATION_PERIOD_DAYS) {
        return Err(MentorshipServiceError::PeriodTooShort);
    }
    if period > Duration::days(MAX_RELATION_PERIOD_DAYS) {
        return Err(MentorshipServiceError::PeriodTooLong);
    }
    Ok(())
}
