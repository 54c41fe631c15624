use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use mentorship_core::response::Message;

/// Mentorship service error variants.
///
/// The `Display` text of each variant is the client-facing message.
#[derive(Debug, thiserror::Error)]
pub enum MentorshipServiceError {
    // ── users ────────────────────────────────────────────────────────────────
    #[error("User does not exist.")]
    UserNotFound,
    #[error("Username is invalid.")]
    InvalidUsername,
    #[error("A user with that username or email already exists.")]
    UserAlreadyExists,
    #[error("No fields were provided.")]
    MissingData,
    #[error("You do not have permission to perform this action.")]
    Forbidden,

    // ── send request ─────────────────────────────────────────────────────────
    #[error("Your ID has to match either Mentor or Mentee IDs.")]
    RequesterNotParticipant,
    #[error("You cannot have a mentorship relation with yourself.")]
    SelfRelation,
    #[error("Mentorship relation end date is invalid.")]
    InvalidEndDate,
    #[error("Mentorship relation period should be a minimum of 4 weeks.")]
    PeriodTooShort,
    #[error("Mentorship relation period should be a maximum of 6 months.")]
    PeriodTooLong,
    #[error("Mentor user does not exist.")]
    MentorNotFound,
    #[error("Mentee user does not exist.")]
    MenteeNotFound,
    #[error("Mentor user is not available to mentor.")]
    MentorUnavailable,
    #[error("Mentee user is not available to be mentored.")]
    MenteeUnavailable,
    #[error("Mentor user is already in a relationship.")]
    MentorInRelation,
    #[error("Mentee user is already in a relationship.")]
    MenteeInRelation,

    // ── lifecycle ────────────────────────────────────────────────────────────
    #[error("This mentorship relation request does not exist.")]
    RelationNotFound,
    #[error("This mentorship relation is not in the pending state.")]
    NotPending,
    #[error("This mentorship relation is not in the accepted state.")]
    NotAccepted,
    #[error("You cannot delete a mentorship request that you did not create.")]
    NotRequestCreator,
    #[error("You cannot accept a mentorship request sent by yourself.")]
    AcceptOwnRequest,
    #[error("You cannot reject a mentorship request sent by yourself.")]
    RejectOwnRequest,
    #[error("You cannot accept a mentorship relation where you are not involved.")]
    AcceptNotInvolved,
    #[error("You cannot reject a mentorship relation where you are not involved.")]
    RejectNotInvolved,
    #[error("You cannot cancel a mentorship relation where you are not involved.")]
    CancelNotInvolved,
    #[error("You are currently involved in a mentorship relation.")]
    RequesterInCurrentRelation,
    #[error("Sender is currently involved in a mentorship relation.")]
    SenderInCurrentRelation,
    #[error("You are not in a current mentorship relation.")]
    NoCurrentRelation,
    #[error("Mentorship relation state is invalid.")]
    InvalidRelationState,

    // ── request shape ────────────────────────────────────────────────────────
    /// Path, query or body the extractors could not parse.
    #[error("{message}")]
    MalformedRequest { status: StatusCode, message: String },

    #[error("Internal server error.")]
    Internal(#[from] anyhow::Error),
}

macro_rules! from_rejection {
    ($($rejection:ty),+) => {$(
        impl From<$rejection> for MentorshipServiceError {
            fn from(rejection: $rejection) -> Self {
                Self::MalformedRequest {
                    status: rejection.status(),
                    message: rejection.body_text(),
                }
            }
        }
    )+};
}

from_rejection!(JsonRejection, PathRejection, QueryRejection);

impl MentorshipServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::UserNotFound
            | Self::MentorNotFound
            | Self::MenteeNotFound
            | Self::RelationNotFound
            | Self::NoCurrentRelation => StatusCode::NOT_FOUND,
            Self::UserAlreadyExists => StatusCode::CONFLICT,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::MalformedRequest { status, .. } => *status,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for MentorshipServiceError {
    fn into_response(self) -> Response {
        // 4xx are expected client errors and already visible in the TraceLayer span.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, "internal error");
        }
        Message::new(self.to_string()).with_status(self.status())
    }
}
