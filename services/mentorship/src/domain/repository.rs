#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use mentorship_domain::pagination::PageRequest;
use mentorship_domain::relation::RelationState;

use crate::domain::types::{MentorshipRelation, RelationFilter, User, UserPatch};
use crate::error::MentorshipServiceError;

/// Repository for user profiles.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, MentorshipServiceError>;

    /// Insert a user. Fails with `UserAlreadyExists` on a username/email clash.
    async fn create(&self, user: &User) -> Result<(), MentorshipServiceError>;

    /// Apply a partial update. Returns `false` if no user has this id.
    async fn update(&self, id: Uuid, patch: &UserPatch) -> Result<bool, MentorshipServiceError>;

    /// Every user except `exclude`, ordered by username.
    async fn list_except(
        &self,
        exclude: Uuid,
        page: PageRequest,
    ) -> Result<Vec<User>, MentorshipServiceError>;
}

/// Result of [`RelationRepository::accept_pending`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptOutcome {
    Accepted,
    /// The accepting user is already in a current relation.
    RequesterBusy,
    /// The user who sent the request is already in a current relation.
    SenderBusy,
    /// The relation is gone or no longer pending.
    NotPending,
}

/// Repository for mentorship relations.
pub trait RelationRepository: Send + Sync {
    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<MentorshipRelation>, MentorshipServiceError>;

    async fn create(&self, relation: &MentorshipRelation) -> Result<(), MentorshipServiceError>;

    /// Relations where `user_id` is mentor or mentee, newest first.
    async fn list_for_user(
        &self,
        user_id: Uuid,
        filter: RelationFilter,
    ) -> Result<Vec<MentorshipRelation>, MentorshipServiceError>;

    async fn find_current_for_user(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<MentorshipRelation>, MentorshipServiceError> {
        Ok(self
            .list_for_user(user_id, RelationFilter::Current(now))
            .await?
            .into_iter()
            .next())
    }

    /// Remove a relation only if it is still pending and was sent by `action_user_id`.
    /// Returns `true` if a row was deleted.
    async fn delete_pending_by_creator(
        &self,
        id: Uuid,
        action_user_id: Uuid,
    ) -> Result<bool, MentorshipServiceError>;

    /// Move a relation from `from` to `to`.
    /// Returns `true` if the relation was still in `from`.
    async fn transition(
        &self,
        id: Uuid,
        from: RelationState,
        to: RelationState,
    ) -> Result<bool, MentorshipServiceError>;

    /// Accept a pending relation, stamping `accept_date` with `now`.
    ///
    /// The busy checks for both participants and the state change are one
    /// atomic step: concurrent accepts never put a user in two current relations.
    async fn accept_pending(
        &self,
        id: Uuid,
        requester: Uuid,
        sender: Uuid,
        now: DateTime<Utc>,
    ) -> Result<AcceptOutcome, MentorshipServiceError>;

    /// Mark accepted relations whose end date is before `now` as completed.
    /// Returns the number of relations changed.
    async fn complete_overdue(&self, now: DateTime<Utc>) -> Result<u64, MentorshipServiceError>;
}
