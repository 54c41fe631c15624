use chrono::{DateTime, Utc};
use uuid::Uuid;

use mentorship_domain::relation::RelationState;

use crate::domain::policy;
use crate::domain::repository::{AcceptOutcome, RelationRepository, UserRepository};
use crate::domain::types::{MentorshipRelation, RelationFilter};
use crate::error::MentorshipServiceError;

// ── SendRequest ──────────────────────────────────────────────────────────────

pub struct SendRequestInput {
    pub mentor_id: Uuid,
    pub mentee_id: Uuid,
    pub end_date: DateTime<Utc>,
    pub notes: String,
}

pub struct SendRequestUseCase<U: UserRepository, R: RelationRepository> {
    pub users: U,
    pub relations: R,
}

impl<U: UserRepository, R: RelationRepository> SendRequestUseCase<U, R> {
    pub async fn execute(
        &self,
        requester: Uuid,
        input: SendRequestInput,
    ) -> Result<MentorshipRelation, MentorshipServiceError> {
        let now = Utc::now();
        policy::validate_request(requester, input.mentor_id, input.mentee_id, input.end_date, now)?;

        let mentor = self
            .users
            .find_by_id(input.mentor_id)
            .await?
            .ok_or(MentorshipServiceError::MentorNotFound)?;
        let mentee = self
            .users
            .find_by_id(input.mentee_id)
            .await?
            .ok_or(MentorshipServiceError::MenteeNotFound)?;

        if !mentor.available_to_mentor {
            return Err(MentorshipServiceError::MentorUnavailable);
        }
        if !mentee.need_mentoring {
            return Err(MentorshipServiceError::MenteeUnavailable);
        }
        if self.relations.find_current_for_user(mentor.id, now).await?.is_some() {
            return Err(MentorshipServiceError::MentorInRelation);
        }
        if self.relations.find_current_for_user(mentee.id, now).await?.is_some() {
            return Err(MentorshipServiceError::MenteeInRelation);
        }

        let relation = MentorshipRelation {
            id: Uuid::now_v7(),
            action_user_id: requester,
            mentor_id: mentor.id,
            mentee_id: mentee.id,
            state: RelationState::Pending,
            creation_date: now,
            accept_date: None,
            end_date: input.end_date,
            notes: input.notes,
        };
        self.relations.create(&relation).await?;
        tracing::info!(
            relation_id = %relation.id,
            mentor_id = %relation.mentor_id,
            mentee_id = %relation.mentee_id,
            "mentorship request sent"
        );
        Ok(relation)
    }
}

// ── AcceptRelation ───────────────────────────────────────────────────────────

pub struct AcceptRelationUseCase<R: RelationRepository> {
    pub relations: R,
}

impl<R: RelationRepository> AcceptRelationUseCase<R> {
    pub async fn execute(&self, requester: Uuid, id: Uuid) -> Result<(), MentorshipServiceError> {
        let relation = find_relation(&self.relations, id).await?;
        policy::authorize_accept(&relation, requester)?;

        let sender = relation.counterpart(requester);
        match self
            .relations
            .accept_pending(id, requester, sender, Utc::now())
            .await?
        {
            AcceptOutcome::Accepted => {}
            AcceptOutcome::RequesterBusy => {
                return Err(MentorshipServiceError::RequesterInCurrentRelation);
            }
            AcceptOutcome::SenderBusy => {
                return Err(MentorshipServiceError::SenderInCurrentRelation);
            }
            AcceptOutcome::NotPending => {
                return Err(explain_missed_write(&self.relations, id, RelationState::Pending).await);
            }
        }
        tracing::info!(relation_id = %id, user_id = %requester, "mentorship relation accepted");
        Ok(())
    }
}

// ── RejectRelation ───────────────────────────────────────────────────────────

pub struct RejectRelationUseCase<R: RelationRepository> {
    pub relations: R,
}

impl<R: RelationRepository> RejectRelationUseCase<R> {
    pub async fn execute(&self, requester: Uuid, id: Uuid) -> Result<(), MentorshipServiceError> {
        let relation = find_relation(&self.relations, id).await?;
        policy::authorize_reject(&relation, requester)?;
        transition_or_explain(
            &self.relations,
            id,
            RelationState::Pending,
            RelationState::Rejected,
        )
        .await?;
        tracing::info!(relation_id = %id, user_id = %requester, "mentorship relation rejected");
        Ok(())
    }
}

// ── CancelRelation ───────────────────────────────────────────────────────────

pub struct CancelRelationUseCase<R: RelationRepository> {
    pub relations: R,
}

impl<R: RelationRepository> CancelRelationUseCase<R> {
    pub async fn execute(&self, requester: Uuid, id: Uuid) -> Result<(), MentorshipServiceError> {
        let relation = find_relation(&self.relations, id).await?;
        policy::authorize_cancel(&relation, requester)?;
        transition_or_explain(
            &self.relations,
            id,
            RelationState::Accepted,
            RelationState::Cancelled,
        )
        .await?;
        tracing::info!(relation_id = %id, user_id = %requester, "mentorship relation cancelled");
        Ok(())
    }
}

// ── DeleteRelation ───────────────────────────────────────────────────────────

pub struct DeleteRelationUseCase<R: RelationRepository> {
    pub relations: R,
}

impl<R: RelationRepository> DeleteRelationUseCase<R> {
    pub async fn execute(&self, requester: Uuid, id: Uuid) -> Result<(), MentorshipServiceError> {
        let relation = find_relation(&self.relations, id).await?;
        policy::authorize_delete(&relation, requester)?;

        // The delete re-checks creator and state, so a concurrent accept/reject
        // between the read above and here leaves the row in place.
        if !self.relations.delete_pending_by_creator(id, requester).await? {
            return Err(match self.relations.find_by_id(id).await? {
                Some(_) => MentorshipServiceError::NotPending,
                None => MentorshipServiceError::RelationNotFound,
            });
        }
        tracing::info!(relation_id = %id, user_id = %requester, "mentorship relation deleted");
        Ok(())
    }
}

// ── ListRelations ────────────────────────────────────────────────────────────

pub struct ListRelationsUseCase<R: RelationRepository> {
    pub relations: R,
}

impl<R: RelationRepository> ListRelationsUseCase<R> {
    pub async fn execute(
        &self,
        requester: Uuid,
        filter: RelationFilter,
    ) -> Result<Vec<MentorshipRelation>, MentorshipServiceError> {
        self.relations.list_for_user(requester, filter).await
    }
}

// ── GetCurrentRelation ───────────────────────────────────────────────────────

pub struct GetCurrentRelationUseCase<R: RelationRepository> {
    pub relations: R,
}

impl<R: RelationRepository> GetCurrentRelationUseCase<R> {
    pub async fn execute(
        &self,
        requester: Uuid,
    ) -> Result<MentorshipRelation, MentorshipServiceError> {
        self.relations
            .find_current_for_user(requester, Utc::now())
            .await?
            .ok_or(MentorshipServiceError::NoCurrentRelation)
    }
}

// ── CompleteOverdueRelations ─────────────────────────────────────────────────

pub struct CompleteOverdueRelationsUseCase<R: RelationRepository> {
    pub relations: R,
}

impl<R: RelationRepository> CompleteOverdueRelationsUseCase<R> {
    pub async fn execute(&self, now: DateTime<Utc>) -> Result<u64, MentorshipServiceError> {
        let completed = self.relations.complete_overdue(now).await?;
        if completed > 0 {
            tracing::info!(completed, "completed overdue mentorship relations");
        }
        Ok(completed)
    }
}

// ── helpers ──────────────────────────────────────────────────────────────────

async fn find_relation<R: RelationRepository>(
    relations: &R,
    id: Uuid,
) -> Result<MentorshipRelation, MentorshipServiceError> {
    relations
        .find_by_id(id)
        .await?
        .ok_or(MentorshipServiceError::RelationNotFound)
}

/// Apply a conditional state change; when it matches no row, report why.
async fn transition_or_explain<R: RelationRepository>(
    relations: &R,
    id: Uuid,
    from: RelationState,
    to: RelationState,
) -> Result<(), MentorshipServiceError> {
    if relations.transition(id, from, to).await? {
        return Ok(());
    }
    Err(explain_missed_write(relations, id, from).await)
}

/// Why a write conditioned on `expected` state matched no row.
async fn explain_missed_write<R: RelationRepository>(
    relations: &R,
    id: Uuid,
    expected: RelationState,
) -> MentorshipServiceError {
    match relations.find_by_id(id).await {
        Err(e) => e,
        Ok(None) => MentorshipServiceError::RelationNotFound,
        Ok(Some(_)) if expected == RelationState::Accepted => MentorshipServiceError::NotAccepted,
        Ok(Some(_)) => MentorshipServiceError::NotPending,
    }
}
