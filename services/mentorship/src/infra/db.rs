use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr,
    TransactionTrait, sea_query::Expr,
};
use uuid::Uuid;

use mentorship_domain::pagination::PageRequest;
use mentorship_domain::relation::RelationState;
use mentorship_schema::{mentorship_relations, users};

use crate::domain::repository::{AcceptOutcome, RelationRepository, UserRepository};
use crate::domain::types::{MentorshipRelation, RelationFilter, User, UserPatch};
use crate::error::MentorshipServiceError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, MentorshipServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &User) -> Result<(), MentorshipServiceError> {
        let result = users::ActiveModel {
            id: Set(user.id),
            name: Set(user.name.clone()),
            username: Set(user.username.clone()),
            email: Set(user.email.clone()),
            need_mentoring: Set(user.need_mentoring),
            available_to_mentor: Set(user.available_to_mentor),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(MentorshipServiceError::UserAlreadyExists)
            }
            Err(e) => Err(anyhow::Error::new(e).context("create user").into()),
        }
    }

    async fn update(&self, id: Uuid, patch: &UserPatch) -> Result<bool, MentorshipServiceError> {
        let mut am = users::ActiveModel {
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        if let Some(ref name) = patch.name {
            am.name = Set(name.clone());
        }
        if let Some(ref username) = patch.username {
            am.username = Set(username.clone());
        }
        if let Some(need) = patch.need_mentoring {
            am.need_mentoring = Set(need);
        }
        if let Some(available) = patch.available_to_mentor {
            am.available_to_mentor = Set(available);
        }

        let result = users::Entity::update_many()
            .set(am)
            .filter(users::Column::Id.eq(id))
            .exec(&self.db)
            .await;

        match result {
            Ok(res) => Ok(res.rows_affected > 0),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(MentorshipServiceError::UserAlreadyExists)
            }
            Err(e) => Err(anyhow::Error::new(e).context("update user").into()),
        }
    }

    async fn list_except(
        &self,
        exclude: Uuid,
        page: PageRequest,
    ) -> Result<Vec<User>, MentorshipServiceError> {
        let page = page.clamped();
        let models = users::Entity::find()
            .filter(users::Column::Id.ne(exclude))
            .order_by_asc(users::Column::Username)
            .offset(page.offset())
            .limit(u64::from(page.per_page))
            .all(&self.db)
            .await
            .context("list users")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        name: model.name,
        username: model.username,
        email: model.email,
        need_mentoring: model.need_mentoring,
        available_to_mentor: model.available_to_mentor,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Relation repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRelationRepository {
    pub db: DatabaseConnection,
}

impl RelationRepository for DbRelationRepository {
    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<MentorshipRelation>, MentorshipServiceError> {
        let model = mentorship_relations::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find mentorship relation by id")?;
        model.map(relation_from_model).transpose()
    }

    async fn create(&self, relation: &MentorshipRelation) -> Result<(), MentorshipServiceError> {
        mentorship_relations::ActiveModel {
            id: Set(relation.id),
            action_user_id: Set(relation.action_user_id),
            mentor_id: Set(relation.mentor_id),
            mentee_id: Set(relation.mentee_id),
            state: Set(relation.state.as_i16()),
            creation_date: Set(relation.creation_date),
            accept_date: Set(relation.accept_date),
            end_date: Set(relation.end_date),
            notes: Set(relation.notes.clone()),
        }
        .insert(&self.db)
        .await
        .context("create mentorship relation")?;
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        filter: RelationFilter,
    ) -> Result<Vec<MentorshipRelation>, MentorshipServiceError> {
        let models = mentorship_relations::Entity::find()
            .filter(involving(user_id))
            .filter(filter_condition(filter))
            .order_by_desc(mentorship_relations::Column::CreationDate)
            .all(&self.db)
            .await
            .context("list mentorship relations for user")?;
        models.into_iter().map(relation_from_model).collect()
    }

    async fn delete_pending_by_creator(
        &self,
        id: Uuid,
        action_user_id: Uuid,
    ) -> Result<bool, MentorshipServiceError> {
        let result = mentorship_relations::Entity::delete_many()
            .filter(mentorship_relations::Column::Id.eq(id))
            .filter(mentorship_relations::Column::ActionUserId.eq(action_user_id))
            .filter(mentorship_relations::Column::State.eq(RelationState::Pending.as_i16()))
            .exec(&self.db)
            .await
            .context("delete pending mentorship relation")?;
        Ok(result.rows_affected > 0)
    }

    async fn transition(
        &self,
        id: Uuid,
        from: RelationState,
        to: RelationState,
    ) -> Result<bool, MentorshipServiceError> {
        let result = mentorship_relations::Entity::update_many()
            .col_expr(mentorship_relations::Column::State, Expr::value(to.as_i16()))
            .filter(mentorship_relations::Column::Id.eq(id))
            .filter(mentorship_relations::Column::State.eq(from.as_i16()))
            .exec(&self.db)
            .await
            .context("transition mentorship relation state")?;
        Ok(result.rows_affected > 0)
    }

    async fn accept_pending(
        &self,
        id: Uuid,
        requester: Uuid,
        sender: Uuid,
        now: DateTime<Utc>,
    ) -> Result<AcceptOutcome, MentorshipServiceError> {
        let outcome = self
            .db
            .transaction::<_, AcceptOutcome, DbErr>(|txn| {
                Box::pin(async move {
                    // Accepts sharing a participant queue up on these row locks.
                    users::Entity::find()
                        .filter(users::Column::Id.is_in([requester, sender]))
                        .order_by_asc(users::Column::Id)
                        .lock_exclusive()
                        .all(txn)
                        .await?;

                    if has_current_relation(txn, requester, now).await? {
                        return Ok(AcceptOutcome::RequesterBusy);
                    }
                    if has_current_relation(txn, sender, now).await? {
                        return Ok(AcceptOutcome::SenderBusy);
                    }

                    let result = mentorship_relations::Entity::update_many()
                        .col_expr(
                            mentorship_relations::Column::State,
                            Expr::value(RelationState::Accepted.as_i16()),
                        )
                        .col_expr(mentorship_relations::Column::AcceptDate, Expr::value(now))
                        .filter(mentorship_relations::Column::Id.eq(id))
                        .filter(
                            mentorship_relations::Column::State
                                .eq(RelationState::Pending.as_i16()),
                        )
                        .exec(txn)
                        .await?;
                    Ok(if result.rows_affected > 0 {
                        AcceptOutcome::Accepted
                    } else {
                        AcceptOutcome::NotPending
                    })
                })
            })
            .await
            .context("accept mentorship relation")?;
        Ok(outcome)
    }

    async fn complete_overdue(&self, now: DateTime<Utc>) -> Result<u64, MentorshipServiceError> {
        let result = mentorship_relations::Entity::update_many()
            .col_expr(
                mentorship_relations::Column::State,
                Expr::value(RelationState::Completed.as_i16()),
            )
            .filter(mentorship_relations::Column::State.eq(RelationState::Accepted.as_i16()))
            .filter(mentorship_relations::Column::EndDate.lt(now))
            .exec(&self.db)
            .await
            .context("complete overdue mentorship relations")?;
        Ok(result.rows_affected)
    }
}

fn involving(user_id: Uuid) -> Condition {
    Condition::any()
        .add(mentorship_relations::Column::MentorId.eq(user_id))
        .add(mentorship_relations::Column::MenteeId.eq(user_id))
}

async fn has_current_relation<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    now: DateTime<Utc>,
) -> Result<bool, DbErr> {
    let found = mentorship_relations::Entity::find()
        .filter(involving(user_id))
        .filter(filter_condition(RelationFilter::Current(now)))
        .one(db)
        .await?;
    Ok(found.is_some())
}

fn filter_condition(filter: RelationFilter) -> Condition {
    use mentorship_relations::Column;

    match filter {
        RelationFilter::All => Condition::all(),
        RelationFilter::State(state) => Condition::all().add(Column::State.eq(state.as_i16())),
        RelationFilter::Pending(now) => Condition::all()
            .add(Column::State.eq(RelationState::Pending.as_i16()))
            .add(Column::EndDate.gt(now)),
        RelationFilter::Current(now) => Condition::all()
            .add(Column::State.eq(RelationState::Accepted.as_i16()))
            .add(Column::EndDate.gt(now)),
        RelationFilter::Past(now) => Condition::all().add(Column::EndDate.lt(now)),
    }
}

fn relation_from_model(
    model: mentorship_relations::Model,
) -> Result<MentorshipRelation, MentorshipServiceError> {
    let state = RelationState::try_from(model.state)
        .with_context(|| format!("mentorship relation {}", model.id))?;
    Ok(MentorshipRelation {
        id: model.id,
        action_user_id: model.action_user_id,
        mentor_id: model.mentor_id,
        mentee_id: model.mentee_id,
        state,
        creation_date: model.creation_date,
        accept_date: model.accept_date,
        end_date: model.end_date,
        notes: model.notes,
    })
}
