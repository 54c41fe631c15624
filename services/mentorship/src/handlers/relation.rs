use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mentorship_auth_types::identity::IdentityHeaders;
use mentorship_core::response::Message;
use mentorship_domain::relation::RelationState;

use crate::domain::types::{MentorshipRelation, RelationFilter};
use crate::error::MentorshipServiceError;
use crate::extract::{JsonBody, PathParam, QueryParams};
use crate::state::AppState;
use crate::usecase::relation::{
    AcceptRelationUseCase, CancelRelationUseCase, DeleteRelationUseCase,
    GetCurrentRelationUseCase, ListRelationsUseCase, RejectRelationUseCase, SendRequestInput,
    SendRequestUseCase,
};

pub const REQUEST_SENT: &str = "Mentorship relation was sent successfully.";
pub const RELATION_ACCEPTED: &str = "Mentorship relation was accepted successfully.";
pub const RELATION_REJECTED: &str = "Mentorship relation was rejected successfully.";
pub const RELATION_CANCELLED: &str = "Mentorship relation was cancelled successfully.";
pub const RELATION_DELETED: &str = "Mentorship relation was deleted successfully.";

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct RelationResponse {
    pub id: Uuid,
    pub action_user_id: Uuid,
    pub mentor_id: Uuid,
    pub mentee_id: Uuid,
    /// Whether the caller sent this request.
    pub sent_by_me: bool,
    pub state: RelationState,
    #[serde(serialize_with = "mentorship_core::serde::to_rfc3339_ms")]
    pub creation_date: DateTime<Utc>,
    #[serde(serialize_with = "mentorship_core::serde::to_rfc3339_ms_opt")]
    pub accept_date: Option<DateTime<Utc>>,
    #[serde(serialize_with = "mentorship_core::serde::to_rfc3339_ms")]
    pub end_date: DateTime<Utc>,
    pub notes: String,
}

impl RelationResponse {
    fn for_viewer(relation: MentorshipRelation, viewer: Uuid) -> Self {
        Self {
            sent_by_me: relation.sent_by(viewer),
            id: relation.id,
            action_user_id: relation.action_user_id,
            mentor_id: relation.mentor_id,
            mentee_id: relation.mentee_id,
            state: relation.state,
            creation_date: relation.creation_date,
            accept_date: relation.accept_date,
            end_date: relation.end_date,
            notes: relation.notes,
        }
    }
}

fn for_viewer(relations: Vec<MentorshipRelation>, viewer: Uuid) -> Vec<RelationResponse> {
    relations
        .into_iter()
        .map(|r| RelationResponse::for_viewer(r, viewer))
        .collect()
}

// ── POST /mentorship_relation/send_request ───────────────────────────────────

#[derive(Deserialize)]
pub struct SendRequestBody {
    pub mentor_id: Uuid,
    pub mentee_id: Uuid,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub notes: String,
}

pub async fn send_request(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<SendRequestBody>,
) -> Result<Response, MentorshipServiceError> {
    let usecase = SendRequestUseCase {
        users: state.user_repo(),
        relations: state.relation_repo(),
    };
    usecase
        .execute(
            identity.user_id,
            SendRequestInput {
                mentor_id: body.mentor_id,
                mentee_id: body.mentee_id,
                end_date: body.end_date,
                notes: body.notes,
            },
        )
        .await?;
    Ok(Message::new(REQUEST_SENT).with_status(StatusCode::CREATED))
}

// ── PUT /mentorship_relation/{id}/accept ─────────────────────────────────────

pub async fn accept_relation(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Message, MentorshipServiceError> {
    let usecase = AcceptRelationUseCase {
        relations: state.relation_repo(),
    };
    usecase.execute(identity.user_id, id).await?;
    Ok(Message::new(RELATION_ACCEPTED))
}

// ── PUT /mentorship_relation/{id}/reject ─────────────────────────────────────

pub async fn reject_relation(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Message, MentorshipServiceError> {
    let usecase = RejectRelationUseCase {
        relations: state.relation_repo(),
    };
    usecase.execute(identity.user_id, id).await?;
    Ok(Message::new(RELATION_REJECTED))
}

// ── PUT /mentorship_relation/{id}/cancel ─────────────────────────────────────

pub async fn cancel_relation(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Message, MentorshipServiceError> {
    let usecase = CancelRelationUseCase {
        relations: state.relation_repo(),
    };
    usecase.execute(identity.user_id, id).await?;
    Ok(Message::new(RELATION_CANCELLED))
}

// ── DELETE /mentorship_relation/{id} ─────────────────────────────────────────

pub async fn delete_relation(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Message, MentorshipServiceError> {
    let usecase = DeleteRelationUseCase {
        relations: state.relation_repo(),
    };
    usecase.execute(identity.user_id, id).await?;
    Ok(Message::new(RELATION_DELETED))
}

// ── GET /mentorship_relations ────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct RelationListQuery {
    pub relation_state: Option<i16>,
}

pub async fn list_relations(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    QueryParams(query): QueryParams<RelationListQuery>,
) -> Result<Json<Vec<RelationResponse>>, MentorshipServiceError> {
    let filter = match query.relation_state {
        Some(code) => RelationState::try_from(code)
            .map(RelationFilter::State)
            .map_err(|_| MentorshipServiceError::InvalidRelationState)?,
        None => RelationFilter::All,
    };
    list_with(identity, state, filter).await
}

// ── GET /mentorship_relations/pending ────────────────────────────────────────

pub async fn list_pending_relations(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<Vec<RelationResponse>>, MentorshipServiceError> {
    list_with(identity, state, RelationFilter::Pending(Utc::now())).await
}

// ── GET /mentorship_relations/past ───────────────────────────────────────────

pub async fn list_past_relations(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<Vec<RelationResponse>>, MentorshipServiceError> {
    list_with(identity, state, RelationFilter::Past(Utc::now())).await
}

async fn list_with(
    identity: IdentityHeaders,
    state: AppState,
    filter: RelationFilter,
) -> Result<Json<Vec<RelationResponse>>, MentorshipServiceError> {
    let usecase = ListRelationsUseCase {
        relations: state.relation_repo(),
    };
    let relations = usecase.execute(identity.user_id, filter).await?;
    Ok(Json(for_viewer(relations, identity.user_id)))
}

// ── GET /mentorship_relations/current ────────────────────────────────────────

pub async fn get_current_relation(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, MentorshipServiceError> {
    let usecase = GetCurrentRelationUseCase {
        relations: state.relation_repo(),
    };
    let relation = usecase.execute(identity.user_id).await?;
    Ok(Json(RelationResponse::for_viewer(relation, identity.user_id)))
}
