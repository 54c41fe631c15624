use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mentorship_auth_types::identity::IdentityHeaders;
use mentorship_domain::pagination::PageRequest;

use crate::domain::types::{User, UserPatch};
use crate::error::MentorshipServiceError;
use crate::extract::{JsonBody, PathParam, QueryParams};
use crate::state::AppState;
use crate::usecase::user::{
    CreateUserInput, CreateUserUseCase, GetUserUseCase, ListUsersUseCase, UpdateUserUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

/// Own profile, including private fields.
#[derive(Serialize)]
pub struct MeResponse {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub email: String,
    pub need_mentoring: bool,
    pub available_to_mentor: bool,
    #[serde(serialize_with = "mentorship_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "mentorship_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Profile as seen by other users.
#[derive(Serialize)]
pub struct PublicUserResponse {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub need_mentoring: bool,
    pub available_to_mentor: bool,
}

impl From<User> for PublicUserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            username: user.username,
            need_mentoring: user.need_mentoring,
            available_to_mentor: user.available_to_mentor,
        }
    }
}

#[derive(Serialize)]
pub struct CreatedUserResponse {
    pub id: Uuid,
}

// ── POST /users ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub need_mentoring: bool,
    #[serde(default)]
    pub available_to_mentor: bool,
}

pub async fn create_user(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateUserRequest>,
) -> Result<(StatusCode, Json<CreatedUserResponse>), MentorshipServiceError> {
    if !identity.is_service() {
        return Err(MentorshipServiceError::Forbidden);
    }
    let usecase = CreateUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase
        .execute(CreateUserInput {
            name: body.name,
            username: body.username,
            email: body.email,
            need_mentoring: body.need_mentoring,
            available_to_mentor: body.available_to_mentor,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(CreatedUserResponse { id: user.id })))
}

// ── GET /users/@me ───────────────────────────────────────────────────────────

pub async fn get_me(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<MeResponse>, MentorshipServiceError> {
    let usecase = GetUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase.execute(identity.user_id).await?;
    Ok(Json(MeResponse {
        id: user.id,
        name: user.name,
        username: user.username,
        email: user.email,
        need_mentoring: user.need_mentoring,
        available_to_mentor: user.available_to_mentor,
        created_at: user.created_at,
        updated_at: user.updated_at,
    }))
}

// ── PATCH /users/@me ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateMeRequest {
    pub name: Option<String>,
    pub username: Option<String>,
    pub need_mentoring: Option<bool>,
    pub available_to_mentor: Option<bool>,
}

pub async fn update_me(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<UpdateMeRequest>,
) -> Result<StatusCode, MentorshipServiceError> {
    let usecase = UpdateUserUseCase {
        repo: state.user_repo(),
    };
    usecase
        .execute(
            identity.user_id,
            UserPatch {
                name: body.name,
                username: body.username,
                need_mentoring: body.need_mentoring,
                available_to_mentor: body.available_to_mentor,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /users/{id} ──────────────────────────────────────────────────────────

pub async fn get_user(
    _identity: IdentityHeaders,
    State(state): State<AppState>,
    PathParam(user_id): PathParam<Uuid>,
) -> Result<Json<PublicUserResponse>, MentorshipServiceError> {
    let usecase = GetUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase.execute(user_id).await?;
    Ok(Json(user.into()))
}

// ── GET /users ───────────────────────────────────────────────────────────────

pub async fn list_users(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    QueryParams(page): QueryParams<PageRequest>,
) -> Result<Json<Vec<PublicUserResponse>>, MentorshipServiceError> {
    let usecase = ListUsersUseCase {
        repo: state.user_repo(),
    };
    let users = usecase.execute(identity.user_id, page).await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}
