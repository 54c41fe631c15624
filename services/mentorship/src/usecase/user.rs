use chrono::Utc;
use uuid::Uuid;

use mentorship_domain::pagination::PageRequest;
use mentorship_domain::user::validate_username;

use crate::domain::repository::UserRepository;
use crate::domain::types::{User, UserPatch};
use crate::error::MentorshipServiceError;

// ── CreateUser ───────────────────────────────────────────────────────────────

pub struct CreateUserInput {
    pub name: String,
    pub username: String,
    pub email: String,
    pub need_mentoring: bool,
    pub available_to_mentor: bool,
}

pub struct CreateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> CreateUserUseCase<R> {
    pub async fn execute(&self, input: CreateUserInput) -> Result<User, MentorshipServiceError> {
        if !validate_username(&input.username) {
            return Err(MentorshipServiceError::InvalidUsername);
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            name: input.name,
            username: input.username,
            email: input.email,
            need_mentoring: input.need_mentoring,
            available_to_mentor: input.available_to_mentor,
            created_at: now,
            updated_at: now,
        };
        self.repo.create(&user).await?;
        tracing::info!(user_id = %user.id, "user created");
        Ok(user)
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetUserUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<User, MentorshipServiceError> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(MentorshipServiceError::UserNotFound)
    }
}

// ── UpdateUser ───────────────────────────────────────────────────────────────

pub struct UpdateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> UpdateUserUseCase<R> {
    pub async fn execute(&self, user_id: Uuid, patch: UserPatch) -> Result<(), MentorshipServiceError> {
        if patch.is_empty() {
            return Err(MentorshipServiceError::MissingData);
        }
        if let Some(ref username) = patch.username {
            if !validate_username(username) {
                return Err(MentorshipServiceError::InvalidUsername);
            }
        }
        if !self.repo.update(user_id, &patch).await? {
            return Err(MentorshipServiceError::UserNotFound);
        }
        Ok(())
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ListUsersUseCase<R> {
    pub async fn execute(
        &self,
        requester: Uuid,
        page: PageRequest,
    ) -> Result<Vec<User>, MentorshipServiceError> {
        self.repo.list_except(requester, page).await
    }
}
