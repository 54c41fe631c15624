//! Gateway-injected identity headers extractor.

use axum::extract::FromRequestParts;
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

use mentorship_domain::user::UserRole;

pub const USER_ID_HEADER: &str = "x-mentorship-user-id";
pub const USER_ROLE_HEADER: &str = "x-mentorship-user-role";

/// Caller identity injected by the gateway via `x-mentorship-user-id` and
/// `x-mentorship-user-role` headers.
///
/// Returns 401 if either header is absent or malformed.
/// Role enforcement (403) is done by handlers after extraction.
#[derive(Debug, Clone)]
pub struct IdentityHeaders {
    pub user_id: Uuid,
    pub user_role: UserRole,
}

impl IdentityHeaders {
    pub fn is_service(&self) -> bool {
        self.user_role == UserRole::Service
    }
}

impl<S> FromRequestParts<S> for IdentityHeaders
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // axum-core 0.5 declares this as `fn -> impl Future + Send`; reading the headers
    // up front keeps the returned future free of the `parts` borrow.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<Uuid>().ok());

        let user_role = parts
            .headers
            .get(USER_ROLE_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u8>().ok())
            .and_then(UserRole::from_u8);

        async move {
            let user_id = user_id.ok_or(StatusCode::UNAUTHORIZED)?;
            let user_role = user_role.ok_or(StatusCode::UNAUTHORIZED)?;
            Ok(Self { user_id, user_role })
        }
    }
}
