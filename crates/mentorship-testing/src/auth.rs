//! Mock auth helpers for integration tests.
//!
//! Services behind the gateway receive `x-mentorship-user-id` + `x-mentorship-user-role`
//! headers injected by the gateway. In tests, `MockAuth` produces these headers directly
//! so no real gateway is needed.

use axum::http::{HeaderName, HeaderValue};
use uuid::Uuid;

use mentorship_auth_types::identity::{USER_ID_HEADER, USER_ROLE_HEADER};
use mentorship_domain::user::UserRole;

/// Configurable identity injected into test requests.
pub struct MockAuth {
    pub user_id: Uuid,
    pub user_role: UserRole,
}

impl MockAuth {
    pub fn new(user_id: Uuid, user_role: UserRole) -> Self {
        Self { user_id, user_role }
    }

    pub fn member(user_id: Uuid) -> Self {
        Self::new(user_id, UserRole::Member)
    }

    pub fn service() -> Self {
        Self::new(Uuid::now_v7(), UserRole::Service)
    }

    /// Headers as the gateway would inject them, as pairs for builder-style clients.
    pub fn header_pairs(&self) -> [(HeaderName, HeaderValue); 2] {
        [
            (
                HeaderName::from_static(USER_ID_HEADER),
                HeaderValue::from_str(&self.user_id.to_string()).unwrap(),
            ),
            (
                HeaderName::from_static(USER_ROLE_HEADER),
                HeaderValue::from(u16::from(self.user_role.as_u8())),
            ),
        ]
    }
}
