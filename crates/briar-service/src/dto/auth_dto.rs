//! Authentication DTOs.

use briar_core::domain::{User, UserRole};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Login request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 64, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// The authenticated account, as returned by login and `/auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUserResponse {
    pub id: Uuid,
    pub username: String,
    pub role: UserRole,
}

impl From<&User> for SessionUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.into_inner(),
            username: user.username.clone(),
            role: user.role,
        }
    }
}

/// Successful login: the session id plus the account it belongs to.
///
/// The REST layer moves `session_id` into an HttpOnly cookie and serializes
/// only the user.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub session_id: String,
    pub user: SessionUserResponse,
}
