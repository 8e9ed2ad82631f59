//! Backend user entity.

use crate::{UserId, UserRole, UserStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An admin-backend account. There is no public registration; accounts are
/// provisioned out of band.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier.
    pub id: UserId,

    /// Unique login name.
    pub username: String,

    /// Argon2 password hash (never exposed via API).
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Role.
    pub role: UserRole,

    /// Account status.
    pub status: UserStatus,

    /// Last successful login.
    pub last_login_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new active editor account.
    #[must_use]
    pub fn new(username: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            username,
            password_hash,
            role: UserRole::Editor,
            status: UserStatus::Active,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Checks if the account may log in.
    #[must_use]
    pub const fn can_login(&self) -> bool {
        matches!(self.status, UserStatus::Active)
    }

    /// Checks if the user has the specified role or higher.
    #[must_use]
    pub fn has_role(&self, required: UserRole) -> bool {
        self.role.has_permission(required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_is_active_editor() {
        let user = User::new("clerk".into(), "hash".into());
        assert!(user.can_login());
        assert_eq!(user.role, UserRole::Editor);
        assert!(!user.has_role(UserRole::Admin));
    }
}
