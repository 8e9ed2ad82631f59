//! Admin roles.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Role of an authenticated backend user.
///
/// Editors can manage catalog content; admins can additionally manage
/// accounts and moderate reviews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Editor,
    Admin,
}

impl UserRole {
    /// Checks if this role grants at least the permissions of `required`.
    #[must_use]
    pub fn has_permission(self, required: Self) -> bool {
        self >= required
    }

    #[must_use]
    pub fn from_db(s: &str) -> Self {
        match s {
            "admin" => Self::Admin,
            _ => Self::Editor,
        }
    }

    #[must_use]
    pub const fn as_db(self) -> &'static str {
        match self {
            Self::Editor => "editor",
            Self::Admin => "admin",
        }
    }
}

impl Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_db())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_hierarchy() {
        assert!(UserRole::Admin.has_permission(UserRole::Editor));
        assert!(UserRole::Admin.has_permission(UserRole::Admin));
        assert!(!UserRole::Editor.has_permission(UserRole::Admin));
    }
}
