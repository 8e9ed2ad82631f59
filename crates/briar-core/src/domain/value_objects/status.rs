//! Status enums for catalog items, reviews, and users.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Visibility status of a catalog item.
///
/// Public read paths only ever see `Active` items; admin paths see all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Active,
    Hidden,
    Discontinued,
}

impl ItemStatus {
    /// Parses a status from its database representation.
    #[must_use]
    pub fn from_db(s: &str) -> Self {
        match s {
            "active" => Self::Active,
            "discontinued" => Self::Discontinued,
            _ => Self::Hidden,
        }
    }

    /// Returns the database representation.
    #[must_use]
    pub const fn as_db(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Hidden => "hidden",
            Self::Discontinued => "discontinued",
        }
    }
}

impl Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_db())
    }
}

/// Moderation status of a review. Transitions are one-way:
/// pending -> approved | rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Pending,
    Approved,
    Rejected,
}

impl ReviewStatus {
    #[must_use]
    pub fn from_db(s: &str) -> Self {
        match s {
            "approved" => Self::Approved,
            "rejected" => Self::Rejected,
            _ => Self::Pending,
        }
    }

    #[must_use]
    pub const fn as_db(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_db())
    }
}

/// Status of an admin account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Suspended,
}

impl UserStatus {
    #[must_use]
    pub fn from_db(s: &str) -> Self {
        match s {
            "active" => Self::Active,
            _ => Self::Suspended,
        }
    }

    #[must_use]
    pub const fn as_db(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Suspended => "suspended",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_status_db_round_trip() {
        for status in [ItemStatus::Active, ItemStatus::Hidden, ItemStatus::Discontinued] {
            assert_eq!(ItemStatus::from_db(status.as_db()), status);
        }
    }

    #[test]
    fn test_unknown_item_status_defaults_to_hidden() {
        assert_eq!(ItemStatus::from_db("garbage"), ItemStatus::Hidden);
    }

    #[test]
    fn test_review_status_db_round_trip() {
        for status in [ReviewStatus::Pending, ReviewStatus::Approved, ReviewStatus::Rejected] {
            assert_eq!(ReviewStatus::from_db(status.as_db()), status);
        }
    }
}
