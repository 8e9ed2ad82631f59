//! Typed ID wrappers for domain entities.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from a UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Parses an ID from a string.
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                Ok(Self(Uuid::parse_str(s)?))
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

uuid_id! {
    /// A strongly-typed wrapper for pipe IDs.
    PipeId
}

uuid_id! {
    /// A strongly-typed wrapper for tobacco IDs.
    TobaccoId
}

uuid_id! {
    /// A strongly-typed wrapper for accessory IDs.
    AccessoryId
}

uuid_id! {
    /// A strongly-typed wrapper for review IDs.
    ReviewId
}

uuid_id! {
    /// A strongly-typed wrapper for user IDs.
    UserId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id1 = PipeId::new();
        let id2 = PipeId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_id_parsing() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id = TobaccoId::parse(uuid_str).unwrap();
        assert_eq!(id.to_string(), uuid_str);
    }

    #[test]
    fn test_id_uuid_round_trip() {
        let id = AccessoryId::new();
        let uuid: Uuid = id.into();
        assert_eq!(AccessoryId::from(uuid), id);
    }
}
