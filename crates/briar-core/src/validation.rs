//! Validation utilities.

use crate::{BriarError, FieldError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `BriarError` on failure.
    fn validate_request(&self) -> Result<(), BriarError> {
        self.validate().map_err(validation_errors_to_briar_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Converts `validator::ValidationErrors` to `BriarError`.
#[must_use]
pub fn validation_errors_to_briar_error(errors: ValidationErrors) -> BriarError {
    let field_errors: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: (*field).to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), |m| m.to_string()),
                code: error.code.to_string(),
            })
        })
        .collect();

    let message = field_errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");

    BriarError::Validation(message)
}

/// Common validation functions.
pub mod rules {
    use validator::ValidationError;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank"));
        }
        Ok(())
    }

    /// Validates that a review rating is within the 1..=5 range.
    pub fn valid_rating(rating: i16) -> Result<(), ValidationError> {
        if !(1..=5).contains(&rating) {
            return Err(ValidationError::new("rating_out_of_range"));
        }
        Ok(())
    }

    /// Validates that a username meets requirements.
    pub fn valid_username(username: &str) -> Result<(), ValidationError> {
        if username.len() < 3 {
            return Err(ValidationError::new("username_too_short"));
        }
        if username.len() > 32 {
            return Err(ValidationError::new("username_too_long"));
        }
        if !username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            return Err(ValidationError::new("username_invalid_characters"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::rules::*;

    #[test]
    fn test_not_blank() {
        assert!(not_blank("Dunhill").is_ok());
        assert!(not_blank("   ").is_err());
        assert!(not_blank("").is_err());
    }

    #[test]
    fn test_valid_rating() {
        assert!(valid_rating(1).is_ok());
        assert!(valid_rating(5).is_ok());
        assert!(valid_rating(0).is_err());
        assert!(valid_rating(6).is_err());
    }

    #[test]
    fn test_valid_username() {
        assert!(valid_username("shop_admin").is_ok());
        assert!(valid_username("ab").is_err());
        assert!(valid_username("bad@name").is_err());
    }
}
