//! Result type aliases.

use crate::BriarError;

/// A specialized `Result` type for Briar operations.
pub type BriarResult<T> = Result<T, BriarError>;
