//! Session-based auth extractors.

use crate::responses::AppError;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use briar_core::{BriarError, UserRole};
use briar_security::Session;

/// The authenticated session, required. Rejects with 401 when the request
/// carries no valid `sid` cookie.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Session);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| AppError(BriarError::unauthorized("Authentication required")))
    }
}

/// An authenticated admin session. Rejects with 401 without a session and
/// 403 for non-admin roles.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub Session);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentUser(session) = CurrentUser::from_request_parts(parts, state).await?;
        if !session.role.has_permission(UserRole::Admin) {
            return Err(AppError(BriarError::forbidden("Admin role required")));
        }
        Ok(Self(session))
    }
}

/// An authenticated editor-or-above session for catalog management.
#[derive(Debug, Clone)]
pub struct RequireEditor(pub Session);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for RequireEditor {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentUser(session) = CurrentUser::from_request_parts(parts, state).await?;
        if !session.role.has_permission(UserRole::Editor) {
            return Err(AppError(BriarError::forbidden("Editor role required")));
        }
        Ok(Self(session))
    }
}
