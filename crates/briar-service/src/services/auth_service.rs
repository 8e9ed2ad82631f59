//! Session-based authentication.

use crate::dto::{LoginOutcome, LoginRequest, SessionUserResponse};
use briar_core::{BriarError, BriarResult, ValidateExt};
use briar_repository::UserRepository;
use briar_security::{PasswordHasher, Session, SessionStore};
use std::sync::Arc;
use tracing::{info, warn};

/// Login, logout, and session resolution for the admin backend.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    hasher: PasswordHasher,
    sessions: SessionStore,
}

impl AuthService {
    #[must_use]
    pub fn new(users: Arc<dyn UserRepository>, hasher: PasswordHasher, sessions: SessionStore) -> Self {
        Self {
            users,
            hasher,
            sessions,
        }
    }

    /// Verifies credentials and opens a session.
    ///
    /// Unknown usernames and wrong passwords produce the same error, so
    /// login failures do not leak which accounts exist.
    pub async fn login(&self, request: LoginRequest) -> BriarResult<LoginOutcome> {
        request.validate_request()?;

        let user = self
            .users
            .find_by_username(&request.username)
            .await?
            .ok_or(BriarError::InvalidCredentials)?;

        if !self.hasher.verify(&request.password, &user.password_hash)? {
            warn!("Failed login attempt for '{}'", request.username);
            return Err(BriarError::InvalidCredentials);
        }
        if !user.can_login() {
            return Err(BriarError::forbidden("Account is suspended"));
        }

        self.users.touch_last_login(user.id).await?;
        let session_id = self
            .sessions
            .create(user.id, user.username.clone(), user.role);

        info!("User '{}' logged in", user.username);
        Ok(LoginOutcome {
            session_id,
            user: SessionUserResponse::from(&user),
        })
    }

    /// Drops the session. Unknown IDs are a no-op.
    pub fn logout(&self, session_id: &str) {
        self.sessions.remove(session_id);
    }

    /// Resolves a session ID to its live session, refreshing its expiry.
    pub fn current(&self, session_id: &str) -> BriarResult<Session> {
        self.sessions
            .get(session_id)
            .ok_or(BriarError::SessionExpired)
    }
}
