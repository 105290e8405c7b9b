//! Session lifecycle: restore, login, registration, logout.
//!
//! The session manager owns the bearer token and user identity. It is the
//! only component that touches the persisted credential: the token is
//! written on successful login/register and removed on logout or a failed
//! restore. Login/register failures are converted into a `Failed` status
//! with a displayable reason rather than propagated raw.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::api::{ApiError, NotesApi};
use crate::models::User;
use crate::token_store::TokenStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Unauthenticated,
    Authenticating,
    Authenticated,
    Failed,
}

#[derive(Debug, Clone)]
struct SessionState {
    status: SessionStatus,
    token: Option<String>,
    user: Option<User>,
    error: Option<String>,
}

impl SessionState {
    fn unauthenticated() -> Self {
        Self {
            status: SessionStatus::Unauthenticated,
            token: None,
            user: None,
            error: None,
        }
    }
}

/// Read-only view of the current session, cloned out for consumers.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub token: Option<String>,
    pub user: Option<User>,
    pub error: Option<String>,
}

pub struct SessionManager {
    api: Arc<dyn NotesApi>,
    tokens: Arc<dyn TokenStore>,
    state: RwLock<SessionState>,
}

impl SessionManager {
    pub fn new(api: Arc<dyn NotesApi>, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            api,
            tokens,
            state: RwLock::new(SessionState::unauthenticated()),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.read();
        SessionSnapshot {
            status: state.status,
            token: state.token.clone(),
            user: state.user.clone(),
            error: state.error.clone(),
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.state.read().status
    }

    /// Bearer token for authenticated calls, present only while the session
    /// is being established or is established.
    pub fn token(&self) -> Option<String> {
        self.state.read().token.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state.read().user.clone()
    }

    /// Attempt to restore a session from the persisted credential.
    ///
    /// Runs once at startup. A missing token goes straight to
    /// `Unauthenticated` without any network call; a token the server
    /// rejects (including 401) is discarded from durable storage.
    pub async fn restore(&self) {
        let Some(token) = self.tokens.load() else {
            *self.state.write() = SessionState::unauthenticated();
            return;
        };

        {
            let mut state = self.state.write();
            state.status = SessionStatus::Authenticating;
            state.token = Some(token.clone());
        }

        match self.api.me(&token).await {
            Ok(user) => {
                log::info!("[Session] Restored session for {}", user.email);
                *self.state.write() = SessionState {
                    status: SessionStatus::Authenticated,
                    token: Some(token),
                    user: Some(user),
                    error: None,
                };
            }
            Err(e) => {
                log::warn!("[Session] Restore failed, discarding token: {}", e);
                if let Err(e) = self.tokens.clear() {
                    log::warn!("[Session] Failed to remove persisted token: {}", e);
                }
                *self.state.write() = SessionState::unauthenticated();
            }
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<(), ApiError> {
        self.authenticate(email, password, false).await
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<(), ApiError> {
        self.authenticate(email, password, true).await
    }

    async fn authenticate(
        &self,
        email: &str,
        password: &str,
        register: bool,
    ) -> Result<(), ApiError> {
        {
            let mut state = self.state.write();
            state.status = SessionStatus::Authenticating;
            state.user = None;
            state.error = None;
        }

        let result = if register {
            self.api.register(email, password).await
        } else {
            self.api.login(email, password).await
        };

        match result {
            Ok(auth) => {
                if let Err(e) = self.tokens.save(&auth.token) {
                    log::warn!("[Session] Failed to persist token: {}", e);
                }
                log::info!("[Session] Authenticated as {}", auth.user.email);
                *self.state.write() = SessionState {
                    status: SessionStatus::Authenticated,
                    token: Some(auth.token),
                    user: Some(auth.user),
                    error: None,
                };
                Ok(())
            }
            Err(e) => {
                log::warn!("[Session] Authentication failed: {}", e);
                *self.state.write() = SessionState {
                    status: SessionStatus::Failed,
                    token: None,
                    user: None,
                    error: Some(e.to_string()),
                };
                Err(e)
            }
        }
    }

    /// End the session. The remote invalidation is best effort; local state
    /// and the persisted credential are always cleared, so logout never
    /// fails from the caller's perspective.
    pub async fn logout(&self) {
        let token = {
            let mut state = self.state.write();
            state.status = SessionStatus::Authenticating;
            state.token.take()
        };

        if let Some(token) = token {
            if let Err(e) = self.api.logout(&token).await {
                log::warn!("[Session] Remote logout failed: {}", e);
            }
        }

        if let Err(e) = self.tokens.clear() {
            log::warn!("[Session] Failed to remove persisted token: {}", e);
        }

        *self.state.write() = SessionState::unauthenticated();
        log::info!("[Session] Logged out");
    }
}
