//! Session/token storage.
//!
//! The dashboard keeps one logged-in user at a time, stored under the keys
//! `token`, `username` and `isLoggedIn`.

use crate::errors::AppError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub username: String,
    #[serde(rename = "isLoggedIn")]
    pub is_logged_in: bool,
}

impl Session {
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            username: username.into(),
            is_logged_in: true,
        }
    }

    pub fn is_active(&self) -> bool {
        self.is_logged_in && !self.token.is_empty() && !self.username.is_empty()
    }
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self) -> Option<Session>;

    async fn save(&self, session: Session) -> Result<(), AppError>;

    async fn clear(&self) -> Result<(), AppError>;

    /// Bearer token of the active session, if any.
    async fn token(&self) -> Option<String> {
        self.load()
            .await
            .filter(Session::is_active)
            .map(|session| session.token)
    }
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Option<Session> {
        self.session.lock().await.clone()
    }

    async fn save(&self, session: Session) -> Result<(), AppError> {
        *self.session.lock().await = Some(session);
        Ok(())
    }

    async fn clear(&self) -> Result<(), AppError> {
        self.session.lock().await.take();
        Ok(())
    }
}
