//! In-memory session state.

use std::sync::{Arc, PoisonError, RwLock};

use super::{Session, UserProfile};

/// Process-wide record of the current session.
///
/// Cloning the store is cheap and every clone observes the same state. The
/// session is held as an immutable snapshot that is swapped as a whole, so a
/// reader sees either the previous session or the new one, never a mix.
/// Mutation goes through [`set_credentials`](Self::set_credentials) and
/// [`clear_credentials`](Self::clear_credentials) only.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    current: Arc<RwLock<Option<Arc<Session>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces token and user in one step. Last write wins.
    pub fn set_credentials(&self, token: impl Into<String>, user: UserProfile) {
        let session = Arc::new(Session {
            token: token.into(),
            user,
        });
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
    }

    /// Drops the session. Calling it on an empty store is a no-op.
    pub fn clear_credentials(&self) {
        self.current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    /// Current session, if any.
    pub fn snapshot(&self) -> Option<Arc<Session>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn token(&self) -> Option<String> {
        self.snapshot().map(|s| s.token.clone())
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.snapshot().map(|s| s.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.snapshot().is_some()
    }

    pub fn is_teacher(&self) -> bool {
        self.snapshot().is_some_and(|s| s.user.is_teacher())
    }
}
