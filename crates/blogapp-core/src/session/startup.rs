//! Cold-start rehydration.

use super::{CredentialStore, SessionStore};
use crate::navigation::Route;

/// Where the app stands after looking for a stored session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupState {
    Loading,
    Authenticated,
    Unauthenticated,
}

impl StartupState {
    /// View mounted first for this state. `None` while still loading.
    pub fn initial_route(self) -> Option<Route> {
        match self {
            StartupState::Loading => None,
            StartupState::Authenticated => Some(Route::Main),
            StartupState::Unauthenticated => Some(Route::Login),
        }
    }
}

/// One-shot `Loading -> {Authenticated, Unauthenticated}` transition.
///
/// The first call to [`rehydrate`](Self::rehydrate) reads persisted
/// credentials and, if they are complete, populates the session store before
/// reporting `Authenticated`. Later calls return the settled state without
/// touching storage again.
#[derive(Debug)]
pub struct Bootstrap {
    state: StartupState,
}

impl Default for Bootstrap {
    fn default() -> Self {
        Self::new()
    }
}

impl Bootstrap {
    pub fn new() -> Self {
        Self {
            state: StartupState::Loading,
        }
    }

    pub fn state(&self) -> StartupState {
        self.state
    }

    pub fn rehydrate(&mut self, credentials: &CredentialStore, store: &SessionStore) -> StartupState {
        if self.state != StartupState::Loading {
            return self.state;
        }

        self.state = match credentials.load() {
            Some(session) => {
                tracing::info!(user_id = %session.user.id, "restored stored session");
                store.set_credentials(session.token, session.user);
                StartupState::Authenticated
            }
            None => StartupState::Unauthenticated,
        };
        self.state
    }
}
