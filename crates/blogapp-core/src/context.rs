//! Application context: the explicit dependency every screen receives.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::api::{ApiClient, BlogApi};
use crate::config::Config;
use crate::gate::{AuthorizationGate, UnauthorizedPolicy};
use crate::navigation::Navigator;
use crate::session::{Bootstrap, CredentialStore, KeyValueStore, SessionStore, StartupState};

/// Owns the session store, its durable mirror, the API bindings and the
/// navigator. Screens borrow it; none of them hold session state of their own.
pub struct AppContext {
    store: SessionStore,
    credentials: CredentialStore,
    navigator: Arc<dyn Navigator>,
    api: BlogApi,
    bootstrap: Bootstrap,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("startup", &self.bootstrap.state())
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Wires the context. The session is empty until [`start`](Self::start).
    ///
    /// # Errors
    /// Returns an error if the API origin is invalid or the HTTP client
    /// cannot be built.
    pub fn new(
        config: &Config,
        storage: Arc<dyn KeyValueStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let base_url = config.resolve_base_url()?;
        let client = ApiClient::new(&base_url, config.request_timeout())
            .context("Failed to build HTTP client")?;

        let store = SessionStore::new();
        let credentials = CredentialStore::new(storage);
        let gate = AuthorizationGate::new(
            store.clone(),
            credentials.clone(),
            Arc::clone(&navigator),
            UnauthorizedPolicy::from_flag(config.session.logout_on_unauthorized),
        );

        Ok(Self {
            store,
            credentials,
            navigator,
            api: BlogApi::new(client, gate),
            bootstrap: Bootstrap::new(),
        })
    }

    /// Rehydrates the session and mounts the initial view.
    ///
    /// Only the first call reads storage; later calls return the settled state.
    pub fn start(&mut self) -> StartupState {
        if self.bootstrap.state() != StartupState::Loading {
            return self.bootstrap.state();
        }
        let state = self.bootstrap.rehydrate(&self.credentials, &self.store);
        if let Some(route) = state.initial_route() {
            self.navigator.reset(route);
        }
        state
    }

    pub fn startup_state(&self) -> StartupState {
        self.bootstrap.state()
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    pub fn navigator(&self) -> &dyn Navigator {
        self.navigator.as_ref()
    }

    pub fn api(&self) -> &BlogApi {
        &self.api
    }
}
