//! Authorization gate: the single path every token-requiring request takes.
//!
//! The token is read from the [`SessionStore`] at call time. Without one the
//! request is never dispatched; the gate redirects to `Login` and reports
//! [`AppError::AuthenticationMissing`]. When the server rejects the token the
//! configured [`UnauthorizedPolicy`] decides whether the session is dropped.

use std::sync::Arc;

use reqwest::RequestBuilder;

use crate::error::AppError;
use crate::navigation::{Navigator, Route};
use crate::session::lifecycle::sign_out;
use crate::session::{CredentialStore, SessionStore};

/// What to do when the server answers 401/403 to an authenticated request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnauthorizedPolicy {
    /// Surface the error and leave the session in place.
    #[default]
    Report,
    /// Clear the session and redirect to `Login`, then surface the error.
    SignOut,
}

impl UnauthorizedPolicy {
    pub fn from_flag(logout_on_unauthorized: bool) -> Self {
        if logout_on_unauthorized {
            Self::SignOut
        } else {
            Self::Report
        }
    }
}

#[derive(Clone)]
pub struct AuthorizationGate {
    store: SessionStore,
    credentials: CredentialStore,
    navigator: Arc<dyn Navigator>,
    policy: UnauthorizedPolicy,
}

impl std::fmt::Debug for AuthorizationGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizationGate")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl AuthorizationGate {
    pub fn new(
        store: SessionStore,
        credentials: CredentialStore,
        navigator: Arc<dyn Navigator>,
        policy: UnauthorizedPolicy,
    ) -> Self {
        Self {
            store,
            credentials,
            navigator,
            policy,
        }
    }

    /// Attaches `Authorization: Bearer <token>`.
    ///
    /// # Errors
    /// [`AppError::AuthenticationMissing`] when no session exists; the
    /// navigator has already been sent to `Login` in that case.
    pub fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder, AppError> {
        let Some(token) = self.store.token() else {
            tracing::warn!("authenticated request attempted without a session");
            self.navigator.navigate(Route::Login);
            return Err(AppError::AuthenticationMissing);
        };
        Ok(request.bearer_auth(token))
    }

    /// Applies the rejection policy to the outcome of an authenticated call.
    ///
    /// # Errors
    /// Passes `result`'s error through unchanged.
    pub fn observe<T>(&self, result: Result<T, AppError>) -> Result<T, AppError> {
        if let Err(err) = &result
            && err.is_unauthorized()
        {
            match self.policy {
                UnauthorizedPolicy::Report => {
                    tracing::warn!("server rejected the session token; keeping session");
                }
                UnauthorizedPolicy::SignOut => {
                    tracing::warn!("server rejected the session token; signing out");
                    sign_out(&self.store, &self.credentials, self.navigator.as_ref());
                }
            }
        }
        result
    }
}
