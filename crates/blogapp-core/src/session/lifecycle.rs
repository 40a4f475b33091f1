//! Session transitions shared by the login screen, the logout action and the
//! authorization gate.

use super::{CredentialStore, SessionStore, UserProfile, mask_token};
use crate::navigation::{Navigator, Route};

/// Starts a session from a successful authentication response.
///
/// Order: memory store, durable store, then navigation to `Main`. The durable
/// write completes before navigating; if it fails, navigation still happens.
pub fn sign_in(
    store: &SessionStore,
    credentials: &CredentialStore,
    navigator: &dyn Navigator,
    token: String,
    user: UserProfile,
) {
    tracing::info!(user_id = %user.id, token = %mask_token(&token), "session started");
    store.set_credentials(token.clone(), user.clone());
    if !credentials.save(&token, &user) {
        tracing::warn!("session will not survive a restart");
    }
    navigator.navigate(Route::Main);
}

/// Ends the session: memory store, durable store, then navigation to `Login`.
pub fn sign_out(store: &SessionStore, credentials: &CredentialStore, navigator: &dyn Navigator) {
    if let Some(user) = store.user() {
        tracing::info!(user_id = %user.id, "session ended");
    }
    store.clear_credentials();
    credentials.clear();
    navigator.navigate(Route::Login);
}
