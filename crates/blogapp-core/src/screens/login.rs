//! Login view.

use super::require_filled;
use crate::context::AppContext;
use crate::error::ScreenError;
use crate::session::UserProfile;
use crate::session::lifecycle::sign_in;

const LOGIN_FAILED_TITLE: &str = "Login failed";
const LOGIN_FAILED: &str = "Invalid email or password. Try again.";

/// Authenticates and starts a session.
///
/// Both fields must be non-blank; otherwise nothing is sent. On success the
/// session store and durable storage hold the new credentials and the
/// navigator is on `Main`.
///
/// # Errors
/// Validation failure, or any failure of the login request.
pub async fn login(
    ctx: &AppContext,
    email: &str,
    password: &str,
) -> Result<UserProfile, ScreenError> {
    require_filled(&[email, password], "Please fill in email and password.")
        .map_err(|e| e.into_screen(LOGIN_FAILED))?;

    let response = ctx
        .api()
        .login(email.trim(), password)
        .await
        .map_err(|err| {
            tracing::warn!(error = %err, server_message = ?err.server_message(), "login failed");
            err.into_screen(LOGIN_FAILED).titled(LOGIN_FAILED_TITLE)
        })?;

    let user = response.user.clone();
    sign_in(
        ctx.store(),
        ctx.credentials(),
        ctx.navigator(),
        response.token,
        response.user,
    );
    Ok(user)
}
