//! Error taxonomy shared by the API layer and the screen controllers.
//!
//! Errors are handled where they occur: a screen turns an [`AppError`] into an
//! [`Alert`] (title + message) and shows it. Nothing is retried.

use std::fmt;

use reqwest::StatusCode;

/// Failures a user action can end with.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A required form field was empty or malformed. No request was sent.
    #[error("{0}")]
    Validation(String),

    /// A token-requiring action was attempted without a session.
    #[error("not authenticated")]
    AuthenticationMissing,

    /// The server rejected the bearer token (401/403).
    #[error("request rejected by server (HTTP {status})")]
    Unauthorized {
        status: StatusCode,
        message: Option<String>,
    },

    /// Any other non-success response.
    #[error("request failed (HTTP {status})")]
    Remote {
        status: StatusCode,
        message: Option<String>,
    },

    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The configured API origin cannot have paths appended to it.
    #[error("invalid API origin: {0}")]
    InvalidOrigin(String),

    /// The response arrived but did not have the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// The `message` field of the server's error body, when it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { message, .. } | Self::Remote { message, .. } => {
                message.as_deref()
            }
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Builds the alert a screen shows for this error.
    ///
    /// `failure` is the screen's generic message for network and remote
    /// failures; validation and missing-session errors carry their own text.
    pub fn alert(&self, failure: &str) -> Alert {
        match self {
            Self::Validation(message) => Alert::error(message.clone()),
            Self::AuthenticationMissing => {
                Alert::error("You are not authenticated. Log in again.")
            }
            _ => Alert::error(failure),
        }
    }

    /// Wraps this error with the alert a screen shows for it.
    pub fn into_screen(self, failure: &str) -> ScreenError {
        ScreenError {
            alert: self.alert(failure),
            source: self,
        }
    }
}

/// A modal acknowledgement: title and message, dismiss only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new("Error", message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new("Success!", message)
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

/// A failed screen action: the alert to show plus the underlying cause.
#[derive(Debug, thiserror::Error)]
#[error("{alert}")]
pub struct ScreenError {
    pub alert: Alert,
    #[source]
    pub source: AppError,
}

impl ScreenError {
    /// Replaces the alert title, keeping the message.
    #[must_use]
    pub fn titled(mut self, title: &str) -> Self {
        self.alert.title = title.to_string();
        self
    }
}

impl From<AppError> for ScreenError {
    fn from(err: AppError) -> Self {
        err.into_screen("Something went wrong. Try again.")
    }
}
