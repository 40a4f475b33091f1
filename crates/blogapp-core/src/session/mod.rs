//! Session lifecycle: who is logged in, how it survives restarts, and how the
//! app decides its first view.
//!
//! - [`store`]: in-memory [`SessionStore`], the single source of truth.
//! - [`persistence`]: durable mirror of the store ([`CredentialStore`]) on top
//!   of a string-only [`KeyValueStore`].
//! - [`lifecycle`]: sign-in and sign-out transitions.
//! - [`startup`]: one-shot rehydration state machine run at process start.

pub mod lifecycle;
pub mod persistence;
pub mod startup;
pub mod store;

use serde::{Deserialize, Serialize};

pub use persistence::{CredentialStore, FileStore, KeyValueStore, MemoryStore};
pub use startup::{Bootstrap, StartupState};
pub use store::SessionStore;

/// Role discriminator carried by every user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserType {
    #[serde(rename = "professor")]
    Teacher,
    #[serde(rename = "aluno")]
    Student,
}

impl UserType {
    /// Value used on the wire and in persisted profiles.
    pub fn as_str(self) -> &'static str {
        match self {
            UserType::Teacher => "professor",
            UserType::Student => "aluno",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            UserType::Teacher => "teacher",
            UserType::Student => "student",
        }
    }
}

/// Profile of the logged-in user.
///
/// Only `user_type` is inspected client-side, and only to decide which
/// actions to offer. The server enforces the real permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub user_type: UserType,
    #[serde(default)]
    pub is_active: bool,
}

impl UserProfile {
    pub fn is_teacher(&self) -> bool {
        self.user_type == UserType::Teacher
    }
}

/// An authenticated identity: bearer token plus the profile it was issued for.
///
/// Both halves always travel together, so a `Session` value can never be
/// half-populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
}

/// Returns a masked version of a token for display and logs.
pub fn mask_token(token: &str) -> String {
    if token.len() <= 16 || !token.is_char_boundary(8) {
        return "***".to_string();
    }
    format!("{}...", &token[..8])
}
