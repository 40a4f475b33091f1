//! Typed bindings for the blog REST API.
//!
//! [`BlogApi`] pairs the plain [`ApiClient`] with the
//! [`AuthorizationGate`]: public endpoints go straight to the client,
//! token-requiring ones go through the gate first.

mod client;
mod posts;
pub mod types;
mod users;

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

pub use client::{ApiClient, USER_AGENT};
pub use types::{
    Author, LoginResponse, NewStudent, NewTeacher, PLACEHOLDER_IMAGE, Post, PostDraft, Registered,
    Registration, StudentUpdate, TeacherUpdate, UserRecord, UserUpdate,
};

use crate::error::AppError;
use crate::gate::AuthorizationGate;

#[derive(Debug, Clone)]
pub struct BlogApi {
    client: ApiClient,
    gate: AuthorizationGate,
}

impl BlogApi {
    pub fn new(client: ApiClient, gate: AuthorizationGate) -> Self {
        Self { client, gate }
    }

    /// Sends a token-requiring request and decodes its payload.
    async fn send_authorized<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, AppError> {
        let request = self.gate.authorize(request)?;
        self.gate.observe(self.client.send(request).await)
    }

    /// Sends a token-requiring request, discarding the response body.
    async fn send_authorized_unit(&self, request: RequestBuilder) -> Result<(), AppError> {
        let request = self.gate.authorize(request)?;
        self.gate.observe(self.client.send_unit(request).await)
    }
}
