use reqwest::Method;
use serde::Serialize;

use super::types::LoginRequest;
use super::{BlogApi, LoginResponse, Registered, UserRecord};
use crate::error::AppError;

impl BlogApi {
    /// `POST /api/users/login`
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AppError> {
        let request = self
            .client
            .request(Method::POST, &["api", "users", "login"])?
            .json(&LoginRequest { email, password });
        self.client.send(request).await
    }

    /// `POST /api/users/register`
    ///
    /// Registration is public; `body` carries the `userType` discriminator.
    pub async fn register<B: Serialize + ?Sized>(&self, body: &B) -> Result<Registered, AppError> {
        let request = self
            .client
            .request(Method::POST, &["api", "users", "register"])?
            .json(body);
        self.client.send(request).await
    }

    /// `GET /api/users` (authenticated)
    pub async fn list_users(&self) -> Result<Vec<UserRecord>, AppError> {
        let request = self.client.request(Method::GET, &["api", "users"])?;
        self.send_authorized(request).await
    }

    /// `GET /api/users/:id` (authenticated)
    pub async fn get_user(&self, user_id: &str) -> Result<UserRecord, AppError> {
        let request = self
            .client
            .request(Method::GET, &["api", "users", user_id])?;
        self.send_authorized(request).await
    }

    /// `PUT /api/users/:id` (authenticated)
    pub async fn update_user<B: Serialize + ?Sized>(
        &self,
        user_id: &str,
        body: &B,
    ) -> Result<UserRecord, AppError> {
        let request = self
            .client
            .request(Method::PUT, &["api", "users", user_id])?
            .json(body);
        self.send_authorized(request).await
    }

    /// `DELETE /api/users/:id` (authenticated)
    pub async fn delete_user(&self, user_id: &str) -> Result<(), AppError> {
        let request = self
            .client
            .request(Method::DELETE, &["api", "users", user_id])?;
        self.send_authorized_unit(request).await
    }
}
