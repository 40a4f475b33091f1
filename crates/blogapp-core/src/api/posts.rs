use reqwest::Method;

use super::{BlogApi, Post, PostDraft};
use crate::error::AppError;

impl BlogApi {
    /// `GET /api/posts`
    pub async fn list_posts(&self) -> Result<Vec<Post>, AppError> {
        let request = self.client.request(Method::GET, &["api", "posts"])?;
        self.client.send(request).await
    }

    /// `GET /api/posts/:id`
    pub async fn get_post(&self, post_id: &str) -> Result<Post, AppError> {
        let request = self
            .client
            .request(Method::GET, &["api", "posts", post_id])?;
        self.client.send(request).await
    }

    /// `POST /api/posts` (authenticated)
    pub async fn create_post(&self, draft: &PostDraft) -> Result<Post, AppError> {
        let request = self
            .client
            .request(Method::POST, &["api", "posts"])?
            .json(draft);
        self.send_authorized(request).await
    }

    /// `PUT /api/posts/:id` (authenticated)
    pub async fn update_post(&self, post_id: &str, draft: &PostDraft) -> Result<Post, AppError> {
        let request = self
            .client
            .request(Method::PUT, &["api", "posts", post_id])?
            .json(draft);
        self.send_authorized(request).await
    }

    /// `DELETE /api/posts/:id` (authenticated)
    pub async fn delete_post(&self, post_id: &str) -> Result<(), AppError> {
        let request = self
            .client
            .request(Method::DELETE, &["api", "posts", post_id])?;
        self.send_authorized_unit(request).await
    }
}
