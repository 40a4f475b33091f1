//! HTTP transport for the blog API.

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::error::AppError;

/// Standard User-Agent header for BlogApp API requests.
pub const USER_AGENT: &str = concat!("blogapp/", env!("CARGO_PKG_VERSION"));

/// Unauthenticated client bound to one API origin.
///
/// Builds requests against relative paths and decodes the `{ "data": ... }`
/// envelope. Token handling lives in
/// [`AuthorizationGate`](crate::gate::AuthorizationGate).
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// # Errors
    /// Returns an error if `base_url` is not a hierarchical URL or the HTTP
    /// client cannot be constructed.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, AppError> {
        let base_url = Url::parse(base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| AppError::InvalidOrigin(base_url.to_string()))?;

        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_url,
        })
    }

    /// Starts a request to the path made of `segments`, under the origin.
    ///
    /// Each segment is percent-encoded, so an id can never reach another
    /// route.
    ///
    /// # Errors
    /// [`AppError::Validation`] for an empty, `.` or `..` segment.
    pub fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, AppError> {
        Ok(self.http.request(method, self.url(segments)?))
    }

    fn url(&self, segments: &[&str]) -> Result<Url, AppError> {
        if let Some(bad) = segments
            .iter()
            .find(|s| s.is_empty() || **s == "." || **s == "..")
        {
            return Err(AppError::validation(format!("Invalid identifier: {bad:?}")));
        }

        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    /// Sends a request and decodes the enveloped payload as `T`.
    ///
    /// # Errors
    /// Transport failures, non-success statuses and undecodable bodies.
    pub async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, AppError> {
        let response = dispatch(request).await?;
        let text = response.text().await?;
        let body: Value = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text)?
        };
        Ok(serde_json::from_value(unwrap_envelope(body))?)
    }

    /// Sends a request whose response body is not needed.
    ///
    /// # Errors
    /// Transport failures and non-success statuses.
    pub async fn send_unit(&self, request: RequestBuilder) -> Result<(), AppError> {
        dispatch(request).await.map(drop)
    }
}

async fn dispatch(request: RequestBuilder) -> Result<Response, AppError> {
    let response = request.send().await.map_err(|err| {
        tracing::warn!(error = %err, "request failed before a response arrived");
        AppError::Transport(err)
    })?;

    let status = response.status();
    tracing::debug!(url = %response.url().path(), %status, "api response");
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body);
    tracing::warn!(%status, body = %body, "api request rejected");

    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AppError::Unauthorized { status, message },
        _ => AppError::Remote { status, message },
    })
}

/// Payload nested under `data`, or the body itself when there is none.
fn unwrap_envelope(body: Value) -> Value {
    match body {
        Value::Object(mut map) => match map.remove("data") {
            Some(data) if !data.is_null() => data,
            Some(data) => {
                map.insert("data".to_string(), data);
                Value::Object(map)
            }
            None => Value::Object(map),
        },
        other => other,
    }
}

/// Extracts `message` (or `error`) from an error body.
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .map(str::to_string)
}
