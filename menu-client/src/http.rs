//! HTTP transport for the menu backend
//!
//! [`HttpClient`] is the seam the typed API sits on; [`NetworkHttpClient`]
//! is the reqwest implementation used in production.

use crate::{ClientConfig, ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::multipart::Form;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use shared::error::{ErrorBody, ErrorCode};
use std::time::Duration;

/// HTTP client trait
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn post<T: DeserializeOwned, B: serde::Serialize + std::marker::Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn put<T: DeserializeOwned, B: serde::Serialize + std::marker::Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn post_multipart<T: DeserializeOwned>(&self, path: &str, form: Form)
    -> ClientResult<T>;
    fn token(&self) -> Option<&str>;
    fn set_token(&mut self, token: Option<String>);
}

/// Network HTTP client
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        if config.base_url.trim().is_empty() {
            return Err(ClientError::Config("base_url is empty".into()));
        }
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    fn authorized(&self, mut req: RequestBuilder) -> RequestBuilder {
        if let Some(auth) = self.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }
        req
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> ClientResult<T> {
        let response = self.authorized(req).send().await?;
        handle_response(response).await
    }
}

/// Turn a response into `T`, mapping non-success statuses onto [`ClientError`]
async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
    let status = response.status();
    let text = response.text().await?;
    if !status.is_success() {
        return Err(error_from_status(status, text));
    }
    decode_body(status, &text)
}

/// Decode a success body; 204 / empty bodies decode as JSON `null` so `()`
/// and `Option<_>` targets work.
pub(crate) fn decode_body<T: DeserializeOwned>(status: StatusCode, text: &str) -> ClientResult<T> {
    if status == StatusCode::NO_CONTENT || text.trim().is_empty() {
        return serde_json::from_value(serde_json::Value::Null).map_err(|_| {
            ClientError::InvalidResponse(format!("expected a body, got status {}", status))
        });
    }
    Ok(serde_json::from_str(text)?)
}

pub(crate) fn error_from_status(status: StatusCode, text: String) -> ClientError {
    // Structured body first
    if let Ok(body) = serde_json::from_str::<ErrorBody>(&text) {
        let code = ErrorCode::try_from(body.code)
            .unwrap_or_else(|_| ErrorCode::from_http_status(status));
        return ClientError::Api {
            code,
            message: body.message,
            details: body.details,
        };
    }
    let text = if text.trim().is_empty() {
        status.to_string()
    } else {
        text
    };
    match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized(text),
        StatusCode::FORBIDDEN => ClientError::Forbidden(text),
        StatusCode::NOT_FOUND => ClientError::NotFound(text),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ClientError::Validation(text),
        _ => ClientError::Internal(format!("{}: {}", status, text)),
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        tracing::debug!(path, "GET");
        self.send(self.client.get(self.url(path))).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize + std::marker::Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        tracing::debug!(path, "POST");
        self.send(self.client.post(self.url(path)).json(body)).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        tracing::debug!(path, "POST");
        self.send(self.client.post(self.url(path))).await
    }

    async fn put<T: DeserializeOwned, B: serde::Serialize + std::marker::Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        tracing::debug!(path, "PUT");
        self.send(self.client.put(self.url(path)).json(body)).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        tracing::debug!(path, "DELETE");
        self.send(self.client.delete(self.url(path))).await
    }

    async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> ClientResult<T> {
        tracing::debug!(path, "POST multipart");
        self.send(self.client.post(self.url(path)).multipart(form)).await
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }
}
