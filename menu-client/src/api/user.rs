//! User management endpoints (admin only)

use shared::client::MessageResponse;
use shared::models::{User, UserCreate, UserRole};

use crate::http::HttpClient;
use crate::{ClientError, ClientResult};

pub struct UserApi<'a, H: HttpClient> {
    http: &'a H,
}

impl<'a, H: HttpClient> UserApi<'a, H> {
    pub(crate) fn new(http: &'a H) -> Self {
        Self { http }
    }

    pub async fn list(&self) -> ClientResult<Vec<User>> {
        self.http.get("users").await
    }

    /// Create a user; owners must be bound to a restaurant
    pub async fn create(&self, dto: &UserCreate) -> ClientResult<User> {
        if dto.role == UserRole::Owner && dto.restaurant_id.as_deref().is_none_or(str::is_empty) {
            return Err(ClientError::Validation(
                "an owner must be assigned to a restaurant".into(),
            ));
        }
        self.http.post("users", dto).await
    }

    /// Reset a user's password; the backend replies with a message carrying
    /// the new temporary password.
    pub async fn reset_password(&self, id: &str) -> ClientResult<MessageResponse> {
        let resp: Option<MessageResponse> = self
            .http
            .post_empty(&format!("users/{}/reset-password", id))
            .await?;
        Ok(resp.unwrap_or_default())
    }
}
