//! Auth endpoints

use shared::client::{ChangePasswordRequest, LoginRequest, LoginResponse, MessageResponse};
use shared::error::ErrorCode;

use super::MenuClient;
use crate::http::HttpClient;
use crate::{ClientError, ClientResult};

/// Minimum accepted length for a new password
pub const MIN_PASSWORD_LEN: usize = 6;

impl<H: HttpClient> MenuClient<H> {
    /// Login with email and password; on success the token is attached to
    /// every following request.
    pub async fn login(&mut self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let resp: LoginResponse = self.http.post("auth/login", &request).await?;
        if resp.token.is_empty() {
            return Err(ClientError::InvalidResponse("Missing login token".into()));
        }
        self.http.set_token(Some(resp.token.clone()));
        tracing::info!("Logged in");
        Ok(resp)
    }

    /// Forget the token. The backend is stateless, so there is no call.
    pub fn logout(&mut self) {
        self.http.set_token(None);
    }

    /// Change the current user's password.
    ///
    /// `confirm` must equal `new_password`, and the new password must be at
    /// least [`MIN_PASSWORD_LEN`] characters; both are checked before any
    /// request is sent.
    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
        confirm: &str,
    ) -> ClientResult<MessageResponse> {
        if new_password != confirm {
            return Err(ClientError::Api {
                code: ErrorCode::PasswordMismatch,
                message: ErrorCode::PasswordMismatch.message().into(),
                details: None,
            });
        }
        if new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ClientError::Api {
                code: ErrorCode::PasswordTooShort,
                message: ErrorCode::PasswordTooShort.message().into(),
                details: None,
            });
        }
        let request = ChangePasswordRequest {
            current_password: current_password.to_string(),
            new_password: new_password.to_string(),
        };
        let resp: Option<MessageResponse> =
            self.http.post("auth/change-password", &request).await?;
        Ok(resp.unwrap_or_default())
    }
}
