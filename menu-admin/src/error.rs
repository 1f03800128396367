//! Admin tool errors

use menu_client::ClientError;
use shared::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdminError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Not logged in; run `menu-admin login` first")]
    NotLoggedIn,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("QR generation failed: {0}")]
    Qr(String),

    #[error("Image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("Permission denied: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AdminError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            AdminError::Client(e) => e.error_code(),
            AdminError::NotLoggedIn => ErrorCode::NotAuthenticated,
            AdminError::Config(_) => ErrorCode::ConfigError,
            AdminError::Qr(_) | AdminError::Image(_) => ErrorCode::InternalError,
            AdminError::Forbidden(_) => ErrorCode::AdminRequired,
            AdminError::NotFound(_) => ErrorCode::NotFound,
            AdminError::InvalidInput(_) => ErrorCode::InvalidRequest,
            AdminError::Internal(_) => ErrorCode::InternalError,
            AdminError::Io(_) => ErrorCode::StorageError,
        }
    }
}

pub type AdminResult<T> = Result<T, AdminError>;
