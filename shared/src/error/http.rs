//! Fallback from bare HTTP statuses to error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Best-effort code for a failure that came back without a structured
    /// error body.
    pub fn from_http_status(status: StatusCode) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => Self::NotAuthenticated,
            StatusCode::FORBIDDEN => Self::PermissionDenied,
            StatusCode::NOT_FOUND => Self::NotFound,
            StatusCode::CONFLICT => Self::AlreadyExists,
            StatusCode::GONE => Self::RestaurantDeleted,
            StatusCode::PAYLOAD_TOO_LARGE => Self::FileTooLarge,
            StatusCode::UNSUPPORTED_MEDIA_TYPE => Self::UnsupportedFileFormat,
            StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => Self::TimeoutError,
            StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE => Self::NetworkError,
            s if s.is_client_error() => Self::InvalidRequest,
            s if s.is_success() => Self::Success,
            _ => Self::InternalError,
        }
    }
}
