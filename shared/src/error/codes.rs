//! Numeric error codes shared by the backend and the admin tooling
//!
//! Ranges: 0xxx general, 1xxx auth, 2xxx permission, 3xxx restaurant,
//! 6xxx menu catalog and uploads, 8xxx users, 9xxx local/system.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Defines [`ErrorCode`] together with its wire value and default message,
/// so the three can never drift apart.
macro_rules! error_codes {
    ($($name:ident = $value:literal => $message:literal,)*) => {
        /// Error code as carried in backend error bodies (a bare u16 on the wire)
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(into = "u16", try_from = "u16")]
        #[repr(u16)]
        pub enum ErrorCode {
            $($name = $value,)*
        }

        impl ErrorCode {
            /// Default English message, used when a failure is detected locally
            pub const fn message(&self) -> &'static str {
                match self {
                    $(ErrorCode::$name => $message,)*
                }
            }
        }

        impl TryFrom<u16> for ErrorCode {
            type Error = InvalidErrorCode;

            fn try_from(value: u16) -> Result<Self, Self::Error> {
                match value {
                    $($value => Ok(ErrorCode::$name),)*
                    _ => Err(InvalidErrorCode(value)),
                }
            }
        }
    };
}

error_codes! {
    Success = 0 => "Operation completed successfully",
    ValidationFailed = 2 => "Validation failed",
    NotFound = 3 => "Resource not found",
    AlreadyExists = 4 => "Resource already exists",
    InvalidRequest = 5 => "Invalid request",
    InvalidFormat = 6 => "Invalid format",

    NotAuthenticated = 1001 => "User is not authenticated",
    InvalidCredentials = 1002 => "Invalid email or password",
    TokenExpired = 1003 => "Authentication token has expired",
    TokenInvalid = 1004 => "Authentication token is invalid",
    PasswordTooShort = 1008 => "New password must be at least 6 characters",
    PasswordMismatch = 1009 => "New passwords do not match",

    PermissionDenied = 2001 => "Permission denied",
    AdminRequired = 2003 => "Administrator role is required",

    RestaurantNotFound = 3001 => "Restaurant not found",
    RestaurantDeleted = 3002 => "Restaurant has been deleted",

    ProductNotFound = 6001 => "Product not found",
    ProductInvalidPrice = 6002 => "Product price is invalid",
    CategoryNotFound = 6101 => "Category not found",
    CategoryNameExists = 6103 => "Category name already exists",
    ReorderFailed = 6104 => "Saving the new order failed",
    FileTooLarge = 6501 => "File is too large",
    UnsupportedFileFormat = 6502 => "Unsupported file format",
    UploadFailed = 6509 => "Upload failed",

    UserNotFound = 8001 => "User not found",
    UserEmailExists = 8002 => "Email is already registered",
    OwnerRestaurantRequired = 8003 => "Owner accounts require a restaurant",

    InternalError = 9001 => "Internal server error",
    NetworkError = 9003 => "Network error",
    TimeoutError = 9004 => "Operation timed out",
    ConfigError = 9005 => "Configuration error",
    StorageError = 9006 => "Local storage error",
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }
}

/// An unknown u16 where an [`ErrorCode`] was expected
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid error code: {0}")]
pub struct InvalidErrorCode(pub u16);

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_values() {
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::PasswordTooShort.code(), 1008);
        assert_eq!(ErrorCode::CategoryNotFound.code(), 6101);
        assert_eq!(ErrorCode::ReorderFailed.code(), 6104);
        assert_eq!(ErrorCode::OwnerRestaurantRequired.code(), 8003);
    }

    #[test]
    fn test_try_from() {
        assert_eq!(ErrorCode::try_from(1002), Ok(ErrorCode::InvalidCredentials));
        assert_eq!(ErrorCode::try_from(6501), Ok(ErrorCode::FileTooLarge));
        assert_eq!(ErrorCode::try_from(4001), Err(InvalidErrorCode(4001)));
    }

    #[test]
    fn test_serde_as_number() {
        assert_eq!(serde_json::to_string(&ErrorCode::CategoryNotFound).unwrap(), "6101");
        let code: ErrorCode = serde_json::from_str("1003").unwrap();
        assert_eq!(code, ErrorCode::TokenExpired);
        assert!(serde_json::from_str::<ErrorCode>("10000").is_err());
    }

    #[test]
    fn test_display_and_message() {
        assert_eq!(ErrorCode::ReorderFailed.to_string(), "6104");
        assert_eq!(ErrorCode::PasswordMismatch.message(), "New passwords do not match");
    }
}
