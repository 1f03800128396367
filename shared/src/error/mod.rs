//! Error codes and the backend's failure body
//!
//! - [`ErrorCode`]: numeric codes, grouped by range
//! - [`ErrorBody`]: `{ code, message, details }` payload of failed requests

mod body;
mod codes;
mod http;

pub use body::ErrorBody;
pub use codes::{ErrorCode, InvalidErrorCode};
