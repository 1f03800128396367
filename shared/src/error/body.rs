//! Failure payload sent by the backend

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Structured error body, e.g.
/// `{ "code": 6101, "message": "Category not found", "details": { "id": "c-1" } }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}
