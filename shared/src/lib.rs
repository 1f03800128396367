//! Shared types for the menu administration workspace
//!
//! Wire models, auth DTOs and the error code system used by both
//! `menu-client` and `menu-admin`.

pub mod client;
pub mod error;
pub mod models;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ErrorBody, ErrorCode};
pub use models::{MenuCategory, Orderable, PositionUpdate, Product, Restaurant};
