//! Menu Client - REST client for the restaurant menu backend
//!
//! Provides authenticated HTTP calls to the menu API, plus the on-disk
//! session used by the admin CLI.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod session;

pub use api::{CategoryApi, MenuClient, ProductApi, RestaurantApi, UploadApi, UserApi};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, NetworkHttpClient};
pub use session::{Session, SessionStore, TokenClaims};

// Re-export shared types for convenience
pub use shared::client::{LoginResponse, MessageResponse, UploadResponse};
