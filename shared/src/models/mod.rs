//! Data models
//!
//! Wire types exchanged with the menu backend. JSON uses camelCase keys and
//! all IDs are opaque strings.

pub mod category;
pub mod position;
pub mod product;
pub mod restaurant;
pub mod user;

// Re-exports
pub use category::*;
pub use position::*;
pub use product::*;
pub use restaurant::*;
pub use user::*;
