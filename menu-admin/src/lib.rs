//! Menu Admin - administration tooling for the restaurant menu backend
//!
//! - [`reorder`]: optimistic reordering of categories and products
//! - [`app`]: logged-in context behind the CLI commands
//! - [`qr`]: public menu QR codes

pub mod app;
pub mod assets;
pub mod cli;
pub mod config;
pub mod error;
pub mod logger;
pub mod notify;
pub mod qr;
pub mod reorder;

pub use app::{
    AdminApp, CategoryEdit, ProductEdit, ReorderReport, RestaurantEdit, run_reorder,
};
pub use config::AdminConfig;
pub use error::{AdminError, AdminResult};
pub use logger::init_logger;
pub use notify::{Notification, NotifyLevel};
