//! Command line definition

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use shared::models::UserRole;

use crate::config::AdminConfig;

/// Restaurant menu administration
#[derive(Parser, Debug)]
#[command(name = "menu-admin")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// REST API base URL, including /api
    #[arg(long, env = "MENU_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Origin serving uploaded images
    #[arg(long, env = "MENU_ASSET_URL", global = true)]
    pub asset_url: Option<String>,

    /// Base URL of the public menu pages
    #[arg(long, env = "MENU_PUBLIC_URL", global = true)]
    pub public_url: Option<String>,

    /// Directory holding the login session
    #[arg(long, env = "MENU_SESSION_DIR", global = true)]
    pub session_dir: Option<PathBuf>,

    /// Directory for rolling log files
    #[arg(long, env = "MENU_LOG_DIR", global = true)]
    pub log_dir: Option<PathBuf>,

    /// Request timeout in milliseconds
    #[arg(long, env = "REQUEST_TIMEOUT_MS", global = true)]
    pub timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Load `env_file` (or `.env` from the working directory) before parsing,
    /// so its values reach the `env` fallbacks of the flags.
    pub fn try_parse_with_env_file<I, T>(env_file: Option<&Path>, args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let _ = match env_file {
            Some(path) => dotenv::from_path(path),
            None => dotenv::dotenv().map(|_| ()),
        };
        Self::try_parse_from(args)
    }

    /// Layer flag values over `base`
    pub fn apply_to(&self, mut base: AdminConfig) -> AdminConfig {
        if let Some(v) = &self.api_url {
            base.api_url = v.clone();
        }
        if let Some(v) = &self.asset_url {
            base.asset_url = v.clone();
        }
        if let Some(v) = &self.public_url {
            base.public_url = v.clone();
        }
        if let Some(v) = &self.session_dir {
            base.session_dir = v.clone();
        }
        if let Some(v) = &self.log_dir {
            base.log_dir = Some(v.clone());
        }
        if let Some(v) = self.timeout_ms {
            base.request_timeout_ms = v;
        }
        base
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and store the session
    Login {
        #[arg(long)]
        email: String,
        /// Prompted for when omitted
        #[arg(long, env = "MENU_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Change the current user's password
    ChangePassword {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
        #[arg(long)]
        confirm: String,
    },
    #[command(subcommand)]
    Restaurants(RestaurantCommand),
    #[command(subcommand)]
    Categories(CategoryCommand),
    #[command(subcommand)]
    Products(ProductCommand),
    /// Upload an image and print its URL
    Upload {
        file: PathBuf,
    },
    /// Delete an uploaded image by URL or file name
    DeleteImage {
        url: String,
    },
    /// Write the public menu QR code of a restaurant as PNG
    Qr {
        restaurant_id: String,
        #[arg(long, default_value = ".")]
        out: PathBuf,
        #[arg(long, default_value_t = 256)]
        size: u32,
    },
    #[command(subcommand)]
    Users(UserCommand),
}

#[derive(Subcommand, Debug)]
pub enum RestaurantCommand {
    List,
    /// Restaurant with its full menu
    Show { id: String },
    Create(CreateRestaurantArgs),
    /// Change fields of a restaurant; omitted flags keep their value
    Update(UpdateRestaurantArgs),
    Delete {
        id: String,
        /// Remove permanently instead of marking deleted
        #[arg(long)]
        hard: bool,
    },
    Restore { id: String },
}

#[derive(Args, Debug)]
pub struct CreateRestaurantArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub logo_url: Option<String>,
}

#[derive(Args, Debug)]
pub struct UpdateRestaurantArgs {
    pub id: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub logo_url: Option<String>,
    #[arg(long)]
    pub active: Option<bool>,
}

#[derive(Subcommand, Debug)]
pub enum CategoryCommand {
    /// Add a category to a restaurant
    Create {
        #[arg(long)]
        restaurant: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        photo_url: Option<String>,
    },
    /// Change fields of a category; omitted flags keep their value
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        photo_url: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },
    Delete {
        id: String,
        #[arg(long)]
        hard: bool,
    },
    /// Move a category to a new index within its restaurant
    Reorder {
        #[arg(long)]
        restaurant: String,
        #[arg(long)]
        id: String,
        #[arg(long)]
        to: usize,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProductCommand {
    /// Add a product to a category
    Create {
        #[arg(long)]
        category: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: Decimal,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        photo_url: Option<String>,
    },
    /// Change fields of a product; omitted flags keep their value
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<Decimal>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        photo_url: Option<String>,
        #[arg(long)]
        available: Option<bool>,
    },
    Delete {
        id: String,
        #[arg(long)]
        hard: bool,
    },
    /// Move a product to a new index within its category
    Reorder {
        #[arg(long)]
        category: String,
        #[arg(long)]
        id: String,
        #[arg(long)]
        to: usize,
    },
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    List,
    Create {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// admin or owner
        #[arg(long, default_value = "owner")]
        role: UserRole,
        /// Required for owners
        #[arg(long)]
        restaurant: Option<String>,
    },
    ResetPassword { id: String },
}
