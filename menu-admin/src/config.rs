//! Admin tool configuration
//!
//! | variable             | default                      |
//! |----------------------|------------------------------|
//! | `MENU_API_URL`       | `http://localhost:5252/api`  |
//! | `MENU_ASSET_URL`     | `http://localhost:5252`      |
//! | `MENU_PUBLIC_URL`    | `http://localhost:5173/menu` |
//! | `MENU_SESSION_DIR`   | `./.menu-admin`              |
//! | `MENU_LOG_DIR`       | unset (stdout only)          |
//! | `REQUEST_TIMEOUT_MS` | `30000`                      |

use std::path::PathBuf;

use menu_client::ClientConfig;
use menu_client::config::DEFAULT_TIMEOUT_MS;

use crate::error::{AdminError, AdminResult};

pub const DEFAULT_API_URL: &str = "http://localhost:5252/api";
pub const DEFAULT_ASSET_URL: &str = "http://localhost:5252";
pub const DEFAULT_PUBLIC_URL: &str = "http://localhost:5173/menu";
pub const DEFAULT_SESSION_DIR: &str = "./.menu-admin";

#[derive(Debug, Clone, PartialEq)]
pub struct AdminConfig {
    /// REST API base, including `/api`
    pub api_url: String,
    /// Origin that relative image paths are served from
    pub asset_url: String,
    /// Base of the public menu pages encoded into QR codes
    pub public_url: String,
    pub session_dir: PathBuf,
    pub log_dir: Option<PathBuf>,
    pub request_timeout_ms: u64,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            asset_url: DEFAULT_ASSET_URL.into(),
            public_url: DEFAULT_PUBLIC_URL.into(),
            session_dir: PathBuf::from(DEFAULT_SESSION_DIR),
            log_dir: None,
            request_timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl AdminConfig {
    /// Load from the process environment (after `.env`, if present)
    pub fn from_env() -> Self {
        let _ = dotenv::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or unparsable values use defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            api_url: non_empty("MENU_API_URL").unwrap_or(defaults.api_url),
            asset_url: non_empty("MENU_ASSET_URL").unwrap_or(defaults.asset_url),
            public_url: non_empty("MENU_PUBLIC_URL").unwrap_or(defaults.public_url),
            session_dir: non_empty("MENU_SESSION_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.session_dir),
            log_dir: non_empty("MENU_LOG_DIR").map(PathBuf::from),
            request_timeout_ms: non_empty("REQUEST_TIMEOUT_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_ms),
        }
    }

    pub fn validate(&self) -> AdminResult<()> {
        for (name, url) in [
            ("MENU_API_URL", &self.api_url),
            ("MENU_ASSET_URL", &self.asset_url),
            ("MENU_PUBLIC_URL", &self.public_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(AdminError::Config(format!(
                    "{} must be an http(s) URL, got {:?}",
                    name, url
                )));
            }
        }
        if self.request_timeout_ms == 0 {
            return Err(AdminError::Config(
                "REQUEST_TIMEOUT_MS must be positive".into(),
            ));
        }
        Ok(())
    }

    /// REST client configuration, without a token
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api_url.clone()).with_timeout_ms(self.request_timeout_ms)
    }
}
