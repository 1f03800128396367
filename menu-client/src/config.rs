//! Client configuration

/// Default request timeout (milliseconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Client configuration for connecting to the menu backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL including the `/api` prefix (e.g., "http://localhost:5252/api")
    pub base_url: String,

    /// JWT token for authentication
    pub token: Option<String>,

    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Set the JWT token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the JWT token if one is available
    pub fn with_optional_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Set the request timeout
    pub fn with_timeout_ms(mut self, ms: u64) -> Self {
        self.timeout_ms = ms;
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> crate::ClientResult<crate::NetworkHttpClient> {
        crate::NetworkHttpClient::new(self)
    }

    /// Create the full menu API client from this configuration
    pub fn build(&self) -> crate::ClientResult<crate::MenuClient> {
        Ok(crate::MenuClient::new(self.build_http_client()?))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:5252/api")
    }
}
