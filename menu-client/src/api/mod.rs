//! Typed menu API on top of [`HttpClient`]
//!
//! Each resource gets a small borrowed accessor (`client.categories()`,
//! `client.products()`, ...) so call sites read like the REST paths they hit.

mod auth;
mod category;
mod product;
mod restaurant;
mod upload;
mod user;

pub use category::CategoryApi;
pub use product::ProductApi;
pub use restaurant::RestaurantApi;
pub use upload::UploadApi;
pub use user::UserApi;

use crate::http::{HttpClient, NetworkHttpClient};

/// Menu backend client
#[derive(Debug, Clone)]
pub struct MenuClient<H: HttpClient = NetworkHttpClient> {
    http: H,
}

impl<H: HttpClient> MenuClient<H> {
    pub fn new(http: H) -> Self {
        Self { http }
    }

    /// Underlying transport
    pub fn http(&self) -> &H {
        &self.http
    }

    /// Current bearer token
    pub fn token(&self) -> Option<&str> {
        self.http.token()
    }

    /// Replace the bearer token (e.g. after loading a stored session)
    pub fn set_token(&mut self, token: Option<String>) {
        self.http.set_token(token);
    }

    pub fn is_logged_in(&self) -> bool {
        self.http.token().is_some()
    }

    pub fn restaurants(&self) -> RestaurantApi<'_, H> {
        RestaurantApi::new(&self.http)
    }

    pub fn categories(&self) -> CategoryApi<'_, H> {
        CategoryApi::new(&self.http)
    }

    pub fn products(&self) -> ProductApi<'_, H> {
        ProductApi::new(&self.http)
    }

    pub fn upload(&self) -> UploadApi<'_, H> {
        UploadApi::new(&self.http)
    }

    pub fn users(&self) -> UserApi<'_, H> {
        UserApi::new(&self.http)
    }
}
