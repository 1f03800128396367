//! Restaurant endpoints

use shared::models::{Restaurant, RestaurantCreate, RestaurantUpdate, RestaurantWithMenu};

use crate::ClientResult;
use crate::http::HttpClient;

pub struct RestaurantApi<'a, H: HttpClient> {
    http: &'a H,
}

impl<'a, H: HttpClient> RestaurantApi<'a, H> {
    pub(crate) fn new(http: &'a H) -> Self {
        Self { http }
    }

    pub async fn list(&self) -> ClientResult<Vec<Restaurant>> {
        self.http.get("restaurants").await
    }

    pub async fn get(&self, id: &str) -> ClientResult<Restaurant> {
        self.http.get(&format!("restaurants/{}", id)).await
    }

    /// Restaurant with its categories and their products
    pub async fn get_with_menu(&self, id: &str) -> ClientResult<RestaurantWithMenu> {
        self.http.get(&format!("restaurants/{}/menu", id)).await
    }

    pub async fn create(&self, dto: &RestaurantCreate) -> ClientResult<Restaurant> {
        self.http.post("restaurants", dto).await
    }

    pub async fn update(&self, id: &str, dto: &RestaurantUpdate) -> ClientResult<Restaurant> {
        self.http.put(&format!("restaurants/{}", id), dto).await
    }

    /// Mark deleted; restorable with [`Self::restore`]
    pub async fn soft_delete(&self, id: &str) -> ClientResult<()> {
        self.http.delete(&format!("restaurants/{}", id)).await
    }

    pub async fn hard_delete(&self, id: &str) -> ClientResult<()> {
        self.http.delete(&format!("restaurants/{}/hard", id)).await
    }

    pub async fn restore(&self, id: &str) -> ClientResult<()> {
        self.http.post_empty(&format!("restaurants/{}/restore", id)).await
    }
}
