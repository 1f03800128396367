//! Menu category endpoints

use shared::models::{MenuCategory, MenuCategoryCreate, MenuCategoryUpdate, PositionUpdate};

use crate::ClientResult;
use crate::http::HttpClient;

pub struct CategoryApi<'a, H: HttpClient> {
    http: &'a H,
}

impl<'a, H: HttpClient> CategoryApi<'a, H> {
    pub(crate) fn new(http: &'a H) -> Self {
        Self { http }
    }

    /// Categories of a restaurant, in display order as the backend stores it
    pub async fn list_by_restaurant(&self, restaurant_id: &str) -> ClientResult<Vec<MenuCategory>> {
        self.http
            .get(&format!("restaurants/{}/categories", restaurant_id))
            .await
    }

    pub async fn get(&self, id: &str) -> ClientResult<MenuCategory> {
        self.http.get(&format!("categories/{}", id)).await
    }

    pub async fn create(
        &self,
        restaurant_id: &str,
        dto: &MenuCategoryCreate,
    ) -> ClientResult<MenuCategory> {
        self.http
            .post(&format!("restaurants/{}/categories", restaurant_id), dto)
            .await
    }

    pub async fn update(&self, id: &str, dto: &MenuCategoryUpdate) -> ClientResult<MenuCategory> {
        self.http.put(&format!("categories/{}", id), dto).await
    }

    pub async fn soft_delete(&self, id: &str) -> ClientResult<()> {
        self.http.delete(&format!("categories/{}", id)).await
    }

    pub async fn hard_delete(&self, id: &str) -> ClientResult<()> {
        self.http.delete(&format!("categories/{}/hard", id)).await
    }

    /// Persist a whole position batch for one restaurant in a single request
    pub async fn reorder(&self, restaurant_id: &str, updates: &[PositionUpdate]) -> ClientResult<()> {
        self.http
            .put(
                &format!("restaurants/{}/categories/reorder", restaurant_id),
                &updates,
            )
            .await
    }
}
