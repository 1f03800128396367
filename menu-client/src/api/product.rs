//! Product endpoints

use shared::models::{PositionUpdate, Product, ProductCreate, ProductUpdate};

use crate::ClientResult;
use crate::http::HttpClient;

pub struct ProductApi<'a, H: HttpClient> {
    http: &'a H,
}

impl<'a, H: HttpClient> ProductApi<'a, H> {
    pub(crate) fn new(http: &'a H) -> Self {
        Self { http }
    }

    pub async fn list_by_category(&self, category_id: &str) -> ClientResult<Vec<Product>> {
        self.http
            .get(&format!("categories/{}/products", category_id))
            .await
    }

    pub async fn get(&self, id: &str) -> ClientResult<Product> {
        self.http.get(&format!("products/{}", id)).await
    }

    pub async fn create(&self, category_id: &str, dto: &ProductCreate) -> ClientResult<Product> {
        self.http
            .post(&format!("categories/{}/products", category_id), dto)
            .await
    }

    pub async fn update(&self, id: &str, dto: &ProductUpdate) -> ClientResult<Product> {
        self.http.put(&format!("products/{}", id), dto).await
    }

    pub async fn soft_delete(&self, id: &str) -> ClientResult<()> {
        self.http.delete(&format!("products/{}", id)).await
    }

    pub async fn hard_delete(&self, id: &str) -> ClientResult<()> {
        self.http.delete(&format!("products/{}/hard", id)).await
    }

    /// Persist a whole position batch for one category in a single request
    pub async fn reorder(&self, category_id: &str, updates: &[PositionUpdate]) -> ClientResult<()> {
        self.http
            .put(
                &format!("categories/{}/products/reorder", category_id),
                &updates,
            )
            .await
    }
}
