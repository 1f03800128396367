//! Persistence seam for the reorder coordinator

use async_trait::async_trait;
use menu_client::{ClientResult, HttpClient, MenuClient};
use shared::models::{MenuCategory, Orderable, PositionUpdate, Product};

/// Where a sibling group is persisted and reloaded from.
///
/// `persist_order` sends one batch for one parent and must be all-or-nothing
/// on the backend side.
#[async_trait]
pub trait ReorderBackend<T: Orderable>: Send + Sync + 'static {
    async fn persist_order(&self, parent_id: &str, updates: &[PositionUpdate]) -> ClientResult<()>;

    async fn reload_group(&self, parent_id: &str) -> ClientResult<Vec<T>>;
}

/// Categories of a restaurant; `parent_id` is the restaurant id
#[async_trait]
impl<H: HttpClient + 'static> ReorderBackend<MenuCategory> for MenuClient<H> {
    async fn persist_order(&self, parent_id: &str, updates: &[PositionUpdate]) -> ClientResult<()> {
        self.categories().reorder(parent_id, updates).await
    }

    async fn reload_group(&self, parent_id: &str) -> ClientResult<Vec<MenuCategory>> {
        self.categories().list_by_restaurant(parent_id).await
    }
}

/// Products of a category; `parent_id` is the category id
#[async_trait]
impl<H: HttpClient + 'static> ReorderBackend<Product> for MenuClient<H> {
    async fn persist_order(&self, parent_id: &str, updates: &[PositionUpdate]) -> ClientResult<()> {
        self.products().reorder(parent_id, updates).await
    }

    async fn reload_group(&self, parent_id: &str) -> ClientResult<Vec<Product>> {
        self.products().list_by_category(parent_id).await
    }
}
