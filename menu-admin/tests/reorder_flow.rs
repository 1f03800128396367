//! Reorder and session flows driven through `MenuClient` over a fake transport

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use menu_admin::reorder::ReorderOutcome;
use menu_admin::{AdminApp, AdminConfig, AdminError, NotifyLevel, run_reorder};
use menu_client::{ClientError, ClientResult, HttpClient, MenuClient, SessionStore};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use rust_decimal::Decimal;
use shared::models::{MenuCategory, PositionUpdate, Product};

#[derive(Default)]
struct FakeState {
    categories: Mutex<Vec<MenuCategory>>,
    products: Mutex<Vec<Product>>,
    reorder_bodies: Mutex<Vec<Vec<PositionUpdate>>>,
    reject_reorder: AtomicBool,
    login_token: Mutex<Option<String>>,
}

/// Serves one restaurant's categories and accepts or rejects reorders
#[derive(Clone, Default)]
struct FakeHttp {
    state: Arc<FakeState>,
    token: Option<String>,
}

impl FakeHttp {
    fn with_categories(names: &[&str]) -> Self {
        let fake = Self::default();
        *fake.state.categories.lock() = names
            .iter()
            .enumerate()
            .map(|(i, name)| category(&format!("c-{}", i), name, i as i32))
            .collect();
        fake
    }

    fn with_products(names: &[&str]) -> Self {
        let fake = Self::default();
        *fake.state.products.lock() = names
            .iter()
            .enumerate()
            .map(|(i, name)| product(&format!("p-{}", i), name, i as i32))
            .collect();
        fake
    }

    fn reply<T: DeserializeOwned>(value: Value) -> ClientResult<T> {
        Ok(serde_json::from_value(value)?)
    }
}

fn category(id: &str, name: &str, order: i32) -> MenuCategory {
    MenuCategory {
        id: id.into(),
        restaurant_id: "r-1".into(),
        name: name.into(),
        description: None,
        photo_url: None,
        display_order: order,
        is_active: true,
        created_at: String::new(),
        updated_at: String::new(),
    }
}

fn product(id: &str, name: &str, order: i32) -> Product {
    Product {
        id: id.into(),
        menu_category_id: "c-0".into(),
        name: name.into(),
        description: None,
        price: Decimal::new(100, 0),
        photo_url: None,
        display_order: order,
        is_available: true,
        created_at: String::new(),
        updated_at: String::new(),
    }
}

#[async_trait]
impl HttpClient for FakeHttp {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        match path {
            "restaurants/r-1/categories" => {
                let cats = self.state.categories.lock().clone();
                Self::reply(serde_json::to_value(cats)?)
            }
            "categories/c-0/products" => {
                let products = self.state.products.lock().clone();
                Self::reply(serde_json::to_value(products)?)
            }
            _ => Err(ClientError::NotFound(path.into())),
        }
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize + std::marker::Sync>(
        &self,
        path: &str,
        _body: &B,
    ) -> ClientResult<T> {
        let login_token = self.state.login_token.lock().clone();
        match (path, login_token) {
            ("auth/login", Some(token)) => Self::reply(json!({ "token": token })),
            ("auth/login", None) => Err(ClientError::Unauthorized("bad credentials".into())),
            _ => Err(ClientError::NotFound(path.into())),
        }
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        Err(ClientError::NotFound(path.into()))
    }

    async fn put<T: DeserializeOwned, B: serde::Serialize + std::marker::Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        if path != "restaurants/r-1/categories/reorder" && path != "categories/c-0/products/reorder" {
            return Err(ClientError::NotFound(path.into()));
        }
        let updates: Vec<PositionUpdate> = serde_json::from_value(serde_json::to_value(body)?)?;
        self.state.reorder_bodies.lock().push(updates.clone());
        if self.state.reject_reorder.load(Ordering::SeqCst) {
            return Err(ClientError::Api {
                code: shared::ErrorCode::ReorderFailed,
                message: "rejected".into(),
                details: None,
            });
        }
        for update in &updates {
            if let Some(c) = self.state.categories.lock().iter_mut().find(|c| c.id == update.id) {
                c.display_order = update.display_order;
            }
            if let Some(p) = self.state.products.lock().iter_mut().find(|p| p.id == update.id) {
                p.display_order = update.display_order;
            }
        }
        Self::reply(Value::Null)
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        Err(ClientError::NotFound(path.into()))
    }

    async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        _form: reqwest::multipart::Form,
    ) -> ClientResult<T> {
        Err(ClientError::NotFound(path.into()))
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }
}

fn names(items: &[MenuCategory]) -> Vec<&str> {
    items.iter().map(|c| c.name.as_str()).collect()
}

#[tokio::test]
async fn test_category_reorder_confirmed() {
    let fake = FakeHttp::with_categories(&["Soups", "Mains", "Desserts"]);
    let client = Arc::new(MenuClient::new(fake.clone()));

    let report = run_reorder::<MenuCategory, _>("r-1", "c-0", 2, client)
        .await
        .unwrap();

    assert_eq!(report.outcome, Some(ReorderOutcome::Confirmed));
    assert_eq!(names(&report.items), vec!["Mains", "Desserts", "Soups"]);
    assert!(report.notifications.is_empty());
    assert_eq!(
        fake.state.reorder_bodies.lock()[0],
        vec![
            PositionUpdate::new("c-1", 0),
            PositionUpdate::new("c-2", 1),
            PositionUpdate::new("c-0", 2),
        ]
    );
}

#[tokio::test]
async fn test_category_reorder_rejected_reverts() {
    let fake = FakeHttp::with_categories(&["Soups", "Mains", "Desserts"]);
    fake.state.reject_reorder.store(true, Ordering::SeqCst);
    let client = Arc::new(MenuClient::new(fake.clone()));

    let report = run_reorder::<MenuCategory, _>("r-1", "c-2", 0, client)
        .await
        .unwrap();

    assert_eq!(report.outcome, Some(ReorderOutcome::Reverted));
    assert_eq!(names(&report.items), vec!["Soups", "Mains", "Desserts"]);
    assert_eq!(report.notifications.len(), 1);
    assert_eq!(report.notifications[0].level, NotifyLevel::Warning);
}

#[tokio::test]
async fn test_same_position_sends_nothing() {
    let fake = FakeHttp::with_categories(&["Soups", "Mains"]);
    let client = Arc::new(MenuClient::new(fake.clone()));

    let report = run_reorder::<MenuCategory, _>("r-1", "c-1", 1, client)
        .await
        .unwrap();
    assert_eq!(report.outcome, None);
    assert!(fake.state.reorder_bodies.lock().is_empty());
}

#[tokio::test]
async fn test_unknown_item_is_not_found() {
    let fake = FakeHttp::with_categories(&["Soups"]);
    let client = Arc::new(MenuClient::new(fake));
    let err = run_reorder::<MenuCategory, _>("r-1", "missing", 0, client)
        .await
        .unwrap_err();
    assert!(matches!(err, AdminError::NotFound(_)));
}

#[tokio::test]
async fn test_product_reorder_confirmed() {
    let fake = FakeHttp::with_products(&["Ayran", "Kola", "Su", "Çay"]);
    let client = Arc::new(MenuClient::new(fake.clone()));

    let report = run_reorder::<Product, _>("c-0", "p-3", 0, client)
        .await
        .unwrap();

    assert_eq!(report.outcome, Some(ReorderOutcome::Confirmed));
    let names: Vec<&str> = report.items.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Çay", "Ayran", "Kola", "Su"]);
    let orders: Vec<i32> = report.items.iter().map(|p| p.display_order).collect();
    assert_eq!(orders, vec![0, 1, 2, 3]);

    let stored = fake.state.products.lock().clone();
    let tea = stored.iter().find(|p| p.id == "p-3").unwrap();
    assert_eq!(tea.display_order, 0);
}

#[tokio::test]
async fn test_product_reorder_rejected_reverts() {
    let fake = FakeHttp::with_products(&["Ayran", "Kola"]);
    fake.state.reject_reorder.store(true, Ordering::SeqCst);
    let client = Arc::new(MenuClient::new(fake.clone()));

    let report = run_reorder::<Product, _>("c-0", "p-0", 1, client)
        .await
        .unwrap();

    assert_eq!(report.outcome, Some(ReorderOutcome::Reverted));
    let ids: Vec<&str> = report.items.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["p-0", "p-1"]);
    assert_eq!(fake.state.reorder_bodies.lock().len(), 1);
}

/// 2100-01-01, never expires during a test run
const FAR_FUTURE: i64 = 4_102_444_800;

fn token(role: &str) -> String {
    let payload = json!({
        "nameid": "u-1",
        "unique_name": "zeynep",
        "email": "zeynep@example.com",
        "role": role,
        "RestaurantId": "r-1",
        "exp": FAR_FUTURE
    });
    format!(
        "{}.{}.sig",
        URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256"}"#),
        URL_SAFE_NO_PAD.encode(payload.to_string())
    )
}

#[tokio::test]
async fn test_login_persists_session_and_gates_commands() {
    let dir = tempfile::tempdir().unwrap();
    let config = AdminConfig {
        session_dir: dir.path().to_path_buf(),
        ..Default::default()
    };

    let fake = FakeHttp::with_categories(&["Soups", "Mains"]);
    *fake.state.login_token.lock() = Some(token("Owner"));

    let mut app = AdminApp::with_client(config.clone(), MenuClient::new(fake.clone())).unwrap();
    assert!(matches!(app.session(), Err(AdminError::NotLoggedIn)));
    assert!(matches!(
        app.reorder_categories("r-1", "c-0", 1).await,
        Err(AdminError::NotLoggedIn)
    ));

    app.login("zeynep@example.com", "secret").await.unwrap();
    assert_eq!(app.session().unwrap().claims.name, "zeynep");
    assert!(app.client().is_logged_in());

    // Owners cannot manage users
    assert!(matches!(app.list_users().await, Err(AdminError::Forbidden(_))));

    let report = app.reorder_categories("r-1", "c-0", 1).await.unwrap();
    assert_eq!(report.outcome, Some(ReorderOutcome::Confirmed));

    // A fresh app picks the stored session back up
    let reopened = AdminApp::with_client(config.clone(), MenuClient::new(fake.clone())).unwrap();
    assert!(reopened.client().is_logged_in());

    app.logout().unwrap();
    assert!(SessionStore::new(dir.path()).load().unwrap().is_none());
}
