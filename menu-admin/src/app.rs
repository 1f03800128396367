//! Admin session context and the operations behind each CLI command

use std::path::{Path, PathBuf};
use std::sync::Arc;

use menu_client::{
    HttpClient, MenuClient, MessageResponse, NetworkHttpClient, Session, SessionStore,
};
use rust_decimal::Decimal;
use shared::models::{
    MenuCategory, MenuCategoryCreate, MenuCategoryUpdate, Orderable, Product, ProductCreate,
    ProductUpdate, Restaurant, RestaurantCreate, RestaurantUpdate, RestaurantWithMenu, User,
    UserCreate,
};

use crate::config::AdminConfig;
use crate::error::{AdminError, AdminResult};
use crate::notify::{Notification, drain_notifications};
use crate::qr;
use crate::reorder::{ReorderBackend, ReorderCoordinator, ReorderIntent, ReorderOutcome};

/// Result of one end-to-end reorder
#[derive(Debug, Clone)]
pub struct ReorderReport<T> {
    /// `None` when the move was a no-op and nothing was sent
    pub outcome: Option<ReorderOutcome>,
    /// Order after the group settled
    pub items: Vec<T>,
    pub notifications: Vec<Notification>,
}

/// Load a group, move `moved_id` to `to_index` and wait for it to settle.
pub async fn run_reorder<T, B>(
    parent_id: &str,
    moved_id: &str,
    to_index: usize,
    backend: Arc<B>,
) -> AdminResult<ReorderReport<T>>
where
    T: Orderable + Clone + Send + Sync + 'static,
    B: ReorderBackend<T>,
{
    let coordinator = ReorderCoordinator::new(parent_id, backend);
    coordinator.load().await?;
    let mut events = coordinator.subscribe();

    let from_index = coordinator
        .snapshot()
        .iter()
        .position(|item| item.id() == moved_id)
        .ok_or_else(|| AdminError::NotFound(format!("{} is not in group {}", moved_id, parent_id)))?;

    let intent = ReorderIntent::new(moved_id, from_index, to_index);
    let outcome = match coordinator.apply_reorder(&intent) {
        Some(handle) => Some(
            handle
                .await
                .map_err(|e| AdminError::Internal(format!("reorder task failed: {}", e)))?,
        ),
        None => None,
    };

    let report = ReorderReport {
        outcome,
        items: coordinator.snapshot(),
        notifications: drain_notifications(&mut events),
    };
    coordinator.teardown();
    Ok(report)
}

/// Field changes for an existing restaurant; `None` keeps the current value
#[derive(Debug, Clone, Default)]
pub struct RestaurantEdit {
    pub name: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub is_active: Option<bool>,
}

/// Field changes for an existing category; `None` keeps the current value
#[derive(Debug, Clone, Default)]
pub struct CategoryEdit {
    pub name: Option<String>,
    pub description: Option<String>,
    pub photo_url: Option<String>,
    pub is_active: Option<bool>,
}

/// Field changes for an existing product; `None` keeps the current value
#[derive(Debug, Clone, Default)]
pub struct ProductEdit {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub photo_url: Option<String>,
    pub is_available: Option<bool>,
}

fn require_name(name: &str) -> AdminResult<()> {
    if name.trim().is_empty() {
        return Err(AdminError::InvalidInput("name must not be empty".into()));
    }
    Ok(())
}

fn require_price(price: Decimal) -> AdminResult<()> {
    if price.is_sign_negative() {
        return Err(AdminError::InvalidInput(format!(
            "price must be zero or more, got {}",
            price
        )));
    }
    Ok(())
}

/// Configured client plus the persisted login
pub struct AdminApp<H: HttpClient = NetworkHttpClient> {
    config: AdminConfig,
    store: SessionStore,
    session: Option<Session>,
    client: MenuClient<H>,
}

impl AdminApp<NetworkHttpClient> {
    /// Build from configuration, restoring a stored session if one is valid
    pub fn open(config: AdminConfig) -> AdminResult<Self> {
        config.validate()?;
        let client = config.client_config().build()?;
        Self::with_client(config, client)
    }
}

impl<H: HttpClient + Clone + 'static> AdminApp<H> {
    pub fn with_client(config: AdminConfig, mut client: MenuClient<H>) -> AdminResult<Self> {
        let store = SessionStore::new(&config.session_dir);
        let session = store.load()?;
        client.set_token(session.as_ref().map(|s| s.token.clone()));
        if let Some(session) = &session {
            tracing::debug!(user = %session.claims.name, "Session restored");
        }
        Ok(Self {
            config,
            store,
            session,
            client,
        })
    }

    pub fn config(&self) -> &AdminConfig {
        &self.config
    }

    pub fn client(&self) -> &MenuClient<H> {
        &self.client
    }

    /// Current session, or [`AdminError::NotLoggedIn`]
    pub fn session(&self) -> AdminResult<&Session> {
        self.session.as_ref().ok_or(AdminError::NotLoggedIn)
    }

    fn require_admin(&self) -> AdminResult<&Session> {
        let session = self.session()?;
        if !session.claims.is_admin() {
            return Err(AdminError::Forbidden("administrator role required".into()));
        }
        Ok(session)
    }

    /// Admins reach every restaurant; owners only the one they are bound to
    fn require_restaurant_access(&self, restaurant_id: &str) -> AdminResult<&Session> {
        let session = self.session()?;
        if session.claims.is_admin()
            || session.claims.restaurant_id.as_deref() == Some(restaurant_id)
        {
            return Ok(session);
        }
        Err(AdminError::Forbidden(format!(
            "restaurant {} belongs to another owner",
            restaurant_id
        )))
    }

    pub async fn login(&mut self, email: &str, password: &str) -> AdminResult<&Session> {
        let resp = self.client.login(email, password).await?;
        let session = Session::from_token(resp.token)?;
        self.store.save(&session.token)?;
        tracing::info!(user = %session.claims.name, role = %session.claims.role, "Logged in");
        Ok(self.session.insert(session))
    }

    pub fn logout(&mut self) -> AdminResult<()> {
        self.client.logout();
        self.session = None;
        self.store.clear()?;
        Ok(())
    }

    pub async fn change_password(
        &self,
        current: &str,
        new_password: &str,
        confirm: &str,
    ) -> AdminResult<MessageResponse> {
        self.session()?;
        Ok(self
            .client
            .change_password(current, new_password, confirm)
            .await?)
    }

    pub async fn list_restaurants(&self) -> AdminResult<Vec<Restaurant>> {
        self.session()?;
        Ok(self.client.restaurants().list().await?)
    }

    /// Restaurant with its full menu; image paths resolved against the asset
    /// origin.
    pub async fn show_restaurant(&self, id: &str) -> AdminResult<RestaurantWithMenu> {
        self.session()?;
        let mut menu = self.client.restaurants().get_with_menu(id).await?;
        let base = self.config.asset_url.as_str();
        let resolve = |p: &mut Option<String>| {
            *p = p.as_deref().and_then(|path| crate::assets::resolve_asset_url(base, path));
        };
        resolve(&mut menu.restaurant.logo_url);
        for category in &mut menu.menu_categories {
            resolve(&mut category.category.photo_url);
            for product in &mut category.products {
                resolve(&mut product.photo_url);
            }
        }
        Ok(menu)
    }

    pub async fn create_restaurant(&self, dto: &RestaurantCreate) -> AdminResult<Restaurant> {
        self.require_admin()?;
        Ok(self.client.restaurants().create(dto).await?)
    }

    pub async fn delete_restaurant(&self, id: &str, hard: bool) -> AdminResult<()> {
        self.require_admin()?;
        let api = self.client.restaurants();
        if hard {
            api.hard_delete(id).await?;
        } else {
            api.soft_delete(id).await?;
        }
        Ok(())
    }

    pub async fn restore_restaurant(&self, id: &str) -> AdminResult<()> {
        self.require_admin()?;
        Ok(self.client.restaurants().restore(id).await?)
    }

    pub async fn update_restaurant(&self, id: &str, edit: RestaurantEdit) -> AdminResult<Restaurant> {
        self.require_restaurant_access(id)?;
        let api = self.client.restaurants();
        let mut dto = RestaurantUpdate::from_restaurant(&api.get(id).await?);
        if let Some(name) = edit.name {
            dto.fields.name = name;
        }
        dto.fields.description = edit.description.or(dto.fields.description);
        dto.fields.logo_url = edit.logo_url.or(dto.fields.logo_url);
        dto.fields.phone = edit.phone.or(dto.fields.phone);
        dto.fields.address = edit.address.or(dto.fields.address);
        dto.is_active = edit.is_active.unwrap_or(dto.is_active);
        require_name(&dto.fields.name)?;

        let updated = api.update(id, &dto).await?;
        tracing::info!(restaurant = %id, "Restaurant updated");
        Ok(updated)
    }

    pub async fn create_category(
        &self,
        restaurant_id: &str,
        dto: &MenuCategoryCreate,
    ) -> AdminResult<MenuCategory> {
        self.require_restaurant_access(restaurant_id)?;
        require_name(&dto.name)?;
        Ok(self.client.categories().create(restaurant_id, dto).await?)
    }

    pub async fn update_category(&self, id: &str, edit: CategoryEdit) -> AdminResult<MenuCategory> {
        self.session()?;
        let api = self.client.categories();
        let current = api.get(id).await?;
        self.require_restaurant_access(&current.restaurant_id)?;

        let dto = MenuCategoryUpdate {
            fields: MenuCategoryCreate {
                name: edit.name.unwrap_or(current.name),
                description: edit.description.or(current.description),
                photo_url: edit.photo_url.or(current.photo_url),
                display_order: Some(current.display_order),
            },
            is_active: edit.is_active.unwrap_or(current.is_active),
        };
        require_name(&dto.fields.name)?;
        Ok(api.update(id, &dto).await?)
    }

    pub async fn delete_category(&self, id: &str, hard: bool) -> AdminResult<()> {
        self.session()?;
        let api = self.client.categories();
        if hard {
            api.hard_delete(id).await?;
        } else {
            api.soft_delete(id).await?;
        }
        Ok(())
    }

    pub async fn create_product(&self, category_id: &str, dto: &ProductCreate) -> AdminResult<Product> {
        self.session()?;
        require_name(&dto.name)?;
        require_price(dto.price)?;
        Ok(self.client.products().create(category_id, dto).await?)
    }

    pub async fn update_product(&self, id: &str, edit: ProductEdit) -> AdminResult<Product> {
        self.session()?;
        let api = self.client.products();
        let current = api.get(id).await?;

        let dto = ProductUpdate {
            fields: ProductCreate {
                name: edit.name.unwrap_or(current.name),
                description: edit.description.or(current.description),
                price: edit.price.unwrap_or(current.price),
                photo_url: edit.photo_url.or(current.photo_url),
                display_order: Some(current.display_order),
            },
            is_available: edit.is_available.unwrap_or(current.is_available),
        };
        require_name(&dto.fields.name)?;
        require_price(dto.fields.price)?;
        Ok(api.update(id, &dto).await?)
    }

    pub async fn delete_product(&self, id: &str, hard: bool) -> AdminResult<()> {
        self.session()?;
        let api = self.client.products();
        if hard {
            api.hard_delete(id).await?;
        } else {
            api.soft_delete(id).await?;
        }
        Ok(())
    }

    pub async fn reorder_categories(
        &self,
        restaurant_id: &str,
        category_id: &str,
        to_index: usize,
    ) -> AdminResult<ReorderReport<MenuCategory>> {
        self.session()?;
        run_reorder(
            restaurant_id,
            category_id,
            to_index,
            Arc::new(self.client.clone()),
        )
        .await
    }

    pub async fn reorder_products(
        &self,
        category_id: &str,
        product_id: &str,
        to_index: usize,
    ) -> AdminResult<ReorderReport<Product>> {
        self.session()?;
        run_reorder(category_id, product_id, to_index, Arc::new(self.client.clone())).await
    }

    /// Upload an image, returning its resolved public URL
    pub async fn upload_image(&self, path: &Path) -> AdminResult<String> {
        self.session()?;
        let stored = self.client.upload().upload_image(path).await?;
        Ok(crate::assets::resolve_asset_url(&self.config.asset_url, &stored).unwrap_or(stored))
    }

    pub async fn delete_image(&self, url_or_name: &str) -> AdminResult<()> {
        self.session()?;
        let name = crate::assets::asset_file_name(url_or_name)
            .ok_or_else(|| AdminError::InvalidInput(format!("no file name in {}", url_or_name)))?;
        Ok(self.client.upload().delete_image(name).await?)
    }

    /// Write the public menu QR for a restaurant into `out_dir`
    pub async fn write_qr(&self, restaurant_id: &str, out_dir: &Path, size: u32) -> AdminResult<PathBuf> {
        self.session()?;
        let restaurant = self.client.restaurants().get(restaurant_id).await?;
        qr::write_restaurant_qr(
            &self.config.public_url,
            &restaurant.id,
            &restaurant.name,
            out_dir,
            size,
        )
    }

    pub async fn list_users(&self) -> AdminResult<Vec<User>> {
        self.require_admin()?;
        Ok(self.client.users().list().await?)
    }

    pub async fn create_user(&self, dto: &UserCreate) -> AdminResult<User> {
        self.require_admin()?;
        Ok(self.client.users().create(dto).await?)
    }

    pub async fn reset_password(&self, user_id: &str) -> AdminResult<MessageResponse> {
        self.require_admin()?;
        Ok(self.client.users().reset_password(user_id).await?)
    }
}
