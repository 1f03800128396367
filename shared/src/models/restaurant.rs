//! Restaurant Model

use serde::{Deserialize, Serialize};

use super::category::MenuCategoryWithProducts;

/// Restaurant entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// Relative asset path (e.g. `/uploads/logo.png`) or absolute URL
    pub logo_url: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub is_active: bool,
    #[serde(default)]
    pub is_deleted: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Restaurant with its full menu tree, as returned by `/restaurants/{id}/menu`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantWithMenu {
    #[serde(flatten)]
    pub restaurant: Restaurant,
    #[serde(default)]
    pub menu_categories: Vec<MenuCategoryWithProducts>,
}

/// Create restaurant payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Update restaurant payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantUpdate {
    #[serde(flatten)]
    pub fields: RestaurantCreate,
    pub is_active: bool,
}

impl RestaurantUpdate {
    /// Start an update from the current state of a restaurant
    pub fn from_restaurant(r: &Restaurant) -> Self {
        Self {
            fields: RestaurantCreate {
                name: r.name.clone(),
                description: r.description.clone(),
                logo_url: r.logo_url.clone(),
                phone: r.phone.clone(),
                address: r.address.clone(),
            },
            is_active: r.is_active,
        }
    }
}
