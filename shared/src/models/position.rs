//! Display-order primitives shared by categories and products

use serde::{Deserialize, Serialize};

/// An entity ranked by `display_order` inside a sibling group
/// (a restaurant's categories, or a category's products).
pub trait Orderable {
    /// Stable identifier, unique within the group
    fn id(&self) -> &str;

    /// Current display order (0-based once normalized)
    fn display_order(&self) -> i32;

    /// Overwrite the display order
    fn set_display_order(&mut self, order: i32);
}

/// One entry of a position update batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionUpdate {
    pub id: String,
    pub display_order: i32,
}

impl PositionUpdate {
    pub fn new(id: impl Into<String>, display_order: i32) -> Self {
        Self {
            id: id.into(),
            display_order,
        }
    }
}
