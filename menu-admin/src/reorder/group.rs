//! Sibling groups and the pure reorder step

use shared::models::{Orderable, PositionUpdate};

use super::intent::ReorderIntent;

/// Ordered children of one parent (a restaurant's categories or a category's
/// products). Rebuilt from authoritative data on every reload.
#[derive(Debug, Clone, PartialEq)]
pub struct SiblingGroup<T> {
    parent_id: String,
    items: Vec<T>,
}

impl<T: Orderable + Clone> SiblingGroup<T> {
    /// Build a group from backend data, in display order (ties broken by id).
    pub fn new(parent_id: impl Into<String>, mut items: Vec<T>) -> Self {
        items.sort_by(|a, b| {
            a.display_order()
                .cmp(&b.display_order())
                .then_with(|| a.id().cmp(b.id()))
        });
        Self {
            parent_id: parent_id.into(),
            items,
        }
    }

    pub fn parent_id(&self) -> &str {
        &self.parent_id
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.id()).collect()
    }

    /// Apply `intent`, returning the reordered group and the batch that
    /// persists it.
    ///
    /// Returns `None` for a no-op: no drop target, `from == to`, an index out
    /// of range, or a moved id that is not at `from_index`.
    pub fn apply(&self, intent: &ReorderIntent) -> Option<(SiblingGroup<T>, Vec<PositionUpdate>)> {
        let to = intent.to_index?;
        let from = intent.from_index;
        if from == to || from >= self.items.len() || to >= self.items.len() {
            return None;
        }
        if self.items[from].id() != intent.moved_id {
            return None;
        }

        let mut items = self.items.clone();
        let moved = items.remove(from);
        items.insert(to, moved);
        reindex(&mut items);

        let next = SiblingGroup {
            parent_id: self.parent_id.clone(),
            items,
        };
        let batch = next.batch();
        Some((next, batch))
    }

    /// Position batch describing the current order
    pub fn batch(&self) -> Vec<PositionUpdate> {
        self.items
            .iter()
            .map(|i| PositionUpdate::new(i.id(), i.display_order()))
            .collect()
    }
}

/// Renumber `items` to 0..N-1 in slice order, whatever the prior values
pub fn reindex<T: Orderable>(items: &mut [T]) {
    for (index, item) in items.iter_mut().enumerate() {
        item.set_display_order(index as i32);
    }
}
