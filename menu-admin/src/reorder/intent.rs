//! Drag-end reorder intent

/// Move of one element inside a sibling group, as reported at drag end.
///
/// `to_index` is `None` when the element was dropped outside any target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderIntent {
    pub moved_id: String,
    pub from_index: usize,
    pub to_index: Option<usize>,
}

impl ReorderIntent {
    pub fn new(moved_id: impl Into<String>, from_index: usize, to_index: usize) -> Self {
        Self {
            moved_id: moved_id.into(),
            from_index,
            to_index: Some(to_index),
        }
    }

    /// Drag released with no drop target
    pub fn dropped_outside(moved_id: impl Into<String>, from_index: usize) -> Self {
        Self {
            moved_id: moved_id.into(),
            from_index,
            to_index: None,
        }
    }
}
