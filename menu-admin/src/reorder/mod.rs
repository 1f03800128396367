//! Optimistic reordering of menu categories and products
//!
//! [`SiblingGroup::apply`] is the pure step; [`ReorderCoordinator`] wraps it
//! with background persistence, sequence numbering and rollback.

mod backend;
mod coordinator;
mod event;
mod group;
mod intent;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::ReorderBackend;
pub use coordinator::ReorderCoordinator;
pub use event::{GroupPhase, ReorderEvent, ReorderOutcome};
pub use group::{SiblingGroup, reindex};
pub use intent::ReorderIntent;
