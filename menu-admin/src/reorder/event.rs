//! Reorder lifecycle events

use shared::ErrorCode;

/// Per-group state machine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupPhase {
    /// Local order matches what the backend last confirmed or returned
    Stable,
    /// A batch is in flight and the local order is ahead of the backend
    OptimisticallyUpdated,
    /// Persistence failed; the authoritative group is being reloaded
    Reverting,
}

/// How one reorder action ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderOutcome {
    /// Backend accepted the batch
    Confirmed,
    /// Backend rejected the batch; local state replaced by a reload
    Reverted,
    /// Batch failed but a newer one had been issued; result discarded
    Stale,
    /// Owning view torn down before the response arrived
    Cancelled,
    /// Batch and the follow-up reload both failed; optimistic order kept
    ReloadFailed,
}

/// Broadcast to subscribers as a group moves through its phases
#[derive(Debug, Clone, PartialEq)]
pub enum ReorderEvent {
    Applied {
        parent_id: String,
        seq: u64,
    },
    Confirmed {
        parent_id: String,
        seq: u64,
    },
    PersistenceFailed {
        parent_id: String,
        seq: u64,
        code: ErrorCode,
        message: String,
    },
    Reverted {
        parent_id: String,
        seq: u64,
    },
    StaleDiscarded {
        parent_id: String,
        seq: u64,
    },
    ReloadFailed {
        parent_id: String,
        seq: u64,
        message: String,
    },
}

impl ReorderEvent {
    pub fn seq(&self) -> u64 {
        match self {
            ReorderEvent::Applied { seq, .. }
            | ReorderEvent::Confirmed { seq, .. }
            | ReorderEvent::PersistenceFailed { seq, .. }
            | ReorderEvent::Reverted { seq, .. }
            | ReorderEvent::StaleDiscarded { seq, .. }
            | ReorderEvent::ReloadFailed { seq, .. } => *seq,
        }
    }

    pub fn parent_id(&self) -> &str {
        match self {
            ReorderEvent::Applied { parent_id, .. }
            | ReorderEvent::Confirmed { parent_id, .. }
            | ReorderEvent::PersistenceFailed { parent_id, .. }
            | ReorderEvent::Reverted { parent_id, .. }
            | ReorderEvent::StaleDiscarded { parent_id, .. }
            | ReorderEvent::ReloadFailed { parent_id, .. } => parent_id,
        }
    }
}
