//! Optimistic reorder coordinator
//!
//! Owns the visible order of one sibling group and keeps it converging with
//! the backend:
//!
//! ```text
//! apply_reorder(intent)
//!     ├─ 1. Apply intent to the visible group (sync, under lock)
//!     ├─ 2. Bump the group sequence number
//!     ├─ 3. Spawn persistence of the full position batch
//!     │      ├─ ok    → Stable (if still the latest batch)
//!     │      └─ error → newer batch issued?  → discard (stale)
//!     │                 otherwise            → Reverting → reload → Stable
//!     └─ 4. Return the task handle
//! ```
//!
//! State is only touched under a `parking_lot` mutex that is never held across
//! an `.await`. Tearing the coordinator down cancels in-flight work and makes
//! any late response a no-op.

use std::sync::Arc;

use menu_client::{ClientError, ClientResult};
use parking_lot::Mutex;
use shared::models::{Orderable, PositionUpdate};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::backend::ReorderBackend;
use super::event::{GroupPhase, ReorderEvent, ReorderOutcome};
use super::group::SiblingGroup;
use super::intent::ReorderIntent;

/// Event broadcast channel capacity
const EVENT_CHANNEL_CAPACITY: usize = 256;

#[derive(Debug)]
struct GroupState<T> {
    group: SiblingGroup<T>,
    phase: GroupPhase,
    /// Sequence number of the most recently issued batch
    issued_seq: u64,
    torn_down: bool,
}

/// Reorder coordinator for one sibling group
pub struct ReorderCoordinator<T, B> {
    state: Arc<Mutex<GroupState<T>>>,
    backend: Arc<B>,
    event_tx: broadcast::Sender<ReorderEvent>,
    cancel: CancellationToken,
}

impl<T, B> std::fmt::Debug for ReorderCoordinator<T, B>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReorderCoordinator")
            .field("state", &*self.state.lock())
            .field("event_tx", &"<broadcast::Sender>")
            .finish()
    }
}

impl<T, B> ReorderCoordinator<T, B>
where
    T: Orderable + Clone + Send + Sync + 'static,
    B: ReorderBackend<T>,
{
    /// Coordinator for an empty group; call [`Self::load`] to populate it.
    pub fn new(parent_id: impl Into<String>, backend: Arc<B>) -> Self {
        Self::with_items(parent_id, Vec::new(), backend)
    }

    /// Coordinator seeded with already-fetched items
    pub fn with_items(parent_id: impl Into<String>, items: Vec<T>, backend: Arc<B>) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            state: Arc::new(Mutex::new(GroupState {
                group: SiblingGroup::new(parent_id, items),
                phase: GroupPhase::Stable,
                issued_seq: 0,
                torn_down: false,
            })),
            backend,
            event_tx,
            cancel: CancellationToken::new(),
        }
    }

    /// Subscribe to lifecycle events
    pub fn subscribe(&self) -> broadcast::Receiver<ReorderEvent> {
        self.event_tx.subscribe()
    }

    /// Replace the group with the backend's authoritative order.
    ///
    /// Results of batches issued before the load no longer touch the group.
    /// A load that a reorder overtakes while in flight is discarded, since its
    /// snapshot may predate that reorder.
    pub async fn load(&self) -> ClientResult<()> {
        let (parent_id, seq_at_start) = {
            let state = self.state.lock();
            (state.group.parent_id().to_string(), state.issued_seq)
        };
        let items = self.backend.reload_group(&parent_id).await?;
        let mut state = self.state.lock();
        if state.torn_down {
            return Ok(());
        }
        if state.issued_seq != seq_at_start {
            tracing::debug!(
                group = %parent_id,
                seq_at_start,
                seq = state.issued_seq,
                "Load overtaken by a newer reorder, discarded"
            );
            return Ok(());
        }
        state.group = SiblingGroup::new(parent_id, items);
        state.phase = GroupPhase::Stable;
        state.issued_seq += 1;
        tracing::debug!(group = %state.group.parent_id(), len = state.group.len(), "Group loaded");
        Ok(())
    }

    pub fn parent_id(&self) -> String {
        self.state.lock().group.parent_id().to_string()
    }

    /// Visible order
    pub fn snapshot(&self) -> Vec<T> {
        self.state.lock().group.items().to_vec()
    }

    pub fn phase(&self) -> GroupPhase {
        self.state.lock().phase
    }

    pub fn is_torn_down(&self) -> bool {
        self.state.lock().torn_down
    }

    /// Apply a reorder to the visible state and persist it in the background.
    ///
    /// The visible group is updated before this returns. Returns `None` when
    /// the intent is a no-op or the coordinator is torn down; otherwise the
    /// handle resolves once the group has settled for this batch. Must be
    /// called from within a tokio runtime.
    pub fn apply_reorder(&self, intent: &ReorderIntent) -> Option<JoinHandle<ReorderOutcome>> {
        let (seq, parent_id, batch) = {
            let mut state = self.state.lock();
            if state.torn_down {
                return None;
            }
            let Some((next, batch)) = state.group.apply(intent) else {
                tracing::debug!(moved = %intent.moved_id, "Reorder intent ignored");
                return None;
            };
            state.group = next;
            state.phase = GroupPhase::OptimisticallyUpdated;
            state.issued_seq += 1;
            (state.issued_seq, state.group.parent_id().to_string(), batch)
        };

        tracing::debug!(group = %parent_id, seq, moved = %intent.moved_id, "Reorder applied");
        self.emit(ReorderEvent::Applied {
            parent_id: parent_id.clone(),
            seq,
        });

        let task = PersistTask {
            state: self.state.clone(),
            backend: self.backend.clone(),
            event_tx: self.event_tx.clone(),
            cancel: self.cancel.clone(),
            parent_id,
            seq,
        };
        Some(tokio::spawn(task.run(batch)))
    }

    /// Detach from the view: in-flight calls are cancelled and late responses
    /// are ignored.
    pub fn teardown(&self) {
        self.state.lock().torn_down = true;
        self.cancel.cancel();
    }

    fn emit(&self, event: ReorderEvent) {
        let _ = self.event_tx.send(event);
    }
}

impl<T, B> Drop for ReorderCoordinator<T, B> {
    fn drop(&mut self) {
        self.state.lock().torn_down = true;
        self.cancel.cancel();
    }
}

/// Background half of one reorder action
struct PersistTask<T, B> {
    state: Arc<Mutex<GroupState<T>>>,
    backend: Arc<B>,
    event_tx: broadcast::Sender<ReorderEvent>,
    cancel: CancellationToken,
    parent_id: String,
    seq: u64,
}

impl<T, B> PersistTask<T, B>
where
    T: Orderable + Clone + Send + Sync + 'static,
    B: ReorderBackend<T>,
{
    async fn run(self, batch: Vec<PositionUpdate>) -> ReorderOutcome {
        let result = tokio::select! {
            _ = self.cancel.cancelled() => return ReorderOutcome::Cancelled,
            r = self.backend.persist_order(&self.parent_id, &batch) => r,
        };

        match result {
            Ok(()) => self.confirm(),
            Err(err) => self.recover(err).await,
        }
    }

    fn confirm(&self) -> ReorderOutcome {
        {
            let mut state = self.state.lock();
            if state.torn_down {
                return ReorderOutcome::Cancelled;
            }
            if state.issued_seq == self.seq {
                state.phase = GroupPhase::Stable;
            }
        }
        tracing::debug!(group = %self.parent_id, seq = self.seq, "Reorder confirmed");
        self.emit(ReorderEvent::Confirmed {
            parent_id: self.parent_id.clone(),
            seq: self.seq,
        });
        ReorderOutcome::Confirmed
    }

    async fn recover(&self, err: ClientError) -> ReorderOutcome {
        {
            let mut state = self.state.lock();
            if state.torn_down {
                return ReorderOutcome::Cancelled;
            }
            if state.issued_seq != self.seq {
                drop(state);
                tracing::debug!(group = %self.parent_id, seq = self.seq, error = %err, "Stale reorder failure discarded");
                self.emit_stale();
                return ReorderOutcome::Stale;
            }
            state.phase = GroupPhase::Reverting;
        }

        tracing::warn!(group = %self.parent_id, seq = self.seq, error = %err, "Reorder failed, reloading group");
        self.emit(ReorderEvent::PersistenceFailed {
            parent_id: self.parent_id.clone(),
            seq: self.seq,
            code: err.error_code(),
            message: err.to_string(),
        });

        let reloaded = tokio::select! {
            _ = self.cancel.cancelled() => return ReorderOutcome::Cancelled,
            r = self.backend.reload_group(&self.parent_id) => r,
        };

        let mut state = self.state.lock();
        if state.torn_down {
            return ReorderOutcome::Cancelled;
        }
        if state.issued_seq != self.seq {
            // A newer batch went out during the reload and now owns the group
            drop(state);
            self.emit_stale();
            return ReorderOutcome::Stale;
        }
        match reloaded {
            Ok(items) => {
                state.group = SiblingGroup::new(self.parent_id.clone(), items);
                state.phase = GroupPhase::Stable;
                drop(state);
                tracing::info!(group = %self.parent_id, seq = self.seq, "Group reverted to backend order");
                self.emit(ReorderEvent::Reverted {
                    parent_id: self.parent_id.clone(),
                    seq: self.seq,
                });
                ReorderOutcome::Reverted
            }
            Err(reload_err) => {
                state.phase = GroupPhase::Stable;
                drop(state);
                tracing::error!(group = %self.parent_id, seq = self.seq, error = %reload_err, "Reload after failed reorder also failed");
                self.emit(ReorderEvent::ReloadFailed {
                    parent_id: self.parent_id.clone(),
                    seq: self.seq,
                    message: reload_err.to_string(),
                });
                ReorderOutcome::ReloadFailed
            }
        }
    }

    fn emit_stale(&self) {
        self.emit(ReorderEvent::StaleDiscarded {
            parent_id: self.parent_id.clone(),
            seq: self.seq,
        });
    }

    fn emit(&self, event: ReorderEvent) {
        let _ = self.event_tx.send(event);
    }
}
