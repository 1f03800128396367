//! In-memory backend for coordinator tests
//!
//! Persist and reload calls can be gated on oneshot channels so a test
//! decides when, and with what result, each call resolves.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use menu_client::{ClientError, ClientResult};
use parking_lot::Mutex;
use shared::models::{Orderable, PositionUpdate};
use tokio::sync::oneshot;

use super::backend::ReorderBackend;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: String,
    pub display_order: i32,
}

impl Item {
    pub fn new(id: &str, display_order: i32) -> Self {
        Self {
            id: id.to_string(),
            display_order,
        }
    }
}

impl Orderable for Item {
    fn id(&self) -> &str {
        &self.id
    }

    fn display_order(&self) -> i32 {
        self.display_order
    }

    fn set_display_order(&mut self, order: i32) {
        self.display_order = order;
    }
}

type PersistGate = oneshot::Receiver<Result<(), String>>;

#[derive(Default)]
pub struct GatedBackend {
    server: Mutex<Vec<Item>>,
    persist_gates: Mutex<VecDeque<PersistGate>>,
    reload_gate: Mutex<Option<oneshot::Receiver<()>>>,
    persisted: Mutex<Vec<Vec<PositionUpdate>>>,
    reloads: AtomicUsize,
    fail_reloads: AtomicBool,
}

impl GatedBackend {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            server: Mutex::new(items),
            ..Default::default()
        }
    }

    /// Gate the next persist call that has no gate yet
    pub fn gate_persist(&self) -> oneshot::Sender<Result<(), String>> {
        let (tx, rx) = oneshot::channel();
        self.persist_gates.lock().push_back(rx);
        tx
    }

    /// Gate the next reload call
    pub fn gate_reload(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.reload_gate.lock() = Some(rx);
        tx
    }

    pub fn fail_reloads(&self) {
        self.fail_reloads.store(true, Ordering::SeqCst);
    }

    pub fn persisted(&self) -> Vec<Vec<PositionUpdate>> {
        self.persisted.lock().clone()
    }

    pub fn reload_count(&self) -> usize {
        self.reloads.load(Ordering::SeqCst)
    }

    pub fn server_items(&self) -> Vec<Item> {
        let mut items = self.server.lock().clone();
        items.sort_by_key(|i| i.display_order);
        items
    }

    fn store(&self, updates: &[PositionUpdate]) {
        let mut server = self.server.lock();
        for update in updates {
            if let Some(item) = server.iter_mut().find(|i| i.id == update.id) {
                item.display_order = update.display_order;
            }
        }
    }
}

#[async_trait]
impl ReorderBackend<Item> for GatedBackend {
    async fn persist_order(&self, _parent_id: &str, updates: &[PositionUpdate]) -> ClientResult<()> {
        self.persisted.lock().push(updates.to_vec());
        let gate = self.persist_gates.lock().pop_front();
        if let Some(gate) = gate {
            match gate.await {
                Ok(Ok(())) => {}
                Ok(Err(message)) => return Err(ClientError::Internal(message)),
                Err(_) => return Err(ClientError::Internal("gate dropped".into())),
            }
        }
        self.store(updates);
        Ok(())
    }

    async fn reload_group(&self, _parent_id: &str) -> ClientResult<Vec<Item>> {
        // Snapshot taken when the request starts, as a real backend would
        let snapshot = self.server.lock().clone();
        self.reloads.fetch_add(1, Ordering::SeqCst);
        let gate = self.reload_gate.lock().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if self.fail_reloads.load(Ordering::SeqCst) {
            return Err(ClientError::Internal("reload unavailable".into()));
        }
        Ok(snapshot)
    }
}

/// Yield to spawned tasks until `cond` holds
pub async fn wait_for(cond: impl Fn() -> bool) {
    for _ in 0..1000 {
        if cond() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition not reached");
}
