//! Transient user notifications derived from reorder events

use std::fmt;

use tokio::sync::broadcast;

use crate::reorder::ReorderEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Warning,
    Error,
}

/// Non-blocking message shown to the user (toast in a UI, a line in the CLI)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotifyLevel,
    pub message: String,
}

impl Notification {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NotifyLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotifyLevel::Error,
            message: message.into(),
        }
    }

    /// Notification for events the user should hear about.
    ///
    /// Only failures surface; stale discards and confirmations stay silent.
    pub fn from_event(event: &ReorderEvent) -> Option<Self> {
        match event {
            ReorderEvent::Reverted { .. } => Some(Self::warning(
                "Order could not be saved; restored the saved order",
            )),
            ReorderEvent::ReloadFailed { message, .. } => Some(Self::error(format!(
                "Order could not be saved and the saved order could not be reloaded: {}",
                message
            ))),
            _ => None,
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.level {
            NotifyLevel::Info => "info",
            NotifyLevel::Warning => "warning",
            NotifyLevel::Error => "error",
        };
        write!(f, "[{}] {}", tag, self.message)
    }
}

/// Drain all events currently queued on `rx` into notifications
pub fn drain_notifications(rx: &mut broadcast::Receiver<ReorderEvent>) -> Vec<Notification> {
    let mut out = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(event) => out.extend(Notification::from_event(&event)),
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Notification receiver lagged");
            }
            Err(_) => break,
        }
    }
    out
}
