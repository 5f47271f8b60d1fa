//! Change notification for the resource stores.
//!
//! Every store mutation emits one [`StoreEvent`] on a shared broadcast
//! channel. Rendering layers subscribe and re-read the store they care about.

use sd_core::{EntityId, ResourceKind};
use serde::Serialize;
use tokio::sync::broadcast;

const DEFAULT_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum Change {
    /// A collection fetch started.
    Loading,
    /// The cached collection was replaced by a fetch result.
    Replaced { count: usize },
    Inserted { id: EntityId },
    Updated { id: EntityId },
    Removed { id: EntityId },
    /// The cached "current" singleton changed (`None` when cleared).
    CurrentChanged { id: Option<EntityId> },
    /// A collection fetch failed; the previous cache is retained.
    Failed { message: String },
    /// Entries dropped because something they depend on went away.
    Invalidated { count: usize },
    /// A pending report was observed ready.
    ReportReady { id: EntityId },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreEvent {
    pub kind: ResourceKind,
    #[serde(flatten)]
    pub change: Change,
}

/// Broadcasts store events to every subscriber.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<StoreEvent>,
}

impl EventBus {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn emit(&self, kind: ResourceKind, change: Change) {
        tracing::trace!(%kind, ?change, "store event");
        // No receivers is fine.
        let _ = self.tx.send(StoreEvent { kind, change });
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
