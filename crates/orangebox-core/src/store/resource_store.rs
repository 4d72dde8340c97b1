// ── Reactive per-resource store ──
//
// Holds the displayed page for one resource type. Every mutation goes
// through the pure reducer and, when it changed something, republishes
// the snapshot to `watch` subscribers.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use super::reducer::{Mutation, Slice, reduce};
use crate::model::{Entity, EntityId, PageInfo};

pub struct ResourceStore<T: Entity + Clone + Send + Sync + 'static> {
    snapshot: watch::Sender<Arc<Slice<T>>>,
}

impl<T: Entity + Clone + Send + Sync + 'static> ResourceStore<T> {
    pub fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Slice::default()));
        Self { snapshot }
    }

    /// Apply a mutation. Returns `false` for no-ops, which publish nothing.
    pub fn apply(&self, mutation: Mutation<T>) -> bool {
        let mut changed = false;
        // `send_if_modified` only wakes subscribers when the reducer did something.
        self.snapshot.send_if_modified(|snap| {
            changed = reduce(Arc::make_mut(snap), mutation);
            changed
        });
        if !changed {
            debug!("store mutation was a no-op");
        }
        changed
    }

    pub fn replace_all(&self, items: Vec<T>, page: PageInfo) {
        self.apply(Mutation::ReplaceAll { items, page });
    }

    pub fn append(&self, entity: T) {
        self.apply(Mutation::Append(entity));
    }

    pub fn replace_by_id(&self, entity: T) -> bool {
        self.apply(Mutation::ReplaceById(entity))
    }

    pub fn remove_by_id(&self, id: EntityId) -> bool {
        self.apply(Mutation::RemoveById(id))
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Current snapshot (cheap `Arc` clone).
    pub fn snapshot(&self) -> Arc<Slice<T>> {
        self.snapshot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<Slice<T>>> {
        self.snapshot.subscribe()
    }

    pub fn get(&self, id: EntityId) -> Option<T> {
        self.snapshot
            .borrow()
            .items
            .iter()
            .find(|e| e.id() == id)
            .cloned()
    }

    pub fn page_info(&self) -> PageInfo {
        self.snapshot.borrow().page.clone()
    }

    pub fn len(&self) -> usize {
        self.snapshot.borrow().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Entity + Clone + Send + Sync + 'static> Default for ResourceStore<T> {
    fn default() -> Self {
        Self::new()
    }
}
