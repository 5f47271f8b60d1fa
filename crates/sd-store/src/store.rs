//! One cache per entity kind.
//!
//! The cache mirrors the backend: every successful write replaces the local
//! copy with the server's response body. Concurrent operations may race; the
//! response that completes last decides the cache contents. The lock is only
//! taken after a request resolves, never across an `.await`.

use parking_lot::RwLock;
use sd_client::{ApiClient, ListFilter};
use sd_core::{EntityId, Resource, ResourceKind};

use crate::error::StoreError;
use crate::events::{Change, EventBus};

/// Tasks are appended on create; every other kind is prepended.
const fn appends_on_create(kind: ResourceKind) -> bool {
    matches!(kind, ResourceKind::Tasks)
}

struct State<E> {
    items: Vec<E>,
    current: Option<E>,
    in_flight: usize,
    last_error: Option<String>,
}

impl<E> Default for State<E> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            current: None,
            in_flight: 0,
            last_error: None,
        }
    }
}

/// Point-in-time copy of a store, for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<E> {
    pub items: Vec<E>,
    pub current: Option<E>,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct ResourceStore<E: Resource> {
    api: ApiClient,
    bus: EventBus,
    state: RwLock<State<E>>,
}

impl<E: Resource> ResourceStore<E> {
    #[must_use]
    pub fn new(api: ApiClient, bus: EventBus) -> Self {
        Self {
            api,
            bus,
            state: RwLock::new(State::default()),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ResourceKind {
        E::KIND
    }

    fn emit(&self, change: Change) {
        self.bus.emit(E::KIND, change);
    }

    /// Replace the cached collection with the server's result for `filter`.
    ///
    /// On failure the previous collection is kept and the error is recorded.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Client`] with the transport failure.
    pub async fn fetch_all(&self, filter: &ListFilter) -> Result<Vec<E>, StoreError> {
        {
            let mut state = self.state.write();
            state.in_flight += 1;
            state.last_error = None;
        }
        self.emit(Change::Loading);

        let result = self.api.list::<E>(filter).await;

        let mut state = self.state.write();
        state.in_flight = state.in_flight.saturating_sub(1);
        match result {
            Ok(items) => {
                state.items.clone_from(&items);
                drop(state);
                tracing::debug!(kind = %E::KIND, count = items.len(), "collection replaced");
                self.emit(Change::Replaced { count: items.len() });
                Ok(items)
            }
            Err(error) => {
                let message = error.to_string();
                state.last_error = Some(message.clone());
                drop(state);
                tracing::warn!(kind = %E::KIND, %error, "collection fetch failed");
                self.emit(Change::Failed { message });
                Err(error.into())
            }
        }
    }

    /// Fetch one entity into the "current" slot used by detail views.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Client`]; the current slot is left as it was.
    pub async fn fetch_one(&self, id: EntityId) -> Result<E, StoreError> {
        let entity = self.api.get::<E>(id).await?;
        self.state.write().current = Some(entity.clone());
        self.emit(Change::CurrentChanged { id: Some(id) });
        Ok(entity)
    }

    /// Create on the server, then insert the returned entity.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Client`]; the cache is unchanged.
    pub async fn create(&self, draft: &E::Draft) -> Result<E, StoreError> {
        let entity = self.api.create::<E>(draft).await?;
        self.insert(entity.clone());
        Ok(entity)
    }

    /// Partial update; the cached entry and matching current are replaced by
    /// the server's response.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Client`]; the cache is unchanged.
    pub async fn update(&self, id: EntityId, patch: &E::Patch) -> Result<E, StoreError> {
        let entity = self.api.update::<E>(id, patch).await?;
        self.replace(entity.clone());
        Ok(entity)
    }

    /// # Errors
    ///
    /// Returns [`StoreError::Client`]; the cache is unchanged.
    pub async fn delete(&self, id: EntityId) -> Result<EntityId, StoreError> {
        self.api.delete::<E>(id).await?;
        self.remove(id);
        Ok(id)
    }

    /// Insert a server-confirmed entity at the kind's insertion end.
    pub fn insert(&self, entity: E) {
        let id = entity.id();
        {
            let mut state = self.state.write();
            if appends_on_create(E::KIND) {
                state.items.push(entity);
            } else {
                state.items.insert(0, entity);
            }
        }
        self.emit(Change::Inserted { id });
    }

    /// Replace the cached copy (list entry and current) with `entity`.
    /// Entities not in the list are not added. Returns whether anything
    /// was replaced; nothing is emitted otherwise.
    pub fn replace(&self, entity: E) -> bool {
        let id = entity.id();
        let touched = {
            let mut state = self.state.write();
            let mut touched = false;
            if let Some(slot) = state.items.iter_mut().find(|item| item.id() == id) {
                *slot = entity.clone();
                touched = true;
            }
            if state.current.as_ref().is_some_and(|current| current.id() == id) {
                state.current = Some(entity);
                touched = true;
            }
            touched
        };
        if touched {
            self.emit(Change::Updated { id });
        }
        touched
    }

    /// Drop `id` from the list, clearing current if it matches.
    pub fn remove(&self, id: EntityId) {
        let cleared_current = {
            let mut state = self.state.write();
            state.items.retain(|item| item.id() != id);
            let matches = state.current.as_ref().is_some_and(|current| current.id() == id);
            if matches {
                state.current = None;
            }
            matches
        };
        self.emit(Change::Removed { id });
        if cleared_current {
            self.emit(Change::CurrentChanged { id: None });
        }
    }

    /// Apply a local edit to the cached copies of `id` ahead of server
    /// confirmation. Returns whether anything was cached.
    pub fn patch_cached(&self, id: EntityId, edit: impl Fn(&mut E)) -> bool {
        let touched = {
            let mut state = self.state.write();
            let mut touched = false;
            if let Some(item) = state.items.iter_mut().find(|item| item.id() == id) {
                edit(item);
                touched = true;
            }
            if let Some(current) = state.current.as_mut().filter(|current| current.id() == id) {
                edit(current);
                touched = true;
            }
            touched
        };
        if touched {
            self.emit(Change::Updated { id });
        }
        touched
    }

    /// Drop every cached entry matching `predicate`. Returns how many went.
    pub fn invalidate_where(&self, predicate: impl Fn(&E) -> bool) -> usize {
        let (removed, cleared_current) = {
            let mut state = self.state.write();
            let before = state.items.len();
            state.items.retain(|item| !predicate(item));
            let cleared = state.current.as_ref().is_some_and(&predicate);
            if cleared {
                state.current = None;
            }
            (before - state.items.len(), cleared)
        };
        if removed > 0 {
            self.emit(Change::Invalidated { count: removed });
        }
        if cleared_current {
            self.emit(Change::CurrentChanged { id: None });
        }
        removed
    }

    #[must_use]
    pub fn items(&self) -> Vec<E> {
        self.state.read().items.clone()
    }

    #[must_use]
    pub fn current(&self) -> Option<E> {
        self.state.read().current.clone()
    }

    /// Cached copy of `id` from the list, falling back to current.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<E> {
        let state = self.state.read();
        state
            .items
            .iter()
            .find(|item| item.id() == id)
            .or_else(|| state.current.as_ref().filter(|current| current.id() == id))
            .cloned()
    }

    /// Whether any entity in the list satisfies `predicate`.
    pub fn any(&self, predicate: impl Fn(&E) -> bool) -> bool {
        self.state.read().items.iter().any(predicate)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.read().items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.read().items.is_empty()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.read().in_flight > 0
    }

    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.state.read().last_error.clone()
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot<E> {
        let state = self.state.read();
        Snapshot {
            items: state.items.clone(),
            current: state.current.clone(),
            loading: state.in_flight > 0,
            error: state.last_error.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_tasks_append() {
        assert!(appends_on_create(ResourceKind::Tasks));
        for kind in [
            ResourceKind::Projects,
            ResourceKind::Sprints,
            ResourceKind::BugReports,
            ResourceKind::Reports,
            ResourceKind::Users,
        ] {
            assert!(!appends_on_create(kind), "{kind} should prepend");
        }
    }
}
