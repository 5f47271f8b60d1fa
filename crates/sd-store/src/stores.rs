use std::sync::Arc;

use sd_client::ApiClient;
use sd_core::entities::{BugReport, Project, Report, Sprint, Task, User};
use tokio::sync::broadcast;

use crate::events::{EventBus, StoreEvent};
use crate::store::ResourceStore;

/// The process-wide set of resource stores, sharing one event bus.
///
/// Constructed once at start-up and handed to whatever needs it.
pub struct Stores {
    pub projects: Arc<ResourceStore<Project>>,
    pub sprints: Arc<ResourceStore<Sprint>>,
    pub tasks: Arc<ResourceStore<Task>>,
    pub bug_reports: Arc<ResourceStore<BugReport>>,
    pub reports: Arc<ResourceStore<Report>>,
    pub users: Arc<ResourceStore<User>>,
    api: ApiClient,
    bus: EventBus,
}

impl Stores {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self::with_bus(api, EventBus::default())
    }

    #[must_use]
    pub fn with_bus(api: ApiClient, bus: EventBus) -> Self {
        Self {
            projects: Arc::new(ResourceStore::new(api.clone(), bus.clone())),
            sprints: Arc::new(ResourceStore::new(api.clone(), bus.clone())),
            tasks: Arc::new(ResourceStore::new(api.clone(), bus.clone())),
            bug_reports: Arc::new(ResourceStore::new(api.clone(), bus.clone())),
            reports: Arc::new(ResourceStore::new(api.clone(), bus.clone())),
            users: Arc::new(ResourceStore::new(api.clone(), bus.clone())),
            api,
            bus,
        }
    }

    #[must_use]
    pub const fn api(&self) -> &ApiClient {
        &self.api
    }

    #[must_use]
    pub const fn bus(&self) -> &EventBus {
        &self.bus
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.bus.subscribe()
    }
}
