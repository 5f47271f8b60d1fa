//! # sd-store
//!
//! Client-side state for sprintdesk.
//!
//! - [`ResourceStore`]: one cache per entity kind with fetch/create/update/delete
//!   that write the server's response into the cache
//! - [`EventBus`]: change notification for every store mutation
//! - [`SyncCoordinator`]: cross-store invalidation and report polling
//! - [`FormSession`]: submit sequencing for create/edit forms
//! - [`board`]: Kanban projection of the task cache

pub mod board;
pub mod coordinator;
pub mod error;
pub mod events;
pub mod form;
pub mod polling;
pub mod store;
pub mod stores;

pub use coordinator::SyncCoordinator;
pub use error::StoreError;
pub use events::{Change, EventBus, StoreEvent};
pub use form::{FormSession, FormState};
pub use polling::{PollHandle, ReportPoller, ReportsView};
pub use store::{ResourceStore, Snapshot};
pub use stores::Stores;
