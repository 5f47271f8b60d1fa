//! Background polling for reports computed asynchronously by the backend.
//!
//! A report is created pending and flips to ready exactly once. While any
//! cached report is pending, the whole report collection is re-fetched every
//! interval; the loop ends after a fetch that leaves nothing pending, or
//! once the session can no longer authenticate.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use sd_client::ListFilter;
use sd_core::{EntityId, Resource};
use sd_core::entities::Report;
use tokio::task::JoinHandle;

use crate::error::StoreError;
use crate::events::{Change, EventBus};
use crate::store::ResourceStore;

/// A running poll loop. Dropping the handle aborts it.
#[derive(Debug)]
pub struct PollHandle {
    task: JoinHandle<()>,
}

impl PollHandle {
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the loop to stop on its own.
    pub async fn finished(mut self) {
        let _ = (&mut self.task).await;
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn pending_ids(store: &ResourceStore<Report>) -> HashSet<EntityId> {
    store
        .items()
        .iter()
        .filter(|report| report.is_pending())
        .map(|report| report.id)
        .collect()
}

/// Spawns poll loops over the report store.
#[derive(Clone)]
pub struct ReportPoller {
    store: Arc<ResourceStore<Report>>,
    bus: EventBus,
    interval: Duration,
}

impl ReportPoller {
    #[must_use]
    pub const fn new(store: Arc<ResourceStore<Report>>, bus: EventBus, interval: Duration) -> Self {
        Self {
            store,
            bus,
            interval,
        }
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether the cache holds a report the backend is still computing.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.store.any(Report::is_pending)
    }

    /// Start a poll loop. It exits at once if nothing is pending.
    ///
    /// Must be called within a Tokio runtime.
    #[must_use]
    pub fn spawn(&self) -> PollHandle {
        let poller = self.clone();
        PollHandle {
            task: tokio::spawn(async move { poller.run().await }),
        }
    }

    async fn run(self) {
        tracing::debug!(interval_ms = self.interval.as_millis(), "report polling started");
        loop {
            let pending = pending_ids(&self.store);
            if pending.is_empty() {
                break;
            }
            tokio::time::sleep(self.interval).await;

            match self.store.fetch_all(&ListFilter::new()).await {
                Ok(reports) => {
                    for report in reports.iter().filter(|r| r.is_ready) {
                        if pending.contains(&report.id) {
                            tracing::info!(report_id = report.id, "report ready");
                            self.bus
                                .emit(Report::KIND, Change::ReportReady { id: report.id });
                        }
                    }
                }
                Err(error) if error.is_auth_failure() => {
                    tracing::warn!(%error, "report polling stopped; session is no longer valid");
                    return;
                }
                Err(error) => {
                    // The cache is retained, so the pending set is unchanged.
                    tracing::warn!(%error, "report poll failed; retrying next interval");
                }
            }
        }
        tracing::debug!("report polling stopped; nothing pending");
    }
}

/// A reports screen: owns at most one poll loop, stopped when the view goes.
pub struct ReportsView {
    poller: ReportPoller,
    handle: Mutex<Option<PollHandle>>,
}

impl ReportsView {
    #[must_use]
    pub const fn new(poller: ReportPoller) -> Self {
        Self {
            poller,
            handle: Mutex::new(None),
        }
    }

    /// Load the report collection and start polling if anything is pending.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Client`] if the fetch fails.
    pub async fn open(&self) -> Result<Vec<Report>, StoreError> {
        let reports = self.poller.store.fetch_all(&ListFilter::new()).await?;
        self.ensure_polling();
        Ok(reports)
    }

    /// Start a poll loop unless one is already live or nothing is pending.
    /// Returns whether a loop is live afterwards.
    pub fn ensure_polling(&self) -> bool {
        let mut handle = self.handle.lock();
        if handle.as_ref().is_some_and(|live| !live.is_finished()) {
            return true;
        }
        if !self.poller.has_pending() {
            *handle = None;
            return false;
        }
        *handle = Some(self.poller.spawn());
        true
    }

    #[must_use]
    pub fn is_polling(&self) -> bool {
        self.handle
            .lock()
            .as_ref()
            .is_some_and(|live| !live.is_finished())
    }

    /// Stop polling now. Dropping the view does the same.
    pub fn close(&self) {
        if self.handle.lock().take().is_some() {
            tracing::debug!("report polling cancelled");
        }
    }

    /// Wait until the live poll loop, if any, stops by itself.
    pub async fn settled(&self) {
        let handle = self.handle.lock().take();
        if let Some(handle) = handle {
            handle.finished().await;
        }
    }

    #[must_use]
    pub const fn store(&self) -> &Arc<ResourceStore<Report>> {
        &self.poller.store
    }
}
