//! Policy above the individual stores: cross-invalidation after state
//! changes that ripple into other kinds, and report polling.

use std::sync::Arc;
use std::time::Duration;

use sd_client::ListFilter;
use sd_config::SyncConfig;
use sd_core::drafts::{BugReportPatch, NewReport};
use sd_core::entities::{BugReport, Report, Sprint};
use sd_core::enums::BugStatus;
use sd_core::responses::SprintCompletion;
use sd_core::{EntityId, Resource as _};

use crate::error::StoreError;
use crate::polling::{ReportPoller, ReportsView};
use crate::stores::Stores;

pub struct SyncCoordinator {
    stores: Arc<Stores>,
    poll_interval: Duration,
}

impl SyncCoordinator {
    #[must_use]
    pub fn new(stores: Arc<Stores>, config: &SyncConfig) -> Self {
        Self::with_interval(stores, config.report_poll_interval())
    }

    #[must_use]
    pub const fn with_interval(stores: Arc<Stores>, poll_interval: Duration) -> Self {
        Self {
            stores,
            poll_interval,
        }
    }

    #[must_use]
    pub const fn stores(&self) -> &Arc<Stores> {
        &self.stores
    }

    /// Owning project of a sprint: from the cache, else from the backend.
    async fn sprint_project(&self, id: EntityId) -> Result<EntityId, StoreError> {
        if let Some(sprint) = self.stores.sprints.get(id) {
            return Ok(sprint.project);
        }
        let sprint = self.stores.api().get::<Sprint>(id).await?;
        Ok(sprint.project)
    }

    /// Complete a sprint.
    ///
    /// On success the cached sprint is marked inactive at once, then the
    /// owning project's tasks are re-fetched since unfinished ones moved to
    /// the backlog. A failed re-fetch is left to the task store's error
    /// state; the completion itself still succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the sprint cannot be resolved or the action
    /// is rejected; no cache is touched in that case.
    pub async fn complete_sprint(&self, id: EntityId) -> Result<SprintCompletion, StoreError> {
        let project = self.sprint_project(id).await?;
        let completion = self.stores.api().complete_sprint(id).await?;

        self.stores.sprints.patch_cached(id, |sprint| sprint.is_active = false);
        tracing::info!(
            sprint_id = id,
            moved = completion.moved_tasks_count,
            "sprint completed"
        );

        if let Err(error) = self
            .stores
            .tasks
            .fetch_all(&ListFilter::new().project(project))
            .await
        {
            tracing::warn!(%error, project, "task re-fetch after sprint completion failed");
        }
        Ok(completion)
    }

    /// Delete a project and drop every cached sprint, task, bug report, and
    /// report that belonged to it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the delete is rejected; nothing is dropped.
    pub async fn delete_project(&self, id: EntityId) -> Result<EntityId, StoreError> {
        self.stores.projects.delete(id).await?;

        let belongs = |project: Option<EntityId>| project == Some(id);
        let dropped = self.stores.sprints.invalidate_where(|e| belongs(e.project_id()))
            + self.stores.tasks.invalidate_where(|e| belongs(e.project_id()))
            + self.stores.bug_reports.invalidate_where(|e| belongs(e.project_id()))
            + self.stores.reports.invalidate_where(|e| belongs(e.project_id()));
        tracing::info!(project = id, dropped, "project deleted");
        Ok(id)
    }

    /// Change a bug's status, then re-fetch its project's tasks so their
    /// embedded bug lists and active counts follow.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the update is rejected.
    pub async fn update_bug_status(
        &self,
        id: EntityId,
        status: BugStatus,
    ) -> Result<BugReport, StoreError> {
        let patch = BugReportPatch {
            status: Some(status),
            ..BugReportPatch::default()
        };
        let bug = self.stores.bug_reports.update(id, &patch).await?;

        if let Err(error) = self
            .stores
            .tasks
            .fetch_all(&ListFilter::new().project(bug.project))
            .await
        {
            tracing::warn!(%error, project = bug.project, "task re-fetch after bug update failed");
        }
        Ok(bug)
    }

    #[must_use]
    pub fn report_poller(&self) -> ReportPoller {
        ReportPoller::new(
            Arc::clone(&self.stores.reports),
            self.stores.bus().clone(),
            self.poll_interval,
        )
    }

    /// A fresh reports view with its own (not yet running) poll loop.
    #[must_use]
    pub fn reports_view(&self) -> ReportsView {
        ReportsView::new(self.report_poller())
    }

    /// Request a report, then make sure `view` is polling for it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend rejects the request.
    pub async fn create_report(
        &self,
        view: &ReportsView,
        draft: &NewReport,
    ) -> Result<Report, StoreError> {
        let report = self.stores.reports.create(draft).await?;
        tracing::info!(report_id = report.id, report_type = %report.report_type, "report requested");
        view.ensure_polling();
        Ok(report)
    }
}
