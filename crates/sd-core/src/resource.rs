//! Resource kinds and the trait binding an entity to its REST collection.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::drafts::{
    BugReportPatch, NewBugReport, NewProject, NewReport, NewSprint, NewTask, NewUser,
    ProjectPatch, ReportPatch, SprintPatch, TaskPatch, UserPatch,
};
use crate::entities::{BugReport, Project, Report, Sprint, Task, User};

/// Numeric primary key assigned by the backend.
pub type EntityId = i64;

/// Every entity kind the client caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Projects,
    Sprints,
    Tasks,
    BugReports,
    Reports,
    Users,
}

impl ResourceKind {
    /// Collection path relative to the API base URL, with trailing slash.
    #[must_use]
    pub const fn collection_path(self) -> &'static str {
        match self {
            Self::Projects => "projects/",
            Self::Sprints => "sprints/",
            Self::Tasks => "tasks/",
            Self::BugReports => "bugs/",
            Self::Reports => "reports/",
            Self::Users => "users/",
        }
    }

    /// Item path, e.g. `tasks/12/`.
    #[must_use]
    pub fn item_path(self, id: EntityId) -> String {
        format!("{}{id}/", self.collection_path())
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::Sprints => "sprints",
            Self::Tasks => "tasks",
            Self::BugReports => "bug_reports",
            Self::Reports => "reports",
            Self::Users => "users",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A server-owned entity with a REST collection.
pub trait Resource: Clone + Send + Sync + DeserializeOwned + Serialize + 'static {
    /// Body sent on create.
    type Draft: Serialize + Send + Sync;
    /// Body sent on partial update.
    type Patch: Serialize + Send + Sync;

    const KIND: ResourceKind;

    fn id(&self) -> EntityId;

    /// Owning project, used to drop dependent cache entries when a project goes away.
    fn project_id(&self) -> Option<EntityId> {
        None
    }
}

impl Resource for Project {
    type Draft = NewProject;
    type Patch = ProjectPatch;
    const KIND: ResourceKind = ResourceKind::Projects;

    fn id(&self) -> EntityId {
        self.id
    }

    fn project_id(&self) -> Option<EntityId> {
        Some(self.id)
    }
}

impl Resource for Sprint {
    type Draft = NewSprint;
    type Patch = SprintPatch;
    const KIND: ResourceKind = ResourceKind::Sprints;

    fn id(&self) -> EntityId {
        self.id
    }

    fn project_id(&self) -> Option<EntityId> {
        Some(self.project)
    }
}

impl Resource for Task {
    type Draft = NewTask;
    type Patch = TaskPatch;
    const KIND: ResourceKind = ResourceKind::Tasks;

    fn id(&self) -> EntityId {
        self.id
    }

    fn project_id(&self) -> Option<EntityId> {
        Some(self.project)
    }
}

impl Resource for BugReport {
    type Draft = NewBugReport;
    type Patch = BugReportPatch;
    const KIND: ResourceKind = ResourceKind::BugReports;

    fn id(&self) -> EntityId {
        self.id
    }

    fn project_id(&self) -> Option<EntityId> {
        Some(self.project)
    }
}

impl Resource for Report {
    type Draft = NewReport;
    type Patch = ReportPatch;
    const KIND: ResourceKind = ResourceKind::Reports;

    fn id(&self) -> EntityId {
        self.id
    }

    fn project_id(&self) -> Option<EntityId> {
        Some(self.project)
    }
}

impl Resource for User {
    type Draft = NewUser;
    type Patch = UserPatch;
    const KIND: ResourceKind = ResourceKind::Users;

    fn id(&self) -> EntityId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_paths_keep_trailing_slash() {
        assert_eq!(ResourceKind::Tasks.item_path(12), "tasks/12/");
        assert_eq!(ResourceKind::BugReports.item_path(3), "bugs/3/");
    }

    #[test]
    fn every_kind_has_distinct_path() {
        let kinds = [
            ResourceKind::Projects,
            ResourceKind::Sprints,
            ResourceKind::Tasks,
            ResourceKind::BugReports,
            ResourceKind::Reports,
            ResourceKind::Users,
        ];
        let mut paths: Vec<_> = kinds.iter().map(|k| k.collection_path()).collect();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), kinds.len());
    }
}
