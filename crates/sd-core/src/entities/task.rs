use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{BugReport, User};
use crate::enums::{Priority, TaskStatus};
use crate::estimate::StoryPoints;
use crate::resource::EntityId;

/// A unit of work on the board. `sprint: None` means the task sits in the backlog.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Task {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: TaskStatus,
    pub priority: Priority,
    pub story_points: StoryPoints,
    pub project: EntityId,
    #[serde(default)]
    pub sprint: Option<EntityId>,
    #[serde(default)]
    pub assignee: Option<EntityId>,
    #[serde(default)]
    pub assignee_details: Option<User>,
    /// Read-mostly from the task's perspective; refreshed by re-fetching tasks.
    #[serde(default)]
    pub bugs: Vec<BugReport>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    #[must_use]
    pub const fn is_backlog(&self) -> bool {
        self.sprint.is_none()
    }

    /// Bugs that are neither FIXED nor CLOSED.
    #[must_use]
    pub fn active_bug_count(&self) -> usize {
        self.bugs.iter().filter(|bug| bug.is_active()).count()
    }
}
