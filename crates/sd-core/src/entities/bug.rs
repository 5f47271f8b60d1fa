use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::User;
use crate::enums::{BugStatus, Priority};
use crate::resource::EntityId;

/// A QA bug report, linked to a project and optionally to a task.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct BugReport {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: BugStatus,
    pub priority: Priority,
    pub project: EntityId,
    #[serde(default)]
    pub task: Option<EntityId>,
    pub reporter: EntityId,
    #[serde(default)]
    pub reporter_details: Option<User>,
    /// Server-side resolution flag; [`BugReport::is_active`] reads `status`.
    #[serde(default)]
    pub is_resolved: Option<bool>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl BugReport {
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.status.is_active()
    }
}
