use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::User;
use crate::enums::ProjectStatus;
use crate::resource::EntityId;

/// A project: the unit that owns sprints, tasks, bug reports, and reports.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Project {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub status: ProjectStatus,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub manager: EntityId,
    #[serde(default)]
    pub manager_details: Option<User>,
    #[serde(default)]
    pub members: Vec<EntityId>,
    #[serde(default)]
    pub members_details: Vec<User>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Project {
    /// Membership check. The manager is implicitly a member.
    #[must_use]
    pub fn has_member(&self, user_id: EntityId) -> bool {
        self.manager == user_id || self.members.contains(&user_id)
    }
}
