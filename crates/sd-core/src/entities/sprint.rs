use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::resource::EntityId;

/// A time-boxed iteration within a project.
///
/// At most one sprint per project is active at a time; the backend enforces it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Sprint {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub goal: String,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_active: bool,
    pub project: EntityId,
}
