use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{ReportState, ReportType};
use crate::resource::EntityId;

/// An asynchronously computed report.
///
/// Created with `is_ready = false`; the backend fills `data` and flips the
/// flag exactly once. `data` is opaque until ready and its shape depends on
/// `report_type`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Report {
    pub id: EntityId,
    pub project: EntityId,
    pub report_type: ReportType,
    #[serde(default)]
    pub data: serde_json::Value,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_ready: bool,
    #[serde(default)]
    pub generated_by: Option<EntityId>,
}

impl Report {
    #[must_use]
    pub const fn state(&self) -> ReportState {
        if self.is_ready {
            ReportState::Ready
        } else {
            ReportState::Pending
        }
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        !self.is_ready
    }

    /// Decode the project-status aggregate. `None` while pending or when the
    /// payload has a different shape.
    #[must_use]
    pub fn summary(&self) -> Option<ReportSummary> {
        if !self.is_ready {
            return None;
        }
        serde_json::from_value(self.data.clone()).ok()
    }
}

/// Aggregate computed for PROJECT reports.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ReportSummary {
    #[serde(default)]
    pub project_name: Option<String>,
    pub tasks: TaskCounts,
    pub story_points: StoryPointSummary,
    pub quality: QualitySummary,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TaskCounts {
    pub total: u64,
    pub completed: u64,
    pub in_progress: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StoryPointSummary {
    pub total: u64,
    pub burned: u64,
    /// Rendered by the backend, e.g. `"42.5%"`.
    pub progress_percent: String,
}

impl StoryPointSummary {
    /// Numeric progress parsed from the rendered percentage.
    #[must_use]
    pub fn progress(&self) -> Option<f64> {
        self.progress_percent
            .trim()
            .trim_end_matches('%')
            .parse::<f64>()
            .ok()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct QualitySummary {
    pub active_bugs: u64,
    pub health: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn report(is_ready: bool, data: serde_json::Value) -> Report {
        Report {
            id: 1,
            project: 7,
            report_type: ReportType::Project,
            data,
            created_at: None,
            is_ready,
            generated_by: None,
        }
    }

    #[test]
    fn pending_report_has_no_summary() {
        let pending = report(false, json!({}));
        assert_eq!(pending.state(), ReportState::Pending);
        assert!(pending.summary().is_none());
    }

    #[test]
    fn ready_report_decodes_project_summary() {
        let ready = report(
            true,
            json!({
                "project_name": "Apollo",
                "tasks": {"total": 10, "completed": 4, "in_progress": 3},
                "story_points": {"total": 40, "burned": 17, "progress_percent": "42.5%"},
                "quality": {"active_bugs": 2, "health": "GOOD"}
            }),
        );
        let summary = ready.summary().expect("summary decodes");
        assert_eq!(summary.tasks.completed, 4);
        assert_eq!(summary.story_points.progress(), Some(42.5));
        assert_eq!(summary.quality.health, "GOOD");
    }

    #[test]
    fn ready_report_with_foreign_shape_stays_opaque() {
        let ready = report(true, json!({"by_priority": {"HIGH": 3}}));
        assert_eq!(ready.state(), ReportState::Ready);
        assert!(ready.summary().is_none());
    }
}
