//! Entity structs for every server-owned sprintdesk resource.
//!
//! Each struct mirrors the backend's JSON representation. Read-only fields the
//! backend may omit (nested `*_details`, timestamps) default to empty so a
//! minimal payload still decodes. All structs derive `Serialize`,
//! `Deserialize`, and `JsonSchema`.

mod bug;
mod project;
mod report;
mod sprint;
mod task;
mod user;

pub use bug::BugReport;
pub use project::Project;
pub use report::{Report, ReportSummary, StoryPointSummary, TaskCounts, QualitySummary};
pub use sprint::Sprint;
pub use task::Task;
pub use user::User;
