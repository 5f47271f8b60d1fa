//! Closed enums for roles, statuses, priorities, and report types.
//!
//! All enums serialize with the backend's SCREAMING spellings. `as_str()`
//! returns the wire value, and `FromStr` accepts it case-insensitively so the
//! CLI can parse user input with the same vocabulary.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

fn unknown(kind: &str, value: &str) -> CoreError {
    CoreError::Validation(format!("unknown {kind} '{value}'"))
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Role of an actor. Exactly one per user; carried in the access credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Role {
    #[serde(rename = "ADMIN")]
    Admin,
    #[serde(rename = "PM", alias = "PROJECT_MANAGER")]
    ProjectManager,
    #[serde(rename = "DEV", alias = "DEVELOPER")]
    Developer,
    #[serde(rename = "QA")]
    Qa,
}

impl Role {
    pub const ALL: [Self; 4] = [Self::Admin, Self::ProjectManager, Self::Developer, Self::Qa];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::ProjectManager => "PM",
            Self::Developer => "DEV",
            Self::Qa => "QA",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Self::Admin),
            "PM" | "PROJECT_MANAGER" => Ok(Self::ProjectManager),
            "DEV" | "DEVELOPER" => Ok(Self::Developer),
            "QA" => Ok(Self::Qa),
            _ => Err(unknown("role", s)),
        }
    }
}

// ---------------------------------------------------------------------------
// ProjectStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    Active,
    OnHold,
    Archived,
}

impl ProjectStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::OnHold => "ON_HOLD",
            Self::Archived => "ARCHIVED",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(Self::Active),
            "ON_HOLD" => Ok(Self::OnHold),
            "ARCHIVED" => Ok(Self::Archived),
            _ => Err(unknown("project status", s)),
        }
    }
}

// ---------------------------------------------------------------------------
// TaskStatus
// ---------------------------------------------------------------------------

/// Status of a task on the board.
///
/// ```text
/// new → in_progress → review → testing → done → closed
///            ↑           │         │       │
///            └───────────┴─────────┴───────┘ (rework)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    New,
    InProgress,
    Review,
    Testing,
    Done,
    Closed,
}

impl TaskStatus {
    /// Column order of the Kanban board.
    pub const BOARD_COLUMNS: [Self; 6] = [
        Self::New,
        Self::InProgress,
        Self::Review,
        Self::Testing,
        Self::Done,
        Self::Closed,
    ];

    /// Valid next states from the current state.
    ///
    /// Advisory only: the backend owns task state and the client never
    /// rejects a write on this basis.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::New => &[Self::InProgress],
            Self::InProgress => &[Self::Review, Self::Testing, Self::Done],
            Self::Review => &[Self::InProgress, Self::Testing, Self::Done],
            Self::Testing => &[Self::InProgress, Self::Review, Self::Done],
            Self::Done => &[Self::InProgress, Self::Closed],
            Self::Closed => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// DONE and CLOSED count as completed work for story-point burn.
    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Done | Self::Closed)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::InProgress => "IN_PROGRESS",
            Self::Review => "REVIEW",
            Self::Testing => "TESTING",
            Self::Done => "DONE",
            Self::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "NEW" => Ok(Self::New),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "REVIEW" => Ok(Self::Review),
            "TESTING" => Ok(Self::Testing),
            "DONE" => Ok(Self::Done),
            "CLOSED" => Ok(Self::Closed),
            _ => Err(unknown("task status", s)),
        }
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Priority shared by tasks and bug reports.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            "CRITICAL" => Ok(Self::Critical),
            _ => Err(unknown("priority", s)),
        }
    }
}

// ---------------------------------------------------------------------------
// BugStatus
// ---------------------------------------------------------------------------

/// Status of a bug report.
///
/// FIXED and CLOSED are terminal for board counting purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BugStatus {
    New,
    Confirmed,
    InProgress,
    Fixed,
    Closed,
}

impl BugStatus {
    /// Whether the bug counts toward a task's active bug total.
    #[must_use]
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Fixed | Self::Closed)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Confirmed => "CONFIRMED",
            Self::InProgress => "IN_PROGRESS",
            Self::Fixed => "FIXED",
            Self::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for BugStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BugStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "NEW" => Ok(Self::New),
            "CONFIRMED" => Ok(Self::Confirmed),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "FIXED" => Ok(Self::Fixed),
            "CLOSED" => Ok(Self::Closed),
            _ => Err(unknown("bug status", s)),
        }
    }
}

// ---------------------------------------------------------------------------
// ReportType / ReportState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportType {
    Project,
    Sprint,
    Bugs,
}

impl ReportType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Project => "PROJECT",
            Self::Sprint => "SPRINT",
            Self::Bugs => "BUGS",
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PROJECT" => Ok(Self::Project),
            "SPRINT" => Ok(Self::Sprint),
            "BUGS" => Ok(Self::Bugs),
            _ => Err(unknown("report type", s)),
        }
    }
}

/// Client-observed lifecycle of a report.
///
/// ```text
/// pending → ready (terminal)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReportState {
    Pending,
    Ready,
}

impl ReportState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Ready => "ready",
        }
    }
}

impl fmt::Display for ReportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
