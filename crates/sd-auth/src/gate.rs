//! Role-gated visibility.
//!
//! The gate is advisory: it decides whether an affordance is shown, never
//! whether an operation is permitted. The backend rejects disallowed writes on
//! its own.

use sd_core::enums::Role;
use serde::Serialize;

use crate::identity::Identity;

/// Whether an actor holding `role` may see something gated on `required`.
///
/// No role means nothing is shown, whatever `required` contains.
#[must_use]
pub fn allowed(role: Option<Role>, required: &[Role]) -> bool {
    role.is_some_and(|role| required.contains(&role))
}

/// [`allowed`] evaluated for an identity; anonymous identities see nothing.
#[must_use]
pub fn allowed_for(identity: &Identity, required: &[Role]) -> bool {
    identity.is_authenticated && identity.actor_id.is_some() && allowed(identity.role, required)
}

/// Pass `child` through when the identity may see it.
pub fn gate<T>(identity: &Identity, required: &[Role], child: T) -> Option<T> {
    allowed_for(identity, required).then_some(child)
}

const MANAGERS: &[Role] = &[Role::ProjectManager, Role::Admin];
const CONTRIBUTORS: &[Role] = &[Role::Developer, Role::ProjectManager, Role::Admin];
const TESTERS: &[Role] = &[Role::Qa, Role::ProjectManager, Role::Admin];
const QA_ONLY: &[Role] = &[Role::Qa];
const EVERYONE: &[Role] = &Role::ALL;

/// Role-gated affordances of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    CreateProject,
    EditProject,
    ManageMembers,
    DeleteProject,
    CreateSprint,
    CompleteSprint,
    CreateTask,
    DeleteTask,
    EditTaskStatus,
    SaveTask,
    ReportBug,
    MarkBugFixed,
    CloseBug,
    GenerateReport,
}

impl Capability {
    pub const ALL: [Self; 14] = [
        Self::CreateProject,
        Self::EditProject,
        Self::ManageMembers,
        Self::DeleteProject,
        Self::CreateSprint,
        Self::CompleteSprint,
        Self::CreateTask,
        Self::DeleteTask,
        Self::EditTaskStatus,
        Self::SaveTask,
        Self::ReportBug,
        Self::MarkBugFixed,
        Self::CloseBug,
        Self::GenerateReport,
    ];

    #[must_use]
    pub const fn required_roles(self) -> &'static [Role] {
        match self {
            Self::CreateProject
            | Self::EditProject
            | Self::ManageMembers
            | Self::DeleteProject
            | Self::CreateSprint
            | Self::CompleteSprint
            | Self::CreateTask
            | Self::DeleteTask => MANAGERS,
            Self::EditTaskStatus | Self::SaveTask | Self::MarkBugFixed => CONTRIBUTORS,
            Self::ReportBug => QA_ONLY,
            Self::CloseBug => TESTERS,
            Self::GenerateReport => EVERYONE,
        }
    }
}

/// The capability set of a role.
#[must_use]
pub fn capabilities_of(role: Option<Role>) -> Vec<Capability> {
    Capability::ALL
        .into_iter()
        .filter(|capability| allowed(role, capability.required_roles()))
        .collect()
}
