pub mod auth;
pub mod bug;
pub mod project;
pub mod report;
pub mod sprint;
pub mod task;
pub mod user;

pub use auth::AuthCommands;
pub use bug::BugCommands;
pub use project::ProjectCommands;
pub use report::ReportCommands;
pub use sprint::SprintCommands;
pub use task::TaskCommands;
pub use user::UserCommands;
