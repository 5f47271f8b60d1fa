use clap::Subcommand;

use crate::cli::subcommands::{
    AuthCommands, BugCommands, ProjectCommands, ReportCommands, SprintCommands, TaskCommands,
    UserCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Log in, log out, and inspect the current session.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Projects.
    Project {
        #[command(subcommand)]
        action: ProjectCommands,
    },
    /// Sprints.
    Sprint {
        #[command(subcommand)]
        action: SprintCommands,
    },
    /// Tasks and the Kanban board.
    Task {
        #[command(subcommand)]
        action: TaskCommands,
    },
    /// Bug reports.
    Bug {
        #[command(subcommand)]
        action: BugCommands,
    },
    /// Generated reports.
    Report {
        #[command(subcommand)]
        action: ReportCommands,
    },
    /// Users and registration.
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
}
