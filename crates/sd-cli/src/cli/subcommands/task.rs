use clap::{Args, Subcommand};

/// Task commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TaskCommands {
    /// List tasks.
    List {
        #[arg(long)]
        project: Option<i64>,
        #[arg(long)]
        sprint: Option<i64>,
        #[arg(long)]
        assignee: Option<i64>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Get a task by ID.
    Get { id: i64 },
    /// Create a task.
    Create {
        #[arg(long)]
        project: i64,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        priority: Option<String>,
        /// Story points: 1, 2, 3, 5, 8, 13 or 21.
        #[arg(long)]
        points: Option<u32>,
        #[arg(long)]
        sprint: Option<i64>,
        #[arg(long)]
        assignee: Option<i64>,
    },
    /// Update a task.
    Update {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        points: Option<u32>,
        /// Move into a sprint.
        #[arg(long, conflicts_with = "backlog")]
        sprint: Option<i64>,
        /// Move back to the backlog.
        #[arg(long)]
        backlog: bool,
        #[arg(long)]
        assignee: Option<i64>,
    },
    /// Delete a task.
    Delete { id: i64 },
    /// Kanban board of a project.
    Board(BoardArgs),
}

#[derive(Clone, Debug, Args)]
pub struct BoardArgs {
    #[arg(long)]
    pub project: i64,
    /// Only tasks in this sprint.
    #[arg(long, conflicts_with = "backlog")]
    pub sprint: Option<i64>,
    /// Only tasks outside any sprint.
    #[arg(long)]
    pub backlog: bool,
}
