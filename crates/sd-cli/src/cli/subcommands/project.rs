use chrono::NaiveDate;
use clap::Subcommand;

/// Project commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ProjectCommands {
    /// List projects visible to the session.
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        page: Option<u32>,
    },
    /// Get a project by ID.
    Get { id: i64 },
    /// Create a project managed by the current user.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        start_date: Option<NaiveDate>,
        /// Member user IDs (repeatable).
        #[arg(long = "member")]
        members: Vec<i64>,
    },
    /// Update a project.
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<String>,
        /// Replace the member list (repeatable).
        #[arg(long = "member")]
        members: Option<Vec<i64>>,
    },
    /// Delete a project with everything cached under it.
    Delete { id: i64 },
}
