use clap::Subcommand;

/// Bug report commands.
#[derive(Clone, Debug, Subcommand)]
pub enum BugCommands {
    /// List bug reports.
    List {
        #[arg(long)]
        project: Option<i64>,
        #[arg(long)]
        status: Option<String>,
    },
    /// Get a bug report by ID.
    Get { id: i64 },
    /// File a bug report.
    Create {
        #[arg(long)]
        project: i64,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        priority: Option<String>,
        /// Task the bug was found in.
        #[arg(long)]
        task: Option<i64>,
    },
    /// Move a bug to a new status and refresh its project's tasks.
    Status { id: i64, status: String },
}
