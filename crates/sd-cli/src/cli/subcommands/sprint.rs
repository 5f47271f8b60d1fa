use chrono::NaiveDate;
use clap::Subcommand;

/// Sprint commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SprintCommands {
    /// List sprints.
    List {
        #[arg(long)]
        project: Option<i64>,
    },
    /// Get a sprint by ID.
    Get { id: i64 },
    /// Create a sprint.
    Create {
        #[arg(long)]
        project: i64,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        goal: String,
        #[arg(long)]
        start_date: Option<NaiveDate>,
        #[arg(long)]
        end_date: Option<NaiveDate>,
        #[arg(long)]
        active: bool,
    },
    /// Complete a sprint; unfinished tasks move to the backlog.
    Complete { id: i64 },
    /// Day-by-day activity of a sprint.
    Timeline { id: i64 },
}
