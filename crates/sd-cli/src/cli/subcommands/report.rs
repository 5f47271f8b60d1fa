use clap::Subcommand;

/// Report commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ReportCommands {
    /// List reports.
    List {
        #[arg(long)]
        project: Option<i64>,
    },
    /// Get a report and its summary once ready.
    Get { id: i64 },
    /// Request a report; the backend computes it in the background.
    Create {
        #[arg(long)]
        project: i64,
        /// Report type: project, sprint or bugs.
        #[arg(long = "type", default_value = "project")]
        report_type: String,
        /// Keep polling until the report is ready.
        #[arg(long)]
        wait: bool,
    },
    /// Poll until every pending report is ready.
    Watch,
}
