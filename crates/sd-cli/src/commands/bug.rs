use sd_auth::Capability;
use sd_core::drafts::NewBugReport;
use sd_core::enums::{BugStatus, Priority};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::BugCommands;
use crate::commands::shared::parse::{parse_enum, parse_opt};
use crate::context::AppContext;
use crate::output::output;

/// Handle `sdesk bug`.
pub async fn handle(
    action: &BugCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let bugs = &ctx.stores.bug_reports;
    match action {
        BugCommands::List { project, status } => {
            ctx.require_login()?;
            let mut filter = ctx.filter();
            if let Some(project) = project {
                filter = filter.project(*project);
            }
            if let Some(status) = parse_opt::<BugStatus>(status.as_deref(), "status")? {
                filter = filter.status(status);
            }
            output(&bugs.fetch_all(&filter).await?, flags.format)
        }
        BugCommands::Get { id } => {
            ctx.require_login()?;
            output(&bugs.fetch_one(*id).await?, flags.format)
        }
        BugCommands::Create {
            project,
            title,
            description,
            priority,
            task,
        } => {
            ctx.require(Capability::ReportBug)?;
            let draft = NewBugReport {
                title: title.clone(),
                description: description.clone(),
                priority: parse_opt::<Priority>(priority.as_deref(), "priority")?
                    .unwrap_or(Priority::Medium),
                project: *project,
                task: *task,
                ..NewBugReport::default()
            };
            output(&bugs.create(&draft).await?, flags.format)
        }
        BugCommands::Status { id, status } => {
            let status = parse_enum::<BugStatus>(status, "status")?;
            ctx.require(required_for(status))?;
            let bug = ctx.coordinator.update_bug_status(*id, status).await?;
            output(&bug, flags.format)
        }
    }
}

/// Closing is a tester's call; every other move is the fixer's.
const fn required_for(status: BugStatus) -> Capability {
    match status {
        BugStatus::Closed => Capability::CloseBug,
        _ => Capability::MarkBugFixed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closing_needs_close_capability() {
        assert_eq!(required_for(BugStatus::Closed), Capability::CloseBug);
        assert_eq!(required_for(BugStatus::Fixed), Capability::MarkBugFixed);
    }
}
