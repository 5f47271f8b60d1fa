use sd_auth::Capability;
use sd_core::drafts::NewSprint;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SprintCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `sdesk sprint`.
pub async fn handle(
    action: &SprintCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let sprints = &ctx.stores.sprints;
    match action {
        SprintCommands::List { project } => {
            ctx.require_login()?;
            let mut filter = ctx.filter();
            if let Some(project) = project {
                filter = filter.project(*project);
            }
            output(&sprints.fetch_all(&filter).await?, flags.format)
        }
        SprintCommands::Get { id } => {
            ctx.require_login()?;
            output(&sprints.fetch_one(*id).await?, flags.format)
        }
        SprintCommands::Create {
            project,
            name,
            goal,
            start_date,
            end_date,
            active,
        } => {
            ctx.require(Capability::CreateSprint)?;
            if let (Some(start), Some(end)) = (start_date, end_date) {
                if end < start {
                    anyhow::bail!("--end-date {end} is before --start-date {start}");
                }
            }
            let draft = NewSprint {
                name: name.clone(),
                goal: goal.clone(),
                start_date: *start_date,
                end_date: *end_date,
                project: *project,
                is_active: *active,
            };
            output(&sprints.create(&draft).await?, flags.format)
        }
        SprintCommands::Complete { id } => {
            ctx.require(Capability::CompleteSprint)?;
            let completion = ctx.coordinator.complete_sprint(*id).await?;
            output(&completion, flags.format)
        }
        SprintCommands::Timeline { id } => {
            ctx.require_login()?;
            output(&ctx.api().sprint_timeline(*id).await?, flags.format)
        }
    }
}
