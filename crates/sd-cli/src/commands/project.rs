use sd_auth::Capability;
use sd_core::drafts::{NewProject, ProjectPatch};
use sd_core::enums::ProjectStatus;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ProjectCommands;
use crate::commands::shared::parse::parse_opt;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct DeletedResponse {
    deleted: i64,
}

/// Handle `sdesk project`.
pub async fn handle(
    action: &ProjectCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let projects = &ctx.stores.projects;
    match action {
        ProjectCommands::List { search, page } => {
            ctx.require_login()?;
            let mut filter = ctx.filter();
            if let Some(search) = search {
                filter = filter.search(search.clone());
            }
            if let Some(page) = page {
                filter = filter.page(*page);
            }
            output(&projects.fetch_all(&filter).await?, flags.format)
        }
        ProjectCommands::Get { id } => {
            ctx.require_login()?;
            output(&projects.fetch_one(*id).await?, flags.format)
        }
        ProjectCommands::Create {
            name,
            description,
            start_date,
            members,
        } => {
            let identity = ctx.require(Capability::CreateProject)?;
            let manager = identity
                .actor_id
                .ok_or_else(|| anyhow::anyhow!("session has no actor id"))?;
            let draft = NewProject {
                name: name.clone(),
                description: description.clone(),
                start_date: *start_date,
                manager,
                members: members.clone(),
            };
            output(&projects.create(&draft).await?, flags.format)
        }
        ProjectCommands::Update {
            id,
            name,
            description,
            status,
            members,
        } => {
            ctx.require(Capability::EditProject)?;
            if members.is_some() {
                ctx.require(Capability::ManageMembers)?;
            }
            let patch = ProjectPatch {
                name: name.clone(),
                description: description.clone(),
                status: parse_opt::<ProjectStatus>(status.as_deref(), "status")?,
                members: members.clone(),
                ..ProjectPatch::default()
            };
            if patch == ProjectPatch::default() {
                anyhow::bail!(
                    "At least one of --name, --description, --status, or --member must be provided"
                );
            }
            output(&projects.update(*id, &patch).await?, flags.format)
        }
        ProjectCommands::Delete { id } => {
            ctx.require(Capability::DeleteProject)?;
            let deleted = ctx.coordinator.delete_project(*id).await?;
            output(&DeletedResponse { deleted }, flags.format)
        }
    }
}
