use sd_auth::Capability;
use sd_core::drafts::{NewTask, TaskPatch};
use sd_core::entities::Task;
use sd_core::enums::{Priority, TaskStatus};
use sd_core::estimate::StoryPoints;
use sd_store::FormSession;
use sd_store::board::{self, BoardSummary};
use serde::Serialize;

use crate::cli::subcommands::TaskCommands;
use crate::cli::subcommands::task::BoardArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::shared::parse::parse_opt;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct DeletedResponse {
    deleted: i64,
}

#[derive(Serialize)]
struct BoardColumnView {
    status: TaskStatus,
    count: usize,
    story_points: u32,
    tasks: Vec<String>,
}

#[derive(Serialize)]
struct BoardView {
    summary: BoardSummary,
    columns: Vec<BoardColumnView>,
}

/// Handle `sdesk task`.
pub async fn handle(
    action: &TaskCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let tasks = &ctx.stores.tasks;
    match action {
        TaskCommands::List {
            project,
            sprint,
            assignee,
            status,
            search,
        } => {
            ctx.require_login()?;
            let mut filter = ctx.filter();
            if let Some(project) = project {
                filter = filter.project(*project);
            }
            if let Some(sprint) = sprint {
                filter = filter.sprint(*sprint);
            }
            if let Some(assignee) = assignee {
                filter = filter.assignee(*assignee);
            }
            if let Some(status) = parse_opt::<TaskStatus>(status.as_deref(), "status")? {
                filter = filter.status(status);
            }
            if let Some(search) = search {
                filter = filter.search(search.clone());
            }
            output(&tasks.fetch_all(&filter).await?, flags.format)
        }
        TaskCommands::Get { id } => {
            ctx.require_login()?;
            output(&tasks.fetch_one(*id).await?, flags.format)
        }
        TaskCommands::Create {
            project,
            title,
            description,
            priority,
            points,
            sprint,
            assignee,
        } => {
            ctx.require(Capability::CreateTask)?;
            let draft = NewTask {
                title: title.clone(),
                description: description.clone(),
                priority: parse_opt::<Priority>(priority.as_deref(), "priority")?
                    .unwrap_or(Priority::Medium),
                story_points: points.map(StoryPoints::new).transpose()?.unwrap_or_default(),
                project: *project,
                sprint: *sprint,
                assignee: *assignee,
                ..NewTask::default()
            };
            let mut form = FormSession::open(draft);
            let task = form
                .submit(|draft| async move { tasks.create(&draft).await })
                .await?;
            output(&task, flags.format)
        }
        TaskCommands::Update {
            id,
            title,
            description,
            status,
            priority,
            points,
            sprint,
            backlog,
            assignee,
        } => {
            let patch = TaskPatch {
                title: title.clone(),
                description: description.clone(),
                status: parse_opt::<TaskStatus>(status.as_deref(), "status")?,
                priority: parse_opt::<Priority>(priority.as_deref(), "priority")?,
                story_points: points.map(StoryPoints::new).transpose()?,
                sprint: if *backlog { Some(None) } else { sprint.map(Some) },
                assignee: assignee.map(Some),
            };
            if patch == TaskPatch::default() {
                anyhow::bail!("nothing to update; pass at least one field flag");
            }
            ctx.require(required_for(&patch))?;
            output(&tasks.update(*id, &patch).await?, flags.format)
        }
        TaskCommands::Delete { id } => {
            ctx.require(Capability::DeleteTask)?;
            let deleted = tasks.delete(*id).await?;
            output(&DeletedResponse { deleted }, flags.format)
        }
        TaskCommands::Board(args) => show_board(args, ctx, flags).await,
    }
}

/// A bare status move is a board drag; anything else is a full task save.
fn required_for(patch: &TaskPatch) -> Capability {
    let status_only = TaskPatch {
        status: patch.status,
        ..TaskPatch::default()
    };
    if patch.status.is_some() && *patch == status_only {
        Capability::EditTaskStatus
    } else {
        Capability::SaveTask
    }
}

async fn show_board(args: &BoardArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.require_login()?;
    let mut filter = ctx.filter().project(args.project);
    if let Some(sprint) = args.sprint {
        filter = filter.sprint(sprint);
    }
    let fetched = ctx.stores.tasks.fetch_all(&filter).await?;
    let shown: Vec<Task> = if args.backlog {
        board::backlog(&fetched).into_iter().cloned().collect()
    } else {
        fetched
    };

    let view = BoardView {
        summary: board::summarize(&shown),
        columns: board::columns(&shown)
            .into_iter()
            .map(|column| BoardColumnView {
                status: column.status,
                count: column.tasks.len(),
                story_points: column.story_points,
                tasks: column
                    .tasks
                    .iter()
                    .map(|task| format!("#{} {}", task.id, task.title))
                    .collect(),
            })
            .collect(),
    };

    if flags.format == OutputFormat::Table {
        output(&view.columns, flags.format)?;
        return output(&view.summary, flags.format);
    }
    output(&view, flags.format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_only_patch_needs_status_capability() {
        let patch = TaskPatch {
            status: Some(TaskStatus::Review),
            ..TaskPatch::default()
        };
        assert_eq!(required_for(&patch), Capability::EditTaskStatus);
    }

    #[test]
    fn any_other_field_needs_save_capability() {
        let patch = TaskPatch {
            status: Some(TaskStatus::Review),
            sprint: Some(None),
            ..TaskPatch::default()
        };
        assert_eq!(required_for(&patch), Capability::SaveTask);
        assert_eq!(
            required_for(&TaskPatch {
                title: Some("x".into()),
                ..TaskPatch::default()
            }),
            Capability::SaveTask
        );
    }
}
