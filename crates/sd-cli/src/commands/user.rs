use sd_core::drafts::NewUser;
use sd_core::enums::Role;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::UserCommands;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

/// Handle `sdesk user`.
pub async fn handle(
    action: &UserCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        UserCommands::List { search } => {
            ctx.require_login()?;
            let mut filter = ctx.filter();
            if let Some(search) = search {
                filter = filter.search(search.clone());
            }
            output(&ctx.stores.users.fetch_all(&filter).await?, flags.format)
        }
        UserCommands::Register {
            username,
            password,
            email,
            first_name,
            last_name,
            role,
        } => {
            let user = NewUser {
                username: username.clone(),
                password: password.clone(),
                email: email.clone(),
                first_name: first_name.clone(),
                last_name: last_name.clone(),
                role: parse_enum::<Role>(role, "role")?,
            };
            let created = ctx.api().register(&user).await?;
            tracing::info!(user_id = created.id, "account registered");
            output(&created, flags.format)
        }
    }
}
