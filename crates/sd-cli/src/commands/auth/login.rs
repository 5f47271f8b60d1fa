use sd_auth::{Capability, capabilities_of};
use sd_core::EntityId;
use sd_core::enums::Role;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthLoginArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthLoginResponse {
    authenticated: bool,
    actor_id: Option<EntityId>,
    role: Option<Role>,
    capabilities: Vec<Capability>,
}

pub async fn handle(
    args: &AuthLoginArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let pair = ctx.api().obtain_token(&args.username, &args.password).await?;
    let identity = ctx.session.set_credentials(&pair)?;
    tracing::info!(actor_id = ?identity.actor_id, "logged in");

    output(
        &AuthLoginResponse {
            authenticated: identity.is_authenticated,
            actor_id: identity.actor_id,
            role: identity.role,
            capabilities: capabilities_of(identity.role),
        },
        flags.format,
    )
}
