use sd_auth::claims::decode_claims;
use sd_auth::{Capability, CredentialStore, capabilities_of};
use sd_core::EntityId;
use sd_core::enums::Role;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    actor_id: Option<EntityId>,
    role: Option<Role>,
    capabilities: Vec<Capability>,
    username: Option<String>,
    expires_at: Option<String>,
    token_source: Option<&'static str>,
    base_url: String,
}

/// Username and RFC 3339 expiry carried by the stored access credential.
fn credential_details(access: Option<&str>) -> (Option<String>, Option<String>) {
    access
        .and_then(|jwt| decode_claims(jwt).ok())
        .map_or((None, None), |claims| {
            (
                claims.username,
                claims.expires_at.map(|at| at.to_rfc3339()),
            )
        })
}

pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let identity = ctx.identity();
    let capabilities = if identity.is_authenticated {
        capabilities_of(identity.role)
    } else {
        Vec::new()
    };

    let (username, expires_at) = credential_details(ctx.credentials.load_access().as_deref());

    output(
        &AuthStatusResponse {
            authenticated: identity.is_authenticated,
            actor_id: identity.actor_id,
            role: identity.role,
            capabilities,
            username,
            expires_at,
            token_source: ctx.credentials.detect_source(),
            base_url: ctx.transport.base_url().to_string(),
        },
        flags.format,
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::credential_details;

    #[test]
    fn no_credential_has_no_details() {
        assert_eq!(credential_details(None), (None, None));
    }

    #[test]
    fn undecodable_credential_has_no_details() {
        assert_eq!(credential_details(Some("not-a-jwt")), (None, None));
    }
}
