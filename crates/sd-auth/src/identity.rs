use sd_core::EntityId;
use sd_core::enums::Role;
use serde::Serialize;

use crate::claims::{AccessClaims, decode_claims};
use crate::gate::{self, Capability};

/// Who the current session acts as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub is_authenticated: bool,
    pub actor_id: Option<EntityId>,
    pub role: Option<Role>,
}

impl Identity {
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            is_authenticated: false,
            actor_id: None,
            role: None,
        }
    }

    #[must_use]
    pub const fn authenticated(actor_id: EntityId, role: Option<Role>) -> Self {
        Self {
            is_authenticated: true,
            actor_id: Some(actor_id),
            role,
        }
    }

    #[must_use]
    pub const fn from_claims(claims: &AccessClaims) -> Self {
        Self::authenticated(claims.user_id, claims.role)
    }

    /// Whether the gate for `capability` would show its affordance.
    #[must_use]
    pub fn can(&self, capability: Capability) -> bool {
        gate::allowed_for(self, capability.required_roles())
    }
}

impl Default for Identity {
    fn default() -> Self {
        Self::anonymous()
    }
}

/// Derive the identity behind a credential.
///
/// Fails open: an absent, malformed, or undecodable credential yields
/// [`Identity::anonymous`]. Clearing a corrupted stored credential is the
/// caller's job (see [`crate::session::Session::bootstrap`]).
#[must_use]
pub fn resolve(credential: Option<&str>) -> Identity {
    let Some(jwt) = credential.filter(|jwt| !jwt.trim().is_empty()) else {
        return Identity::anonymous();
    };
    match decode_claims(jwt) {
        Ok(claims) => Identity::from_claims(&claims),
        Err(error) => {
            tracing::debug!(%error, "credential could not be decoded; treating as anonymous");
            Identity::anonymous()
        }
    }
}
