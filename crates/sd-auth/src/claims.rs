use base64::Engine as _;
use chrono::{DateTime, Utc};
use sd_core::EntityId;
use sd_core::enums::Role;
use serde::Deserialize;

use crate::error::AuthError;

/// Claims carried by an access credential.
///
/// Decoded without signature verification: the backend verifies every
/// request, the client only needs to know who it is talking as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessClaims {
    pub user_id: EntityId,
    /// `None` when the claim is absent or names a role this client does not know.
    pub role: Option<Role>,
    pub username: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(EntityId),
    Text(String),
}

#[derive(Deserialize)]
struct RawClaims {
    user_id: Option<RawId>,
    role: Option<String>,
    username: Option<String>,
    exp: Option<i64>,
}

/// Decode the payload segment of a JWT access credential.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredential` if the credential is not three
/// dot-separated segments, the payload is not base64url JSON, or `user_id`
/// is missing or not numeric.
pub fn decode_claims(jwt: &str) -> Result<AccessClaims, AuthError> {
    let parts: Vec<&str> = jwt.trim().split('.').collect();
    if parts.len() != 3 {
        return Err(AuthError::InvalidCredential("invalid JWT format".into()));
    }
    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1].trim_end_matches('='))
        .map_err(|e| AuthError::InvalidCredential(format!("base64 decode failed: {e}")))?;
    let raw: RawClaims = serde_json::from_slice(&payload)
        .map_err(|e| AuthError::InvalidCredential(format!("JSON parse failed: {e}")))?;

    let user_id = match raw.user_id {
        Some(RawId::Number(id)) => id,
        Some(RawId::Text(text)) => text
            .parse::<EntityId>()
            .map_err(|_| AuthError::InvalidCredential(format!("non-numeric user_id '{text}'")))?,
        None => return Err(AuthError::InvalidCredential("missing user_id claim".into())),
    };

    let role = raw.role.as_deref().and_then(|role| {
        role.parse::<Role>()
            .inspect_err(|_| tracing::debug!(role, "credential carries an unknown role"))
            .ok()
    });

    let expires_at = match raw.exp {
        Some(exp) => Some(
            DateTime::from_timestamp(exp, 0)
                .ok_or_else(|| AuthError::InvalidCredential("invalid exp timestamp".into()))?,
        ),
        None => None,
    };

    Ok(AccessClaims {
        user_id,
        role,
        username: raw.username,
        expires_at,
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use base64::Engine as _;

    /// Build an unsigned JWT with the given JSON payload.
    pub fn make_jwt(payload: &str) -> String {
        let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
        let header = engine.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
        let body = engine.encode(payload);
        let signature = engine.encode("fake_sig");
        format!("{header}.{body}.{signature}")
    }
}
