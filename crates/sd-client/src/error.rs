//! Client error types.

use sd_auth::AuthError;
use sd_config::ConfigError;
use thiserror::Error;

/// Errors produced by the transport and the typed endpoints.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection, timeout, or other transport failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, verbatim.
        message: String,
    },

    /// A 401 on a request that was already retried after a refresh.
    #[error("request rejected as unauthorized after credential refresh")]
    Unauthorized,

    /// The refresh credential was missing or rejected; the session is gone.
    #[error("session expired; log in again")]
    SessionExpired,

    /// The response body did not have the expected shape.
    #[error("decode error: {0}")]
    Decode(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ClientError {
    /// HTTP status behind the error, when there is one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Unauthorized | Self::SessionExpired => Some(401),
            Self::Http(error) => error.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    /// Validation or conflict failure: surfaced to the form, never retried.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Api { status: 400 | 409 | 422, .. })
    }

    /// The session can no longer authenticate requests.
    #[must_use]
    pub const fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized | Self::SessionExpired)
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(error: serde_json::Error) -> Self {
        Self::Decode(error.to_string())
    }
}
