use sd_client::ClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("a submission is already in flight")]
    Busy,

    #[error("form is closed")]
    FormClosed,
}

impl StoreError {
    /// Validation or conflict failure reported by the backend.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        match self {
            Self::Client(error) => error.is_validation(),
            _ => false,
        }
    }

    /// The session could not authenticate, even after a refresh attempt.
    #[must_use]
    pub const fn is_auth_failure(&self) -> bool {
        match self {
            Self::Client(error) => error.is_auth_failure(),
            _ => false,
        }
    }
}
