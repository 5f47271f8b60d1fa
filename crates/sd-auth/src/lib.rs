//! # sd-auth
//!
//! Identity and credentials for sprintdesk.
//!
//! Decodes the access credential into an [`Identity`] (failing open to the
//! anonymous identity), evaluates role gates for the dashboard's
//! [`Capability`] catalogue, persists the credential pair in the OS keychain
//! with a file fallback, and publishes identity changes through [`Session`].

pub mod claims;
pub mod error;
pub mod gate;
pub mod identity;
pub mod session;
pub mod token_store;

pub use claims::AccessClaims;
pub use error::AuthError;
pub use gate::{Capability, allowed, capabilities_of, gate};
pub use identity::{Identity, resolve};
pub use session::Session;
pub use token_store::{CredentialStore, KeyringCredentialStore, MemoryCredentialStore};
