use std::sync::Arc;

use sd_core::responses::TokenPair;
use tokio::sync::watch;

use crate::claims::decode_claims;
use crate::error::AuthError;
use crate::identity::{self, Identity};
use crate::token_store::CredentialStore;

/// The authenticated session: persisted credentials plus the identity
/// derived from them.
///
/// Identity changes (login, logout, forced expiry) are published on a
/// `watch` channel so role gates can re-evaluate.
pub struct Session {
    store: Arc<dyn CredentialStore>,
    identity: watch::Sender<Identity>,
}

impl Session {
    /// Resolve the identity behind the stored access credential.
    ///
    /// A stored credential that cannot be decoded is cleared and the session
    /// starts anonymous. No error reaches the caller.
    #[must_use]
    pub fn bootstrap(store: Arc<dyn CredentialStore>) -> Self {
        let identity = match store.load_access() {
            None => Identity::anonymous(),
            Some(access) => match decode_claims(&access) {
                Ok(claims) => Identity::from_claims(&claims),
                Err(error) => {
                    tracing::info!(%error, "stored credential is corrupted; clearing session");
                    if let Err(error) = store.clear() {
                        tracing::warn!(%error, "failed to clear corrupted credential");
                    }
                    Identity::anonymous()
                }
            },
        };
        let (identity, _) = watch::channel(identity);
        Self { store, identity }
    }

    #[must_use]
    pub fn identity(&self) -> Identity {
        self.identity.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Identity> {
        self.identity.subscribe()
    }

    #[must_use]
    pub fn credentials(&self) -> Arc<dyn CredentialStore> {
        Arc::clone(&self.store)
    }

    /// Persist a freshly issued credential pair and switch to its identity.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredential` if the access credential cannot
    /// be decoded (nothing is stored), or `AuthError::TokenStoreError` if
    /// persisting fails.
    pub fn set_credentials(&self, pair: &TokenPair) -> Result<Identity, AuthError> {
        let claims = decode_claims(&pair.access)?;
        self.store.store_pair(pair)?;
        let identity = Identity::from_claims(&claims);
        tracing::info!(actor_id = claims.user_id, role = ?claims.role, "session started");
        self.identity.send_replace(identity.clone());
        Ok(identity)
    }

    /// Re-derive the identity from whatever the store now holds.
    ///
    /// Called after the transport swapped in a refreshed access credential.
    pub fn reload(&self) -> Identity {
        let identity = identity::resolve(self.store.load_access().as_deref());
        self.identity.send_if_modified(|current| {
            if *current == identity {
                false
            } else {
                *current = identity.clone();
                true
            }
        });
        identity
    }

    /// Clear every persisted credential and publish the anonymous identity.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if the store cannot be cleared; the
    /// published identity is anonymous either way.
    pub fn logout(&self) -> Result<(), AuthError> {
        let cleared = self.store.clear();
        self.identity.send_replace(Identity::anonymous());
        tracing::info!("session ended");
        cleared
    }

    /// Publish the anonymous identity after the transport gave up refreshing.
    ///
    /// The transport has already cleared the store.
    pub fn expire(&self) {
        tracing::info!("session expired");
        self.identity.send_replace(Identity::anonymous());
    }
}
