use std::sync::Arc;

use anyhow::Context;
use sd_auth::{Capability, CredentialStore, Identity, KeyringCredentialStore, Session};
use sd_client::{ApiClient, HttpTransport, ListFilter, TransportEvent};
use sd_config::SdConfig;
use sd_store::{Stores, SyncCoordinator};

/// Everything a command needs: session, stores, and coordinator, wired once per run.
pub struct AppContext {
    pub config: SdConfig,
    pub session: Arc<Session>,
    pub credentials: Arc<KeyringCredentialStore>,
    pub transport: Arc<HttpTransport>,
    pub stores: Arc<Stores>,
    pub coordinator: SyncCoordinator,
}

impl AppContext {
    pub fn init(config: SdConfig) -> anyhow::Result<Self> {
        let credentials = Arc::new(KeyringCredentialStore::from_config(&config.auth));
        let store: Arc<dyn CredentialStore> = credentials.clone();
        let session = Arc::new(Session::bootstrap(store));

        let transport = Arc::new(
            HttpTransport::new(&config.api, Arc::clone(&session))
                .context("failed to build HTTP client")?,
        );
        watch_session_expiry(&transport);

        let stores = Arc::new(Stores::new(ApiClient::new(transport.clone())));
        let coordinator = SyncCoordinator::new(Arc::clone(&stores), &config.sync);

        Ok(Self {
            config,
            session,
            credentials,
            transport,
            stores,
            coordinator,
        })
    }

    #[must_use]
    pub fn identity(&self) -> Identity {
        self.session.identity()
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        self.stores.api()
    }

    /// Fail unless the session is logged in.
    pub fn require_login(&self) -> anyhow::Result<Identity> {
        let identity = self.identity();
        if !identity.is_authenticated {
            anyhow::bail!("not logged in; run 'sdesk auth login'");
        }
        Ok(identity)
    }

    /// Fail unless the session's role grants `capability`.
    pub fn require(&self, capability: Capability) -> anyhow::Result<Identity> {
        let identity = self.require_login()?;
        if !identity.can(capability) {
            let role = identity
                .role
                .map_or_else(|| "no role".to_string(), |role| role.to_string());
            anyhow::bail!(
                "{role} may not {}; allowed: {}",
                describe(capability),
                capability
                    .required_roles()
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
        Ok(identity)
    }

    /// List filter carrying the configured page size.
    #[must_use]
    pub fn filter(&self) -> ListFilter {
        ListFilter::new().page_size(self.config.sync.default_page_size)
    }
}

fn describe(capability: Capability) -> String {
    format!("{capability:?}")
        .chars()
        .enumerate()
        .flat_map(|(i, ch)| {
            let space = (i > 0 && ch.is_ascii_uppercase()).then_some(' ');
            space.into_iter().chain(std::iter::once(ch.to_ascii_lowercase()))
        })
        .collect()
}

/// Log once when the transport gives up on the session.
fn watch_session_expiry(transport: &HttpTransport) {
    let mut events = transport.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                TransportEvent::SessionExpired => {
                    tracing::warn!("session expired; run 'sdesk auth login' to sign in again");
                }
                TransportEvent::CredentialRefreshed => {
                    tracing::debug!("access credential refreshed");
                }
            }
        }
    });
}
