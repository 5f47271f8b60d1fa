use std::fs;
use std::path::PathBuf;

use parking_lot::Mutex;
use sd_config::AuthConfig;
use sd_core::responses::TokenPair;
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

const KEYRING_USER: &str = "credentials";
const CREDENTIALS_FILE_NAME: &str = "credentials";
const ACCESS_TOKEN_ENV: &str = "SPRINTDESK_ACCESS_TOKEN";

/// Durable storage for the access/refresh credential pair.
///
/// Implementations are cleared in full on logout and on unrecoverable
/// refresh failure.
pub trait CredentialStore: Send + Sync {
    fn load_access(&self) -> Option<String>;
    fn load_refresh(&self) -> Option<String>;

    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if the pair cannot be persisted.
    fn store_pair(&self, pair: &TokenPair) -> Result<(), AuthError>;

    /// Replace only the access credential, keeping the refresh credential.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if the credential cannot be persisted.
    fn store_access(&self, access: &str) -> Result<(), AuthError>;

    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if persisted state cannot be removed.
    fn clear(&self) -> Result<(), AuthError>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
struct StoredCredentials {
    #[serde(default)]
    access: Option<String>,
    #[serde(default)]
    refresh: Option<String>,
}

impl StoredCredentials {
    fn is_empty(&self) -> bool {
        self.access.is_none() && self.refresh.is_none()
    }
}

/// OS keychain storage with a `0600` file fallback.
///
/// Load priority: keychain → `SPRINTDESK_ACCESS_TOKEN` env (access only) → file.
pub struct KeyringCredentialStore {
    service: String,
    dir: Option<PathBuf>,
    use_keyring: bool,
}

impl KeyringCredentialStore {
    #[must_use]
    pub fn from_config(config: &AuthConfig) -> Self {
        Self {
            service: config.keyring_service.clone(),
            dir: config.credentials_dir(),
            use_keyring: !config.file_only,
        }
    }

    /// File-only store rooted at `dir`; never touches the keychain.
    #[must_use]
    pub fn file_only(dir: impl Into<PathBuf>) -> Self {
        Self {
            service: String::new(),
            dir: Some(dir.into()),
            use_keyring: false,
        }
    }

    /// Which tier currently holds credentials (for status display).
    #[must_use]
    pub fn detect_source(&self) -> Option<&'static str> {
        if self.load_keyring().is_some() {
            return Some("keyring");
        }
        if env_access_token().is_some() {
            return Some("env");
        }
        if self.load_file().is_some() {
            return Some("file");
        }
        None
    }

    fn load(&self) -> StoredCredentials {
        if let Some(stored) = self.load_keyring() {
            return stored;
        }
        if let Some(access) = env_access_token() {
            return StoredCredentials {
                access: Some(access),
                refresh: None,
            };
        }
        self.load_file().unwrap_or_default()
    }

    fn save(&self, stored: &StoredCredentials) -> Result<(), AuthError> {
        let encoded = serde_json::to_string(stored)
            .map_err(|e| AuthError::TokenStoreError(format!("encode credentials: {e}")))?;

        if self.use_keyring {
            match keyring::Entry::new(&self.service, KEYRING_USER) {
                Ok(entry) => match entry.set_password(&encoded) {
                    Ok(()) => return Ok(()),
                    Err(error) => {
                        tracing::warn!(%error, "keyring store failed; falling back to file");
                    }
                },
                Err(error) => {
                    tracing::warn!(%error, "keyring unavailable; falling back to file");
                }
            }
        }
        self.store_file(&encoded)
    }

    fn load_keyring(&self) -> Option<StoredCredentials> {
        if !self.use_keyring {
            return None;
        }
        let entry = keyring::Entry::new(&self.service, KEYRING_USER).ok()?;
        let raw = entry.get_password().ok()?;
        serde_json::from_str::<StoredCredentials>(&raw)
            .ok()
            .filter(|stored| !stored.is_empty())
    }

    fn credentials_path(&self) -> Result<PathBuf, AuthError> {
        self.dir
            .as_ref()
            .map(|dir| dir.join(CREDENTIALS_FILE_NAME))
            .ok_or_else(|| {
                AuthError::TokenStoreError(
                    "home directory not found; cannot store credentials".into(),
                )
            })
    }

    fn store_file(&self, encoded: &str) -> Result<(), AuthError> {
        let path = self.credentials_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AuthError::TokenStoreError(format!("mkdir {}: {e}", parent.display()))
            })?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                    tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
                }
            }
        }
        fs::write(&path, encoded)
            .map_err(|e| AuthError::TokenStoreError(format!("write {}: {e}", path.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o600)).map_err(|e| {
                AuthError::TokenStoreError(format!("chmod {}: {e}", path.display()))
            })?;
        }

        Ok(())
    }

    fn load_file(&self) -> Option<StoredCredentials> {
        let path = self.credentials_path().ok()?;
        let raw = fs::read_to_string(&path).ok()?;
        serde_json::from_str::<StoredCredentials>(&raw)
            .ok()
            .filter(|stored| !stored.is_empty())
    }
}

impl CredentialStore for KeyringCredentialStore {
    fn load_access(&self) -> Option<String> {
        self.load().access
    }

    fn load_refresh(&self) -> Option<String> {
        self.load().refresh
    }

    fn store_pair(&self, pair: &TokenPair) -> Result<(), AuthError> {
        self.save(&StoredCredentials {
            access: Some(pair.access.clone()),
            refresh: Some(pair.refresh.clone()),
        })
    }

    fn store_access(&self, access: &str) -> Result<(), AuthError> {
        let mut stored = self.load();
        stored.access = Some(access.to_string());
        self.save(&stored)
    }

    fn clear(&self) -> Result<(), AuthError> {
        if self.use_keyring {
            // May not exist.
            if let Ok(entry) = keyring::Entry::new(&self.service, KEYRING_USER) {
                let _ = entry.delete_credential();
            }
        }

        let path = self.credentials_path()?;
        if path.exists() {
            fs::remove_file(&path).map_err(|e| {
                AuthError::TokenStoreError(format!("failed to delete {}: {e}", path.display()))
            })?;
        }
        Ok(())
    }
}

fn env_access_token() -> Option<String> {
    std::env::var(ACCESS_TOKEN_ENV)
        .ok()
        .filter(|token| !token.trim().is_empty())
}

/// Process-local store for tests and headless embedding.
#[derive(Default)]
pub struct MemoryCredentialStore {
    inner: Mutex<StoredCredentials>,
}

impl MemoryCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_pair(access: &str, refresh: &str) -> Self {
        Self {
            inner: Mutex::new(StoredCredentials {
                access: Some(access.to_string()),
                refresh: Some(refresh.to_string()),
            }),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load_access(&self) -> Option<String> {
        self.inner.lock().access.clone()
    }

    fn load_refresh(&self) -> Option<String> {
        self.inner.lock().refresh.clone()
    }

    fn store_pair(&self, pair: &TokenPair) -> Result<(), AuthError> {
        let mut inner = self.inner.lock();
        inner.access = Some(pair.access.clone());
        inner.refresh = Some(pair.refresh.clone());
        Ok(())
    }

    fn store_access(&self, access: &str) -> Result<(), AuthError> {
        self.inner.lock().access = Some(access.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        *self.inner.lock() = StoredCredentials::default();
        Ok(())
    }
}
