//! Credential persistence settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_keyring_service() -> String {
    "sprintdesk".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// OS keychain service name holding the credential pair.
    #[serde(default = "default_keyring_service")]
    pub keyring_service: String,

    /// Directory for the file fallback. Defaults to `~/.sprintdesk`.
    #[serde(default)]
    pub credentials_dir: Option<String>,

    /// Skip the keychain entirely and use only the credentials file.
    #[serde(default)]
    pub file_only: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            keyring_service: default_keyring_service(),
            credentials_dir: None,
            file_only: false,
        }
    }
}

impl AuthConfig {
    /// Resolved credentials directory, `None` if no home directory exists.
    #[must_use]
    pub fn credentials_dir(&self) -> Option<PathBuf> {
        self.credentials_dir
            .as_ref()
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".sprintdesk")))
    }
}
