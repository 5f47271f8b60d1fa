//! REST backend connection settings.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_base_url() -> String {
    "http://localhost:8000/api/".to_string()
}

fn default_user_agent() -> String {
    "sprintdesk/0.1".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Root of the REST API, e.g. `https://pm.example.com/api/`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout. `None` keeps the HTTP client's default.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    /// Base URL with exactly one trailing slash, so relative paths join cleanly.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the URL is empty or not http(s).
    pub fn normalized_base_url(&self) -> Result<String, ConfigError> {
        let trimmed = self.base_url.trim();
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".into(),
                reason: format!("expected an http(s) URL, got '{trimmed}'"),
            });
        }
        Ok(format!("{}/", trimmed.trim_end_matches('/')))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_point_at_local_backend() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000/api/");
        assert!(config.request_timeout_secs.is_none());
    }

    #[test]
    fn normalizes_trailing_slash() {
        let config = ApiConfig {
            base_url: "https://pm.example.com/api//".into(),
            ..Default::default()
        };
        assert_eq!(
            config.normalized_base_url().unwrap(),
            "https://pm.example.com/api/"
        );

        let bare = ApiConfig {
            base_url: "https://pm.example.com/api".into(),
            ..Default::default()
        };
        assert_eq!(bare.normalized_base_url().unwrap(), "https://pm.example.com/api/");
    }

    #[test]
    fn rejects_non_http_url() {
        let config = ApiConfig {
            base_url: "ftp://example.com".into(),
            ..Default::default()
        };
        assert!(matches!(
            config.normalized_base_url(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
