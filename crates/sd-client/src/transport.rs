//! The single HTTP path every request takes.
//!
//! Attaches the bearer credential, and on a 401 performs at most one
//! credential refresh per request before retrying it. A refresh that fails
//! ends the session: the credential store is cleared, the session publishes
//! the anonymous identity, and [`TransportEvent::SessionExpired`] is broadcast
//! so the front end can return to its login entry point.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sd_auth::{AuthError, Session};
use sd_config::ApiConfig;
use sd_core::responses::{RefreshedToken, TokenPair};
use serde_json::{Value, json};
use tokio::sync::broadcast;

use crate::error::ClientError;
use crate::http::{check_response, decode_body};

const REFRESH_PATH: &str = "auth/token/refresh/";
const EVENT_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        })
    }
}

/// One outgoing request, relative to the API base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the base URL, e.g. `sprints/42/complete/`.
    pub path: String,
    /// Query parameters, passed through verbatim (encoded on send).
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    /// Set once the request has been re-sent after a credential refresh.
    pub retried: bool,
    /// Sent without a bearer credential; a 401 is returned as-is.
    pub public: bool,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            retried: false,
            public: false,
        }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    #[must_use]
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Post, path).with_body(body)
    }

    #[must_use]
    pub fn patch(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Patch, path).with_body(body)
    }

    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// Mark the request as not needing (or not wanting) a session.
    #[must_use]
    pub const fn public(mut self) -> Self {
        self.public = true;
        self
    }

    /// `path?k=v&...` with keys and values percent-encoded.
    #[must_use]
    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = self
            .query
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(value)
                )
            })
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{query}", self.path)
    }
}

/// Session-level events raised by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportEvent {
    /// A 401 was recovered by refreshing the access credential.
    CredentialRefreshed,
    /// Refresh failed; persisted credentials were cleared.
    SessionExpired,
}

/// Sends requests to the backend and returns the decoded JSON body.
#[async_trait]
pub trait Transport: Send + Sync {
    /// # Errors
    ///
    /// Returns [`ClientError`] for transport failures, non-success statuses,
    /// undecodable bodies, and unrecoverable authentication failures.
    async fn send(&self, request: ApiRequest) -> Result<Value, ClientError>;
}

/// [`Transport`] over `reqwest`.
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
    session: Arc<Session>,
    events: broadcast::Sender<TransportEvent>,
}

impl HttpTransport {
    /// # Errors
    ///
    /// Returns `ClientError::Config` if the base URL is invalid, or
    /// `ClientError::Http` if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig, session: Arc<Session>) -> Result<Self, ClientError> {
        let base_url = config.normalized_base_url()?;
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Ok(Self {
            http: builder.build()?,
            base_url,
            session,
            events,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub const fn session(&self) -> &Arc<Session> {
        &self.session
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<TransportEvent> {
        self.events.subscribe()
    }

    async fn execute(&self, request: &ApiRequest) -> Result<reqwest::Response, ClientError> {
        let url = format!("{}{}", self.base_url, request.path_and_query());
        tracing::debug!(method = %request.method, %url, retried = request.retried, "sending request");

        let mut builder = self.http.request(request.method.as_reqwest(), &url);
        if !request.public {
            if let Some(access) = self.session.credentials().load_access() {
                builder = builder.bearer_auth(access);
            }
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        Ok(builder.send().await?)
    }

    /// Exchange the refresh credential for a new access credential.
    async fn refresh(&self) -> Result<(), ClientError> {
        let credentials = self.session.credentials();
        let refresh = credentials
            .load_refresh()
            .ok_or(ClientError::Auth(AuthError::NotAuthenticated))?;

        let url = format!("{}{REFRESH_PATH}", self.base_url);
        let resp = self
            .http
            .post(&url)
            .json(&json!({ "refresh": refresh }))
            .send()
            .await?;
        let body = decode_body(check_response(resp).await?).await?;
        let refreshed: RefreshedToken = serde_json::from_value(body)?;

        match refreshed.refresh {
            Some(refresh) => credentials.store_pair(&TokenPair {
                access: refreshed.access,
                refresh,
            })?,
            None => credentials.store_access(&refreshed.access)?,
        }
        Ok(())
    }

    fn expire(&self) {
        if let Err(error) = self.session.credentials().clear() {
            tracing::warn!(%error, "failed to clear credentials after refresh failure");
        }
        self.session.expire();
        let _ = self.events.send(TransportEvent::SessionExpired);
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, mut request: ApiRequest) -> Result<Value, ClientError> {
        loop {
            let resp = self.execute(&request).await?;

            if resp.status() == reqwest::StatusCode::UNAUTHORIZED && !request.public {
                if request.retried {
                    return Err(ClientError::Unauthorized);
                }
                request.retried = true;
                match self.refresh().await {
                    Ok(()) => {
                        self.session.reload();
                        let _ = self.events.send(TransportEvent::CredentialRefreshed);
                        continue;
                    }
                    Err(error) => {
                        tracing::warn!(%error, path = %request.path, "credential refresh failed; ending session");
                        self.expire();
                        return Err(ClientError::SessionExpired);
                    }
                }
            }

            return decode_body(check_response(resp).await?).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn path_without_query_is_unchanged() {
        assert_eq!(ApiRequest::get("tasks/").path_and_query(), "tasks/");
    }

    #[test]
    fn query_is_encoded() {
        let request = ApiRequest::get("tasks/").with_query(vec![
            ("project".into(), "7".into()),
            ("search".into(), "login bug&more".into()),
        ]);
        assert_eq!(
            request.path_and_query(),
            "tasks/?project=7&search=login%20bug%26more"
        );
    }

    #[test]
    fn constructors_set_method_and_body() {
        let request = ApiRequest::post("sprints/42/complete/", Value::Null);
        assert_eq!(request.method, Method::Post);
        assert!(!request.retried);
        assert!(!request.public);
        assert!(ApiRequest::delete("tasks/1/").public().public);
    }
}
