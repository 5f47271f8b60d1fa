//! Typed REST endpoints over a [`Transport`].

use std::fmt;
use std::sync::Arc;

use sd_core::drafts::NewUser;
use sd_core::entities::{Sprint, User};
use sd_core::responses::{ListEnvelope, SprintCompletion, TimelineDay, TokenPair};
use sd_core::{EntityId, Resource};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::error::ClientError;
use crate::transport::{ApiRequest, Method, Transport};

const TOKEN_PATH: &str = "auth/token/";

/// Server-side filter and search parameters for list endpoints.
///
/// Values are passed through verbatim; the backend decides what they mean.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub project: Option<EntityId>,
    pub assignee: Option<EntityId>,
    pub sprint: Option<EntityId>,
    pub status: Option<String>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub extra: Vec<(String, String)>,
}

impl ListFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn project(mut self, id: EntityId) -> Self {
        self.project = Some(id);
        self
    }

    #[must_use]
    pub const fn assignee(mut self, id: EntityId) -> Self {
        self.assignee = Some(id);
        self
    }

    #[must_use]
    pub const fn sprint(mut self, id: EntityId) -> Self {
        self.sprint = Some(id);
        self
    }

    #[must_use]
    pub fn status(mut self, status: impl fmt::Display) -> Self {
        self.status = Some(status.to_string());
        self
    }

    #[must_use]
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub const fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Any other query parameter the backend understands.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        let ids = [
            ("project", self.project),
            ("assignee", self.assignee),
            ("sprint", self.sprint),
        ];
        for (key, value) in ids {
            if let Some(value) = value {
                query.push((key.to_string(), value.to_string()));
            }
        }
        if let Some(status) = &self.status {
            query.push(("status".into(), status.clone()));
        }
        if let Some(search) = &self.search {
            query.push(("search".into(), search.clone()));
        }
        if let Some(page) = self.page {
            query.push(("page".into(), page.to_string()));
        }
        if let Some(size) = self.page_size {
            query.push(("page_size".into(), size.to_string()));
        }
        query.extend(self.extra.iter().cloned());
        query
    }
}

/// Typed access to every REST resource.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    #[must_use]
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    async fn send_as<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ClientError> {
        let body = self.transport.send(request).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// One page of `E`, paginated envelope or bare array.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or the body is not a list of `E`.
    pub async fn list<E: Resource>(&self, filter: &ListFilter) -> Result<Vec<E>, ClientError> {
        let request = ApiRequest::get(E::KIND.collection_path()).with_query(filter.to_query());
        let envelope: ListEnvelope<E> = self.send_as(request).await?;
        Ok(envelope.into_items())
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or the body is not an `E`.
    pub async fn get<E: Resource>(&self, id: EntityId) -> Result<E, ClientError> {
        self.send_as(ApiRequest::get(E::KIND.item_path(id))).await
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or the body is not an `E`.
    pub async fn create<E: Resource>(&self, draft: &E::Draft) -> Result<E, ClientError> {
        let body = serde_json::to_value(draft)?;
        self.send_as(ApiRequest::post(E::KIND.collection_path(), body))
            .await
    }

    /// Partial update; only the fields present in `patch` are sent.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or the body is not an `E`.
    pub async fn update<E: Resource>(
        &self,
        id: EntityId,
        patch: &E::Patch,
    ) -> Result<E, ClientError> {
        let body = serde_json::to_value(patch)?;
        self.send_as(ApiRequest::patch(E::KIND.item_path(id), body))
            .await
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails.
    pub async fn delete<E: Resource>(&self, id: EntityId) -> Result<EntityId, ClientError> {
        self.transport
            .send(ApiRequest::delete(E::KIND.item_path(id)))
            .await?;
        Ok(id)
    }

    /// Close a sprint; the backend moves its unfinished tasks to the backlog.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails.
    pub async fn complete_sprint(&self, id: EntityId) -> Result<SprintCompletion, ClientError> {
        let path = format!("{}complete/", Sprint::KIND.item_path(id));
        let body = self.transport.send(ApiRequest::new(Method::Post, path)).await?;
        if body.is_null() {
            return Ok(SprintCompletion {
                status: String::new(),
                moved_tasks_count: 0,
            });
        }
        Ok(serde_json::from_value(body)?)
    }

    /// Tasks and bug reports created during the sprint, bucketed by day.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or the body is malformed.
    pub async fn sprint_timeline(&self, id: EntityId) -> Result<Vec<TimelineDay>, ClientError> {
        let path = format!("{}timeline/", Sprint::KIND.item_path(id));
        self.send_as(ApiRequest::get(path)).await
    }

    /// Exchange username and password for a credential pair.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api { status: 401, .. }` for bad credentials.
    pub async fn obtain_token(
        &self,
        username: &str,
        password: &str,
    ) -> Result<TokenPair, ClientError> {
        let body = json!({ "username": username, "password": password });
        self.send_as(ApiRequest::post(TOKEN_PATH, body).public())
            .await
    }

    /// Create an account. Open to anonymous callers.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`]; validation problems come back as `Api { status: 400, .. }`.
    pub async fn register(&self, user: &NewUser) -> Result<User, ClientError> {
        let body: Value = serde_json::to_value(user)?;
        self.send_as(ApiRequest::post(User::KIND.collection_path(), body).public())
            .await
    }
}
