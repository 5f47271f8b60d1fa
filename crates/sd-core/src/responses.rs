//! Response shapes returned by list endpoints, sprint actions, and auth.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{BugReport, Task};

/// A list response.
///
/// List endpoints paginate with a `results` envelope; some deployments return
/// a bare array instead, which is accepted as a fallback.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Page(Page<T>),
    Bare(Vec<T>),
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Page<T> {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> ListEnvelope<T> {
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Page(page) => page.results,
            Self::Bare(items) => items,
        }
    }

    /// URL of the next page, if the server paginated and more remain.
    #[must_use]
    pub fn next_page(&self) -> Option<&str> {
        match self {
            Self::Page(page) => page.next.as_deref(),
            Self::Bare(_) => None,
        }
    }
}

/// Body returned by the sprint `complete` action.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SprintCompletion {
    #[serde(default)]
    pub status: String,
    /// Unfinished tasks the backend moved to the backlog.
    #[serde(default)]
    pub moved_tasks_count: u64,
}

/// One day of sprint activity from the `timeline` read.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TimelineDay {
    pub date: NaiveDate,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub bugs: Vec<BugReport>,
}

/// Access/refresh credential pair issued at login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Body returned by the refresh endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefreshedToken {
    pub access: String,
    /// Present when the backend rotates refresh credentials.
    #[serde(default)]
    pub refresh: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: i64,
    }

    #[test]
    fn envelope_unwraps_paginated_results() {
        let envelope: ListEnvelope<Item> = serde_json::from_value(json!({
            "count": 2,
            "next": "http://api/tasks/?page=2",
            "previous": null,
            "results": [{"id": 1}, {"id": 2}]
        }))
        .unwrap();
        assert_eq!(envelope.next_page(), Some("http://api/tasks/?page=2"));
        assert_eq!(envelope.into_items(), vec![Item { id: 1 }, Item { id: 2 }]);
    }

    #[test]
    fn envelope_accepts_bare_array() {
        let envelope: ListEnvelope<Item> = serde_json::from_value(json!([{"id": 9}])).unwrap();
        assert!(envelope.next_page().is_none());
        assert_eq!(envelope.into_items(), vec![Item { id: 9 }]);
    }

    #[test]
    fn completion_tolerates_missing_fields() {
        let done: SprintCompletion = serde_json::from_value(json!({})).unwrap();
        assert_eq!(done.moved_tasks_count, 0);
    }
}
