//! Scripted transport and JSON fixtures shared by the store tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use sd_client::{ApiClient, ApiRequest, ClientError, Method, Transport};
use sd_store::Stores;
use serde_json::{Value, json};

pub struct Reply {
    pub delay: Duration,
    pub outcome: Result<Value, ClientError>,
}

pub fn ok(body: Value) -> Reply {
    Reply {
        delay: Duration::ZERO,
        outcome: Ok(body),
    }
}

pub fn ok_after(ms: u64, body: Value) -> Reply {
    Reply {
        delay: Duration::from_millis(ms),
        outcome: Ok(body),
    }
}

pub fn status(code: u16) -> Reply {
    Reply {
        delay: Duration::ZERO,
        outcome: Err(ClientError::Api {
            status: code,
            message: format!("scripted {code}"),
        }),
    }
}

/// The transport gave up after a failed refresh.
pub fn expired() -> Reply {
    Reply {
        delay: Duration::ZERO,
        outcome: Err(ClientError::SessionExpired),
    }
}

/// `(request, nth call to the same method and path)` → reply.
type Handler = dyn Fn(&ApiRequest, usize) -> Reply + Send + Sync;

pub struct ScriptedTransport {
    handler: Box<Handler>,
    calls: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new(handler: impl Fn(&ApiRequest, usize) -> Reply + Send + Sync + 'static) -> Self {
        Self {
            handler: Box::new(handler),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<ApiRequest> {
        self.calls.lock().clone()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| call.method == method && call.path == path)
            .count()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, ClientError> {
        let nth = {
            let mut calls = self.calls.lock();
            let nth = calls
                .iter()
                .filter(|call| call.method == request.method && call.path == request.path)
                .count();
            calls.push(request.clone());
            nth
        };
        let reply = (self.handler)(&request, nth);
        if !reply.delay.is_zero() {
            tokio::time::sleep(reply.delay).await;
        }
        reply.outcome
    }
}

pub fn harness(
    handler: impl Fn(&ApiRequest, usize) -> Reply + Send + Sync + 'static,
) -> (Arc<ScriptedTransport>, Arc<Stores>) {
    let transport = Arc::new(ScriptedTransport::new(handler));
    let api = ApiClient::new(transport.clone());
    (transport, Arc::new(Stores::new(api)))
}

pub fn page(items: Vec<Value>) -> Value {
    json!({ "count": items.len(), "next": null, "previous": null, "results": items })
}

pub fn project_json(id: i64) -> Value {
    json!({
        "id": id, "name": format!("Project {id}"), "status": "ACTIVE",
        "start_date": "2024-01-01", "manager": 1, "members": [1]
    })
}

pub fn sprint_json(id: i64, project: i64, active: bool) -> Value {
    json!({
        "id": id, "name": format!("Sprint {id}"), "start_date": "2024-01-01",
        "end_date": "2024-01-14", "is_active": active, "project": project
    })
}

pub fn task_json(id: i64, project: i64, sprint: Option<i64>, status: &str) -> Value {
    json!({
        "id": id, "title": format!("Task {id}"), "status": status, "priority": "MEDIUM",
        "story_points": 3, "project": project, "sprint": sprint, "bugs": []
    })
}

pub fn bug_json(id: i64, project: i64, status: &str) -> Value {
    json!({
        "id": id, "title": format!("Bug {id}"), "status": status, "priority": "HIGH",
        "project": project, "task": null, "reporter": 4
    })
}

pub fn report_json(id: i64, project: i64, ready: bool) -> Value {
    let data = if ready {
        json!({
            "project_name": format!("Project {project}"),
            "tasks": { "total": 4, "completed": 1, "in_progress": 2 },
            "story_points": { "total": 20, "burned": 5, "progress_percent": "25.0%" },
            "quality": { "active_bugs": 1, "health": "Good" }
        })
    } else {
        json!({})
    };
    json!({
        "id": id, "project": project, "report_type": "PROJECT",
        "data": data, "is_ready": ready
    })
}
