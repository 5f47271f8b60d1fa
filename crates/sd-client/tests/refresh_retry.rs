//! Transport behavior against an in-process fake backend.
//!
//! The backend runs on `tiny_http` in a background thread and answers each
//! request through a scripted handler, recording what it saw.

use std::io::Read as _;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use base64::Engine as _;
use sd_auth::{CredentialStore, Identity, MemoryCredentialStore, Session};
use sd_client::{ApiClient, ApiRequest, ClientError, HttpTransport, Transport, TransportEvent};
use sd_config::ApiConfig;
use serde_json::{Value, json};

#[derive(Debug, Clone)]
struct Seen {
    method: String,
    url: String,
    authorization: Option<String>,
    body: String,
}

type Handler = Box<dyn Fn(&Seen) -> (u16, String) + Send + 'static>;

struct FakeBackend {
    base_url: String,
    seen: Arc<Mutex<Vec<Seen>>>,
    server: Arc<tiny_http::Server>,
    thread: Option<JoinHandle<()>>,
}

impl FakeBackend {
    fn start(handler: Handler) -> Self {
        let server = Arc::new(tiny_http::Server::http("127.0.0.1:0").expect("bind"));
        let addr = server.server_addr().to_ip().expect("ip listener");
        let seen = Arc::new(Mutex::new(Vec::new()));

        let thread = {
            let server = Arc::clone(&server);
            let seen = Arc::clone(&seen);
            std::thread::spawn(move || {
                for mut request in server.incoming_requests() {
                    let mut body = String::new();
                    let _ = request.as_reader().read_to_string(&mut body);
                    let record = Seen {
                        method: request.method().to_string(),
                        url: request.url().to_string(),
                        authorization: request
                            .headers()
                            .iter()
                            .find(|h| h.field.equiv("Authorization"))
                            .map(|h| h.value.as_str().to_string()),
                        body,
                    };
                    let (status, reply) = handler(&record);
                    seen.lock().unwrap().push(record);
                    let header = tiny_http::Header::from_bytes(
                        &b"Content-Type"[..],
                        &b"application/json"[..],
                    )
                    .unwrap();
                    let response = tiny_http::Response::from_string(reply)
                        .with_status_code(status)
                        .with_header(header);
                    let _ = request.respond(response);
                }
            })
        };

        Self {
            base_url: format!("http://{addr}/api/"),
            seen,
            server,
            thread: Some(thread),
        }
    }

    fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }

    fn count(&self, url: &str) -> usize {
        self.seen().iter().filter(|s| s.url == url).count()
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

fn jwt(user_id: i64, role: &str) -> String {
    let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
    format!(
        "{}.{}.{}",
        engine.encode(r#"{"alg":"HS256"}"#),
        engine.encode(format!(r#"{{"user_id":{user_id},"role":"{role}"}}"#)),
        engine.encode("sig")
    )
}

fn transport_for(backend: &FakeBackend, store: Arc<MemoryCredentialStore>) -> HttpTransport {
    let config = ApiConfig {
        base_url: backend.base_url.clone(),
        ..ApiConfig::default()
    };
    let session = Arc::new(Session::bootstrap(store));
    HttpTransport::new(&config, session).expect("transport")
}

const REFRESH_URL: &str = "/api/auth/token/refresh/";

#[tokio::test]
async fn refreshes_once_and_retries_with_new_credential() {
    let old = jwt(5, "DEV");
    let new = jwt(5, "PM");
    let (old_h, new_h) = (format!("Bearer {old}"), format!("Bearer {new}"));
    let new_for_handler = new.clone();
    let backend = FakeBackend::start(Box::new(move |seen| match seen.url.as_str() {
        REFRESH_URL => (200, json!({ "access": new_for_handler }).to_string()),
        _ if seen.authorization.as_deref() == Some(new_h.as_str()) => {
            (200, json!({ "results": [{ "id": 1 }] }).to_string())
        }
        _ if seen.authorization.as_deref() == Some(old_h.as_str()) => (401, "{}".into()),
        _ => (500, "unexpected".into()),
    }));

    let store = Arc::new(MemoryCredentialStore::with_pair(&old, "refresh-1"));
    let transport = transport_for(&backend, store.clone());
    let mut events = transport.subscribe();

    let body = transport.send(ApiRequest::get("tasks/")).await.expect("retried");
    assert_eq!(body, json!({ "results": [{ "id": 1 }] }));

    assert_eq!(backend.count(REFRESH_URL), 1);
    assert_eq!(backend.count("/api/tasks/"), 2);
    let refresh_body: Value =
        serde_json::from_str(&backend.seen()[1].body).expect("refresh body is JSON");
    assert_eq!(refresh_body, json!({ "refresh": "refresh-1" }));

    assert_eq!(store.load_access().as_deref(), Some(new.as_str()));
    assert_eq!(store.load_refresh().as_deref(), Some("refresh-1"));
    assert_eq!(events.try_recv().unwrap(), TransportEvent::CredentialRefreshed);
    assert_eq!(
        transport.session().identity(),
        Identity::authenticated(5, Some(sd_core::enums::Role::ProjectManager))
    );
}

#[tokio::test]
async fn second_401_propagates_without_another_refresh() {
    let backend = FakeBackend::start(Box::new(|seen| match seen.url.as_str() {
        REFRESH_URL => (200, json!({ "access": jwt(1, "QA") }).to_string()),
        _ => (401, r#"{"detail":"nope"}"#.into()),
    }));
    let store = Arc::new(MemoryCredentialStore::with_pair(&jwt(1, "QA"), "r"));
    let transport = transport_for(&backend, store.clone());

    let err = transport.send(ApiRequest::get("projects/")).await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized), "got {err:?}");
    assert_eq!(backend.count(REFRESH_URL), 1);
    assert_eq!(backend.count("/api/projects/"), 2);
    assert!(!store.is_empty(), "a refused retry does not end the session");
}

#[tokio::test]
async fn refresh_failure_clears_session_and_broadcasts() {
    let backend = FakeBackend::start(Box::new(|seen| match seen.url.as_str() {
        REFRESH_URL => (401, r#"{"detail":"token is blacklisted"}"#.into()),
        _ => (401, "{}".into()),
    }));
    let store = Arc::new(MemoryCredentialStore::with_pair(&jwt(2, "ADMIN"), "stale"));
    let transport = transport_for(&backend, store.clone());
    let mut events = transport.subscribe();
    let mut identity = transport.session().subscribe();
    assert!(identity.borrow_and_update().is_authenticated);

    let err = transport.send(ApiRequest::get("reports/")).await.unwrap_err();
    assert!(matches!(err, ClientError::SessionExpired), "got {err:?}");
    assert!(store.is_empty());
    assert_eq!(events.try_recv().unwrap(), TransportEvent::SessionExpired);
    assert!(identity.has_changed().unwrap());
    assert_eq!(*identity.borrow(), Identity::anonymous());
    assert_eq!(backend.count("/api/reports/"), 1);
}

#[tokio::test]
async fn missing_refresh_credential_ends_session_without_calling_backend() {
    let backend = FakeBackend::start(Box::new(|_| (401, "{}".into())));
    let store = Arc::new(MemoryCredentialStore::new());
    store.store_access(&jwt(3, "DEV")).unwrap();
    let transport = transport_for(&backend, store.clone());

    let err = transport.send(ApiRequest::get("tasks/")).await.unwrap_err();
    assert!(matches!(err, ClientError::SessionExpired));
    assert_eq!(backend.count(REFRESH_URL), 0);
    assert!(store.is_empty());
}

#[tokio::test]
async fn other_statuses_propagate_unchanged() {
    let backend = FakeBackend::start(Box::new(|seen| match seen.method.as_str() {
        "POST" => (400, r#"{"name":["This field is required."]}"#.into()),
        _ => (503, "maintenance".into()),
    }));
    let store = Arc::new(MemoryCredentialStore::with_pair(&jwt(1, "PM"), "r"));
    let transport = transport_for(&backend, store);

    let err = transport
        .send(ApiRequest::post("projects/", json!({})))
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let err = transport.send(ApiRequest::get("projects/")).await.unwrap_err();
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "maintenance");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(backend.count(REFRESH_URL), 0);
}

#[tokio::test]
async fn login_is_public_and_never_refreshes() {
    let backend = FakeBackend::start(Box::new(|_| {
        (401, r#"{"detail":"No active account"}"#.into())
    }));
    let store = Arc::new(MemoryCredentialStore::with_pair(&jwt(1, "PM"), "r"));
    let transport = transport_for(&backend, store.clone());
    let client = ApiClient::new(Arc::new(transport));

    let err = client.obtain_token("ann", "wrong").await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 401, .. }));
    let seen = backend.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].url, "/api/auth/token/");
    assert!(seen[0].authorization.is_none());
    assert!(!store.is_empty());
}

#[tokio::test]
async fn complete_sprint_posts_to_action_path() {
    let backend = FakeBackend::start(Box::new(|_| {
        (
            200,
            json!({ "status": "Sprint completed", "moved_tasks_count": 3 }).to_string(),
        )
    }));
    let store = Arc::new(MemoryCredentialStore::with_pair(&jwt(1, "PM"), "r"));
    let client = ApiClient::new(Arc::new(transport_for(&backend, store)));

    let completion = client.complete_sprint(42).await.expect("completes");
    assert_eq!(completion.moved_tasks_count, 3);
    let seen = backend.seen();
    assert_eq!(seen[0].method, "POST");
    assert_eq!(seen[0].url, "/api/sprints/42/complete/");
    assert!(seen[0].authorization.as_deref().unwrap().starts_with("Bearer "));
}
