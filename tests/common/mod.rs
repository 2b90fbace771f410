#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;

use redditscout::config::{GatewayConfig, SessionConfig};
use redditscout::gateway::GatewayClient;
use redditscout::session::{SessionHandle, SessionStore};
use redditscout::types::{Session, User};

/// One request as seen by the stub webhook.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub body: Value,
    pub api_key: Option<String>,
    pub bearer: Option<String>,
}

impl RecordedRequest {
    pub fn action(&self) -> String {
        self.body
            .get("action")
            .and_then(|a| a.as_str())
            .unwrap_or_default()
            .to_string()
    }
}

type Responder = dyn Fn(usize, &Value) -> (StatusCode, Value) + Send + Sync;

#[derive(Clone)]
struct StubState {
    hits: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    responder: Arc<Responder>,
}

/// In-process stand-in for the external webhook. Records every request and
/// answers according to the responder the test installed (the responder
/// receives the zero-based attempt index and the request body).
pub struct StubWebhook {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubWebhook {
    pub fn hit_count(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

pub async fn spawn_stub<F>(responder: F) -> StubWebhook
where
    F: Fn(usize, &Value) -> (StatusCode, Value) + Send + Sync + 'static,
{
    let state = StubState {
        hits: Arc::new(AtomicUsize::new(0)),
        requests: Arc::new(Mutex::new(Vec::new())),
        responder: Arc::new(responder),
    };

    let app = Router::new().route("/", post(respond)).with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind stub webhook");
    let addr = listener.local_addr().expect("stub webhook has no local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub webhook crashed");
    });

    StubWebhook {
        base_url: format!("http://{}", addr),
        hits: state.hits,
        requests: state.requests,
    }
}

async fn respond(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let attempt = state.hits.fetch_add(1, Ordering::SeqCst);

    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    };
    state.requests.lock().unwrap().push(RecordedRequest {
        body: body.clone(),
        api_key: header("x-api-key"),
        bearer: header("authorization"),
    });

    let (status, value) = (state.responder)(attempt, &body);
    (status, Json(value))
}

/// Gateway config pointed at a stub, with fast retries unless a test needs
/// the real 1-second spacing.
pub fn gateway_config(base_url: &str, retry_delay_ms: u64) -> GatewayConfig {
    GatewayConfig {
        webhook_url: base_url.to_string(),
        api_key: "test-api-key".to_string(),
        timeout_secs: 10,
        retry_attempts: 3,
        retry_delay_ms,
    }
}

/// Fresh session directory + handle, isolated per test.
pub fn temp_session(tag: &str) -> (SessionHandle, PathBuf) {
    let dir = std::env::temp_dir().join("redditscout-it").join(format!(
        "{}-{}",
        tag,
        unique_nanos()
    ));
    std::fs::create_dir_all(&dir).expect("failed to create temp session dir");
    (SessionHandle::new(SessionStore::new(dir.clone())), dir)
}

pub fn session_config(dir: &std::path::Path) -> SessionConfig {
    SessionConfig {
        config_dir: Some(dir.display().to_string()),
        allow_demo_login: true,
    }
}

pub fn gateway(base_url: &str, retry_delay_ms: u64, session: &SessionHandle) -> Arc<GatewayClient> {
    Arc::new(
        GatewayClient::new(&gateway_config(base_url, retry_delay_ms), session.clone())
            .expect("failed to build gateway client"),
    )
}

pub fn test_session(token: &str) -> Session {
    Session {
        token: token.to_string(),
        user: User { id: 42, username: "operator".into(), email: "operator@example.com".into() },
    }
}

fn unique_nanos() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos() as i64
}
