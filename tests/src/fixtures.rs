//! Shared test fixtures: a fully wired service on a temporary SQLite file.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use shared_bus::EventPublisher;
use sr_01_storage::{Database, SqliteCredentialStore, SqliteInventoryStore, StateFile};
use sr_02_notifications::{NotificationSink, RecordingSink};
use sr_03_api_gateway::{ApiGatewayService, AppState, Backends, PasswordHashing, ServiceConfig};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret";
pub const TEST_PASSWORD: &str = "correct horse";

/// A service instance plus handles on its side effects.
pub struct Stack {
    pub router: Router,
    pub state: AppState,
    pub sink: Arc<RecordingSink>,
    pub dir: TempDir,
}

pub fn test_config(dir: &Path) -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.auth.jwt_secret = TEST_SECRET.to_string();
    config.storage.database_path = dir.join("database.db");
    config.storage.state_file = dir.join("state.json");
    config.storage.live_message_file = dir.join("liveMessageId.txt");
    config
}

/// SQLite-backed stack recording notifications in memory.
pub fn sqlite_stack() -> Stack {
    let sink = Arc::new(RecordingSink::new());
    let dir = tempfile::tempdir().expect("tempdir");
    let (router, state) = build(&dir, sink.clone());
    Stack {
        router,
        state,
        sink,
        dir,
    }
}

/// Re-open the same database directory with a fresh service.
pub fn reopen(stack: Stack) -> Stack {
    let sink = Arc::new(RecordingSink::new());
    let (router, state) = build(&stack.dir, sink.clone());
    Stack {
        router,
        state,
        sink,
        dir: stack.dir,
    }
}

/// Wire a service in `dir` with an arbitrary notifier.
pub fn build(dir: &TempDir, notifier: Arc<dyn NotificationSink>) -> (Router, AppState) {
    let config = test_config(dir.path());
    let db = Database::open(&config.storage.database_path).expect("open database");
    let backends = Backends {
        inventory: Arc::new(SqliteInventoryStore::new(db.clone())),
        credentials: Arc::new(SqliteCredentialStore::new(db)),
        notifier,
        state_file: StateFile::new(&config.storage.state_file),
    };
    let passwords = PasswordHashing::minimal().expect("argon2 params");
    let service = ApiGatewayService::with_password_hashing(config, backends, passwords)
        .expect("service");
    (service.router(), service.state().clone())
}

impl Stack {
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        send(&self.router, method, uri, token, body).await
    }

    /// Register `username` and return a token for it.
    pub async fn login(&self, username: &str) -> String {
        let creds = json!({ "username": username, "password": TEST_PASSWORD });
        let (status, _) = self.request("POST", "/register", None, Some(creds.clone())).await;
        assert_eq!(status, StatusCode::OK, "register {username}");

        let (status, body) = self.request("POST", "/login", None, Some(creds)).await;
        assert_eq!(status, StatusCode::OK, "login {username}");
        body["token"].as_str().expect("token").to_string()
    }

    pub async fn add(&self, token: &str, name: &str, quantity: i64) -> (StatusCode, Value) {
        self.request(
            "POST",
            "/inventory",
            Some(token),
            Some(json!({ "product_name": name, "quantity": quantity })),
        )
        .await
    }

    pub async fn list(&self, token: &str) -> Value {
        let (status, body) = self.request("GET", "/inventory", Some(token), None).await;
        assert_eq!(status, StatusCode::OK);
        body
    }

    pub fn events_published(&self) -> u64 {
        self.state.bus.events_published()
    }
}

/// Drive `router` with one request and decode the body as JSON (or text).
pub async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        req = req.header(header::AUTHORIZATION, token);
    }
    let req = match body {
        Some(body) => req
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => req.body(Body::empty()),
    }
    .expect("request");

    let response = router.clone().oneshot(req).await.expect("infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, value)
}

/// Serve `router` on an ephemeral local port.
pub async fn spawn_server(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    addr
}
