//! # Live Updates
//!
//! Observers over real sockets: browsers on `/ws`, and webhook channels
//! served by a local fake endpoint.

#[cfg(test)]
mod tests {
    use crate::fixtures::{build, send, spawn_server, sqlite_stack};
    use axum::extract::{Path, RawQuery, State};
    use axum::http::StatusCode;
    use axum::routing::{delete, post};
    use axum::{Json, Router};
    use futures::StreamExt;
    use parking_lot::Mutex;
    use serde_json::{json, Value};
    use sr_02_notifications::{WebhookSink, WebhookSinkConfig};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::timeout;
    use tokio_tungstenite::connect_async;

    // =============================================================================
    // WEBSOCKET OBSERVERS
    // =============================================================================

    async fn next_frame<S>(socket: &mut S) -> Option<String>
    where
        S: futures::Stream<Item = Result<tokio_tungstenite::tungstenite::Message, tokio_tungstenite::tungstenite::Error>>
            + Unpin,
    {
        match timeout(Duration::from_secs(2), socket.next()).await {
            Ok(Some(Ok(msg))) => msg.to_text().ok().map(String::from),
            _ => None,
        }
    }

    #[tokio::test]
    async fn test_observers_receive_one_update_per_mutation() {
        let stack = sqlite_stack();
        let token = stack.login("alice").await;
        let addr = spawn_server(stack.router.clone()).await;

        let (mut first, _) = connect_async(format!("ws://{addr}/ws")).await.unwrap();
        let (mut second, _) = connect_async(format!("ws://{addr}/ws")).await.unwrap();

        let (status, _) = stack.add(&token, "Widget", 3).await;
        assert_eq!(status, StatusCode::OK);

        for socket in [&mut first, &mut second] {
            let frame = next_frame(socket).await.expect("update frame");
            let parsed: Value = serde_json::from_str(&frame).unwrap();
            assert_eq!(parsed, json!({ "event": "update" }));
        }

        // Nothing else is pending
        assert!(timeout(Duration::from_millis(200), first.next()).await.is_err());
    }

    #[tokio::test]
    async fn test_rejected_mutation_pushes_nothing() {
        let stack = sqlite_stack();
        let token = stack.login("alice").await;
        let addr = spawn_server(stack.router.clone()).await;
        let (mut socket, _) = connect_async(format!("ws://{addr}/ws")).await.unwrap();

        let (status, _) = stack
            .request("DELETE", "/inventory/3", Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        assert!(timeout(Duration::from_millis(300), socket.next()).await.is_err());
    }

    // =============================================================================
    // WEBHOOK CHANNELS
    // =============================================================================

    #[derive(Debug, Clone, PartialEq)]
    enum Hook {
        Log(String),
        LivePost { wait: bool, fields: usize },
        LiveDelete(String),
    }

    type Seen = Arc<Mutex<Vec<Hook>>>;

    async fn log_hook(State(seen): State<Seen>, Json(body): Json<Value>) -> StatusCode {
        let content = body["content"].as_str().unwrap_or_default().to_string();
        seen.lock().push(Hook::Log(content));
        StatusCode::NO_CONTENT
    }

    async fn live_post(
        State(seen): State<Seen>,
        RawQuery(query): RawQuery,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        let fields = body["embeds"][0]["fields"]
            .as_array()
            .map(Vec::len)
            .unwrap_or_default();
        let mut seen = seen.lock();
        seen.push(Hook::LivePost {
            wait: query.as_deref() == Some("wait=true"),
            fields,
        });
        Json(json!({ "id": format!("live-{}", seen.len()) }))
    }

    async fn live_delete(State(seen): State<Seen>, Path(id): Path<String>) -> StatusCode {
        seen.lock().push(Hook::LiveDelete(id));
        StatusCode::NO_CONTENT
    }

    async fn spawn_webhooks() -> (String, Seen) {
        let seen: Seen = Arc::default();
        let app = Router::new()
            .route("/log", post(log_hook))
            .route("/live", post(live_post))
            .route("/live/messages/:id", delete(live_delete))
            .with_state(seen.clone());
        let addr = spawn_server(app).await;
        (format!("http://{addr}"), seen)
    }

    #[tokio::test]
    async fn test_webhook_channels_end_to_end() {
        let (base, seen) = spawn_webhooks().await;
        let dir = tempfile::tempdir().unwrap();
        let handle_path = dir.path().join("liveMessageId.txt");

        let sink = WebhookSink::new(WebhookSinkConfig {
            log_url: Some(format!("{base}/log")),
            live_url: Some(format!("{base}/live")),
            live_handle_path: handle_path.clone(),
            timeout: Duration::from_secs(5),
        })
        .unwrap();
        let (router, _state) = build(&dir, Arc::new(sink));

        let creds = json!({ "username": "alice", "password": "pw" });
        send(&router, "POST", "/register", None, Some(creds.clone())).await;
        let (_, login) = send(&router, "POST", "/login", None, Some(creds)).await;
        let token = login["token"].as_str().unwrap().to_string();

        let widget = json!({ "product_name": "Widget", "quantity": 3 });
        let bolt = json!({ "product_name": "Bolt", "quantity": 40 });
        let (status, _) = send(&router, "POST", "/inventory", Some(&token), Some(widget)).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&router, "POST", "/inventory", Some(&token), Some(bolt)).await;
        assert_eq!(status, StatusCode::OK);

        let seen = seen.lock().clone();
        assert_eq!(
            seen,
            vec![
                Hook::Log("📝 alice added Widget (3)".into()),
                Hook::Log("⚠️ Low stock: Widget (3)".into()),
                Hook::LivePost { wait: true, fields: 1 },
                Hook::Log("📝 alice added Bolt (40)".into()),
                Hook::LiveDelete("live-3".into()),
                Hook::LivePost { wait: true, fields: 2 },
            ]
        );
        assert_eq!(std::fs::read_to_string(&handle_path).unwrap(), "live-6");
    }

    #[tokio::test]
    async fn test_unreachable_webhooks_do_not_fail_requests() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let dead = listener.local_addr().unwrap();
        drop(listener);

        let dir = tempfile::tempdir().unwrap();
        let sink = WebhookSink::new(WebhookSinkConfig {
            log_url: Some(format!("http://{dead}/log")),
            live_url: Some(format!("http://{dead}/live")),
            live_handle_path: dir.path().join("liveMessageId.txt"),
            timeout: Duration::from_secs(2),
        })
        .unwrap();
        let (router, state) = build(&dir, Arc::new(sink));

        let creds = json!({ "username": "alice", "password": "pw" });
        send(&router, "POST", "/register", None, Some(creds.clone())).await;
        let (_, login) = send(&router, "POST", "/login", None, Some(creds)).await;
        let token = login["token"].as_str().unwrap().to_string();

        let (status, item) = send(
            &router,
            "POST",
            "/inventory",
            Some(&token),
            Some(json!({ "product_name": "Widget", "quantity": 3 })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(item["id"], 1);
        assert_eq!(state.inventory.list().unwrap().len(), 1);
        assert!(!dir.path().join("liveMessageId.txt").exists());
    }
}
