//! # Request Flows
//!
//! End-to-end flows through the HTTP surface against a real SQLite file:
//! accounts, inventory mutations, and the side effects each mutation is
//! allowed (or not allowed) to produce.

#[cfg(test)]
mod tests {
    use crate::fixtures::{reopen, send, sqlite_stack, TEST_PASSWORD};
    use axum::http::StatusCode;
    use serde_json::json;

    // =============================================================================
    // ACCOUNTS
    // =============================================================================

    #[tokio::test]
    async fn test_duplicate_registration_rejected() {
        let stack = sqlite_stack();
        let creds = json!({ "username": "alice", "password": "pw1" });

        let (first, _) = stack.request("POST", "/register", None, Some(creds)).await;
        let (second, body) = stack
            .request(
                "POST",
                "/register",
                None,
                Some(json!({ "username": "alice", "password": "pw2" })),
            )
            .await;

        assert_eq!(first, StatusCode::OK);
        assert_eq!(second, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "bad_request");

        // The original password still works
        let (status, _) = stack
            .request(
                "POST",
                "/login",
                None,
                Some(json!({ "username": "alice", "password": "pw1" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_login_failure_parity() {
        let stack = sqlite_stack();
        stack.login("alice").await;

        let wrong_password = stack
            .request(
                "POST",
                "/login",
                None,
                Some(json!({ "username": "alice", "password": "wrong" })),
            )
            .await;
        let unknown_user = stack
            .request(
                "POST",
                "/login",
                None,
                Some(json!({ "username": "nobody", "password": TEST_PASSWORD })),
            )
            .await;

        assert_eq!(wrong_password, unknown_user);
        assert_eq!(wrong_password.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_token_identity_reaches_notifications() {
        let stack = sqlite_stack();
        let token = stack.login("carol").await;

        stack.add(&token, "Gear", 12).await;
        assert_eq!(stack.sink.logs(), vec!["📝 carol added Gear (12)".to_string()]);
    }

    // =============================================================================
    // INVENTORY
    // =============================================================================

    #[tokio::test]
    async fn test_add_then_list_contains_item() {
        let stack = sqlite_stack();
        let token = stack.login("alice").await;

        let (status, created) = stack.add(&token, "Sprocket", 17).await;
        assert_eq!(status, StatusCode::OK);

        let list = stack.list(&token).await;
        let rows = list.as_array().unwrap();
        assert!(rows
            .iter()
            .any(|row| row["product_name"] == "Sprocket" && row["quantity"] == 17));
        assert_eq!(rows[0], created);
    }

    #[tokio::test]
    async fn test_widget_low_stock_scenario() {
        let stack = sqlite_stack();
        let token = stack.login("alice").await;

        let (status, _) = stack.add(&token, "Widget", 3).await;
        assert_eq!(status, StatusCode::OK);

        let list = stack.list(&token).await;
        assert_eq!(list.as_array().unwrap().len(), 1);
        assert_eq!(list[0]["id"], 1);
        assert_eq!(list[0]["product_name"], "Widget");
        assert_eq!(list[0]["quantity"], 3);

        let logs = stack.sink.logs();
        let low_stock = logs
            .iter()
            .find(|line| line.contains("Low stock"))
            .expect("low-stock event");
        assert!(low_stock.contains("Widget"));
        assert!(low_stock.contains('3'));

        let summaries = stack.sink.summaries();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0][0].name, "Widget");
    }

    #[tokio::test]
    async fn test_delete_absent_leaves_inventory_unchanged() {
        let stack = sqlite_stack();
        let token = stack.login("alice").await;
        stack.add(&token, "Widget", 3).await;
        stack.add(&token, "Bolt", 50).await;

        let before = stack.list(&token).await;
        let (status, body) = stack
            .request("DELETE", "/inventory/77", Some(&token), None)
            .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["kind"], "not_found");
        assert_eq!(stack.list(&token).await, before);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let stack = sqlite_stack();
        let token = stack.login("alice").await;

        stack.add(&token, "First", 1).await;
        stack.request("DELETE", "/inventory/1", Some(&token), None).await;
        let (_, second) = stack.add(&token, "Second", 2).await;

        assert_eq!(second["id"], 2);
    }

    #[tokio::test]
    async fn test_inventory_survives_restart() {
        let stack = sqlite_stack();
        let token = stack.login("alice").await;
        stack.add(&token, "Widget", 9).await;

        let stack = reopen(stack);
        let list = stack.list(&token).await;
        assert_eq!(list[0]["product_name"], "Widget");

        // Accounts persist too
        let (status, _) = stack
            .request(
                "POST",
                "/login",
                None,
                Some(json!({ "username": "alice", "password": TEST_PASSWORD })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    // =============================================================================
    // SIDE EFFECTS
    // =============================================================================

    #[tokio::test]
    async fn test_broadcast_once_per_successful_mutation() {
        let stack = sqlite_stack();
        let token = stack.login("alice").await;
        let mut observer = stack.state.bus.subscribe();

        stack.add(&token, "Widget", 3).await;
        stack
            .request(
                "PUT",
                "/inventory/1",
                Some(&token),
                Some(json!({ "product_name": "Widget", "quantity": 8 })),
            )
            .await;
        stack.request("DELETE", "/inventory/1", Some(&token), None).await;
        assert_eq!(stack.events_published(), 3);

        let mut received = 0;
        while let Ok(Some(_)) = observer.try_recv() {
            received += 1;
        }
        assert_eq!(received, 3);
    }

    #[tokio::test]
    async fn test_no_broadcast_for_rejected_requests() {
        let stack = sqlite_stack();
        let token = stack.login("alice").await;
        let item = json!({ "product_name": "Widget", "quantity": 3 });

        // No token, bad token, bad body, absent rows
        stack.request("POST", "/inventory", None, Some(item.clone())).await;
        stack.request("POST", "/inventory", Some("nope"), Some(item.clone())).await;
        stack
            .request("POST", "/inventory", Some(&token), Some(json!({ "quantity": 3 })))
            .await;
        stack
            .request("PUT", "/inventory/5", Some(&token), Some(item))
            .await;
        stack.request("DELETE", "/inventory/5", Some(&token), None).await;

        assert_eq!(stack.events_published(), 0);
        assert!(stack.sink.logs().is_empty());
        assert!(stack.sink.summaries().is_empty());
    }

    #[tokio::test]
    async fn test_notification_outage_does_not_fail_mutations() {
        let stack = sqlite_stack();
        let token = stack.login("alice").await;
        stack.sink.set_failing(true);

        let (status, _) = stack.add(&token, "Widget", 3).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stack.list(&token).await.as_array().unwrap().len(), 1);
        assert_eq!(stack.events_published(), 1);
    }

    #[tokio::test]
    async fn test_summary_snapshot_reflects_change() {
        let stack = sqlite_stack();
        let token = stack.login("alice").await;

        stack.add(&token, "A", 10).await;
        stack.add(&token, "B", 20).await;
        stack.request("DELETE", "/inventory/1", Some(&token), None).await;

        let summaries = stack.sink.summaries();
        let names: Vec<Vec<&str>> = summaries
            .iter()
            .map(|items| items.iter().map(|i| i.name.as_str()).collect())
            .collect();
        assert_eq!(names, vec![vec!["A"], vec!["A", "B"], vec!["B"]]);
    }

    // =============================================================================
    // CLIENT STATE
    // =============================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_state_saves_all_succeed() {
        let stack = sqlite_stack();
        let filler = "y".repeat(4096);

        let saves = (0..32).map(|n| {
            let router = stack.router.clone();
            let doc = json!({ "n": n, "filler": filler });
            tokio::spawn(async move { send(&router, "POST", "/api/state", None, Some(doc)).await.0 })
        });
        let statuses = futures::future::join_all(saves).await;

        assert!(statuses
            .into_iter()
            .all(|s| s.unwrap() == StatusCode::OK));

        let (status, doc) = stack.request("GET", "/api/state", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(doc["filler"], filler.as_str());
        assert!(doc["n"].as_u64().unwrap() < 32);
    }
}
