//! # Properties
//!
//! Randomized request sequences checked against a plain in-memory model.

#[cfg(test)]
mod tests {
    use crate::fixtures::{sqlite_stack, Stack};
    use axum::http::StatusCode;
    use proptest::prelude::*;
    use serde_json::{json, Map, Value};
    use std::collections::BTreeMap;
    use tokio::runtime::Runtime;

    fn runtime() -> Runtime {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .unwrap()
    }

    // =============================================================================
    // CLIENT STATE
    // =============================================================================

    fn leaf() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| json!(n)),
            "[a-z0-9 ]{0,12}".prop_map(Value::String),
        ]
    }

    fn document() -> impl Strategy<Value = Value> {
        let value = leaf().prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        });
        prop::collection::btree_map("[a-zA-Z_]{1,8}", value, 0..6)
            .prop_map(|m| Value::Object(m.into_iter().collect::<Map<_, _>>()))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_state_round_trips(doc in document()) {
            let rt = runtime();
            let stack = sqlite_stack();

            let (read_back, saved) = rt.block_on(async {
                let (saved, _) = stack.request("POST", "/api/state", None, Some(doc.clone())).await;
                let (_, read_back) = stack.request("GET", "/api/state", None, None).await;
                (read_back, saved)
            });

            prop_assert_eq!(saved, StatusCode::OK);
            prop_assert_eq!(read_back, doc);
        }
    }

    // =============================================================================
    // INVENTORY MODEL
    // =============================================================================

    #[derive(Debug, Clone)]
    enum Op {
        Add { name: String, quantity: i64 },
        Update { id: i64, name: String, quantity: i64 },
        Delete { id: i64 },
    }

    fn op() -> impl Strategy<Value = Op> {
        let name = "[A-Z][a-z]{0,7}";
        let quantity = -5i64..200;
        prop_oneof![
            (name, quantity.clone()).prop_map(|(name, quantity)| Op::Add { name, quantity }),
            (1i64..8, name, quantity)
                .prop_map(|(id, name, quantity)| Op::Update { id, name, quantity }),
            (1i64..8).prop_map(|id| Op::Delete { id }),
        ]
    }

    /// What the service should hold and answer after each operation.
    #[derive(Default)]
    struct Model {
        rows: BTreeMap<i64, (String, i64)>,
        next_id: i64,
    }

    impl Model {
        fn apply(&mut self, op: &Op) -> StatusCode {
            match op {
                Op::Add { name, quantity } => {
                    self.next_id += 1;
                    self.rows.insert(self.next_id, (name.clone(), *quantity));
                    StatusCode::OK
                }
                Op::Update { id, name, quantity } => match self.rows.get_mut(id) {
                    Some(row) => {
                        *row = (name.clone(), *quantity);
                        StatusCode::OK
                    }
                    None => StatusCode::NOT_FOUND,
                },
                Op::Delete { id } => match self.rows.remove(id) {
                    Some(_) => StatusCode::OK,
                    None => StatusCode::NOT_FOUND,
                },
            }
        }
    }

    async fn perform(stack: &Stack, token: &str, op: &Op) -> StatusCode {
        let (status, _) = match op {
            Op::Add { name, quantity } => stack.add(token, name, *quantity).await,
            Op::Update { id, name, quantity } => {
                stack
                    .request(
                        "PUT",
                        &format!("/inventory/{id}"),
                        Some(token),
                        Some(json!({ "product_name": name, "quantity": quantity })),
                    )
                    .await
            }
            Op::Delete { id } => {
                stack
                    .request("DELETE", &format!("/inventory/{id}"), Some(token), None)
                    .await
            }
        };
        status
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_inventory_matches_model(ops in prop::collection::vec(op(), 1..16)) {
            let rt = runtime();
            let stack = sqlite_stack();
            let mut model = Model::default();

            let (statuses, listed) = rt.block_on(async {
                let token = stack.login("alice").await;
                let mut statuses = Vec::with_capacity(ops.len());
                for op in &ops {
                    statuses.push(perform(&stack, &token, op).await);
                }
                (statuses, stack.list(&token).await)
            });

            let expected: Vec<StatusCode> = ops.iter().map(|op| model.apply(op)).collect();
            prop_assert_eq!(&statuses, &expected);

            let rows: Vec<(i64, String, i64)> = listed
                .as_array()
                .unwrap()
                .iter()
                .map(|row| {
                    (
                        row["id"].as_i64().unwrap(),
                        row["product_name"].as_str().unwrap().to_string(),
                        row["quantity"].as_i64().unwrap(),
                    )
                })
                .collect();
            let modelled: Vec<(i64, String, i64)> = model
                .rows
                .iter()
                .map(|(id, (name, quantity))| (*id, name.clone(), *quantity))
                .collect();
            prop_assert_eq!(rows, modelled);

            let successes = statuses.iter().filter(|s| **s == StatusCode::OK).count() as u64;
            prop_assert_eq!(stack.events_published(), successes);
            prop_assert_eq!(stack.sink.summaries().len() as u64, successes);
        }
    }
}
