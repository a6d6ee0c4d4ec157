#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use shelter_api::infrastructure::persistence::MemoryStore;
use shelter_api::routes::app;
use shelter_api::state::AppState;

/// Spins up a test server over the in-memory backend.
///
/// The returned store handle shares state with the server, so tests can
/// assert on persisted rows directly through the repository traits.
pub fn setup() -> (TestServer, Arc<MemoryStore>, CancellationToken) {
    let store = MemoryStore::new();
    let shutdown = CancellationToken::new();
    let state = AppState::in_memory(store.clone(), shutdown.clone());

    let server = TestServer::new(app(state)).expect("failed to start test server");

    (server, store, shutdown)
}

pub fn user() -> Uuid {
    Uuid::new_v4()
}

/// Creates a shelter through the API and returns its response body.
pub async fn create_shelter(server: &TestServer, owner: Uuid, name: &str) -> Value {
    let response = server
        .post("/api/shelters")
        .add_header("x-user-id", owner.to_string())
        .json(&json!({
            "name": name,
            "description": "test shelter",
            "address": {
                "country": "Ukraine",
                "region": "Kyivska",
                "city": "Kyiv",
            },
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

/// Creates an animal through the API and returns its response body.
pub async fn create_animal(server: &TestServer, shelter_id: &str, name: &str) -> Value {
    let response = server
        .post("/api/animals")
        .json(&json!({
            "shelter_id": shelter_id,
            "name": name,
            "species": "cat",
            "breed": "tabby",
            "age": 3,
            "photo_urls": ["https://cdn.test/1.jpg", "https://cdn.test/2.jpg"],
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

/// Adds feedback from `user_id` through the API.
pub async fn add_feedback(server: &TestServer, shelter_slug: &str, user_id: Uuid, rating: f64) -> Value {
    let response = server
        .post(&format!("/api/shelters/{shelter_slug}/feedback"))
        .add_header("x-user-id", user_id.to_string())
        .json(&json!({ "rating": rating, "comment": "a comment" }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

pub fn field_str(value: &Value, field: &str) -> String {
    value[field]
        .as_str()
        .unwrap_or_else(|| panic!("missing string field {field} in {value}"))
        .to_string()
}

pub fn field_uuid(value: &Value, field: &str) -> Uuid {
    field_str(value, field)
        .parse()
        .unwrap_or_else(|_| panic!("field {field} is not a uuid"))
}
