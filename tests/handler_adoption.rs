//! Adoption request lifecycle integration tests.

mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

use common::{create_animal, create_shelter, field_str, setup, user};

async fn animal_status(server: &axum_test::TestServer, slug: &str) -> String {
    let body = server.get(&format!("/api/animals/{slug}")).await.json::<Value>();
    field_str(&body, "status")
}

async fn file_request(server: &axum_test::TestServer, animal_slug: &str) -> Value {
    let response = server
        .post("/api/adoption-requests")
        .add_header("x-user-id", user().to_string())
        .json(&json!({ "animal_slug": animal_slug }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()
}

#[tokio::test]
async fn test_create_request_reserves_animal() {
    let (server, _store, _shutdown) = setup();
    let shelter = create_shelter(&server, user(), "Happy Paws").await;
    create_animal(&server, &field_str(&shelter, "id"), "Barsik").await;

    let request = file_request(&server, "barsik").await;

    assert_eq!(request["status"], "pending");
    assert_eq!(animal_status(&server, "barsik").await, "reserve");
}

#[tokio::test]
async fn test_request_for_reserved_animal_is_conflict() {
    let (server, _store, _shutdown) = setup();
    let shelter = create_shelter(&server, user(), "Happy Paws").await;
    create_animal(&server, &field_str(&shelter, "id"), "Barsik").await;

    file_request(&server, "barsik").await;

    let response = server
        .post("/api/adoption-requests")
        .add_header("x-user-id", user().to_string())
        .json(&json!({ "animal_slug": "barsik" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_reject_frees_animal_and_removes_request() {
    let (server, _store, _shutdown) = setup();
    let shelter = create_shelter(&server, user(), "Happy Paws").await;
    create_animal(&server, &field_str(&shelter, "id"), "Barsik").await;

    let request = file_request(&server, "barsik").await;
    let request_id = field_str(&request, "id");

    server
        .delete(&format!("/api/adoption-requests/{request_id}"))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    assert_eq!(animal_status(&server, "barsik").await, "free");

    let listed = server
        .get("/api/adoption-requests/by-shelter/happy-paws")
        .await
        .json::<Value>();
    assert!(listed.as_array().unwrap().is_empty());

    // The animal can be requested again.
    file_request(&server, "barsik").await;
}

#[tokio::test]
async fn test_confirm_removes_animal_and_decrements_count() {
    let (server, _store, _shutdown) = setup();
    let shelter = create_shelter(&server, user(), "Happy Paws").await;
    let shelter_id = field_str(&shelter, "id");
    create_animal(&server, &shelter_id, "Barsik").await;
    create_animal(&server, &shelter_id, "Rex").await;

    let request = file_request(&server, "barsik").await;
    let request_id = field_str(&request, "id");

    server
        .post(&format!("/api/adoption-requests/{request_id}/confirm"))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .get("/api/animals/barsik")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let body = server.get("/api/shelters/happy-paws").await.json::<Value>();
    assert_eq!(body["animals_count"], 1);

    let listed = server
        .get("/api/adoption-requests/by-shelter/happy-paws")
        .await
        .json::<Value>();
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_resolving_unknown_request_is_not_found() {
    let (server, _store, _shutdown) = setup();

    let id = uuid::Uuid::new_v4();
    server
        .delete(&format!("/api/adoption-requests/{id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .post(&format!("/api/adoption-requests/{id}/confirm"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_requests_by_shelter() {
    let (server, _store, _shutdown) = setup();
    let shelter = create_shelter(&server, user(), "Happy Paws").await;
    let shelter_id = field_str(&shelter, "id");
    create_animal(&server, &shelter_id, "Barsik").await;
    create_animal(&server, &shelter_id, "Rex").await;

    file_request(&server, "barsik").await;
    file_request(&server, "rex").await;

    let listed = server
        .get("/api/adoption-requests/by-shelter/happy-paws")
        .await
        .json::<Value>();
    assert_eq!(listed.as_array().unwrap().len(), 2);
}
