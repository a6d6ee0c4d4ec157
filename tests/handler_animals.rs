//! Animal endpoint integration tests over the in-memory backend.

mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

use common::{create_animal, create_shelter, field_str, setup, user};

#[tokio::test]
async fn test_create_animal_increments_shelter_count() {
    let (server, _store, _shutdown) = setup();

    let shelter = create_shelter(&server, user(), "Happy Paws").await;
    let shelter_id = field_str(&shelter, "id");

    create_animal(&server, &shelter_id, "Barsik").await;
    create_animal(&server, &shelter_id, "Rex").await;

    let body = server.get("/api/shelters/happy-paws").await.json::<Value>();
    assert_eq!(body["animals_count"], 2);
}

#[tokio::test]
async fn test_create_animal_under_unknown_shelter_is_not_found() {
    let (server, _store, _shutdown) = setup();

    let response = server
        .post("/api/animals")
        .json(&json!({
            "shelter_id": uuid::Uuid::new_v4(),
            "name": "Barsik",
            "species": "cat",
        }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_same_name_animals_get_suffixed_slugs() {
    let (server, _store, _shutdown) = setup();

    let shelter = create_shelter(&server, user(), "Happy Paws").await;
    let shelter_id = field_str(&shelter, "id");

    let first = create_animal(&server, &shelter_id, "Barsik").await;
    let second = create_animal(&server, &shelter_id, "Barsik").await;

    assert_eq!(field_str(&first, "slug"), "barsik");
    assert_eq!(field_str(&second, "slug"), "barsik-1");
}

#[tokio::test]
async fn test_get_animal_includes_photos() {
    let (server, _store, _shutdown) = setup();

    let shelter = create_shelter(&server, user(), "Happy Paws").await;
    create_animal(&server, &field_str(&shelter, "id"), "Barsik").await;

    let body = server.get("/api/animals/barsik").await.json::<Value>();
    assert_eq!(body["photo_urls"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_update_animal_status() {
    let (server, _store, _shutdown) = setup();

    let shelter = create_shelter(&server, user(), "Happy Paws").await;
    create_animal(&server, &field_str(&shelter, "id"), "Barsik").await;

    let response = server
        .patch("/api/animals/barsik")
        .json(&json!({ "status": "reserve" }))
        .await;
    response.assert_status_ok();
    let body = response.json::<Value>();

    assert_eq!(body["status"], "reserve");
    assert_eq!(field_str(&body, "slug"), "barsik");
}

#[tokio::test]
async fn test_rename_animal_reslugs() {
    let (server, _store, _shutdown) = setup();

    let shelter = create_shelter(&server, user(), "Happy Paws").await;
    create_animal(&server, &field_str(&shelter, "id"), "Barsik").await;

    let response = server
        .patch("/api/animals/barsik")
        .json(&json!({ "name": "Murchyk" }))
        .await;
    response.assert_status_ok();
    assert_eq!(field_str(&response.json::<Value>(), "slug"), "murchyk");

    server
        .get("/api/animals/barsik")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server.get("/api/animals/murchyk").await.assert_status_ok();
}

#[tokio::test]
async fn test_delete_animal_decrements_shelter_count() {
    let (server, _store, _shutdown) = setup();

    let shelter = create_shelter(&server, user(), "Happy Paws").await;
    let shelter_id = field_str(&shelter, "id");
    create_animal(&server, &shelter_id, "Barsik").await;
    create_animal(&server, &shelter_id, "Rex").await;

    server
        .delete("/api/animals/barsik")
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let body = server.get("/api/shelters/happy-paws").await.json::<Value>();
    assert_eq!(body["animals_count"], 1);
    assert_eq!(body["animals"].as_array().unwrap().len(), 1);
    assert_eq!(body["animals"][0]["slug"], "rex");
}

#[tokio::test]
async fn test_list_animals() {
    let (server, _store, _shutdown) = setup();

    let shelter = create_shelter(&server, user(), "Happy Paws").await;
    let shelter_id = field_str(&shelter, "id");
    create_animal(&server, &shelter_id, "Barsik").await;
    create_animal(&server, &shelter_id, "Rex").await;

    let response = server.get("/api/animals").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>().as_array().unwrap().len(), 2);
}
