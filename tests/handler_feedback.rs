//! Feedback endpoint integration tests: the rating aggregate must mirror
//! the feedback rows after every commit.

mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

use common::{add_feedback, create_shelter, field_str, setup, user};

const EPS: f64 = 1e-6;

async fn shelter_rating(server: &axum_test::TestServer, slug: &str) -> (f64, i64) {
    let body = server.get(&format!("/api/shelters/{slug}")).await.json::<Value>();
    (
        body["rating"].as_f64().unwrap(),
        body["reviews_count"].as_i64().unwrap(),
    )
}

#[tokio::test]
async fn test_first_feedback_sets_rating() {
    let (server, _store, _shutdown) = setup();
    create_shelter(&server, user(), "Happy Paws").await;

    add_feedback(&server, "happy-paws", user(), 4.0).await;

    let (rating, count) = shelter_rating(&server, "happy-paws").await;
    assert!((rating - 4.0).abs() < EPS);
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_aggregate_follows_adds_and_removes() {
    let (server, _store, _shutdown) = setup();
    create_shelter(&server, user(), "Happy Paws").await;

    // Ratings 2 and 4 -> (3.0, 2).
    let first_author = user();
    let first = add_feedback(&server, "happy-paws", first_author, 2.0).await;
    add_feedback(&server, "happy-paws", user(), 4.0).await;

    let (rating, count) = shelter_rating(&server, "happy-paws").await;
    assert!((rating - 3.0).abs() < EPS);
    assert_eq!(count, 2);

    // Adding a 5 -> (3.667, 3).
    add_feedback(&server, "happy-paws", user(), 5.0).await;
    let (rating, count) = shelter_rating(&server, "happy-paws").await;
    assert!((rating - 11.0 / 3.0).abs() < EPS);
    assert_eq!(count, 3);

    // Removing the original 2 -> (4.5, 2).
    let feedback_id = field_str(&first, "id");
    server
        .delete(&format!("/api/feedback/{feedback_id}"))
        .add_header("x-user-id", first_author.to_string())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let (rating, count) = shelter_rating(&server, "happy-paws").await;
    assert!((rating - 4.5).abs() < EPS);
    assert_eq!(count, 2);
}

#[tokio::test]
async fn test_removing_last_feedback_resets_aggregate() {
    let (server, _store, _shutdown) = setup();
    create_shelter(&server, user(), "Happy Paws").await;

    let author = user();
    let row = add_feedback(&server, "happy-paws", author, 5.0).await;

    server
        .delete(&format!("/api/feedback/{}", field_str(&row, "id")))
        .add_header("x-user-id", author.to_string())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let (rating, count) = shelter_rating(&server, "happy-paws").await;
    assert_eq!(rating, 0.0);
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_second_review_from_same_user_is_conflict() {
    let (server, _store, _shutdown) = setup();
    create_shelter(&server, user(), "Happy Paws").await;

    let author = user();
    add_feedback(&server, "happy-paws", author, 4.0).await;

    let response = server
        .post("/api/shelters/happy-paws/feedback")
        .add_header("x-user-id", author.to_string())
        .json(&json!({ "rating": 5.0, "comment": "changed my mind" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);

    // The failed attempt must not have touched the aggregate.
    let (rating, count) = shelter_rating(&server, "happy-paws").await;
    assert!((rating - 4.0).abs() < EPS);
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_out_of_range_rating_is_rejected() {
    let (server, _store, _shutdown) = setup();
    create_shelter(&server, user(), "Happy Paws").await;

    let response = server
        .post("/api/shelters/happy-paws/feedback")
        .add_header("x-user-id", user().to_string())
        .json(&json!({ "rating": 6.0 }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_deleting_someone_elses_feedback_is_not_found() {
    let (server, _store, _shutdown) = setup();
    create_shelter(&server, user(), "Happy Paws").await;

    let row = add_feedback(&server, "happy-paws", user(), 4.0).await;

    let response = server
        .delete(&format!("/api/feedback/{}", field_str(&row, "id")))
        .add_header("x-user-id", user().to_string())
        .await;

    response.assert_status(StatusCode::NOT_FOUND);

    let (_, count) = shelter_rating(&server, "happy-paws").await;
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_list_feedback_for_shelter() {
    let (server, _store, _shutdown) = setup();
    create_shelter(&server, user(), "Happy Paws").await;

    add_feedback(&server, "happy-paws", user(), 4.0).await;
    add_feedback(&server, "happy-paws", user(), 5.0).await;

    let response = server.get("/api/shelters/happy-paws/feedback").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>().as_array().unwrap().len(), 2);
}
