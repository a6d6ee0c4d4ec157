//! Cascade deletion integration tests: after a shelter or animal is
//! deleted, no dependent row survives; after a failed commit, every row
//! survives untouched.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use common::{add_feedback, create_animal, create_shelter, field_str, field_uuid, setup, user};
use shelter_api::AppError;
use shelter_api::domain::repositories::{
    AdoptionRequestRepository, AnimalRepository, BookmarkRepository, FeedbackRepository,
    ShelterInclude, ShelterRepository,
};

struct Fixture {
    shelter_id: Uuid,
    address_id: Uuid,
    animal_ids: Vec<Uuid>,
    reader_id: Uuid,
}

/// A shelter with two animals, photos, feedback, both bookmark kinds,
/// and an adoption request — every dependent the cascade must reach.
async fn arrange(server: &axum_test::TestServer, store: &shelter_api::infrastructure::persistence::MemoryStore) -> Fixture {
    let owner = user();
    let reader = user();

    let shelter = create_shelter(server, owner, "Happy Paws").await;
    let shelter_id = field_uuid(&shelter, "id");

    let first = create_animal(server, &field_str(&shelter, "id"), "Barsik").await;
    let second = create_animal(server, &field_str(&shelter, "id"), "Rex").await;
    let animal_ids = vec![field_uuid(&first, "id"), field_uuid(&second, "id")];

    add_feedback(server, "happy-paws", reader, 4.0).await;

    server
        .post("/api/saved/animals/barsik")
        .add_header("x-user-id", reader.to_string())
        .await
        .assert_status(StatusCode::CREATED);
    server
        .post("/api/saved/shelters/happy-paws")
        .add_header("x-user-id", reader.to_string())
        .await
        .assert_status(StatusCode::CREATED);

    server
        .post("/api/adoption-requests")
        .add_header("x-user-id", reader.to_string())
        .json(&json!({ "animal_slug": "rex" }))
        .await
        .assert_status(StatusCode::CREATED);

    let detail = ShelterRepository::find_by_slug(store, "happy-paws", ShelterInclude::NONE)
        .await
        .unwrap()
        .expect("arranged shelter must exist");

    Fixture {
        shelter_id,
        address_id: detail.shelter.address_id,
        animal_ids,
        reader_id: reader,
    }
}

#[tokio::test]
async fn test_shelter_cascade_leaves_no_dependent_row() {
    let (server, store, _shutdown) = setup();
    let fixture = arrange(&server, &store).await;

    server
        .delete("/api/shelters/happy-paws")
        .await
        .assert_status(StatusCode::NO_CONTENT);

    // Root and address.
    assert!(
        ShelterRepository::find_by_id(store.as_ref(), fixture.shelter_id, ShelterInclude::NONE)
            .await
            .unwrap()
            .is_none()
    );
    assert!(!store.address_exists(fixture.address_id));

    // Animals and their dependents.
    assert!(
        AnimalRepository::list_by_shelter(store.as_ref(), fixture.shelter_id)
            .await
            .unwrap()
            .is_empty()
    );
    for animal_id in &fixture.animal_ids {
        assert!(!store.has_photos_for(*animal_id));
        assert!(
            AdoptionRequestRepository::list_by_animal(store.as_ref(), *animal_id)
                .await
                .unwrap()
                .is_empty()
        );
        assert!(
            BookmarkRepository::find_animal_bookmark(
                store.as_ref(),
                *animal_id,
                fixture.reader_id
            )
            .await
            .unwrap()
            .is_none()
        );
    }

    // Shelter-level dependents.
    assert!(
        FeedbackRepository::list_by_shelter(store.as_ref(), fixture.shelter_id)
            .await
            .unwrap()
            .is_empty()
    );
    assert!(
        BookmarkRepository::find_shelter_bookmark(
            store.as_ref(),
            fixture.shelter_id,
            fixture.reader_id
        )
        .await
        .unwrap()
        .is_none()
    );
}

#[tokio::test]
async fn test_failed_commit_leaves_everything_in_place() {
    let (server, store, _shutdown) = setup();
    let fixture = arrange(&server, &store).await;

    store.fail_next_commit(AppError::internal(
        "Database error",
        json!({ "reason": "simulated fault" }),
    ));

    server
        .delete("/api/shelters/happy-paws")
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    // Every row reads back exactly as before the attempt.
    let detail =
        ShelterRepository::find_by_slug(store.as_ref(), "happy-paws", ShelterInclude::NONE)
            .await
            .unwrap()
            .expect("shelter must survive the failed cascade");
    assert_eq!(detail.shelter.animals_count, 2);
    assert_eq!(detail.shelter.reviews_count, 1);

    assert!(store.address_exists(fixture.address_id));
    assert_eq!(
        AnimalRepository::list_by_shelter(store.as_ref(), fixture.shelter_id)
            .await
            .unwrap()
            .len(),
        2
    );
    for animal_id in &fixture.animal_ids {
        assert!(store.has_photos_for(*animal_id));
    }
    assert_eq!(
        FeedbackRepository::list_by_shelter(store.as_ref(), fixture.shelter_id)
            .await
            .unwrap()
            .len(),
        1
    );
    assert!(
        BookmarkRepository::find_shelter_bookmark(
            store.as_ref(),
            fixture.shelter_id,
            fixture.reader_id
        )
        .await
        .unwrap()
        .is_some()
    );

    // And the operation can be retried successfully afterwards.
    server
        .delete("/api/shelters/happy-paws")
        .await
        .assert_status(StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_cancelled_shutdown_token_discards_cascade() {
    let (server, store, shutdown) = setup();
    let fixture = arrange(&server, &store).await;

    shutdown.cancel();

    server
        .delete("/api/shelters/happy-paws")
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);

    assert!(
        ShelterRepository::find_by_id(store.as_ref(), fixture.shelter_id, ShelterInclude::NONE)
            .await
            .unwrap()
            .is_some()
    );
    assert_eq!(
        AnimalRepository::list_by_shelter(store.as_ref(), fixture.shelter_id)
            .await
            .unwrap()
            .len(),
        2
    );
}

#[tokio::test]
async fn test_animal_cascade_scoped_to_one_animal() {
    let (server, store, _shutdown) = setup();
    let fixture = arrange(&server, &store).await;

    server
        .delete("/api/animals/barsik")
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let barsik_id = fixture.animal_ids[0];
    let rex_id = fixture.animal_ids[1];

    assert!(!store.has_photos_for(barsik_id));
    assert!(
        BookmarkRepository::find_animal_bookmark(store.as_ref(), barsik_id, fixture.reader_id)
            .await
            .unwrap()
            .is_none()
    );

    // The sibling animal and its dependents are untouched.
    assert!(store.has_photos_for(rex_id));
    assert_eq!(
        AdoptionRequestRepository::list_by_animal(store.as_ref(), rex_id)
            .await
            .unwrap()
            .len(),
        1
    );

    let detail =
        ShelterRepository::find_by_id(store.as_ref(), fixture.shelter_id, ShelterInclude::NONE)
            .await
            .unwrap()
            .unwrap();
    assert_eq!(detail.shelter.animals_count, 1);
}
