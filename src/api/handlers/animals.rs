//! Handlers for animal endpoints.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use validator::Validate;

use crate::api::dto::animal::{
    AnimalDetailResponse, AnimalResponse, CreateAnimalRequest, UpdateAnimalRequest,
};
use crate::api::handlers::validate_slug_param;
use crate::domain::entities::AnimalPatch;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/animals` — lists all animals.
pub async fn list_animals_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<AnimalResponse>>, AppError> {
    let animals = state.animal_service.list().await?;
    Ok(Json(animals.into_iter().map(Into::into).collect()))
}

/// `GET /api/animals/{slug}` — one animal with its photo gallery.
pub async fn get_animal_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<AnimalDetailResponse>, AppError> {
    validate_slug_param(&slug)?;

    let animal = state.animal_service.get_by_slug(&slug).await?;
    let photos = state.animal_service.list_photos(animal.id).await?;

    Ok(Json(AnimalDetailResponse {
        animal: animal.into(),
        photo_urls: photos.into_iter().map(|p| p.photo_url).collect(),
    }))
}

/// `POST /api/animals` — creates an animal under a shelter.
pub async fn create_animal_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateAnimalRequest>,
) -> Result<(StatusCode, Json<AnimalResponse>), AppError> {
    payload.validate()?;

    let animal = state
        .animal_service
        .create(payload.into_input(), &state.shutdown)
        .await?;

    Ok((StatusCode::CREATED, Json(animal.into())))
}

/// `PATCH /api/animals/{slug}` — partial update; renames re-slug.
pub async fn update_animal_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(payload): Json<UpdateAnimalRequest>,
) -> Result<Json<AnimalResponse>, AppError> {
    validate_slug_param(&slug)?;
    payload.validate()?;

    let patch = AnimalPatch {
        name: payload.name,
        species: payload.species,
        breed: payload.breed,
        age: payload.age.map(Some),
        description: payload.description,
        status: payload.status,
    };

    let animal = state
        .animal_service
        .update(&slug, patch, &state.shutdown)
        .await?;

    Ok(Json(animal.into()))
}

/// `DELETE /api/animals/{slug}` — cascade-deletes the animal.
pub async fn delete_animal_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<StatusCode, AppError> {
    validate_slug_param(&slug)?;

    state.animal_service.delete(&slug, &state.shutdown).await?;
    Ok(StatusCode::NO_CONTENT)
}
