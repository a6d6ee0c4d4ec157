//! Handlers for shelter endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use crate::api::dto::shelter::{
    CreateShelterRequest, ShelterDetailResponse, ShelterResponse, UpdateShelterRequest,
};
use crate::api::handlers::validate_slug_param;
use crate::api::middleware::CallerIdentity;
use crate::domain::entities::{NewShelter, ShelterPatch};
use crate::domain::repositories::ShelterInclude;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/shelters` — lists all shelters.
pub async fn list_shelters_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<ShelterResponse>>, AppError> {
    let shelters = state.shelter_service.list().await?;
    Ok(Json(shelters.into_iter().map(Into::into).collect()))
}

/// `GET /api/shelters/{slug}` — one shelter with address and animals.
pub async fn get_shelter_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ShelterDetailResponse>, AppError> {
    validate_slug_param(&slug)?;

    let detail = state
        .shelter_service
        .get_by_slug(&slug, ShelterInclude::NONE.address().animals())
        .await?;

    Ok(Json(detail.into()))
}

/// `POST /api/shelters` — creates a shelter owned by the caller.
pub async fn create_shelter_handler(
    State(state): State<AppState>,
    CallerIdentity(user_id): CallerIdentity,
    Json(payload): Json<CreateShelterRequest>,
) -> Result<(StatusCode, Json<ShelterResponse>), AppError> {
    payload.validate()?;

    let input = NewShelter {
        name: payload.name,
        description: payload.description,
        image_url: payload.image_url,
        owner_user_id: user_id,
    };
    let address = payload.address.into_entity();

    let shelter = state
        .shelter_service
        .create(input, address, &state.shutdown)
        .await?;

    Ok((StatusCode::CREATED, Json(shelter.into())))
}

/// `PATCH /api/shelters/{slug}` — partial update; renames re-slug.
pub async fn update_shelter_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(payload): Json<UpdateShelterRequest>,
) -> Result<Json<ShelterResponse>, AppError> {
    validate_slug_param(&slug)?;
    payload.validate()?;

    let patch = ShelterPatch {
        name: payload.name,
        description: payload.description,
        image_url: payload.image_url,
    };

    let shelter = state
        .shelter_service
        .update(&slug, patch, &state.shutdown)
        .await?;

    Ok(Json(shelter.into()))
}

/// `DELETE /api/shelters/{slug}` — cascade-deletes the shelter.
pub async fn delete_shelter_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<StatusCode, AppError> {
    validate_slug_param(&slug)?;

    state.shelter_service.delete(&slug, &state.shutdown).await?;
    Ok(StatusCode::NO_CONTENT)
}
