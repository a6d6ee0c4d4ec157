//! Handlers for saved-listing endpoints.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::api::dto::bookmark::{AnimalBookmarkResponse, ShelterBookmarkResponse};
use crate::api::handlers::validate_slug_param;
use crate::api::middleware::CallerIdentity;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/saved/animals` — the caller's saved animals.
pub async fn list_saved_animals_handler(
    State(state): State<AppState>,
    CallerIdentity(user_id): CallerIdentity,
) -> Result<Json<Vec<AnimalBookmarkResponse>>, AppError> {
    let bookmarks = state.bookmark_service.saved_animals(user_id).await?;
    Ok(Json(bookmarks.into_iter().map(Into::into).collect()))
}

/// `POST /api/saved/animals/{slug}` — saves an animal. Idempotent.
pub async fn save_animal_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    CallerIdentity(user_id): CallerIdentity,
) -> Result<(StatusCode, Json<AnimalBookmarkResponse>), AppError> {
    validate_slug_param(&slug)?;

    let bookmark = state
        .bookmark_service
        .save_animal(&slug, user_id, &state.shutdown)
        .await?;

    Ok((StatusCode::CREATED, Json(bookmark.into())))
}

/// `DELETE /api/saved/animals/{slug}` — removes the caller's bookmark.
pub async fn unsave_animal_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    CallerIdentity(user_id): CallerIdentity,
) -> Result<StatusCode, AppError> {
    validate_slug_param(&slug)?;

    state
        .bookmark_service
        .unsave_animal(&slug, user_id, &state.shutdown)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/saved/shelters` — the caller's saved shelters.
pub async fn list_saved_shelters_handler(
    State(state): State<AppState>,
    CallerIdentity(user_id): CallerIdentity,
) -> Result<Json<Vec<ShelterBookmarkResponse>>, AppError> {
    let bookmarks = state.bookmark_service.saved_shelters(user_id).await?;
    Ok(Json(bookmarks.into_iter().map(Into::into).collect()))
}

/// `POST /api/saved/shelters/{slug}` — saves a shelter. Idempotent.
pub async fn save_shelter_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    CallerIdentity(user_id): CallerIdentity,
) -> Result<(StatusCode, Json<ShelterBookmarkResponse>), AppError> {
    validate_slug_param(&slug)?;

    let bookmark = state
        .bookmark_service
        .save_shelter(&slug, user_id, &state.shutdown)
        .await?;

    Ok((StatusCode::CREATED, Json(bookmark.into())))
}

/// `DELETE /api/saved/shelters/{slug}` — removes the caller's bookmark.
pub async fn unsave_shelter_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    CallerIdentity(user_id): CallerIdentity,
) -> Result<StatusCode, AppError> {
    validate_slug_param(&slug)?;

    state
        .bookmark_service
        .unsave_shelter(&slug, user_id, &state.shutdown)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
