//! Handlers for adoption request endpoints.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::adoption::{AdoptionRequestResponse, CreateAdoptionRequest};
use crate::api::handlers::validate_slug_param;
use crate::api::middleware::CallerIdentity;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/adoption-requests/by-shelter/{slug}` — pending requests for
/// every animal of one shelter.
pub async fn list_requests_by_shelter_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Vec<AdoptionRequestResponse>>, AppError> {
    validate_slug_param(&slug)?;

    let requests = state.adoption_service.list_for_shelter(&slug).await?;
    Ok(Json(requests.into_iter().map(Into::into).collect()))
}

/// `POST /api/adoption-requests` — files a request; the animal moves to
/// `reserve` in the same commit.
pub async fn create_request_handler(
    State(state): State<AppState>,
    CallerIdentity(user_id): CallerIdentity,
    Json(payload): Json<CreateAdoptionRequest>,
) -> Result<(StatusCode, Json<AdoptionRequestResponse>), AppError> {
    payload.validate()?;
    validate_slug_param(&payload.animal_slug)?;

    let request = state
        .adoption_service
        .create(&payload.animal_slug, user_id, &state.shutdown)
        .await?;

    Ok((StatusCode::CREATED, Json(request.into())))
}

/// `DELETE /api/adoption-requests/{id}` — rejects a request; the animal
/// becomes `free` again.
pub async fn reject_request_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.adoption_service.reject(id, &state.shutdown).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/adoption-requests/{id}/confirm` — confirms the adoption;
/// the animal and its dependents leave the listing in one commit.
pub async fn confirm_request_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.adoption_service.confirm(id, &state.shutdown).await?;
    Ok(StatusCode::NO_CONTENT)
}
