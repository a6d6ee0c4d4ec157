//! Handlers for shelter feedback endpoints.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::feedback::{CreateFeedbackRequest, FeedbackResponse};
use crate::api::handlers::validate_slug_param;
use crate::api::middleware::CallerIdentity;
use crate::domain::repositories::ShelterInclude;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/shelters/{slug}/feedback` — reviews of one shelter.
pub async fn list_feedback_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Vec<FeedbackResponse>>, AppError> {
    validate_slug_param(&slug)?;

    let detail = state
        .shelter_service
        .get_by_slug(&slug, ShelterInclude::NONE)
        .await?;
    let rows = state
        .feedback_service
        .list_for_shelter(detail.shelter.id)
        .await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// `POST /api/shelters/{slug}/feedback` — adds the caller's review and
/// updates the shelter's rating aggregate in the same commit.
pub async fn create_feedback_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    CallerIdentity(user_id): CallerIdentity,
    Json(payload): Json<CreateFeedbackRequest>,
) -> Result<(StatusCode, Json<FeedbackResponse>), AppError> {
    validate_slug_param(&slug)?;
    payload.validate()?;

    let row = state
        .feedback_service
        .add(
            &slug,
            user_id,
            payload.rating,
            payload.comment,
            &state.shutdown,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(row.into())))
}

/// `DELETE /api/feedback/{id}` — removes the caller's review and updates
/// the aggregate in the same commit.
pub async fn delete_feedback_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    CallerIdentity(user_id): CallerIdentity,
) -> Result<StatusCode, AppError> {
    state
        .feedback_service
        .remove(id, user_id, &state.shutdown)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
