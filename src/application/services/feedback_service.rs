//! Shelter feedback service maintaining the rating aggregate.
//!
//! Every feedback insert or removal recomputes the owning shelter's
//! `(rating, reviews_count)` pair through [`crate::utils::rating`] and
//! writes both the row and the aggregate in one commit. The shelter's
//! version token turns a concurrent aggregate update into a retryable
//! [`AppError::Conflict`] instead of a silent lost update.

use std::sync::Arc;

use serde_json::json;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::domain::entities::ShelterFeedback;
use crate::domain::repositories::{FeedbackRepository, ShelterInclude, ShelterRepository};
use crate::domain::unit_of_work::{Mutation, UnitOfWorkFactory};
use crate::error::AppError;
use crate::utils::rating;

/// Bounds on a single review's rating value.
const MIN_RATING: f64 = 1.0;
const MAX_RATING: f64 = 5.0;

/// Service for adding and removing shelter feedback.
pub struct FeedbackService {
    feedback: Arc<dyn FeedbackRepository>,
    shelters: Arc<dyn ShelterRepository>,
    uow_factory: Arc<dyn UnitOfWorkFactory>,
}

impl FeedbackService {
    pub fn new(
        feedback: Arc<dyn FeedbackRepository>,
        shelters: Arc<dyn ShelterRepository>,
        uow_factory: Arc<dyn UnitOfWorkFactory>,
    ) -> Self {
        Self {
            feedback,
            shelters,
            uow_factory,
        }
    }

    /// Lists the feedback rows for one shelter.
    pub async fn list_for_shelter(
        &self,
        shelter_id: Uuid,
    ) -> Result<Vec<ShelterFeedback>, AppError> {
        self.feedback.list_by_shelter(shelter_id).await
    }

    /// Adds one review and folds it into the shelter's running aggregate.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an out-of-range rating,
    /// [`AppError::Conflict`] when the user already reviewed the shelter
    /// or the shelter row changed concurrently (the latter is retryable),
    /// and [`AppError::NotFound`] when the shelter is missing.
    pub async fn add(
        &self,
        shelter_slug: &str,
        user_id: Uuid,
        rating_value: f64,
        comment: String,
        cancel: &CancellationToken,
    ) -> Result<ShelterFeedback, AppError> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating_value) {
            return Err(AppError::bad_request(
                "Rating must be between 1 and 5",
                json!({ "rating": rating_value }),
            ));
        }

        let detail = self
            .shelters
            .find_by_slug(shelter_slug, ShelterInclude::NONE)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Shelter not found", json!({ "slug": shelter_slug }))
            })?;
        let mut shelter = detail.shelter;

        if self
            .feedback
            .exists_for_user(shelter.id, user_id)
            .await?
        {
            return Err(AppError::conflict(
                "User has already reviewed this shelter",
                json!({ "shelter_id": shelter.id, "user_id": user_id }),
            ));
        }

        let row = ShelterFeedback::new(shelter.id, user_id, rating_value, comment);

        let (new_avg, new_count) =
            rating::apply_add(shelter.rating, shelter.reviews_count, rating_value);
        shelter.rating = new_avg;
        shelter.reviews_count = new_count;
        shelter.touch();

        let mut uow = self.uow_factory.begin();
        uow.stage(Mutation::InsertFeedback(row.clone()));
        uow.stage(Mutation::UpdateShelter(shelter));

        if cancel.is_cancelled() {
            uow.discard();
            return Err(AppError::Cancelled);
        }

        uow.commit().await?;
        tracing::info!(feedback_id = %row.id, shelter_slug, "feedback added");
        Ok(row)
    }

    /// Removes one review and subtracts it from the shelter's aggregate.
    ///
    /// Only the author may remove their feedback.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the row is missing or owned by
    /// someone else, and [`AppError::Conflict`] when the shelter row
    /// changed concurrently (retryable).
    pub async fn remove(
        &self,
        feedback_id: Uuid,
        user_id: Uuid,
        cancel: &CancellationToken,
    ) -> Result<(), AppError> {
        let row = self
            .feedback
            .find_by_id(feedback_id)
            .await?
            .filter(|row| row.user_id == user_id)
            .ok_or_else(|| {
                AppError::not_found("Feedback not found", json!({ "feedback_id": feedback_id }))
            })?;

        let detail = self
            .shelters
            .find_by_id(row.shelter_id, ShelterInclude::NONE)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Shelter not found", json!({ "shelter_id": row.shelter_id }))
            })?;
        let mut shelter = detail.shelter;

        let (new_avg, new_count) =
            rating::apply_remove(shelter.rating, shelter.reviews_count, row.rating);
        shelter.rating = new_avg;
        shelter.reviews_count = new_count;
        shelter.touch();

        let mut uow = self.uow_factory.begin();
        uow.stage(Mutation::DeleteFeedback(row.id));
        uow.stage(Mutation::UpdateShelter(shelter));

        if cancel.is_cancelled() {
            uow.discard();
            return Err(AppError::Cancelled);
        }

        uow.commit().await?;
        tracing::info!(feedback_id = %row.id, "feedback removed");
        Ok(())
    }
}
