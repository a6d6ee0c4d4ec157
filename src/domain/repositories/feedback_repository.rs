//! Repository trait for shelter feedback data access.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::ShelterFeedback;
use crate::error::AppError;

/// Repository interface for shelter feedback rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// Finds a feedback row by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ShelterFeedback>, AppError>;

    /// Lists the feedback rows for one shelter, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_by_shelter(&self, shelter_id: Uuid) -> Result<Vec<ShelterFeedback>, AppError>;

    /// Reports whether `user_id` already reviewed `shelter_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn exists_for_user(&self, shelter_id: Uuid, user_id: Uuid) -> Result<bool, AppError>;
}
