//! Repository trait for saved-listing bookmarks.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{AnimalBookmark, ShelterBookmark};
use crate::error::AppError;

/// Repository interface for user bookmarks of animals and shelters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookmarkRepository: Send + Sync {
    /// Finds the bookmark `user_id` holds on `animal_id`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_animal_bookmark(
        &self,
        animal_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<AnimalBookmark>, AppError>;

    /// Finds the bookmark `user_id` holds on `shelter_id`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_shelter_bookmark(
        &self,
        shelter_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<ShelterBookmark>, AppError>;

    /// Lists a user's saved animals, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_animal_bookmarks(&self, user_id: Uuid) -> Result<Vec<AnimalBookmark>, AppError>;

    /// Lists a user's saved shelters, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_shelter_bookmarks(&self, user_id: Uuid)
    -> Result<Vec<ShelterBookmark>, AppError>;
}
