//! Repository trait for animal data access.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{Animal, AnimalPhoto};
use crate::error::AppError;

/// Repository interface for animals and their photos.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnimalRepository: Send + Sync {
    /// Finds an animal by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Animal>, AppError>;

    /// Finds an animal by its slug.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Animal>, AppError>;

    /// Lists all animals, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self) -> Result<Vec<Animal>, AppError>;

    /// Lists the animals belonging to one shelter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_by_shelter(&self, shelter_id: Uuid) -> Result<Vec<Animal>, AppError>;

    /// Lists the photos attached to one animal.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_photos(&self, animal_id: Uuid) -> Result<Vec<AnimalPhoto>, AppError>;

    /// Reports whether `slug` is already taken, excluding `exclude_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn slug_exists(&self, slug: &str, exclude_id: Option<Uuid>) -> Result<bool, AppError>;
}
