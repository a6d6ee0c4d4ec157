//! Saved-listing bookmark service.
//!
//! At most one bookmark may exist per (user, target) pair. Saving is
//! idempotent — re-saving returns the existing row; the storage unique
//! index stays the authoritative guard for concurrent saves.

use std::sync::Arc;

use serde_json::json;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::domain::entities::{AnimalBookmark, ShelterBookmark};
use crate::domain::repositories::{
    AnimalRepository, BookmarkRepository, ShelterInclude, ShelterRepository,
};
use crate::domain::unit_of_work::{Mutation, UnitOfWorkFactory};
use crate::error::AppError;

/// Service for saving and unsaving animals and shelters.
pub struct BookmarkService {
    bookmarks: Arc<dyn BookmarkRepository>,
    animals: Arc<dyn AnimalRepository>,
    shelters: Arc<dyn ShelterRepository>,
    uow_factory: Arc<dyn UnitOfWorkFactory>,
}

impl BookmarkService {
    pub fn new(
        bookmarks: Arc<dyn BookmarkRepository>,
        animals: Arc<dyn AnimalRepository>,
        shelters: Arc<dyn ShelterRepository>,
        uow_factory: Arc<dyn UnitOfWorkFactory>,
    ) -> Self {
        Self {
            bookmarks,
            animals,
            shelters,
            uow_factory,
        }
    }

    /// Lists a user's saved animals.
    pub async fn saved_animals(&self, user_id: Uuid) -> Result<Vec<AnimalBookmark>, AppError> {
        self.bookmarks.list_animal_bookmarks(user_id).await
    }

    /// Lists a user's saved shelters.
    pub async fn saved_shelters(&self, user_id: Uuid) -> Result<Vec<ShelterBookmark>, AppError> {
        self.bookmarks.list_shelter_bookmarks(user_id).await
    }

    /// Saves an animal for a user. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown animal.
    pub async fn save_animal(
        &self,
        animal_slug: &str,
        user_id: Uuid,
        cancel: &CancellationToken,
    ) -> Result<AnimalBookmark, AppError> {
        let animal = self
            .animals
            .find_by_slug(animal_slug)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Animal not found", json!({ "slug": animal_slug }))
            })?;

        if let Some(existing) = self
            .bookmarks
            .find_animal_bookmark(animal.id, user_id)
            .await?
        {
            return Ok(existing);
        }

        let bookmark = AnimalBookmark::new(animal.id, user_id);

        let mut uow = self.uow_factory.begin();
        uow.stage(Mutation::InsertAnimalBookmark(bookmark.clone()));

        if cancel.is_cancelled() {
            uow.discard();
            return Err(AppError::Cancelled);
        }

        uow.commit().await?;
        Ok(bookmark)
    }

    /// Removes a user's bookmark on an animal.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the animal or the bookmark is
    /// missing.
    pub async fn unsave_animal(
        &self,
        animal_slug: &str,
        user_id: Uuid,
        cancel: &CancellationToken,
    ) -> Result<(), AppError> {
        let animal = self
            .animals
            .find_by_slug(animal_slug)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Animal not found", json!({ "slug": animal_slug }))
            })?;

        let bookmark = self
            .bookmarks
            .find_animal_bookmark(animal.id, user_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Bookmark not found", json!({ "slug": animal_slug }))
            })?;

        let mut uow = self.uow_factory.begin();
        uow.stage(Mutation::DeleteAnimalBookmark(bookmark.id));

        if cancel.is_cancelled() {
            uow.discard();
            return Err(AppError::Cancelled);
        }

        uow.commit().await
    }

    /// Saves a shelter for a user. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown shelter.
    pub async fn save_shelter(
        &self,
        shelter_slug: &str,
        user_id: Uuid,
        cancel: &CancellationToken,
    ) -> Result<ShelterBookmark, AppError> {
        let detail = self
            .shelters
            .find_by_slug(shelter_slug, ShelterInclude::NONE)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Shelter not found", json!({ "slug": shelter_slug }))
            })?;

        if let Some(existing) = self
            .bookmarks
            .find_shelter_bookmark(detail.shelter.id, user_id)
            .await?
        {
            return Ok(existing);
        }

        let bookmark = ShelterBookmark::new(detail.shelter.id, user_id);

        let mut uow = self.uow_factory.begin();
        uow.stage(Mutation::InsertShelterBookmark(bookmark.clone()));

        if cancel.is_cancelled() {
            uow.discard();
            return Err(AppError::Cancelled);
        }

        uow.commit().await?;
        Ok(bookmark)
    }

    /// Removes a user's bookmark on a shelter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the shelter or the bookmark is
    /// missing.
    pub async fn unsave_shelter(
        &self,
        shelter_slug: &str,
        user_id: Uuid,
        cancel: &CancellationToken,
    ) -> Result<(), AppError> {
        let detail = self
            .shelters
            .find_by_slug(shelter_slug, ShelterInclude::NONE)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Shelter not found", json!({ "slug": shelter_slug }))
            })?;

        let bookmark = self
            .bookmarks
            .find_shelter_bookmark(detail.shelter.id, user_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Bookmark not found", json!({ "slug": shelter_slug }))
            })?;

        let mut uow = self.uow_factory.begin();
        uow.stage(Mutation::DeleteShelterBookmark(bookmark.id));

        if cancel.is_cancelled() {
            uow.discard();
            return Err(AppError::Cancelled);
        }

        uow.commit().await
    }
}
