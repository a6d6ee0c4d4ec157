//! Cascade deletion orchestrator for aggregate roots.
//!
//! The single place that knows the dependent-removal order for shelters
//! and animals. Every deletion path — the delete endpoints and the
//! adoption-confirm flow — routes through here, so the order is defined
//! once. All removals for one root are staged against one unit of work
//! and committed together; no orphan and no partially-applied deletion is
//! ever observable.

use std::sync::Arc;

use serde_json::json;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::domain::repositories::{AnimalRepository, ShelterInclude, ShelterRepository};
use crate::domain::unit_of_work::{Mutation, UnitOfWork, UnitOfWorkFactory};
use crate::error::AppError;

/// Deletes an aggregate root together with every transitively dependent
/// row, in dependency order, inside one atomic commit.
pub struct CascadeDeleter {
    shelters: Arc<dyn ShelterRepository>,
    animals: Arc<dyn AnimalRepository>,
    uow_factory: Arc<dyn UnitOfWorkFactory>,
}

impl CascadeDeleter {
    pub fn new(
        shelters: Arc<dyn ShelterRepository>,
        animals: Arc<dyn AnimalRepository>,
        uow_factory: Arc<dyn UnitOfWorkFactory>,
    ) -> Self {
        Self {
            shelters,
            animals,
            uow_factory,
        }
    }

    /// Deletes a shelter, its address, its bookmarks and feedback, and
    /// every animal it owns together with the animals' dependents.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the shelter does not exist,
    /// [`AppError::Cancelled`] if `cancel` fired before commit (nothing is
    /// applied), and commit errors as-is.
    pub async fn delete_shelter(
        &self,
        shelter_id: Uuid,
        cancel: &CancellationToken,
    ) -> Result<(), AppError> {
        let detail = self
            .shelters
            .find_by_id(shelter_id, ShelterInclude::NONE.address().animals())
            .await?
            .ok_or_else(|| {
                AppError::not_found("Shelter not found", json!({ "shelter_id": shelter_id }))
            })?;

        let mut uow = self.uow_factory.begin();

        // Dependents are staged before their parent row. The address is
        // the one exception in FK direction (the shelter row references
        // it); the schema defers that constraint to commit.
        uow.stage(Mutation::DeleteAddress(detail.shelter.address_id));
        uow.stage(Mutation::DeleteShelterBookmarksByShelter(shelter_id));
        uow.stage(Mutation::DeleteFeedbackByShelter(shelter_id));

        for animal in &detail.animals {
            uow.stage(Mutation::DeleteAnimalPhotosByAnimal(animal.id));
            uow.stage(Mutation::DeleteAnimalBookmarksByAnimal(animal.id));
            uow.stage(Mutation::DeleteAdoptionRequestsByAnimal(animal.id));
        }
        for animal in &detail.animals {
            uow.stage(Mutation::DeleteAnimal(animal.id));
        }

        uow.stage(Mutation::DeleteShelter(shelter_id));

        if cancel.is_cancelled() {
            uow.discard();
            return Err(AppError::Cancelled);
        }

        uow.commit().await?;
        tracing::info!(%shelter_id, animals = detail.animals.len(), "shelter cascade-deleted");
        Ok(())
    }

    /// Deletes an animal, its photos, requests and bookmarks, and
    /// decrements the owning shelter's `animals_count` in the same commit.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the animal does not exist,
    /// [`AppError::Cancelled`] if `cancel` fired before commit, and
    /// [`AppError::Conflict`] when the shelter row changed concurrently
    /// (retryable).
    pub async fn delete_animal(
        &self,
        animal_id: Uuid,
        cancel: &CancellationToken,
    ) -> Result<(), AppError> {
        let mut uow = self.uow_factory.begin();
        self.stage_animal_cascade(uow.as_mut(), animal_id).await?;

        if cancel.is_cancelled() {
            uow.discard();
            return Err(AppError::Cancelled);
        }

        uow.commit().await?;
        tracing::info!(%animal_id, "animal cascade-deleted");
        Ok(())
    }

    /// Stages the full dependent cascade for one animal, including the
    /// owning shelter's `animals_count` decrement, without committing.
    ///
    /// Used by [`Self::delete_animal`] and by the adoption-confirm flow,
    /// which adds the request removal to the same batch.
    pub(crate) async fn stage_animal_cascade(
        &self,
        uow: &mut dyn UnitOfWork,
        animal_id: Uuid,
    ) -> Result<(), AppError> {
        let animal = self.animals.find_by_id(animal_id).await?.ok_or_else(|| {
            AppError::not_found("Animal not found", json!({ "animal_id": animal_id }))
        })?;

        uow.stage(Mutation::DeleteAnimalPhotosByAnimal(animal.id));
        uow.stage(Mutation::DeleteAdoptionRequestsByAnimal(animal.id));
        uow.stage(Mutation::DeleteAnimalBookmarksByAnimal(animal.id));
        uow.stage(Mutation::DeleteAnimal(animal.id));

        if let Some(detail) = self
            .shelters
            .find_by_id(animal.shelter_id, ShelterInclude::NONE)
            .await?
        {
            let mut shelter = detail.shelter;
            shelter.animals_count = (shelter.animals_count - 1).max(0);
            shelter.touch();
            uow.stage(Mutation::UpdateShelter(shelter));
        }

        Ok(())
    }
}
