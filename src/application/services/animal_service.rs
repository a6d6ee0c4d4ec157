//! Animal creation, update, and lookup service.

use std::sync::Arc;

use serde_json::json;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::application::services::cascade::CascadeDeleter;
use crate::domain::entities::{Animal, AnimalPatch, AnimalPhoto, NewAnimal};
use crate::domain::repositories::{AnimalRepository, ShelterInclude, ShelterRepository};
use crate::domain::unit_of_work::{Mutation, UnitOfWorkFactory};
use crate::error::AppError;
use crate::utils::slug;

const SLUG_CONFLICT_ATTEMPTS: usize = 2;

/// Service for managing animal listings.
///
/// Creation and deletion keep the owning shelter's denormalized
/// `animals_count` in step within the same commit, guarded by the
/// shelter's version token.
pub struct AnimalService {
    animals: Arc<dyn AnimalRepository>,
    shelters: Arc<dyn ShelterRepository>,
    uow_factory: Arc<dyn UnitOfWorkFactory>,
    cascade: Arc<CascadeDeleter>,
}

impl AnimalService {
    pub fn new(
        animals: Arc<dyn AnimalRepository>,
        shelters: Arc<dyn ShelterRepository>,
        uow_factory: Arc<dyn UnitOfWorkFactory>,
        cascade: Arc<CascadeDeleter>,
    ) -> Self {
        Self {
            animals,
            shelters,
            uow_factory,
            cascade,
        }
    }

    /// Lists all animals.
    pub async fn list(&self) -> Result<Vec<Animal>, AppError> {
        self.animals.list().await
    }

    /// Fetches one animal by slug.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no animal has the slug.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Animal, AppError> {
        self.animals
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::not_found("Animal not found", json!({ "slug": slug })))
    }

    /// Lists the photos of one animal.
    pub async fn list_photos(&self, animal_id: Uuid) -> Result<Vec<AnimalPhoto>, AppError> {
        self.animals.list_photos(animal_id).await
    }

    /// Creates an animal under a shelter, incrementing the shelter's
    /// `animals_count` in the same commit.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the shelter does not exist,
    /// [`AppError::Validation`] when the name yields no slug, and
    /// [`AppError::Conflict`] on a persistent slug race or a concurrent
    /// shelter update (retryable).
    pub async fn create(
        &self,
        input: NewAnimal,
        cancel: &CancellationToken,
    ) -> Result<Animal, AppError> {
        let base = slug::generate_base(&input.name)?;

        let mut last_err = None;
        for _ in 0..SLUG_CONFLICT_ATTEMPTS {
            // The shelter is re-read per attempt so the version token and
            // count are fresh if the previous commit lost a race.
            let detail = self
                .shelters
                .find_by_id(input.shelter_id, ShelterInclude::NONE)
                .await?
                .ok_or_else(|| {
                    AppError::not_found(
                        "Shelter not found",
                        json!({ "shelter_id": input.shelter_id }),
                    )
                })?;

            let unique = slug::resolve_unique(&base, |candidate| {
                let animals = self.animals.clone();
                async move { animals.slug_exists(&candidate, None).await }
            })
            .await?;

            let animal = Animal::new(
                input.shelter_id,
                input.name.clone(),
                unique,
                input.species.clone(),
                input.breed.clone(),
                input.age,
                input.description.clone(),
            );

            let mut shelter = detail.shelter;
            shelter.animals_count += 1;
            shelter.touch();

            let mut uow = self.uow_factory.begin();
            uow.stage(Mutation::InsertAnimal(animal.clone()));
            for url in &input.photo_urls {
                uow.stage(Mutation::InsertAnimalPhoto(AnimalPhoto::new(
                    animal.id,
                    url.clone(),
                )));
            }
            uow.stage(Mutation::UpdateShelter(shelter));

            if cancel.is_cancelled() {
                uow.discard();
                return Err(AppError::Cancelled);
            }

            match uow.commit().await {
                Ok(()) => {
                    tracing::info!(animal_id = %animal.id, slug = %animal.slug, "animal created");
                    return Ok(animal);
                }
                Err(e @ AppError::Conflict { .. }) => last_err = Some(e),
                Err(e) => return Err(e),
            }
        }

        Err(last_err.unwrap_or_else(|| {
            AppError::conflict("Slug conflict persisted across retries", json!({ "base": base }))
        }))
    }

    /// Applies a partial update; a changed name re-derives the slug,
    /// excluding the animal itself from the collision probe.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the animal is missing.
    pub async fn update(
        &self,
        current_slug: &str,
        patch: AnimalPatch,
        cancel: &CancellationToken,
    ) -> Result<Animal, AppError> {
        let mut animal = self.get_by_slug(current_slug).await?;

        if let Some(name) = patch.name {
            if name != animal.name {
                let base = slug::generate_base(&name)?;
                let animal_id = animal.id;
                animal.slug = slug::resolve_unique(&base, |candidate| {
                    let animals = self.animals.clone();
                    async move { animals.slug_exists(&candidate, Some(animal_id)).await }
                })
                .await?;
                animal.name = name;
            }
        }
        if let Some(species) = patch.species {
            animal.species = species;
        }
        if let Some(breed) = patch.breed {
            animal.breed = breed;
        }
        if let Some(age) = patch.age {
            animal.age = age;
        }
        if let Some(description) = patch.description {
            animal.description = description;
        }
        if let Some(status) = patch.status {
            animal.status = status;
        }
        animal.touch();

        let mut uow = self.uow_factory.begin();
        uow.stage(Mutation::UpdateAnimal(animal.clone()));

        if cancel.is_cancelled() {
            uow.discard();
            return Err(AppError::Cancelled);
        }

        uow.commit().await?;
        Ok(animal)
    }

    /// Deletes an animal and all dependents through the cascade
    /// orchestrator.
    ///
    /// # Errors
    ///
    /// See [`CascadeDeleter::delete_animal`].
    pub async fn delete(&self, slug: &str, cancel: &CancellationToken) -> Result<(), AppError> {
        let animal = self.get_by_slug(slug).await?;
        self.cascade.delete_animal(animal.id, cancel).await
    }
}
