//! Adoption request lifecycle service.
//!
//! Creating a request reserves the animal; rejecting frees it again;
//! confirming removes the adopted animal through the cascade
//! orchestrator. Each transition is one commit.

use std::sync::Arc;

use serde_json::json;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::application::services::cascade::CascadeDeleter;
use crate::domain::entities::{AdoptionRequest, AnimalStatus};
use crate::domain::repositories::{
    AdoptionRequestRepository, AnimalRepository, ShelterInclude, ShelterRepository,
};
use crate::domain::unit_of_work::{Mutation, UnitOfWorkFactory};
use crate::error::AppError;

/// Service for creating and resolving adoption requests.
pub struct AdoptionService {
    requests: Arc<dyn AdoptionRequestRepository>,
    animals: Arc<dyn AnimalRepository>,
    shelters: Arc<dyn ShelterRepository>,
    uow_factory: Arc<dyn UnitOfWorkFactory>,
    cascade: Arc<CascadeDeleter>,
}

impl AdoptionService {
    pub fn new(
        requests: Arc<dyn AdoptionRequestRepository>,
        animals: Arc<dyn AnimalRepository>,
        shelters: Arc<dyn ShelterRepository>,
        uow_factory: Arc<dyn UnitOfWorkFactory>,
        cascade: Arc<CascadeDeleter>,
    ) -> Self {
        Self {
            requests,
            animals,
            shelters,
            uow_factory,
            cascade,
        }
    }

    /// Lists the pending requests for every animal of one shelter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the shelter does not exist.
    pub async fn list_for_shelter(
        &self,
        shelter_slug: &str,
    ) -> Result<Vec<AdoptionRequest>, AppError> {
        let detail = self
            .shelters
            .find_by_slug(shelter_slug, ShelterInclude::NONE)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Shelter not found", json!({ "slug": shelter_slug }))
            })?;

        self.requests.list_by_shelter(detail.shelter.id).await
    }

    /// Files an adoption request and reserves the animal, in one commit.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown animal and
    /// [`AppError::Conflict`] when the animal is not free.
    pub async fn create(
        &self,
        animal_slug: &str,
        user_id: Uuid,
        cancel: &CancellationToken,
    ) -> Result<AdoptionRequest, AppError> {
        let mut animal = self
            .animals
            .find_by_slug(animal_slug)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Animal not found", json!({ "slug": animal_slug }))
            })?;

        if animal.status != AnimalStatus::Free {
            return Err(AppError::conflict(
                "Animal is not available for adoption",
                json!({ "slug": animal_slug, "status": animal.status.as_str() }),
            ));
        }

        let request = AdoptionRequest::new(animal.id, user_id);

        animal.status = AnimalStatus::Reserve;
        animal.touch();

        let mut uow = self.uow_factory.begin();
        uow.stage(Mutation::UpdateAnimal(animal));
        uow.stage(Mutation::InsertAdoptionRequest(request.clone()));

        if cancel.is_cancelled() {
            uow.discard();
            return Err(AppError::Cancelled);
        }

        uow.commit().await?;
        tracing::info!(request_id = %request.id, animal_slug, "adoption request created");
        Ok(request)
    }

    /// Rejects a request: the animal becomes free again and the request
    /// row is removed, in one commit.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown request.
    pub async fn reject(
        &self,
        request_id: Uuid,
        cancel: &CancellationToken,
    ) -> Result<(), AppError> {
        let request = self.requests.find_by_id(request_id).await?.ok_or_else(|| {
            AppError::not_found(
                "Adoption request not found",
                json!({ "request_id": request_id }),
            )
        })?;

        let mut uow = self.uow_factory.begin();

        if let Some(mut animal) = self.animals.find_by_id(request.animal_id).await? {
            animal.status = AnimalStatus::Free;
            animal.touch();
            uow.stage(Mutation::UpdateAnimal(animal));
        }
        uow.stage(Mutation::DeleteAdoptionRequest(request.id));

        if cancel.is_cancelled() {
            uow.discard();
            return Err(AppError::Cancelled);
        }

        uow.commit().await?;
        tracing::info!(request_id = %request.id, "adoption request rejected");
        Ok(())
    }

    /// Confirms a request: the adopted animal leaves the listing entirely
    /// — the full animal cascade (photos, bookmarks, every request
    /// including this one, shelter count decrement) runs in one commit.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown request or an animal
    /// that is already gone, and [`AppError::Conflict`] when the shelter
    /// row changed concurrently (retryable).
    pub async fn confirm(
        &self,
        request_id: Uuid,
        cancel: &CancellationToken,
    ) -> Result<(), AppError> {
        let request = self.requests.find_by_id(request_id).await?.ok_or_else(|| {
            AppError::not_found(
                "Adoption request not found",
                json!({ "request_id": request_id }),
            )
        })?;

        let mut uow = self.uow_factory.begin();
        self.cascade
            .stage_animal_cascade(uow.as_mut(), request.animal_id)
            .await?;

        if cancel.is_cancelled() {
            uow.discard();
            return Err(AppError::Cancelled);
        }

        uow.commit().await?;
        tracing::info!(request_id = %request.id, animal_id = %request.animal_id, "adoption confirmed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::{
        RecordingFactory, test_animal, test_shelter_detail,
    };
    use crate::domain::repositories::{
        MockAdoptionRequestRepository, MockAnimalRepository, MockShelterRepository,
    };

    fn service_with(
        requests: MockAdoptionRequestRepository,
        animals: MockAnimalRepository,
        shelters: MockShelterRepository,
        factory: RecordingFactory,
    ) -> AdoptionService {
        let animals = Arc::new(animals);
        let shelters = Arc::new(shelters);
        let cascade = Arc::new(CascadeDeleter::new(
            shelters.clone(),
            animals.clone(),
            Arc::new(factory.clone()),
        ));
        AdoptionService::new(
            Arc::new(requests),
            animals,
            shelters,
            Arc::new(factory),
            cascade,
        )
    }

    #[tokio::test]
    async fn test_create_reserves_animal_and_inserts_request() {
        let animal = test_animal(Uuid::new_v4(), "rex");
        let user_id = Uuid::new_v4();

        let mut animals = MockAnimalRepository::new();
        let found = animal.clone();
        animals
            .expect_find_by_slug()
            .times(1)
            .returning(move |_| Ok(Some(found.clone())));

        let factory = RecordingFactory::default();
        let service = service_with(
            MockAdoptionRequestRepository::new(),
            animals,
            MockShelterRepository::new(),
            factory.clone(),
        );

        let request = service
            .create("rex", user_id, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(request.user_id, user_id);

        let ops = factory.staged();
        assert_eq!(ops.len(), 2);
        assert!(
            matches!(&ops[0], Mutation::UpdateAnimal(a) if a.status == AnimalStatus::Reserve)
        );
        assert!(matches!(&ops[1], Mutation::InsertAdoptionRequest(_)));
    }

    #[tokio::test]
    async fn test_create_for_reserved_animal_is_conflict() {
        let mut animal = test_animal(Uuid::new_v4(), "rex");
        animal.status = AnimalStatus::Reserve;

        let mut animals = MockAnimalRepository::new();
        let found = animal.clone();
        animals
            .expect_find_by_slug()
            .times(1)
            .returning(move |_| Ok(Some(found.clone())));

        let factory = RecordingFactory::default();
        let service = service_with(
            MockAdoptionRequestRepository::new(),
            animals,
            MockShelterRepository::new(),
            factory.clone(),
        );

        let result = service
            .create("rex", Uuid::new_v4(), &CancellationToken::new())
            .await;

        assert!(matches!(result, Err(AppError::Conflict { .. })));
        assert!(factory.staged().is_empty());
    }

    #[tokio::test]
    async fn test_reject_frees_animal_and_removes_request() {
        let mut animal = test_animal(Uuid::new_v4(), "rex");
        animal.status = AnimalStatus::Reserve;
        let request = AdoptionRequest::new(animal.id, Uuid::new_v4());
        let request_id = request.id;

        let mut requests = MockAdoptionRequestRepository::new();
        requests
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(request.clone())));

        let mut animals = MockAnimalRepository::new();
        let found = animal.clone();
        animals
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(found.clone())));

        let factory = RecordingFactory::default();
        let service = service_with(
            requests,
            animals,
            MockShelterRepository::new(),
            factory.clone(),
        );

        service
            .reject(request_id, &CancellationToken::new())
            .await
            .unwrap();

        let ops = factory.staged();
        assert!(matches!(&ops[0], Mutation::UpdateAnimal(a) if a.status == AnimalStatus::Free));
        assert!(
            matches!(&ops[1], Mutation::DeleteAdoptionRequest(id) if *id == request_id)
        );
    }

    #[tokio::test]
    async fn test_confirm_runs_full_animal_cascade() {
        let detail = test_shelter_detail(0);
        let mut shelter = detail.shelter.clone();
        shelter.animals_count = 1;
        let animal = test_animal(shelter.id, "rex");
        let animal_id = animal.id;
        let request = AdoptionRequest::new(animal_id, Uuid::new_v4());
        let request_id = request.id;

        let mut requests = MockAdoptionRequestRepository::new();
        requests
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(request.clone())));

        let mut animals = MockAnimalRepository::new();
        let found = animal.clone();
        animals
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(found.clone())));

        let mut shelters = MockShelterRepository::new();
        let stored = crate::domain::repositories::ShelterDetail {
            shelter,
            address: None,
            animals: vec![],
        };
        shelters
            .expect_find_by_id()
            .times(1)
            .returning(move |_, _| Ok(Some(stored.clone())));

        let factory = RecordingFactory::default();
        let service = service_with(requests, animals, shelters, factory.clone());

        service
            .confirm(request_id, &CancellationToken::new())
            .await
            .unwrap();

        let ops = factory.staged();
        // Request removal is covered by the per-animal bulk delete.
        assert!(
            ops.iter().any(
                |op| matches!(op, Mutation::DeleteAdoptionRequestsByAnimal(id) if *id == animal_id)
            )
        );
        assert!(
            ops.iter()
                .any(|op| matches!(op, Mutation::DeleteAnimal(id) if *id == animal_id))
        );
        assert!(
            matches!(ops.last(), Some(Mutation::UpdateShelter(s)) if s.animals_count == 0)
        );
        assert!(factory.committed());
    }
}
