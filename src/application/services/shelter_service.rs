//! Shelter creation, update, and lookup service.

use std::sync::Arc;

use serde_json::json;
use tokio_util::sync::CancellationToken;

use crate::application::services::cascade::CascadeDeleter;
use crate::domain::entities::{Address, NewShelter, Shelter, ShelterPatch};
use crate::domain::repositories::{ShelterDetail, ShelterInclude, ShelterRepository};
use crate::domain::unit_of_work::{Mutation, UnitOfWorkFactory};
use crate::error::AppError;
use crate::utils::slug;

/// One extra attempt after a commit-time slug conflict: the losing side of
/// a probe race re-probes once against the now-visible winner.
const SLUG_CONFLICT_ATTEMPTS: usize = 2;

/// Service for managing shelter aggregates.
///
/// Writes are staged against a per-command unit of work; the slug is
/// derived from the display name and resolved against existing rows
/// before every create or rename.
pub struct ShelterService {
    shelters: Arc<dyn ShelterRepository>,
    uow_factory: Arc<dyn UnitOfWorkFactory>,
    cascade: Arc<CascadeDeleter>,
}

impl ShelterService {
    pub fn new(
        shelters: Arc<dyn ShelterRepository>,
        uow_factory: Arc<dyn UnitOfWorkFactory>,
        cascade: Arc<CascadeDeleter>,
    ) -> Self {
        Self {
            shelters,
            uow_factory,
            cascade,
        }
    }

    /// Lists all shelters.
    pub async fn list(&self) -> Result<Vec<Shelter>, AppError> {
        self.shelters.list().await
    }

    /// Fetches one shelter by slug with the requested relations.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no shelter has the slug.
    pub async fn get_by_slug(
        &self,
        slug: &str,
        include: ShelterInclude,
    ) -> Result<ShelterDetail, AppError> {
        self.shelters
            .find_by_slug(slug, include)
            .await?
            .ok_or_else(|| AppError::not_found("Shelter not found", json!({ "slug": slug })))
    }

    /// Creates a shelter together with its owned address.
    ///
    /// The slug is derived from the name and probed for uniqueness; the
    /// storage unique index remains the authoritative guard, so a
    /// commit-time slug conflict (two concurrent creations probing the
    /// same base) is retried once with a fresh probe.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the name yields no slug,
    /// [`AppError::Conflict`] when the retry also collides, and
    /// [`AppError::Cancelled`] when `cancel` fired before commit.
    pub async fn create(
        &self,
        input: NewShelter,
        address: Address,
        cancel: &CancellationToken,
    ) -> Result<Shelter, AppError> {
        let base = slug::generate_base(&input.name)?;

        let mut last_err = None;
        for _ in 0..SLUG_CONFLICT_ATTEMPTS {
            let unique = slug::resolve_unique(&base, |candidate| {
                let shelters = self.shelters.clone();
                async move { shelters.slug_exists(&candidate, None).await }
            })
            .await?;

            let shelter = Shelter::new(
                input.name.clone(),
                unique,
                input.description.clone(),
                input.image_url.clone(),
                input.owner_user_id,
                address.id,
            );

            let mut uow = self.uow_factory.begin();
            uow.stage(Mutation::InsertAddress(address.clone()));
            uow.stage(Mutation::InsertShelter(shelter.clone()));

            if cancel.is_cancelled() {
                uow.discard();
                return Err(AppError::Cancelled);
            }

            match uow.commit().await {
                Ok(()) => {
                    tracing::info!(shelter_id = %shelter.id, slug = %shelter.slug, "shelter created");
                    return Ok(shelter);
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
    /// excluding the shelter itself from the collision probe.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the shelter is missing and
    /// [`AppError::Conflict`] when the row changed concurrently
    /// (retryable).
    pub async fn update(
        &self,
        current_slug: &str,
        patch: ShelterPatch,
        cancel: &CancellationToken,
    ) -> Result<Shelter, AppError> {
        let detail = self.get_by_slug(current_slug, ShelterInclude::NONE).await?;
        let mut shelter = detail.shelter;

        if let Some(name) = patch.name {
            if name != shelter.name {
                let base = slug::generate_base(&name)?;
                let shelter_id = shelter.id;
                shelter.slug = slug::resolve_unique(&base, |candidate| {
                    let shelters = self.shelters.clone();
                    async move { shelters.slug_exists(&candidate, Some(shelter_id)).await }
                })
                .await?;
                shelter.name = name;
            }
        }
        if let Some(description) = patch.description {
            shelter.description = description;
        }
        if let Some(image_url) = patch.image_url {
            shelter.image_url = image_url;
        }
        shelter.touch();

        let mut uow = self.uow_factory.begin();
        uow.stage(Mutation::UpdateShelter(shelter.clone()));

        if cancel.is_cancelled() {
            uow.discard();
            return Err(AppError::Cancelled);
        }

        uow.commit().await?;
        Ok(shelter)
    }

    /// Deletes a shelter and all dependents through the cascade
    /// orchestrator.
    ///
    /// # Errors
    ///
    /// See [`CascadeDeleter::delete_shelter`].
    pub async fn delete(&self, slug: &str, cancel: &CancellationToken) -> Result<(), AppError> {
        let detail = self.get_by_slug(slug, ShelterInclude::NONE).await?;
        self.cascade.delete_shelter(detail.shelter.id, cancel).await
    }
}
