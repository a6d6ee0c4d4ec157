//! PostgreSQL unit of work: staged mutations replayed in one transaction.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use sqlx::{PgPool, Postgres, Transaction};

use crate::domain::unit_of_work::{Mutation, UnitOfWork, UnitOfWorkFactory};
use crate::error::AppError;
use crate::utils::db_error::is_unique_violation_on_slug;

/// Opens a [`PgUnitOfWork`] per command over a shared connection pool.
pub struct PgUnitOfWorkFactory {
    pool: Arc<PgPool>,
}

impl PgUnitOfWorkFactory {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

impl UnitOfWorkFactory for PgUnitOfWorkFactory {
    fn begin(&self) -> Box<dyn UnitOfWork> {
        Box::new(PgUnitOfWork {
            pool: self.pool.clone(),
            ops: Vec::new(),
        })
    }
}

/// Buffers staged mutations in memory; `commit` opens one database
/// transaction, replays them in staging order and commits. Any failure
/// rolls the transaction back, so no partial batch is ever visible.
pub struct PgUnitOfWork {
    pool: Arc<PgPool>,
    ops: Vec<Mutation>,
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    fn stage(&mut self, op: Mutation) {
        self.ops.push(op);
    }

    async fn commit(&mut self) -> Result<(), AppError> {
        let ops = std::mem::take(&mut self.ops);

        let mut tx = self.pool.begin().await?;
        for op in &ops {
            apply(&mut tx, op).await?;
        }
        tx.commit().await?;

        Ok(())
    }

    fn discard(&mut self) {
        self.ops.clear();
    }
}

async fn apply(tx: &mut Transaction<'_, Postgres>, op: &Mutation) -> Result<(), AppError> {
    match op {
        Mutation::InsertAddress(address) => {
            sqlx::query(
                "INSERT INTO addresses (id, country, region, district, city, street, created_at) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7)",
            )
            .bind(address.id)
            .bind(&address.country)
            .bind(&address.region)
            .bind(&address.district)
            .bind(&address.city)
            .bind(&address.street)
            .bind(address.created_at)
            .execute(&mut **tx)
            .await?;
        }
        Mutation::DeleteAddress(id) => {
            sqlx::query("DELETE FROM addresses WHERE id = $1")
                .bind(id)
                .execute(&mut **tx)
                .await?;
        }

        Mutation::InsertShelter(shelter) => {
            sqlx::query(
                "INSERT INTO shelters (id, name, slug, description, image_url, rating, \
                 reviews_count, animals_count, owner_user_id, address_id, version, created_at, \
                 updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
            )
            .bind(shelter.id)
            .bind(&shelter.name)
            .bind(&shelter.slug)
            .bind(&shelter.description)
            .bind(&shelter.image_url)
            .bind(shelter.rating)
            .bind(shelter.reviews_count)
            .bind(shelter.animals_count)
            .bind(shelter.owner_user_id)
            .bind(shelter.address_id)
            .bind(shelter.version)
            .bind(shelter.created_at)
            .bind(shelter.updated_at)
            .execute(&mut **tx)
            .await
            .map_err(slug_aware)?;
        }
        Mutation::UpdateShelter(shelter) => {
            // The version read by the service guards the write; a
            // concurrent commit bumped it and zero rows match.
            let result = sqlx::query(
                "UPDATE shelters SET name = $2, slug = $3, description = $4, image_url = $5, \
                 rating = $6, reviews_count = $7, animals_count = $8, updated_at = $9, \
                 version = version + 1 WHERE id = $1 AND version = $10",
            )
            .bind(shelter.id)
            .bind(&shelter.name)
            .bind(&shelter.slug)
            .bind(&shelter.description)
            .bind(&shelter.image_url)
            .bind(shelter.rating)
            .bind(shelter.reviews_count)
            .bind(shelter.animals_count)
            .bind(shelter.updated_at)
            .bind(shelter.version)
            .execute(&mut **tx)
            .await
            .map_err(slug_aware)?;

            if result.rows_affected() == 0 {
                return Err(AppError::conflict(
                    "Shelter was modified concurrently",
                    json!({ "shelter_id": shelter.id, "version": shelter.version }),
                ));
            }
        }
        Mutation::DeleteShelter(id) => {
            sqlx::query("DELETE FROM shelters WHERE id = $1")
                .bind(id)
                .execute(&mut **tx)
                .await?;
        }

        Mutation::InsertAnimal(animal) => {
            sqlx::query(
                "INSERT INTO animals (id, shelter_id, name, slug, species, breed, age, \
                 description, status, created_at, updated_at) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
            )
            .bind(animal.id)
            .bind(animal.shelter_id)
            .bind(&animal.name)
            .bind(&animal.slug)
            .bind(&animal.species)
            .bind(&animal.breed)
            .bind(animal.age)
            .bind(&animal.description)
            .bind(animal.status.as_str())
            .bind(animal.created_at)
            .bind(animal.updated_at)
            .execute(&mut **tx)
            .await
            .map_err(slug_aware)?;
        }
        Mutation::UpdateAnimal(animal) => {
            sqlx::query(
                "UPDATE animals SET name = $2, slug = $3, species = $4, breed = $5, age = $6, \
                 description = $7, status = $8, updated_at = $9 WHERE id = $1",
            )
            .bind(animal.id)
            .bind(&animal.name)
            .bind(&animal.slug)
            .bind(&animal.species)
            .bind(&animal.breed)
            .bind(animal.age)
            .bind(&animal.description)
            .bind(animal.status.as_str())
            .bind(animal.updated_at)
            .execute(&mut **tx)
            .await
            .map_err(slug_aware)?;
        }
        Mutation::DeleteAnimal(id) => {
            sqlx::query("DELETE FROM animals WHERE id = $1")
                .bind(id)
                .execute(&mut **tx)
                .await?;
        }

        Mutation::InsertAnimalPhoto(photo) => {
            sqlx::query(
                "INSERT INTO animal_photos (id, animal_id, photo_url, created_at) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(photo.id)
            .bind(photo.animal_id)
            .bind(&photo.photo_url)
            .bind(photo.created_at)
            .execute(&mut **tx)
            .await?;
        }
        Mutation::DeleteAnimalPhotosByAnimal(animal_id) => {
            sqlx::query("DELETE FROM animal_photos WHERE animal_id = $1")
                .bind(animal_id)
                .execute(&mut **tx)
                .await?;
        }

        Mutation::InsertFeedback(feedback) => {
            sqlx::query(
                "INSERT INTO shelter_feedback (id, shelter_id, user_id, rating, comment, \
                 created_at) VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(feedback.id)
            .bind(feedback.shelter_id)
            .bind(feedback.user_id)
            .bind(feedback.rating)
            .bind(&feedback.comment)
            .bind(feedback.created_at)
            .execute(&mut **tx)
            .await?;
        }
        Mutation::DeleteFeedback(id) => {
            sqlx::query("DELETE FROM shelter_feedback WHERE id = $1")
                .bind(id)
                .execute(&mut **tx)
                .await?;
        }
        Mutation::DeleteFeedbackByShelter(shelter_id) => {
            sqlx::query("DELETE FROM shelter_feedback WHERE shelter_id = $1")
                .bind(shelter_id)
                .execute(&mut **tx)
                .await?;
        }

        Mutation::InsertAdoptionRequest(request) => {
            sqlx::query(
                "INSERT INTO adoption_requests (id, animal_id, user_id, status, created_at) \
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(request.id)
            .bind(request.animal_id)
            .bind(request.user_id)
            .bind(request.status.as_str())
            .bind(request.created_at)
            .execute(&mut **tx)
            .await?;
        }
        Mutation::DeleteAdoptionRequest(id) => {
            sqlx::query("DELETE FROM adoption_requests WHERE id = $1")
                .bind(id)
                .execute(&mut **tx)
                .await?;
        }
        Mutation::DeleteAdoptionRequestsByAnimal(animal_id) => {
            sqlx::query("DELETE FROM adoption_requests WHERE animal_id = $1")
                .bind(animal_id)
                .execute(&mut **tx)
                .await?;
        }

        Mutation::InsertAnimalBookmark(bookmark) => {
            sqlx::query(
                "INSERT INTO animal_bookmarks (id, animal_id, user_id, created_at) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(bookmark.id)
            .bind(bookmark.animal_id)
            .bind(bookmark.user_id)
            .bind(bookmark.created_at)
            .execute(&mut **tx)
            .await?;
        }
        Mutation::DeleteAnimalBookmark(id) => {
            sqlx::query("DELETE FROM animal_bookmarks WHERE id = $1")
                .bind(id)
                .execute(&mut **tx)
                .await?;
        }
        Mutation::DeleteAnimalBookmarksByAnimal(animal_id) => {
            sqlx::query("DELETE FROM animal_bookmarks WHERE animal_id = $1")
                .bind(animal_id)
                .execute(&mut **tx)
                .await?;
        }

        Mutation::InsertShelterBookmark(bookmark) => {
            sqlx::query(
                "INSERT INTO shelter_bookmarks (id, shelter_id, user_id, created_at) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(bookmark.id)
            .bind(bookmark.shelter_id)
            .bind(bookmark.user_id)
            .bind(bookmark.created_at)
            .execute(&mut **tx)
            .await?;
        }
        Mutation::DeleteShelterBookmark(id) => {
            sqlx::query("DELETE FROM shelter_bookmarks WHERE id = $1")
                .bind(id)
                .execute(&mut **tx)
                .await?;
        }
        Mutation::DeleteShelterBookmarksByShelter(shelter_id) => {
            sqlx::query("DELETE FROM shelter_bookmarks WHERE shelter_id = $1")
                .bind(shelter_id)
                .execute(&mut **tx)
                .await?;
        }
    }

    Ok(())
}

/// Keeps the slug-specific conflict message distinguishable from other
/// unique violations; both map to [`AppError::Conflict`].
fn slug_aware(e: sqlx::Error) -> AppError {
    if is_unique_violation_on_slug(&e) {
        return AppError::conflict(
            "Slug already taken",
            json!({ "constraint": e.as_database_error().and_then(|d| d.constraint()) }),
        );
    }
    e.into()
}
