//! PostgreSQL implementation of the animal repository.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::entities::{Animal, AnimalPhoto, AnimalStatus};
use crate::domain::repositories::AnimalRepository;
use crate::error::AppError;

const ANIMAL_COLUMNS: &str =
    "id, shelter_id, name, slug, species, breed, age, description, status, created_at, updated_at";

/// PostgreSQL repository for animals and their photos.
pub struct PgAnimalRepository {
    pool: Arc<PgPool>,
}

impl PgAnimalRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

pub(crate) fn map_animal_row(row: &PgRow) -> Result<Animal, AppError> {
    Ok(Animal {
        id: row.try_get("id")?,
        shelter_id: row.try_get("shelter_id")?,
        name: row.try_get("name")?,
        slug: row.try_get("slug")?,
        species: row.try_get("species")?,
        breed: row.try_get("breed")?,
        age: row.try_get("age")?,
        description: row.try_get("description")?,
        status: AnimalStatus::from_str(row.try_get::<String, _>("status")?.as_str())?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn map_photo_row(row: &PgRow) -> Result<AnimalPhoto, AppError> {
    Ok(AnimalPhoto {
        id: row.try_get("id")?,
        animal_id: row.try_get("animal_id")?,
        photo_url: row.try_get("photo_url")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl AnimalRepository for PgAnimalRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Animal>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {ANIMAL_COLUMNS} FROM animals WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.as_ref().map(map_animal_row).transpose()
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Animal>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {ANIMAL_COLUMNS} FROM animals WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.as_ref().map(map_animal_row).transpose()
    }

    async fn list(&self) -> Result<Vec<Animal>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {ANIMAL_COLUMNS} FROM animals ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.iter().map(map_animal_row).collect()
    }

    async fn list_by_shelter(&self, shelter_id: Uuid) -> Result<Vec<Animal>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {ANIMAL_COLUMNS} FROM animals WHERE shelter_id = $1 ORDER BY created_at DESC"
        ))
        .bind(shelter_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.iter().map(map_animal_row).collect()
    }

    async fn list_photos(&self, animal_id: Uuid) -> Result<Vec<AnimalPhoto>, AppError> {
        let rows = sqlx::query(
            "SELECT id, animal_id, photo_url, created_at FROM animal_photos \
             WHERE animal_id = $1 ORDER BY created_at",
        )
        .bind(animal_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.iter().map(map_photo_row).collect()
    }

    async fn slug_exists(&self, slug: &str, exclude_id: Option<Uuid>) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM animals WHERE slug = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(slug)
        .bind(exclude_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }
}
