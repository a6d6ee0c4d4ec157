//! PostgreSQL implementation of the shelter repository.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::entities::{Address, Shelter};
use crate::domain::repositories::{ShelterDetail, ShelterInclude, ShelterRepository};
use crate::error::AppError;
use crate::infrastructure::persistence::pg_animal_repository::map_animal_row;

const SHELTER_COLUMNS: &str = "id, name, slug, description, image_url, rating, reviews_count, \
     animals_count, owner_user_id, address_id, version, created_at, updated_at";

/// PostgreSQL repository for shelters.
///
/// Hydration flags map to follow-up queries; the shelter row itself is
/// always loaded in one round trip.
pub struct PgShelterRepository {
    pool: Arc<PgPool>,
}

impl PgShelterRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn hydrate(
        &self,
        shelter: Shelter,
        include: ShelterInclude,
    ) -> Result<ShelterDetail, AppError> {
        let address = if include.address {
            let row = sqlx::query(
                "SELECT id, country, region, district, city, street, created_at \
                 FROM addresses WHERE id = $1",
            )
            .bind(shelter.address_id)
            .fetch_optional(self.pool.as_ref())
            .await?;
            row.as_ref().map(map_address_row).transpose()?
        } else {
            None
        };

        let animals = if include.animals {
            let rows = sqlx::query(
                "SELECT id, shelter_id, name, slug, species, breed, age, description, status, \
                 created_at, updated_at FROM animals WHERE shelter_id = $1 ORDER BY created_at",
            )
            .bind(shelter.id)
            .fetch_all(self.pool.as_ref())
            .await?;
            rows.iter().map(map_animal_row).collect::<Result<_, _>>()?
        } else {
            Vec::new()
        };

        Ok(ShelterDetail {
            shelter,
            address,
            animals,
        })
    }
}

fn map_shelter_row(row: &PgRow) -> Result<Shelter, AppError> {
    Ok(Shelter {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        slug: row.try_get("slug")?,
        description: row.try_get("description")?,
        image_url: row.try_get("image_url")?,
        rating: row.try_get("rating")?,
        reviews_count: row.try_get("reviews_count")?,
        animals_count: row.try_get("animals_count")?,
        owner_user_id: row.try_get("owner_user_id")?,
        address_id: row.try_get("address_id")?,
        version: row.try_get("version")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn map_address_row(row: &PgRow) -> Result<Address, AppError> {
    Ok(Address {
        id: row.try_get("id")?,
        country: row.try_get("country")?,
        region: row.try_get("region")?,
        district: row.try_get("district")?,
        city: row.try_get("city")?,
        street: row.try_get("street")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl ShelterRepository for PgShelterRepository {
    async fn find_by_id(
        &self,
        id: Uuid,
        include: ShelterInclude,
    ) -> Result<Option<ShelterDetail>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {SHELTER_COLUMNS} FROM shelters WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        match row.as_ref().map(map_shelter_row).transpose()? {
            Some(shelter) => Ok(Some(self.hydrate(shelter, include).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_slug(
        &self,
        slug: &str,
        include: ShelterInclude,
    ) -> Result<Option<ShelterDetail>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {SHELTER_COLUMNS} FROM shelters WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(self.pool.as_ref())
        .await?;

        match row.as_ref().map(map_shelter_row).transpose()? {
            Some(shelter) => Ok(Some(self.hydrate(shelter, include).await?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Shelter>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {SHELTER_COLUMNS} FROM shelters ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.iter().map(map_shelter_row).collect()
    }

    async fn slug_exists(&self, slug: &str, exclude_id: Option<Uuid>) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM shelters WHERE slug = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(slug)
        .bind(exclude_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }
}
