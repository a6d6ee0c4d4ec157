//! PostgreSQL implementation of the bookmark repository.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::entities::{AnimalBookmark, ShelterBookmark};
use crate::domain::repositories::BookmarkRepository;
use crate::error::AppError;

/// PostgreSQL repository for saved-listing bookmarks.
pub struct PgBookmarkRepository {
    pool: Arc<PgPool>,
}

impl PgBookmarkRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn map_animal_bookmark(row: &PgRow) -> Result<AnimalBookmark, AppError> {
    Ok(AnimalBookmark {
        id: row.try_get("id")?,
        animal_id: row.try_get("animal_id")?,
        user_id: row.try_get("user_id")?,
        created_at: row.try_get("created_at")?,
    })
}

fn map_shelter_bookmark(row: &PgRow) -> Result<ShelterBookmark, AppError> {
    Ok(ShelterBookmark {
        id: row.try_get("id")?,
        shelter_id: row.try_get("shelter_id")?,
        user_id: row.try_get("user_id")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl BookmarkRepository for PgBookmarkRepository {
    async fn find_animal_bookmark(
        &self,
        animal_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<AnimalBookmark>, AppError> {
        let row = sqlx::query(
            "SELECT id, animal_id, user_id, created_at FROM animal_bookmarks \
             WHERE animal_id = $1 AND user_id = $2",
        )
        .bind(animal_id)
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.as_ref().map(map_animal_bookmark).transpose()
    }

    async fn find_shelter_bookmark(
        &self,
        shelter_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<ShelterBookmark>, AppError> {
        let row = sqlx::query(
            "SELECT id, shelter_id, user_id, created_at FROM shelter_bookmarks \
             WHERE shelter_id = $1 AND user_id = $2",
        )
        .bind(shelter_id)
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.as_ref().map(map_shelter_bookmark).transpose()
    }

    async fn list_animal_bookmarks(&self, user_id: Uuid) -> Result<Vec<AnimalBookmark>, AppError> {
        let rows = sqlx::query(
            "SELECT id, animal_id, user_id, created_at FROM animal_bookmarks \
             WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.iter().map(map_animal_bookmark).collect()
    }

    async fn list_shelter_bookmarks(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ShelterBookmark>, AppError> {
        let rows = sqlx::query(
            "SELECT id, shelter_id, user_id, created_at FROM shelter_bookmarks \
             WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.iter().map(map_shelter_bookmark).collect()
    }
}
