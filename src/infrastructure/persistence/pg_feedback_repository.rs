//! PostgreSQL implementation of the feedback repository.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::entities::ShelterFeedback;
use crate::domain::repositories::FeedbackRepository;
use crate::error::AppError;

/// PostgreSQL repository for shelter feedback rows.
pub struct PgFeedbackRepository {
    pool: Arc<PgPool>,
}

impl PgFeedbackRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn map_feedback_row(row: &PgRow) -> Result<ShelterFeedback, AppError> {
    Ok(ShelterFeedback {
        id: row.try_get("id")?,
        shelter_id: row.try_get("shelter_id")?,
        user_id: row.try_get("user_id")?,
        rating: row.try_get("rating")?,
        comment: row.try_get("comment")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl FeedbackRepository for PgFeedbackRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ShelterFeedback>, AppError> {
        let row = sqlx::query(
            "SELECT id, shelter_id, user_id, rating, comment, created_at \
             FROM shelter_feedback WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.as_ref().map(map_feedback_row).transpose()
    }

    async fn list_by_shelter(&self, shelter_id: Uuid) -> Result<Vec<ShelterFeedback>, AppError> {
        let rows = sqlx::query(
            "SELECT id, shelter_id, user_id, rating, comment, created_at \
             FROM shelter_feedback WHERE shelter_id = $1 ORDER BY created_at DESC",
        )
        .bind(shelter_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.iter().map(map_feedback_row).collect()
    }

    async fn exists_for_user(&self, shelter_id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM shelter_feedback WHERE shelter_id = $1 AND user_id = $2)",
        )
        .bind(shelter_id)
        .bind(user_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }
}
