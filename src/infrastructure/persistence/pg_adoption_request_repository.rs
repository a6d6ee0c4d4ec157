//! PostgreSQL implementation of the adoption request repository.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::entities::{AdoptionRequest, RequestStatus};
use crate::domain::repositories::AdoptionRequestRepository;
use crate::error::AppError;

/// PostgreSQL repository for adoption requests.
pub struct PgAdoptionRequestRepository {
    pool: Arc<PgPool>,
}

impl PgAdoptionRequestRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn map_request_row(row: &PgRow) -> Result<AdoptionRequest, AppError> {
    Ok(AdoptionRequest {
        id: row.try_get("id")?,
        animal_id: row.try_get("animal_id")?,
        user_id: row.try_get("user_id")?,
        status: RequestStatus::from_str(row.try_get::<String, _>("status")?.as_str())?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl AdoptionRequestRepository for PgAdoptionRequestRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AdoptionRequest>, AppError> {
        let row = sqlx::query(
            "SELECT id, animal_id, user_id, status, created_at \
             FROM adoption_requests WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.as_ref().map(map_request_row).transpose()
    }

    async fn list_by_animal(&self, animal_id: Uuid) -> Result<Vec<AdoptionRequest>, AppError> {
        let rows = sqlx::query(
            "SELECT id, animal_id, user_id, status, created_at \
             FROM adoption_requests WHERE animal_id = $1 ORDER BY created_at",
        )
        .bind(animal_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.iter().map(map_request_row).collect()
    }

    async fn list_by_shelter(&self, shelter_id: Uuid) -> Result<Vec<AdoptionRequest>, AppError> {
        let rows = sqlx::query(
            "SELECT r.id, r.animal_id, r.user_id, r.status, r.created_at \
             FROM adoption_requests r \
             JOIN animals a ON a.id = r.animal_id \
             WHERE a.shelter_id = $1 ORDER BY r.created_at",
        )
        .bind(shelter_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.iter().map(map_request_row).collect()
    }
}
