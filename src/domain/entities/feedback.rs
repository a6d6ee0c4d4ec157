//! Shelter feedback rows feeding the rating aggregate.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A single user review of a shelter.
///
/// At most one row may exist per (user, shelter) pair; the service layer
/// checks before staging and a storage unique index is the authoritative
/// guard. The shelter's `(rating, reviews_count)` pair is updated in the
/// same commit that inserts or removes a row.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ShelterFeedback {
    pub id: Uuid,
    pub shelter_id: Uuid,
    pub user_id: Uuid,
    pub rating: f64,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl ShelterFeedback {
    pub fn new(shelter_id: Uuid, user_id: Uuid, rating: f64, comment: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            shelter_id,
            user_id,
            rating,
            comment,
            created_at: Utc::now(),
        }
    }
}
