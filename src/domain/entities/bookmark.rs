//! Saved-listing bookmarks (user ↔ animal, user ↔ shelter).

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A user's saved animal. At most one row per (user, animal) pair.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AnimalBookmark {
    pub id: Uuid,
    pub animal_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl AnimalBookmark {
    pub fn new(animal_id: Uuid, user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            animal_id,
            user_id,
            created_at: Utc::now(),
        }
    }
}

/// A user's saved shelter. At most one row per (user, shelter) pair.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ShelterBookmark {
    pub id: Uuid,
    pub shelter_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl ShelterBookmark {
    pub fn new(shelter_id: Uuid, user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            shelter_id,
            user_id,
            created_at: Utc::now(),
        }
    }
}
