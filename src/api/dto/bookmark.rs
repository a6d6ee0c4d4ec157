//! DTOs for saved-listing endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::{AnimalBookmark, ShelterBookmark};

/// Saved-animal payload.
#[derive(Debug, Serialize)]
pub struct AnimalBookmarkResponse {
    pub id: Uuid,
    pub animal_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<AnimalBookmark> for AnimalBookmarkResponse {
    fn from(bookmark: AnimalBookmark) -> Self {
        Self {
            id: bookmark.id,
            animal_id: bookmark.animal_id,
            created_at: bookmark.created_at,
        }
    }
}

/// Saved-shelter payload.
#[derive(Debug, Serialize)]
pub struct ShelterBookmarkResponse {
    pub id: Uuid,
    pub shelter_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<ShelterBookmark> for ShelterBookmarkResponse {
    fn from(bookmark: ShelterBookmark) -> Self {
        Self {
            id: bookmark.id,
            shelter_id: bookmark.shelter_id,
            created_at: bookmark.created_at,
        }
    }
}
