//! Shelter aggregate root and its denormalized rating/count columns.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A shelter listing.
///
/// `rating`, `reviews_count` and `animals_count` are denormalized running
/// aggregates maintained by the services that insert or remove the
/// underlying rows — never recomputed at query time. `version` is the
/// optimistic concurrency token: every staged update must present the
/// version it read, and the commit bumps it.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Shelter {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub image_url: String,
    pub rating: f64,
    pub reviews_count: i32,
    pub animals_count: i32,
    pub owner_user_id: Uuid,
    pub address_id: Uuid,
    #[serde(skip)]
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Shelter {
    /// Creates a fresh shelter with zeroed aggregates.
    pub fn new(
        name: String,
        slug: String,
        description: String,
        image_url: String,
        owner_user_id: Uuid,
        address_id: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            slug,
            description,
            image_url,
            rating: 0.0,
            reviews_count: 0,
            animals_count: 0,
            owner_user_id,
            address_id,
            version: 0,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Marks the row as modified now.
    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}

/// Input data for creating a new shelter.
#[derive(Debug, Clone)]
pub struct NewShelter {
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub owner_user_id: Uuid,
}

/// Partial update for an existing shelter.
///
/// `None` fields are left unchanged. A changed name re-derives the slug.
#[derive(Debug, Clone, Default)]
pub struct ShelterPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}
