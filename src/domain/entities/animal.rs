//! Animal entity owned by a shelter.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::AppError;

/// Adoption lifecycle state of an animal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimalStatus {
    /// Listed and available.
    Free,
    /// An adoption request is pending for this animal.
    Reserve,
    /// Adoption confirmed.
    Adopted,
}

impl AnimalStatus {
    /// Stable textual form used in the database column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Reserve => "reserve",
            Self::Adopted => "adopted",
        }
    }
}

impl std::str::FromStr for AnimalStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(Self::Free),
            "reserve" => Ok(Self::Reserve),
            "adopted" => Ok(Self::Adopted),
            other => Err(AppError::internal(
                "Unknown animal status in storage",
                serde_json::json!({ "status": other }),
            )),
        }
    }
}

/// An animal listed for adoption.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Animal {
    pub id: Uuid,
    pub shelter_id: Uuid,
    pub name: String,
    pub slug: String,
    pub species: String,
    pub breed: String,
    pub age: Option<i32>,
    pub description: String,
    pub status: AnimalStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Animal {
    pub fn new(
        shelter_id: Uuid,
        name: String,
        slug: String,
        species: String,
        breed: String,
        age: Option<i32>,
        description: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            shelter_id,
            name,
            slug,
            species,
            breed,
            age,
            description,
            status: AnimalStatus::Free,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}

/// Input data for creating a new animal.
#[derive(Debug, Clone)]
pub struct NewAnimal {
    pub shelter_id: Uuid,
    pub name: String,
    pub species: String,
    pub breed: String,
    pub age: Option<i32>,
    pub description: String,
    pub photo_urls: Vec<String>,
}

/// Partial update for an existing animal.
///
/// `None` fields are left unchanged. A changed name re-derives the slug.
#[derive(Debug, Clone, Default)]
pub struct AnimalPatch {
    pub name: Option<String>,
    pub species: Option<String>,
    pub breed: Option<String>,
    pub age: Option<Option<i32>>,
    pub description: Option<String>,
    pub status: Option<AnimalStatus>,
}

/// A photo attached to an animal listing.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AnimalPhoto {
    pub id: Uuid,
    pub animal_id: Uuid,
    pub photo_url: String,
    pub created_at: DateTime<Utc>,
}

impl AnimalPhoto {
    pub fn new(animal_id: Uuid, photo_url: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            animal_id,
            photo_url,
            created_at: Utc::now(),
        }
    }
}
