//! DTOs for animal endpoints.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::{Animal, AnimalStatus, NewAnimal};

/// Request to create an animal under a shelter.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAnimalRequest {
    pub shelter_id: Uuid,

    #[validate(length(min = 1, max = 120))]
    pub name: String,

    #[validate(length(min = 1, max = 60))]
    pub species: String,

    #[serde(default)]
    pub breed: String,

    #[validate(range(min = 0, max = 50))]
    pub age: Option<i32>,

    #[validate(length(max = 2000))]
    #[serde(default)]
    pub description: String,

    #[validate(length(max = 10))]
    #[serde(default)]
    pub photo_urls: Vec<String>,
}

impl CreateAnimalRequest {
    pub fn into_input(self) -> NewAnimal {
        NewAnimal {
            shelter_id: self.shelter_id,
            name: self.name,
            species: self.species,
            breed: self.breed,
            age: self.age,
            description: self.description,
            photo_urls: self.photo_urls,
        }
    }
}

/// Request to partially update an animal. Absent fields are unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAnimalRequest {
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 60))]
    pub species: Option<String>,

    pub breed: Option<String>,

    #[validate(range(min = 0, max = 50))]
    pub age: Option<i32>,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    pub status: Option<AnimalStatus>,
}

/// Animal payload returned from all animal endpoints.
#[derive(Debug, Serialize)]
pub struct AnimalResponse {
    pub id: Uuid,
    pub shelter_id: Uuid,
    pub slug: String,
    pub name: String,
    pub species: String,
    pub breed: String,
    pub age: Option<i32>,
    pub description: String,
    pub status: AnimalStatus,
}

impl From<Animal> for AnimalResponse {
    fn from(animal: Animal) -> Self {
        Self {
            id: animal.id,
            shelter_id: animal.shelter_id,
            slug: animal.slug,
            name: animal.name,
            species: animal.species,
            breed: animal.breed,
            age: animal.age,
            description: animal.description,
            status: animal.status,
        }
    }
}

/// Animal with its photo gallery, returned from the detail endpoint.
#[derive(Debug, Serialize)]
pub struct AnimalDetailResponse {
    #[serde(flatten)]
    pub animal: AnimalResponse,
    pub photo_urls: Vec<String>,
}
