//! DTOs for shelter endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{Address, Shelter};
use crate::domain::repositories::ShelterDetail;

use super::animal::AnimalResponse;

/// Request to create a shelter with its address.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateShelterRequest {
    #[validate(length(min = 1, max = 120))]
    pub name: String,

    #[validate(length(max = 2000))]
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub image_url: String,

    #[validate(nested)]
    pub address: AddressDto,
}

/// Request to partially update a shelter. Absent fields are unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateShelterRequest {
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    pub image_url: Option<String>,
}

/// Address payload embedded in shelter creation.
#[derive(Debug, Deserialize, Validate)]
pub struct AddressDto {
    #[validate(length(min = 1, max = 80))]
    pub country: String,

    #[validate(length(min = 1, max = 80))]
    pub region: String,

    #[serde(default)]
    pub district: String,

    #[validate(length(min = 1, max = 80))]
    pub city: String,

    #[serde(default)]
    pub street: String,
}

impl AddressDto {
    pub fn into_entity(self) -> Address {
        Address::new(
            self.country,
            self.region,
            self.district,
            self.city,
            self.street,
        )
    }
}

/// Shelter summary returned from list and create endpoints.
#[derive(Debug, Serialize)]
pub struct ShelterResponse {
    pub id: uuid::Uuid,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub rating: f64,
    pub reviews_count: i32,
    pub animals_count: i32,
}

impl From<Shelter> for ShelterResponse {
    fn from(shelter: Shelter) -> Self {
        Self {
            id: shelter.id,
            slug: shelter.slug,
            name: shelter.name,
            description: shelter.description,
            image_url: shelter.image_url,
            rating: shelter.rating,
            reviews_count: shelter.reviews_count,
            animals_count: shelter.animals_count,
        }
    }
}

/// Address payload in detail responses.
#[derive(Debug, Serialize)]
pub struct AddressResponse {
    pub country: String,
    pub region: String,
    pub district: String,
    pub city: String,
    pub street: String,
}

impl From<Address> for AddressResponse {
    fn from(address: Address) -> Self {
        Self {
            country: address.country,
            region: address.region,
            district: address.district,
            city: address.city,
            street: address.street,
        }
    }
}

/// Shelter with hydrated relations, returned from the detail endpoint.
#[derive(Debug, Serialize)]
pub struct ShelterDetailResponse {
    #[serde(flatten)]
    pub shelter: ShelterResponse,
    pub address: Option<AddressResponse>,
    pub animals: Vec<AnimalResponse>,
}

impl From<ShelterDetail> for ShelterDetailResponse {
    fn from(detail: ShelterDetail) -> Self {
        Self {
            shelter: detail.shelter.into(),
            address: detail.address.map(Into::into),
            animals: detail.animals.into_iter().map(Into::into).collect(),
        }
    }
}
