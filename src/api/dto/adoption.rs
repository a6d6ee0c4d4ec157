//! DTOs for adoption request endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::{AdoptionRequest, RequestStatus};

/// Request to file an adoption request for an animal.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAdoptionRequest {
    #[validate(length(min = 1, max = 140))]
    pub animal_slug: String,
}

/// Adoption request payload returned from request endpoints.
#[derive(Debug, Serialize)]
pub struct AdoptionRequestResponse {
    pub id: Uuid,
    pub animal_id: Uuid,
    pub user_id: Uuid,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

impl From<AdoptionRequest> for AdoptionRequestResponse {
    fn from(request: AdoptionRequest) -> Self {
        Self {
            id: request.id,
            animal_id: request.animal_id,
            user_id: request.user_id,
            status: request.status,
            created_at: request.created_at,
        }
    }
}
