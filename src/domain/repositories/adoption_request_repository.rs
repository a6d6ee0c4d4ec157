//! Repository trait for adoption request data access.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::AdoptionRequest;
use crate::error::AppError;

/// Repository interface for adoption requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdoptionRequestRepository: Send + Sync {
    /// Finds a request by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AdoptionRequest>, AppError>;

    /// Lists the requests targeting one animal.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_by_animal(&self, animal_id: Uuid) -> Result<Vec<AdoptionRequest>, AppError>;

    /// Lists the requests for every animal of one shelter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_by_shelter(&self, shelter_id: Uuid) -> Result<Vec<AdoptionRequest>, AppError>;
}
