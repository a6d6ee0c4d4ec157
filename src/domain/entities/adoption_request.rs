//! Adoption request lifecycle entity.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::AppError;

/// Processing state of an adoption request.
///
/// Resolved requests are removed rather than archived, so persisted rows
/// are effectively always `Pending`; the other variants exist for the API
/// contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl std::str::FromStr for RequestStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(AppError::internal(
                "Unknown request status in storage",
                serde_json::json!({ "status": other }),
            )),
        }
    }
}

/// A user's request to adopt a specific animal.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AdoptionRequest {
    pub id: Uuid,
    pub animal_id: Uuid,
    pub user_id: Uuid,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

impl AdoptionRequest {
    pub fn new(animal_id: Uuid, user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            animal_id,
            user_id,
            status: RequestStatus::Pending,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_request_is_pending() {
        let request = AdoptionRequest::new(Uuid::new_v4(), Uuid::new_v4());
        assert_eq!(request.status, RequestStatus::Pending);
    }
}
