//! DTOs for shelter feedback endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::ShelterFeedback;

/// Request to add a review to a shelter.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateFeedbackRequest {
    #[validate(range(min = 1.0, max = 5.0))]
    pub rating: f64,

    #[validate(length(max = 2000))]
    #[serde(default)]
    pub comment: String,
}

/// Feedback payload returned from feedback endpoints.
#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub rating: f64,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl From<ShelterFeedback> for FeedbackResponse {
    fn from(feedback: ShelterFeedback) -> Self {
        Self {
            id: feedback.id,
            user_id: feedback.user_id,
            rating: feedback.rating,
            comment: feedback.comment,
            created_at: feedback.created_at,
        }
    }
}
