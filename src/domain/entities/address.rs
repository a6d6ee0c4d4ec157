//! Address owned one-to-one by a shelter.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Physical address of a shelter. Deleted together with its owner.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Address {
    pub id: Uuid,
    pub country: String,
    pub region: String,
    pub district: String,
    pub city: String,
    pub street: String,
    pub created_at: DateTime<Utc>,
}

impl Address {
    pub fn new(
        country: String,
        region: String,
        district: String,
        city: String,
        street: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            country,
            region,
            district,
            city,
            street,
            created_at: Utc::now(),
        }
    }
}
