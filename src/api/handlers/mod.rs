//! API request handlers.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::json;

use crate::error::AppError;

mod adoption_requests;
mod animals;
mod bookmarks;
mod feedback;
mod health;
mod shelters;

pub use adoption_requests::{
    confirm_request_handler, create_request_handler, list_requests_by_shelter_handler,
    reject_request_handler,
};
pub use animals::{
    create_animal_handler, delete_animal_handler, get_animal_handler, list_animals_handler,
    update_animal_handler,
};
pub use bookmarks::{
    list_saved_animals_handler, list_saved_shelters_handler, save_animal_handler,
    save_shelter_handler, unsave_animal_handler, unsave_shelter_handler,
};
pub use feedback::{create_feedback_handler, delete_feedback_handler, list_feedback_handler};
pub use health::health_handler;
pub use shelters::{
    create_shelter_handler, delete_shelter_handler, get_shelter_handler, list_shelters_handler,
    update_shelter_handler,
};

/// Shape every generated slug satisfies.
static SLUG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap());

/// Rejects malformed slug path parameters before any storage round trip.
pub(crate) fn validate_slug_param(slug: &str) -> Result<(), AppError> {
    if slug.len() > 140 || !SLUG_REGEX.is_match(slug) {
        return Err(AppError::bad_request(
            "Invalid slug",
            json!({ "slug": slug }),
        ));
    }
    Ok(())
}
