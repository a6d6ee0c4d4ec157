//! Application services orchestrating domain logic.

mod adoption_service;
mod animal_service;
mod bookmark_service;
mod cascade;
mod feedback_service;
mod shelter_service;

#[cfg(test)]
mod test_support;

pub use adoption_service::AdoptionService;
pub use animal_service::AnimalService;
pub use bookmark_service::BookmarkService;
pub use cascade::CascadeDeleter;
pub use feedback_service::FeedbackService;
pub use shelter_service::ShelterService;
