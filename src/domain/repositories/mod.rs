//! Repository traits — the read side of the persistence gateway.

mod adoption_request_repository;
mod animal_repository;
mod bookmark_repository;
mod feedback_repository;
mod shelter_repository;

pub use adoption_request_repository::AdoptionRequestRepository;
pub use animal_repository::AnimalRepository;
pub use bookmark_repository::BookmarkRepository;
pub use feedback_repository::FeedbackRepository;
pub use shelter_repository::{ShelterDetail, ShelterInclude, ShelterRepository};

#[cfg(test)]
pub use adoption_request_repository::MockAdoptionRequestRepository;
#[cfg(test)]
pub use animal_repository::MockAnimalRepository;
#[cfg(test)]
pub use bookmark_repository::MockBookmarkRepository;
#[cfg(test)]
pub use feedback_repository::MockFeedbackRepository;
#[cfg(test)]
pub use shelter_repository::MockShelterRepository;
