//! Persistence backends implementing the domain repository and
//! unit-of-work contracts.

pub mod memory;
mod pg_adoption_request_repository;
mod pg_animal_repository;
mod pg_bookmark_repository;
mod pg_feedback_repository;
mod pg_shelter_repository;
mod pg_unit_of_work;

pub use memory::{MemoryStore, MemoryUnitOfWorkFactory};
pub use pg_adoption_request_repository::PgAdoptionRequestRepository;
pub use pg_animal_repository::PgAnimalRepository;
pub use pg_bookmark_repository::PgBookmarkRepository;
pub use pg_feedback_repository::PgFeedbackRepository;
pub use pg_shelter_repository::PgShelterRepository;
pub use pg_unit_of_work::{PgUnitOfWork, PgUnitOfWorkFactory};
