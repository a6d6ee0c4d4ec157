//! Core business entities.

mod address;
mod adoption_request;
mod animal;
mod bookmark;
mod feedback;
mod shelter;

pub use address::Address;
pub use adoption_request::{AdoptionRequest, RequestStatus};
pub use animal::{Animal, AnimalPatch, AnimalPhoto, AnimalStatus, NewAnimal};
pub use bookmark::{AnimalBookmark, ShelterBookmark};
pub use feedback::ShelterFeedback;
pub use shelter::{NewShelter, Shelter, ShelterPatch};
