//! Request/response DTOs for the REST API.

pub mod adoption;
pub mod animal;
pub mod bookmark;
pub mod feedback;
pub mod health;
pub mod shelter;
