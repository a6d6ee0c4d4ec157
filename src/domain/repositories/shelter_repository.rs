//! Repository trait for shelter data access.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{Address, Animal, Shelter};
use crate::error::AppError;

/// Typed hydration flags for shelter reads.
///
/// Replaces a stringly-typed "include" mechanism: the set of loadable
/// relations is closed and checked at compile time, so a misspelled
/// relation cannot silently return un-hydrated data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShelterInclude {
    pub address: bool,
    pub animals: bool,
}

impl ShelterInclude {
    /// Load the shelter row only.
    pub const NONE: Self = Self {
        address: false,
        animals: false,
    };

    pub fn address(mut self) -> Self {
        self.address = true;
        self
    }

    pub fn animals(mut self) -> Self {
        self.animals = true;
        self
    }
}

/// A shelter with the relations requested through [`ShelterInclude`].
///
/// Relations that were not requested come back empty; callers decide what
/// they need at the call site, where the flags are visible.
#[derive(Debug, Clone)]
pub struct ShelterDetail {
    pub shelter: Shelter,
    pub address: Option<Address>,
    pub animals: Vec<Animal>,
}

/// Repository interface for shelters.
///
/// Read side only — all writes are staged against a
/// [`crate::domain::unit_of_work::UnitOfWork`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShelterRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::MemoryStore`] - in-process, tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShelterRepository: Send + Sync {
    /// Finds a shelter by id, hydrating the requested relations.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(
        &self,
        id: Uuid,
        include: ShelterInclude,
    ) -> Result<Option<ShelterDetail>, AppError>;

    /// Finds a shelter by its slug, hydrating the requested relations.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_slug(
        &self,
        slug: &str,
        include: ShelterInclude,
    ) -> Result<Option<ShelterDetail>, AppError>;

    /// Lists all shelters, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self) -> Result<Vec<Shelter>, AppError>;

    /// Reports whether `slug` is already taken.
    ///
    /// Update paths pass their own id as `exclude_id` so an entity renamed
    /// back to its current name does not collide with itself.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn slug_exists(&self, slug: &str, exclude_id: Option<Uuid>) -> Result<bool, AppError>;
}
