//! Unit of Work — the transactional boundary for all mutations.
//!
//! Services never write through repositories. They stage typed
//! [`Mutation`]s against one [`UnitOfWork`] instance and commit once; the
//! backend applies the whole batch inside a single database transaction or
//! not at all. One instance is opened per incoming command through
//! [`UnitOfWorkFactory`] and discarded afterwards, so staged changes can
//! never leak between requests.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{
    Address, AdoptionRequest, Animal, AnimalBookmark, AnimalPhoto, Shelter, ShelterBookmark,
    ShelterFeedback,
};
use crate::error::AppError;

/// A staged write, applied at commit time.
///
/// The `…By*` bulk variants remove every row referencing an owner in one
/// statement; cascades use them so dependents are gone before their parent
/// row is touched.
#[derive(Debug, Clone)]
pub enum Mutation {
    InsertAddress(Address),
    DeleteAddress(Uuid),

    InsertShelter(Shelter),
    /// Applied with a `WHERE version = <read version>` guard; matching
    /// zero rows is a retryable [`AppError::Conflict`]. The commit bumps
    /// the version.
    UpdateShelter(Shelter),
    DeleteShelter(Uuid),

    InsertAnimal(Animal),
    UpdateAnimal(Animal),
    DeleteAnimal(Uuid),

    InsertAnimalPhoto(AnimalPhoto),
    DeleteAnimalPhotosByAnimal(Uuid),

    InsertFeedback(ShelterFeedback),
    DeleteFeedback(Uuid),
    DeleteFeedbackByShelter(Uuid),

    InsertAdoptionRequest(AdoptionRequest),
    DeleteAdoptionRequest(Uuid),
    DeleteAdoptionRequestsByAnimal(Uuid),

    InsertAnimalBookmark(AnimalBookmark),
    DeleteAnimalBookmark(Uuid),
    DeleteAnimalBookmarksByAnimal(Uuid),

    InsertShelterBookmark(ShelterBookmark),
    DeleteShelterBookmark(Uuid),
    DeleteShelterBookmarksByShelter(Uuid),
}

/// An instance-scoped batch of staged mutations.
///
/// # Contract
///
/// - `stage` records an operation; nothing touches storage until `commit`.
/// - `commit` applies every staged operation atomically, in staging order,
///   or applies none of them. After a successful commit the instance is
///   spent and must be dropped.
/// - `discard` drops all staged operations with no observable effect;
///   used when a cancellation signal fires before commit.
///
/// # Errors
///
/// `commit` returns [`AppError::Conflict`] on a slug unique-constraint
/// violation or a shelter version mismatch (both retryable), and
/// [`AppError::Internal`] for any other storage failure.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UnitOfWork: Send {
    fn stage(&mut self, op: Mutation);

    async fn commit(&mut self) -> Result<(), AppError>;

    fn discard(&mut self);
}

/// Opens one [`UnitOfWork`] per incoming command.
///
/// Injected into services at construction time; there is deliberately no
/// shared or lazily-created instance anywhere.
#[cfg_attr(test, mockall::automock)]
pub trait UnitOfWorkFactory: Send + Sync {
    fn begin(&self) -> Box<dyn UnitOfWork>;
}
