//! Shared application state injected into handlers.

use std::sync::Arc;

use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use crate::application::services::{
    AdoptionService, AnimalService, BookmarkService, CascadeDeleter, FeedbackService,
    ShelterService,
};
use crate::infrastructure::persistence::{
    MemoryStore, MemoryUnitOfWorkFactory, PgAdoptionRequestRepository, PgAnimalRepository,
    PgBookmarkRepository, PgFeedbackRepository, PgShelterRepository, PgUnitOfWorkFactory,
};

/// Handler-visible application state.
///
/// Services are wired once at startup with explicit constructor injection;
/// the unit-of-work factory they share opens a fresh instance per command.
/// `shutdown` is the process-wide cancellation token: a mutation whose
/// token fires before commit is discarded in full.
#[derive(Clone)]
pub struct AppState {
    pub shelter_service: Arc<ShelterService>,
    pub animal_service: Arc<AnimalService>,
    pub feedback_service: Arc<FeedbackService>,
    pub adoption_service: Arc<AdoptionService>,
    pub bookmark_service: Arc<BookmarkService>,
    /// Present when backed by PostgreSQL; used by the health probe.
    pub db: Option<Arc<PgPool>>,
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Wires all services over a PostgreSQL pool.
    pub fn with_postgres(pool: Arc<PgPool>, shutdown: CancellationToken) -> Self {
        let shelters = Arc::new(PgShelterRepository::new(pool.clone()));
        let animals = Arc::new(PgAnimalRepository::new(pool.clone()));
        let feedback = Arc::new(PgFeedbackRepository::new(pool.clone()));
        let requests = Arc::new(PgAdoptionRequestRepository::new(pool.clone()));
        let bookmarks = Arc::new(PgBookmarkRepository::new(pool.clone()));
        let uow_factory = Arc::new(PgUnitOfWorkFactory::new(pool.clone()));

        let cascade = Arc::new(CascadeDeleter::new(
            shelters.clone(),
            animals.clone(),
            uow_factory.clone(),
        ));

        Self {
            shelter_service: Arc::new(ShelterService::new(
                shelters.clone(),
                uow_factory.clone(),
                cascade.clone(),
            )),
            animal_service: Arc::new(AnimalService::new(
                animals.clone(),
                shelters.clone(),
                uow_factory.clone(),
                cascade.clone(),
            )),
            feedback_service: Arc::new(FeedbackService::new(
                feedback,
                shelters.clone(),
                uow_factory.clone(),
            )),
            adoption_service: Arc::new(AdoptionService::new(
                requests,
                animals.clone(),
                shelters.clone(),
                uow_factory.clone(),
                cascade,
            )),
            bookmark_service: Arc::new(BookmarkService::new(
                bookmarks,
                animals,
                shelters,
                uow_factory,
            )),
            db: Some(pool),
            shutdown,
        }
    }

    /// Wires all services over the in-process backend. Used by tests.
    pub fn in_memory(store: Arc<MemoryStore>, shutdown: CancellationToken) -> Self {
        let uow_factory = Arc::new(MemoryUnitOfWorkFactory::new(store.clone()));

        let cascade = Arc::new(CascadeDeleter::new(
            store.clone(),
            store.clone(),
            uow_factory.clone(),
        ));

        Self {
            shelter_service: Arc::new(ShelterService::new(
                store.clone(),
                uow_factory.clone(),
                cascade.clone(),
            )),
            animal_service: Arc::new(AnimalService::new(
                store.clone(),
                store.clone(),
                uow_factory.clone(),
                cascade.clone(),
            )),
            feedback_service: Arc::new(FeedbackService::new(
                store.clone(),
                store.clone(),
                uow_factory.clone(),
            )),
            adoption_service: Arc::new(AdoptionService::new(
                store.clone(),
                store.clone(),
                store.clone(),
                uow_factory.clone(),
                cascade,
            )),
            bookmark_service: Arc::new(BookmarkService::new(
                store.clone(),
                store.clone(),
                store,
                uow_factory,
            )),
            db: None,
            shutdown,
        }
    }
}
