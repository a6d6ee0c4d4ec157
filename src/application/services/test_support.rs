//! Shared fixtures for service unit tests: a unit of work that records
//! staged mutations instead of touching storage.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{Address, Animal, Shelter};
use crate::domain::repositories::ShelterDetail;
use crate::domain::unit_of_work::{Mutation, UnitOfWork, UnitOfWorkFactory};
use crate::error::AppError;

#[derive(Default)]
struct RecordingState {
    ops: Mutex<Vec<Mutation>>,
    committed: AtomicBool,
    discarded: AtomicBool,
    fail_commit: Mutex<Option<AppError>>,
}

/// Factory handing out units of work that all record into one shared
/// state, so tests can inspect what a service staged after the fact.
#[derive(Clone, Default)]
pub(crate) struct RecordingFactory {
    state: Arc<RecordingState>,
}

impl RecordingFactory {
    pub(crate) fn staged(&self) -> Vec<Mutation> {
        self.state.ops.lock().unwrap().clone()
    }

    pub(crate) fn committed(&self) -> bool {
        self.state.committed.load(Ordering::SeqCst)
    }

    pub(crate) fn discarded(&self) -> bool {
        self.state.discarded.load(Ordering::SeqCst)
    }

    /// Makes the next commit fail with `err` without applying anything.
    pub(crate) fn fail_next_commit(&self, err: AppError) {
        *self.state.fail_commit.lock().unwrap() = Some(err);
    }
}

impl UnitOfWorkFactory for RecordingFactory {
    fn begin(&self) -> Box<dyn UnitOfWork> {
        Box::new(RecordingUnitOfWork {
            state: self.state.clone(),
        })
    }
}

struct RecordingUnitOfWork {
    state: Arc<RecordingState>,
}

#[async_trait]
impl UnitOfWork for RecordingUnitOfWork {
    fn stage(&mut self, op: Mutation) {
        self.state.ops.lock().unwrap().push(op);
    }

    async fn commit(&mut self) -> Result<(), AppError> {
        if let Some(err) = self.state.fail_commit.lock().unwrap().take() {
            return Err(err);
        }
        self.state.committed.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn discard(&mut self) {
        self.state.ops.lock().unwrap().clear();
        self.state.discarded.store(true, Ordering::SeqCst);
    }
}

pub(crate) fn test_address() -> Address {
    Address::new(
        "Ukraine".to_string(),
        "Kyivska".to_string(),
        String::new(),
        "Kyiv".to_string(),
        "Khreshchatyk 1".to_string(),
    )
}

pub(crate) fn test_animal(shelter_id: Uuid, slug: &str) -> Animal {
    Animal::new(
        shelter_id,
        slug.to_string(),
        slug.to_string(),
        "dog".to_string(),
        "mixed".to_string(),
        Some(2),
        String::new(),
    )
}

/// A shelter with a hydrated address and `animal_count` attached animals.
pub(crate) fn test_shelter_detail(animal_count: usize) -> ShelterDetail {
    let address = test_address();
    let shelter = Shelter::new(
        "Happy Paws".to_string(),
        "happy-paws".to_string(),
        "A test shelter".to_string(),
        String::new(),
        Uuid::new_v4(),
        address.id,
    );

    let animals = (0..animal_count)
        .map(|i| test_animal(shelter.id, &format!("animal-{i}")))
        .collect();

    ShelterDetail {
        shelter,
        address: Some(address),
        animals,
    }
}
