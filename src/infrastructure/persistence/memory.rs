//! In-process persistence backend.
//!
//! Implements every repository trait and the unit-of-work contract over a
//! mutex-guarded table set. Commit applies the staged batch to a copy of
//! the tables and swaps it in, so a failing batch — including one failed
//! through [`MemoryStore::fail_next_commit`] — leaves the visible state
//! untouched. Backs the integration tests; the semantics mirror the
//! PostgreSQL backend, including slug uniqueness and the shelter version
//! guard.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use crate::domain::entities::{
    Address, AdoptionRequest, Animal, AnimalBookmark, AnimalPhoto, Shelter, ShelterBookmark,
    ShelterFeedback,
};
use crate::domain::repositories::{
    AdoptionRequestRepository, AnimalRepository, BookmarkRepository, FeedbackRepository,
    ShelterDetail, ShelterInclude, ShelterRepository,
};
use crate::domain::unit_of_work::{Mutation, UnitOfWork, UnitOfWorkFactory};
use crate::error::AppError;

#[derive(Debug, Clone, Default)]
struct Tables {
    addresses: HashMap<Uuid, Address>,
    shelters: HashMap<Uuid, Shelter>,
    animals: HashMap<Uuid, Animal>,
    photos: HashMap<Uuid, AnimalPhoto>,
    feedback: HashMap<Uuid, ShelterFeedback>,
    requests: HashMap<Uuid, AdoptionRequest>,
    animal_bookmarks: HashMap<Uuid, AnimalBookmark>,
    shelter_bookmarks: HashMap<Uuid, ShelterBookmark>,
}

/// Shared in-memory table set.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    next_commit_error: Mutex<Option<AppError>>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Forces the next unit-of-work commit to fail with `err` after
    /// staging, without applying anything. Simulates a commit fault for
    /// atomicity tests.
    pub fn fail_next_commit(&self, err: AppError) {
        *self.next_commit_error.lock().unwrap() = Some(err);
    }

    /// True when an address row with this id exists.
    pub fn address_exists(&self, id: Uuid) -> bool {
        self.tables.lock().unwrap().addresses.contains_key(&id)
    }

    /// True when any photo row references this animal.
    pub fn has_photos_for(&self, animal_id: Uuid) -> bool {
        self.tables
            .lock()
            .unwrap()
            .photos
            .values()
            .any(|p| p.animal_id == animal_id)
    }
}

fn sorted_newest_first<T: Clone>(
    items: impl Iterator<Item = T>,
    key: impl Fn(&T) -> chrono::DateTime<chrono::Utc>,
) -> Vec<T> {
    let mut out: Vec<T> = items.collect();
    out.sort_by_key(|item| std::cmp::Reverse(key(item)));
    out
}

#[async_trait]
impl ShelterRepository for MemoryStore {
    async fn find_by_id(
        &self,
        id: Uuid,
        include: ShelterInclude,
    ) -> Result<Option<ShelterDetail>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.shelters.get(&id).map(|s| hydrate(&tables, s, include)))
    }

    async fn find_by_slug(
        &self,
        slug: &str,
        include: ShelterInclude,
    ) -> Result<Option<ShelterDetail>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .shelters
            .values()
            .find(|s| s.slug == slug)
            .map(|s| hydrate(&tables, s, include)))
    }

    async fn list(&self) -> Result<Vec<Shelter>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(sorted_newest_first(
            tables.shelters.values().cloned(),
            |s| s.created_at,
        ))
    }

    async fn slug_exists(&self, slug: &str, exclude_id: Option<Uuid>) -> Result<bool, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .shelters
            .values()
            .any(|s| s.slug == slug && Some(s.id) != exclude_id))
    }
}

fn hydrate(tables: &Tables, shelter: &Shelter, include: ShelterInclude) -> ShelterDetail {
    let address = include
        .address
        .then(|| tables.addresses.get(&shelter.address_id).cloned())
        .flatten();

    let animals = if include.animals {
        let mut animals: Vec<Animal> = tables
            .animals
            .values()
            .filter(|a| a.shelter_id == shelter.id)
            .cloned()
            .collect();
        animals.sort_by_key(|a| a.created_at);
        animals
    } else {
        Vec::new()
    };

    ShelterDetail {
        shelter: shelter.clone(),
        address,
        animals,
    }
}

#[async_trait]
impl AnimalRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Animal>, AppError> {
        Ok(self.tables.lock().unwrap().animals.get(&id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Animal>, AppError> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .animals
            .values()
            .find(|a| a.slug == slug)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Animal>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(sorted_newest_first(
            tables.animals.values().cloned(),
            |a| a.created_at,
        ))
    }

    async fn list_by_shelter(&self, shelter_id: Uuid) -> Result<Vec<Animal>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(sorted_newest_first(
            tables
                .animals
                .values()
                .filter(|a| a.shelter_id == shelter_id)
                .cloned(),
            |a| a.created_at,
        ))
    }

    async fn list_photos(&self, animal_id: Uuid) -> Result<Vec<AnimalPhoto>, AppError> {
        let tables = self.tables.lock().unwrap();
        let mut photos: Vec<AnimalPhoto> = tables
            .photos
            .values()
            .filter(|p| p.animal_id == animal_id)
            .cloned()
            .collect();
        photos.sort_by_key(|p| p.created_at);
        Ok(photos)
    }

    async fn slug_exists(&self, slug: &str, exclude_id: Option<Uuid>) -> Result<bool, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .animals
            .values()
            .any(|a| a.slug == slug && Some(a.id) != exclude_id))
    }
}

#[async_trait]
impl FeedbackRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ShelterFeedback>, AppError> {
        Ok(self.tables.lock().unwrap().feedback.get(&id).cloned())
    }

    async fn list_by_shelter(&self, shelter_id: Uuid) -> Result<Vec<ShelterFeedback>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(sorted_newest_first(
            tables
                .feedback
                .values()
                .filter(|f| f.shelter_id == shelter_id)
                .cloned(),
            |f| f.created_at,
        ))
    }

    async fn exists_for_user(&self, shelter_id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .feedback
            .values()
            .any(|f| f.shelter_id == shelter_id && f.user_id == user_id))
    }
}

#[async_trait]
impl AdoptionRequestRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AdoptionRequest>, AppError> {
        Ok(self.tables.lock().unwrap().requests.get(&id).cloned())
    }

    async fn list_by_animal(&self, animal_id: Uuid) -> Result<Vec<AdoptionRequest>, AppError> {
        let tables = self.tables.lock().unwrap();
        let mut requests: Vec<AdoptionRequest> = tables
            .requests
            .values()
            .filter(|r| r.animal_id == animal_id)
            .cloned()
            .collect();
        requests.sort_by_key(|r| r.created_at);
        Ok(requests)
    }

    async fn list_by_shelter(&self, shelter_id: Uuid) -> Result<Vec<AdoptionRequest>, AppError> {
        let tables = self.tables.lock().unwrap();
        let animal_ids: Vec<Uuid> = tables
            .animals
            .values()
            .filter(|a| a.shelter_id == shelter_id)
            .map(|a| a.id)
            .collect();
        let mut requests: Vec<AdoptionRequest> = tables
            .requests
            .values()
            .filter(|r| animal_ids.contains(&r.animal_id))
            .cloned()
            .collect();
        requests.sort_by_key(|r| r.created_at);
        Ok(requests)
    }
}

#[async_trait]
impl BookmarkRepository for MemoryStore {
    async fn find_animal_bookmark(
        &self,
        animal_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<AnimalBookmark>, AppError> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .animal_bookmarks
            .values()
            .find(|b| b.animal_id == animal_id && b.user_id == user_id)
            .cloned())
    }

    async fn find_shelter_bookmark(
        &self,
        shelter_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<ShelterBookmark>, AppError> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .shelter_bookmarks
            .values()
            .find(|b| b.shelter_id == shelter_id && b.user_id == user_id)
            .cloned())
    }

    async fn list_animal_bookmarks(&self, user_id: Uuid) -> Result<Vec<AnimalBookmark>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(sorted_newest_first(
            tables
                .animal_bookmarks
                .values()
                .filter(|b| b.user_id == user_id)
                .cloned(),
            |b| b.created_at,
        ))
    }

    async fn list_shelter_bookmarks(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ShelterBookmark>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(sorted_newest_first(
            tables
                .shelter_bookmarks
                .values()
                .filter(|b| b.user_id == user_id)
                .cloned(),
            |b| b.created_at,
        ))
    }
}

/// Opens in-memory units of work over one shared store.
pub struct MemoryUnitOfWorkFactory {
    store: Arc<MemoryStore>,
}

impl MemoryUnitOfWorkFactory {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

impl UnitOfWorkFactory for MemoryUnitOfWorkFactory {
    fn begin(&self) -> Box<dyn UnitOfWork> {
        Box::new(MemoryUnitOfWork {
            store: self.store.clone(),
            ops: Vec::new(),
        })
    }
}

struct MemoryUnitOfWork {
    store: Arc<MemoryStore>,
    ops: Vec<Mutation>,
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork {
    fn stage(&mut self, op: Mutation) {
        self.ops.push(op);
    }

    async fn commit(&mut self) -> Result<(), AppError> {
        let ops = std::mem::take(&mut self.ops);

        if let Some(err) = self.store.next_commit_error.lock().unwrap().take() {
            return Err(err);
        }

        let mut tables = self.store.tables.lock().unwrap();

        // Apply against a copy; swap in only when the whole batch passed.
        let mut staged = tables.clone();
        for op in &ops {
            apply(&mut staged, op)?;
        }
        *tables = staged;

        Ok(())
    }

    fn discard(&mut self) {
        self.ops.clear();
    }
}

fn apply(tables: &mut Tables, op: &Mutation) -> Result<(), AppError> {
    match op {
        Mutation::InsertAddress(address) => {
            tables.addresses.insert(address.id, address.clone());
        }
        Mutation::DeleteAddress(id) => {
            tables.addresses.remove(id);
        }

        Mutation::InsertShelter(shelter) => {
            if tables
                .shelters
                .values()
                .any(|s| s.slug == shelter.slug && s.id != shelter.id)
            {
                return Err(slug_conflict(&shelter.slug));
            }
            tables.shelters.insert(shelter.id, shelter.clone());
        }
        Mutation::UpdateShelter(shelter) => {
            let Some(stored) = tables.shelters.get(&shelter.id) else {
                return Ok(());
            };
            if stored.version != shelter.version {
                return Err(AppError::conflict(
                    "Shelter was modified concurrently",
                    json!({ "shelter_id": shelter.id, "version": shelter.version }),
                ));
            }
            if tables
                .shelters
                .values()
                .any(|s| s.slug == shelter.slug && s.id != shelter.id)
            {
                return Err(slug_conflict(&shelter.slug));
            }
            let mut updated = shelter.clone();
            updated.version += 1;
            tables.shelters.insert(updated.id, updated);
        }
        Mutation::DeleteShelter(id) => {
            tables.shelters.remove(id);
        }

        Mutation::InsertAnimal(animal) => {
            if tables
                .animals
                .values()
                .any(|a| a.slug == animal.slug && a.id != animal.id)
            {
                return Err(slug_conflict(&animal.slug));
            }
            tables.animals.insert(animal.id, animal.clone());
        }
        Mutation::UpdateAnimal(animal) => {
            if tables.animals.contains_key(&animal.id) {
                if tables
                    .animals
                    .values()
                    .any(|a| a.slug == animal.slug && a.id != animal.id)
                {
                    return Err(slug_conflict(&animal.slug));
                }
                tables.animals.insert(animal.id, animal.clone());
            }
        }
        Mutation::DeleteAnimal(id) => {
            tables.animals.remove(id);
        }

        Mutation::InsertAnimalPhoto(photo) => {
            tables.photos.insert(photo.id, photo.clone());
        }
        Mutation::DeleteAnimalPhotosByAnimal(animal_id) => {
            tables.photos.retain(|_, p| p.animal_id != *animal_id);
        }

        Mutation::InsertFeedback(feedback) => {
            if tables
                .feedback
                .values()
                .any(|f| f.shelter_id == feedback.shelter_id && f.user_id == feedback.user_id)
            {
                return Err(AppError::conflict(
                    "Unique constraint violation",
                    json!({ "constraint": "shelter_feedback_user_shelter_key" }),
                ));
            }
            tables.feedback.insert(feedback.id, feedback.clone());
        }
        Mutation::DeleteFeedback(id) => {
            tables.feedback.remove(id);
        }
        Mutation::DeleteFeedbackByShelter(shelter_id) => {
            tables.feedback.retain(|_, f| f.shelter_id != *shelter_id);
        }

        Mutation::InsertAdoptionRequest(request) => {
            tables.requests.insert(request.id, request.clone());
        }
        Mutation::DeleteAdoptionRequest(id) => {
            tables.requests.remove(id);
        }
        Mutation::DeleteAdoptionRequestsByAnimal(animal_id) => {
            tables.requests.retain(|_, r| r.animal_id != *animal_id);
        }

        Mutation::InsertAnimalBookmark(bookmark) => {
            if tables
                .animal_bookmarks
                .values()
                .any(|b| b.animal_id == bookmark.animal_id && b.user_id == bookmark.user_id)
            {
                return Err(AppError::conflict(
                    "Unique constraint violation",
                    json!({ "constraint": "animal_bookmarks_user_animal_key" }),
                ));
            }
            tables.animal_bookmarks.insert(bookmark.id, bookmark.clone());
        }
        Mutation::DeleteAnimalBookmark(id) => {
            tables.animal_bookmarks.remove(id);
        }
        Mutation::DeleteAnimalBookmarksByAnimal(animal_id) => {
            tables
                .animal_bookmarks
                .retain(|_, b| b.animal_id != *animal_id);
        }

        Mutation::InsertShelterBookmark(bookmark) => {
            if tables
                .shelter_bookmarks
                .values()
                .any(|b| b.shelter_id == bookmark.shelter_id && b.user_id == bookmark.user_id)
            {
                return Err(AppError::conflict(
                    "Unique constraint violation",
                    json!({ "constraint": "shelter_bookmarks_user_shelter_key" }),
                ));
            }
            tables
                .shelter_bookmarks
                .insert(bookmark.id, bookmark.clone());
        }
        Mutation::DeleteShelterBookmark(id) => {
            tables.shelter_bookmarks.remove(id);
        }
        Mutation::DeleteShelterBookmarksByShelter(shelter_id) => {
            tables
                .shelter_bookmarks
                .retain(|_, b| b.shelter_id != *shelter_id);
        }
    }

    Ok(())
}

fn slug_conflict(slug: &str) -> AppError {
    AppError::conflict("Slug already taken", json!({ "slug": slug }))
}
