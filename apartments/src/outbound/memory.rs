//! Process-local apartment repository.
//!
//! Backs the CLI's `memory` backend and behaviour tests. Documents live in
//! insertion order and ids are random UUIDs, mirroring the opaque ids a
//! document store hands out.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{ApartmentRepository, ApartmentRepositoryError};
use crate::domain::{Apartment, ApartmentFields, ApartmentId};

/// Apartment repository holding documents in memory.
#[derive(Debug, Default)]
pub struct InMemoryApartmentRepository {
    documents: Mutex<Vec<Apartment>>,
}

impl InMemoryApartmentRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with `records`.
    pub fn with_records(records: impl IntoIterator<Item = Apartment>) -> Self {
        Self {
            documents: Mutex::new(records.into_iter().collect()),
        }
    }

    /// Copy of the stored documents, for inspection.
    ///
    /// # Errors
    ///
    /// Returns [`ApartmentRepositoryError::Connection`] if the lock is
    /// poisoned.
    pub fn snapshot(&self) -> Result<Vec<Apartment>, ApartmentRepositoryError> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Apartment>>, ApartmentRepositoryError> {
        self.documents
            .lock()
            .map_err(|_| ApartmentRepositoryError::connection("in-memory store lock poisoned"))
    }
}

fn position(documents: &[Apartment], id: &ApartmentId) -> Result<usize, ApartmentRepositoryError> {
    documents
        .iter()
        .position(|apartment| apartment.id() == id)
        .ok_or_else(|| ApartmentRepositoryError::not_found(id.to_string()))
}

#[async_trait]
impl ApartmentRepository for InMemoryApartmentRepository {
    async fn list(&self) -> Result<Vec<Apartment>, ApartmentRepositoryError> {
        self.snapshot()
    }

    async fn create(
        &self,
        fields: &ApartmentFields,
    ) -> Result<ApartmentId, ApartmentRepositoryError> {
        let id = ApartmentId::new(Uuid::new_v4().simple().to_string())
            .map_err(|error| ApartmentRepositoryError::query(error.to_string()))?;
        self.lock()?
            .push(Apartment::new(id.clone(), fields.clone()));
        Ok(id)
    }

    async fn update(
        &self,
        id: &ApartmentId,
        fields: &ApartmentFields,
    ) -> Result<(), ApartmentRepositoryError> {
        let mut documents = self.lock()?;
        let index = position(&documents, id)?;
        if let Some(slot) = documents.get_mut(index) {
            *slot = Apartment::new(id.clone(), fields.clone());
        }
        Ok(())
    }

    async fn delete(&self, id: &ApartmentId) -> Result<(), ApartmentRepositoryError> {
        let mut documents = self.lock()?;
        let index = position(&documents, id)?;
        documents.remove(index);
        Ok(())
    }
}
