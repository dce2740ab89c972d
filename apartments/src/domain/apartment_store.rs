//! In-memory view of the apartment collection for one session.
//!
//! The list is replaced wholesale on [`ApartmentStore::load`] and patched
//! after each mutation the repository confirms. Nothing is applied before the
//! repository answers, so a failed call leaves the list exactly as it was.

use std::sync::Arc;

use tracing::{debug, warn};

use super::apartment::{Apartment, ApartmentId};
use super::draft::ApartmentDraft;
use super::error::DomainError;
use super::ports::ApartmentRepository;
use super::statistics::RentStatistics;

/// Session-local list of apartments kept in step with the repository.
#[derive(Debug)]
pub struct ApartmentStore<R> {
    repository: Arc<R>,
    records: Vec<Apartment>,
}

impl<R> ApartmentStore<R> {
    /// Create an empty store over the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            records: Vec::new(),
        }
    }

    /// Records in load order, followed by records created this session.
    pub fn records(&self) -> &[Apartment] {
        &self.records
    }

    /// Look up a loaded record.
    pub fn find(&self, id: &ApartmentId) -> Option<&Apartment> {
        self.records.iter().find(|apartment| apartment.id() == id)
    }

    /// Number of loaded records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no records are loaded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rent statistics over the current list.
    pub fn statistics(&self) -> RentStatistics {
        RentStatistics::aggregate(&self.records)
    }
}

impl<R> ApartmentStore<R>
where
    R: ApartmentRepository,
{
    /// Replace the list with the repository's full collection.
    ///
    /// Returns the number of records loaded.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Repository`] if the listing fails; the previous
    /// list is kept.
    pub async fn load(&mut self) -> Result<usize, DomainError> {
        let records = self.repository.list().await.inspect_err(|error| {
            warn!(%error, "loading apartments failed");
        })?;
        debug!(count = records.len(), "apartments loaded");
        self.records = records;
        Ok(self.records.len())
    }

    /// Validate and persist a new record, then append it.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] without contacting the repository
    /// if the draft is invalid, or [`DomainError::Repository`] if the create
    /// call fails.
    pub async fn create(&mut self, draft: &ApartmentDraft) -> Result<Apartment, DomainError> {
        let fields = draft.validate()?;
        let id = self
            .repository
            .create(&fields)
            .await
            .inspect_err(|error| warn!(%error, "creating apartment failed"))?;
        debug!(%id, obs = %fields.obs(), "apartment created");

        let apartment = Apartment::new(id, fields);
        self.records.push(apartment.clone());
        Ok(apartment)
    }

    /// Validate and rewrite an existing record, then replace it in the list.
    ///
    /// `obs` is recomputed from the new rent.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] without contacting the repository
    /// if the draft is invalid, or [`DomainError::Repository`] if the update
    /// call fails.
    pub async fn update(
        &mut self,
        id: &ApartmentId,
        draft: &ApartmentDraft,
    ) -> Result<Apartment, DomainError> {
        let fields = draft.validate()?;
        self.repository
            .update(id, &fields)
            .await
            .inspect_err(|error| warn!(%id, %error, "updating apartment failed"))?;
        debug!(%id, obs = %fields.obs(), "apartment updated");

        let apartment = Apartment::new(id.clone(), fields);
        match self.records.iter_mut().find(|record| record.id() == id) {
            Some(record) => *record = apartment.clone(),
            None => warn!(%id, "updated apartment is not in the loaded list"),
        }
        Ok(apartment)
    }

    /// Delete a record, then drop it from the list.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Repository`] if the delete call fails,
    /// including when the identifier is unknown to the repository.
    pub async fn remove(&mut self, id: &ApartmentId) -> Result<(), DomainError> {
        self.repository
            .delete(id)
            .await
            .inspect_err(|error| warn!(%id, %error, "deleting apartment failed"))?;
        debug!(%id, "apartment deleted");

        self.records.retain(|record| record.id() != id);
        Ok(())
    }
}

#[cfg(test)]
#[path = "apartment_store_tests.rs"]
mod tests;
