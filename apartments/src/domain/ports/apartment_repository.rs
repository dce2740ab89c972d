//! Port for the remote document store holding apartment records.

use async_trait::async_trait;

use crate::domain::{Apartment, ApartmentFields, ApartmentId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by apartment repository adapters.
    pub enum ApartmentRepositoryError {
        /// The store could not be reached or refused the credentials.
        Connection {
            /// Transport or authentication failure detail.
            message: String,
        } => "apartment repository connection failed: {message}",
        /// No document exists with the given identifier.
        NotFound {
            /// The identifier that was looked up.
            id: String,
        } => "apartment {id} not found",
        /// The store rejected or failed the request.
        Query {
            /// Failure detail reported by the store.
            message: String,
        } => "apartment repository query failed: {message}",
        /// A stored document could not be read as an apartment.
        Decode {
            /// Decoding failure detail.
            message: String,
        } => "apartment repository returned an unreadable document: {message}",
    }
}

/// Port for listing and mutating the apartment collection.
///
/// Identifiers are assigned by the store on [`ApartmentRepository::create`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApartmentRepository: Send + Sync {
    /// Read every record in the collection.
    async fn list(&self) -> Result<Vec<Apartment>, ApartmentRepositoryError>;

    /// Persist a new record and return its assigned identifier.
    async fn create(&self, fields: &ApartmentFields)
    -> Result<ApartmentId, ApartmentRepositoryError>;

    /// Overwrite the fields of an existing record.
    ///
    /// Fails with [`ApartmentRepositoryError::NotFound`] when `id` is unknown.
    async fn update(
        &self,
        id: &ApartmentId,
        fields: &ApartmentFields,
    ) -> Result<(), ApartmentRepositoryError>;

    /// Delete an existing record.
    ///
    /// Fails with [`ApartmentRepositoryError::NotFound`] when `id` is unknown.
    async fn delete(&self, id: &ApartmentId) -> Result<(), ApartmentRepositoryError>;
}
