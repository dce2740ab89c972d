//! Firestore outbound adapter.
//!
//! This module provides a thin REST implementation of the
//! `ApartmentRepository` port against a single Firestore collection.

mod dto;
mod http_repository;

pub use http_repository::{FirestoreApartmentRepository, FirestoreSettings, FirestoreSetupError};
