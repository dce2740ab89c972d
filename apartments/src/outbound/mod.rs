//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **firestore**: Firestore REST document store, the production backend
//! - **memory**: process-local store for trials and tests
//!
//! Adapters are thin translators between domain types and storage
//! representations. They contain no business logic; in particular they never
//! classify rent except to fill in a missing stored `obs`.

pub mod firestore;
pub mod memory;
