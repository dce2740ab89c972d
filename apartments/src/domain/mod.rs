//! Domain primitives, services and ports.
//!
//! Purpose: model apartment records and the single-screen session that edits
//! them, independent of any storage or presentation technology. Adapters
//! plug in through [`ports`].
//!
//! Public surface:
//! - Apartment, ApartmentFields, ApartmentId - persisted records.
//! - Rent, RentLevel - validated rent and its `bas`/`moyen`/`élevé` class.
//! - ApartmentDraft - unvalidated form input.
//! - ApartmentStore - session list kept in step with the repository.
//! - FormController - create/edit form state machine.
//! - RentStatistics, BarSeries, PieSlice, ChartKind - chart inputs.
//! - ApartmentSession - application state tying the above together.
//! - DomainError, ErrorCode, Notice - failure taxonomy and user messages.

mod apartment;
mod apartment_store;
mod busy;
mod draft;
mod error;
mod form;
mod notice;
pub mod ports;
mod rent;
mod session;
mod statistics;

pub use self::apartment::{Apartment, ApartmentFields, ApartmentId, ApartmentIdValidationError};
pub use self::apartment_store::ApartmentStore;
pub use self::busy::{BusyFlag, BusyGuard};
pub use self::draft::{ApartmentDraft, DraftField, DraftValidationError};
pub use self::error::{DomainError, ErrorCode};
pub use self::form::{FormController, FormMode};
pub use self::notice::Notice;
pub use self::rent::{
    HIGH_RENT_FLOOR, LOW_RENT_CEILING, Rent, RentLevel, RentValidationError, UnknownRentLevel,
};
pub use self::session::ApartmentSession;
pub use self::statistics::{BarSeries, ChartKind, PieSlice, RentStatistics, SERIES_LABELS};
