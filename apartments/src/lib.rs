//! Rental apartment records with rent-level classification and rent
//! statistics.
//!
//! The crate is laid out as a small hexagon: [`domain`] holds the records,
//! the session state and the ports; [`outbound`] implements the repository
//! port; [`config`] loads adapter settings.

pub mod config;
pub mod domain;
pub mod outbound;
