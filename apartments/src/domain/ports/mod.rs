//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod apartment_repository;
mod chart_presenter;

#[cfg(test)]
pub use apartment_repository::MockApartmentRepository;
pub use apartment_repository::{ApartmentRepository, ApartmentRepositoryError};
#[cfg(test)]
pub use chart_presenter::MockChartPresenter;
pub use chart_presenter::ChartPresenter;
