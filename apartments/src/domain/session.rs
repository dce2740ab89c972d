//! Application state for the apartment screen.
//!
//! [`ApartmentSession`] owns everything the screen mutates: the record list,
//! the form, the busy flag and the selected chart. Each user action is one
//! method returning a typed result; the front end only renders.

use std::sync::Arc;

use tracing::{info, warn};

use super::apartment::{Apartment, ApartmentId};
use super::apartment_store::ApartmentStore;
use super::busy::{BusyFlag, BusyGuard};
use super::error::DomainError;
use super::form::FormController;
use super::notice::Notice;
use super::ports::{ApartmentRepository, ChartPresenter};
use super::statistics::{ChartKind, RentStatistics};

/// The single-screen session over one apartment repository.
#[derive(Debug)]
pub struct ApartmentSession<R> {
    store: ApartmentStore<R>,
    form: FormController,
    busy: BusyFlag,
    chart: ChartKind,
}

impl<R> ApartmentSession<R> {
    /// Start a session with an empty list and an empty creating form.
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            store: ApartmentStore::new(repository),
            form: FormController::new(),
            busy: BusyFlag::new(),
            chart: ChartKind::default(),
        }
    }

    /// Loaded records.
    pub fn records(&self) -> &[Apartment] {
        self.store.records()
    }

    /// Read access to the form.
    pub fn form(&self) -> &FormController {
        &self.form
    }

    /// Write access to the form fields.
    pub fn form_mut(&mut self) -> &mut FormController {
        &mut self.form
    }

    /// A handle on the busy flag for disabling mutating controls.
    pub fn busy_flag(&self) -> BusyFlag {
        self.busy.clone()
    }

    /// Whether an operation is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    /// Rent statistics over the loaded records.
    pub fn statistics(&self) -> RentStatistics {
        self.store.statistics()
    }

    /// Chart currently selected.
    pub fn chart_kind(&self) -> ChartKind {
        self.chart
    }

    /// Select a chart.
    pub fn set_chart_kind(&mut self, kind: ChartKind) {
        self.chart = kind;
    }

    /// Switch between the bar and pie charts.
    pub fn toggle_chart(&mut self) -> ChartKind {
        self.chart = self.chart.toggled();
        self.chart
    }

    /// Hand the selected chart's series to `presenter`.
    pub fn render_chart<P>(&self, presenter: &P)
    where
        P: ChartPresenter + ?Sized,
    {
        let stats = self.statistics();
        match self.chart {
            ChartKind::Bar => presenter.present_bar(&stats.bar_series()),
            ChartKind::Pie => presenter.present_pie(&stats.pie_series()),
        }
    }

    /// Load a record into the form for editing.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UnknownApartment`] if `id` is not loaded.
    pub fn begin_edit(&mut self, id: &ApartmentId) -> Result<(), DomainError> {
        let apartment = self
            .store
            .find(id)
            .ok_or_else(|| DomainError::UnknownApartment(id.clone()))?;
        self.form.begin_edit(apartment);
        Ok(())
    }

    /// Abandon the current edit.
    pub fn cancel_edit(&mut self) {
        self.form.cancel();
    }

    fn acquire(&self) -> Result<BusyGuard, DomainError> {
        self.busy.try_acquire().ok_or_else(|| {
            warn!("apartment operation rejected while another is in flight");
            DomainError::Busy
        })
    }
}

impl<R> ApartmentSession<R>
where
    R: ApartmentRepository,
{
    /// Fetch the whole collection, replacing the loaded list.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Busy`] while another operation runs, or the
    /// repository failure; the previous list is kept.
    pub async fn load(&mut self) -> Result<usize, DomainError> {
        let _guard = self.acquire()?;
        self.store.load().await
    }

    /// Submit the form: create or update depending on its mode.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Busy`] while another operation runs,
    /// [`DomainError::Validation`] for an invalid draft, or the repository
    /// failure. The form is only cleared on success.
    pub async fn submit(&mut self) -> Result<Notice, DomainError> {
        let _guard = self.acquire()?;
        let notice = Notice::for_submission(self.form.is_editing());
        self.form.submit(&mut self.store).await?;
        Ok(notice)
    }

    /// Delete a record.
    ///
    /// If the record is the one being edited, the form is cleared too.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Busy`] while another operation runs, or the
    /// repository failure; the record stays listed.
    pub async fn remove(&mut self, id: &ApartmentId) -> Result<Notice, DomainError> {
        let _guard = self.acquire()?;
        self.store.remove(id).await?;
        if self.form.edit_target() == Some(id) {
            self.form.cancel();
        }
        info!(%id, "apartment removed");
        Ok(Notice::Removed)
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
