//! Create/edit form state machine.
//!
//! The controller is either creating a new record or editing an existing one.
//! It has no terminal state: every successful submission, and every cancel,
//! returns it to an empty creating form.

use tracing::info;

use super::apartment::{Apartment, ApartmentId};
use super::apartment_store::ApartmentStore;
use super::draft::ApartmentDraft;
use super::error::DomainError;
use super::notice::Notice;
use super::ports::ApartmentRepository;

/// What a submission will do.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormMode {
    /// Submitting creates a new record.
    #[default]
    Creating,
    /// Submitting rewrites the record with this identifier.
    Editing(ApartmentId),
}

/// Owner of the draft and the current edit target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormController {
    draft: ApartmentDraft,
    mode: FormMode,
}

impl FormController {
    /// An empty form in [`FormMode::Creating`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mode.
    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    /// Identifier being edited, if any.
    pub fn edit_target(&self) -> Option<&ApartmentId> {
        match &self.mode {
            FormMode::Creating => None,
            FormMode::Editing(id) => Some(id),
        }
    }

    /// Whether a record is being edited.
    pub fn is_editing(&self) -> bool {
        self.edit_target().is_some()
    }

    /// Field values as currently typed.
    pub fn draft(&self) -> &ApartmentDraft {
        &self.draft
    }

    /// Replace the apartment number text.
    pub fn set_num_app(&mut self, value: impl Into<String>) {
        self.draft.num_app = value.into();
    }

    /// Replace the description text.
    pub fn set_design(&mut self, value: impl Into<String>) {
        self.draft.design = value.into();
    }

    /// Replace the rent text.
    pub fn set_loyer(&mut self, value: impl Into<String>) {
        self.draft.loyer = value.into();
    }

    /// Start editing `apartment`, replacing any draft in progress.
    pub fn begin_edit(&mut self, apartment: &Apartment) {
        self.draft = ApartmentDraft::from_apartment(apartment);
        self.mode = FormMode::Editing(apartment.id().clone());
    }

    /// Drop the draft and return to an empty creating form.
    pub fn cancel(&mut self) {
        *self = Self::default();
    }

    /// Validate the draft and write it through `store`.
    ///
    /// Creates a record in [`FormMode::Creating`] and updates the edit target
    /// in [`FormMode::Editing`]. On success the form is cleared back to
    /// creating; on failure it is left untouched so the user can retry.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] before any repository call when the
    /// draft is invalid, or the store's error when persistence fails.
    pub async fn submit<R>(&mut self, store: &mut ApartmentStore<R>) -> Result<Apartment, DomainError>
    where
        R: ApartmentRepository,
    {
        self.draft.validate()?;

        let apartment = match &self.mode {
            FormMode::Creating => store.create(&self.draft).await?,
            FormMode::Editing(id) => store.update(id, &self.draft).await?,
        };
        info!(
            id = %apartment.id(),
            notice = %Notice::for_submission(self.is_editing()),
            "apartment form submitted"
        );

        self.cancel();
        Ok(apartment)
    }
}

#[cfg(test)]
mod tests {
    //! Form transitions.

    use std::sync::Arc;

    use rstest::rstest;

    use super::*;
    use crate::domain::ports::{ApartmentRepositoryError, MockApartmentRepository};
    use crate::domain::{ApartmentFields, Rent, RentLevel};

    fn apartment(raw_id: &str, loyer: f64) -> Apartment {
        Apartment::new(
            ApartmentId::new(raw_id).expect("valid id"),
            ApartmentFields::new("A1", "Studio", Rent::new(loyer).expect("valid rent")),
        )
    }

    fn filled_form() -> FormController {
        let mut form = FormController::new();
        form.set_num_app("A1");
        form.set_design("Studio");
        form.set_loyer("800");
        form
    }

    #[rstest]
    fn begin_edit_loads_fields_and_target() {
        let mut form = FormController::new();

        form.begin_edit(&apartment("x", 800.0));

        assert_eq!(form.draft(), &ApartmentDraft::new("A1", "Studio", "800"));
        assert_eq!(form.edit_target().map(ToString::to_string), Some("x".to_owned()));
    }

    #[rstest]
    fn begin_edit_while_editing_switches_target() {
        let mut form = FormController::new();
        form.begin_edit(&apartment("x", 800.0));

        form.begin_edit(&apartment("y", 6000.0));

        assert_eq!(form.edit_target().map(ToString::to_string), Some("y".to_owned()));
        assert_eq!(form.draft().loyer, "6000");
    }

    #[rstest]
    fn cancel_returns_to_empty_creating_form() {
        let mut form = filled_form();
        form.begin_edit(&apartment("x", 800.0));

        form.cancel();

        assert_eq!(form, FormController::new());
        assert_eq!(form.mode(), &FormMode::Creating);
    }

    #[rstest]
    #[tokio::test]
    async fn submit_in_creating_mode_creates_and_clears() {
        let mut repo = MockApartmentRepository::new();
        repo.expect_create()
            .times(1)
            .return_once(|_| Ok(ApartmentId::new("new").expect("valid id")));
        repo.expect_update().times(0);
        let mut store = ApartmentStore::new(Arc::new(repo));
        let mut form = filled_form();

        let created = form.submit(&mut store).await.expect("submit succeeds");

        assert_eq!(created.fields().obs(), RentLevel::Bas);
        assert_eq!(form, FormController::new());
    }

    #[rstest]
    #[tokio::test]
    async fn submit_in_editing_mode_updates_target_and_clears() {
        let mut repo = MockApartmentRepository::new();
        repo.expect_create().times(0);
        repo.expect_update()
            .withf(|id, fields| id.to_string() == "x" && fields.obs() == RentLevel::Eleve)
            .times(1)
            .return_once(|_, _| Ok(()));
        let mut store = ApartmentStore::new(Arc::new(repo));
        let mut form = FormController::new();
        form.begin_edit(&apartment("x", 800.0));
        form.set_loyer("6000");

        let updated = form.submit(&mut store).await.expect("submit succeeds");

        assert_eq!(updated.id().to_string(), "x");
        assert!(!form.is_editing());
        assert_eq!(form.draft(), &ApartmentDraft::default());
    }

    #[rstest]
    #[case("", "Studio", "800")]
    #[case("A1", " ", "800")]
    #[case("A1", "Studio", "huit cents")]
    #[tokio::test]
    async fn invalid_submit_makes_no_call_and_keeps_form(
        #[case] num_app: &str,
        #[case] design: &str,
        #[case] loyer: &str,
    ) {
        let mut repo = MockApartmentRepository::new();
        repo.expect_create().times(0);
        repo.expect_update().times(0);
        let mut store = ApartmentStore::new(Arc::new(repo));
        let mut form = FormController::new();
        form.set_num_app(num_app);
        form.set_design(design);
        form.set_loyer(loyer);
        let before = form.clone();

        let error = form.submit(&mut store).await.expect_err("invalid draft");

        assert!(matches!(error, DomainError::Validation(_)));
        assert_eq!(form, before);
    }

    #[rstest]
    #[tokio::test]
    async fn failed_persistence_keeps_draft_for_retry() {
        let mut repo = MockApartmentRepository::new();
        repo.expect_create()
            .times(1)
            .return_once(|_| Err(ApartmentRepositoryError::connection("offline")));
        let mut store = ApartmentStore::new(Arc::new(repo));
        let mut form = filled_form();

        form.submit(&mut store).await.expect_err("create fails");

        assert_eq!(form, filled_form());
    }
}
