//! User-facing outcome messages.

use std::fmt;

use serde::Serialize;

use super::draft::DraftValidationError;
use super::error::DomainError;

/// Message shown to the user after an action completes or fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "message")]
pub enum Notice {
    /// A new record was stored.
    Created,
    /// An existing record was rewritten.
    Updated,
    /// A record was deleted.
    Removed,
    /// The action failed; carries the text to show.
    Failed(String),
}

impl Notice {
    /// Success notice for a form submission.
    pub fn for_submission(was_editing: bool) -> Self {
        if was_editing {
            Self::Updated
        } else {
            Self::Created
        }
    }

    /// Failure notice for any domain error.
    ///
    /// # Examples
    /// ```
    /// use apartments::domain::{DomainError, Notice};
    ///
    /// let notice = Notice::from_error(&DomainError::Busy);
    /// assert!(notice.to_string().contains("en cours"));
    /// ```
    pub fn from_error(error: &DomainError) -> Self {
        let message = match error {
            DomainError::Validation(DraftValidationError::EmptyField { .. }) => {
                "Veuillez remplir tous les champs".to_owned()
            }
            DomainError::Validation(DraftValidationError::RentNotNumeric { .. }) => {
                "Le loyer doit être un nombre".to_owned()
            }
            DomainError::Validation(DraftValidationError::InvalidRent(_)) => {
                "Le loyer doit être un nombre positif".to_owned()
            }
            DomainError::Busy => "Une opération est déjà en cours".to_owned(),
            DomainError::Repository(_) | DomainError::UnknownApartment(_) => {
                format!("Erreur: {error}")
            }
        };
        Self::Failed(message)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => f.write_str("Appartement ajouté avec succès!"),
            Self::Updated => f.write_str("Appartement modifié avec succès!"),
            Self::Removed => f.write_str("Appartement supprimé avec succès!"),
            Self::Failed(message) => f.write_str(message),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Notice wording.

    use rstest::rstest;

    use super::*;
    use crate::domain::DraftField;
    use crate::domain::ports::ApartmentRepositoryError;

    #[rstest]
    #[case(false, "Appartement ajouté avec succès!")]
    #[case(true, "Appartement modifié avec succès!")]
    fn submission_notice_depends_on_mode(#[case] editing: bool, #[case] expected: &str) {
        assert_eq!(Notice::for_submission(editing).to_string(), expected);
    }

    #[rstest]
    fn blank_field_asks_to_fill_everything() {
        let error = DomainError::from(DraftValidationError::EmptyField {
            field: DraftField::Design,
        });
        assert_eq!(
            Notice::from_error(&error).to_string(),
            "Veuillez remplir tous les champs"
        );
    }

    #[rstest]
    fn repository_failure_carries_detail() {
        let error = DomainError::from(ApartmentRepositoryError::connection("offline"));
        let text = Notice::from_error(&error).to_string();
        assert!(text.starts_with("Erreur: "));
        assert!(text.contains("offline"));
    }
}
