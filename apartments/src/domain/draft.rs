//! Unvalidated form input and its validation into storable fields.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::apartment::{Apartment, ApartmentFields};
use super::rent::{Rent, RentValidationError};

/// Form fields that are required before submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DraftField {
    /// Apartment number.
    NumApp,
    /// Description.
    Design,
    /// Rent amount.
    Loyer,
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NumApp => "numApp",
            Self::Design => "design",
            Self::Loyer => "loyer",
        })
    }
}

/// Reasons a draft cannot be submitted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftValidationError {
    /// A required field was empty or whitespace.
    #[error("{field} must not be empty")]
    EmptyField {
        /// The first blank field, in form order.
        field: DraftField,
    },
    /// The rent text did not parse as a number.
    #[error("loyer must be a number, got '{value}'")]
    RentNotNumeric {
        /// The rejected input.
        value: String,
    },
    /// The rent parsed but is NaN, infinite or negative.
    #[error("loyer is out of range: {0}")]
    InvalidRent(#[from] RentValidationError),
}

/// The transient field values held by the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApartmentDraft {
    /// Apartment number as typed.
    pub num_app: String,
    /// Description as typed.
    pub design: String,
    /// Rent as typed.
    pub loyer: String,
}

impl ApartmentDraft {
    /// Build a draft from raw field text.
    pub fn new(
        num_app: impl Into<String>,
        design: impl Into<String>,
        loyer: impl Into<String>,
    ) -> Self {
        Self {
            num_app: num_app.into(),
            design: design.into(),
            loyer: loyer.into(),
        }
    }

    /// Load a stored record back into editable text.
    pub fn from_apartment(apartment: &Apartment) -> Self {
        let fields = apartment.fields();
        Self::new(fields.num_app(), fields.design(), fields.loyer().to_string())
    }

    /// Validate the draft and produce the fields to write.
    ///
    /// Text fields are stored as entered; only the rent is parsed.
    ///
    /// # Examples
    /// ```
    /// use apartments::domain::{ApartmentDraft, RentLevel};
    ///
    /// let fields = ApartmentDraft::new("A1", "Studio", "800")
    ///     .validate()
    ///     .expect("valid draft");
    /// assert_eq!(fields.obs(), RentLevel::Bas);
    ///
    /// assert!(ApartmentDraft::new(" ", "Studio", "800").validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<ApartmentFields, DraftValidationError> {
        let required = [
            (DraftField::NumApp, &self.num_app),
            (DraftField::Design, &self.design),
            (DraftField::Loyer, &self.loyer),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(DraftValidationError::EmptyField { field: *field });
        }

        let raw = self.loyer.trim();
        let parsed = raw
            .parse::<f64>()
            .map_err(|_| DraftValidationError::RentNotNumeric {
                value: raw.to_owned(),
            })?;
        let loyer = Rent::new(parsed)?;

        Ok(ApartmentFields::new(
            self.num_app.clone(),
            self.design.clone(),
            loyer,
        ))
    }
}
