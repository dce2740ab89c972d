//! Apartment record model.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::rent::{Rent, RentLevel};

/// Validation errors returned by [`ApartmentId::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ApartmentIdValidationError {
    /// The identifier was empty or whitespace.
    #[error("apartment id must not be empty")]
    Empty,
}

/// Opaque identifier assigned by the repository when a record is created.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApartmentId(String);

impl ApartmentId {
    /// Validate and construct an [`ApartmentId`].
    pub fn new(id: impl Into<String>) -> Result<Self, ApartmentIdValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ApartmentIdValidationError::Empty);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for ApartmentId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ApartmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<ApartmentId> for String {
    fn from(value: ApartmentId) -> Self {
        value.0
    }
}

impl TryFrom<String> for ApartmentId {
    type Error = ApartmentIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// The persisted field set of an apartment, without its identifier.
///
/// ## Invariants
/// - `obs` is the classification of `loyer` at the time the fields were
///   written. It is stored, not recomputed on read.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApartmentFields {
    num_app: String,
    design: String,
    loyer: Rent,
    obs: RentLevel,
}

impl ApartmentFields {
    /// Build a field set for writing, classifying `loyer` now.
    pub fn new(num_app: impl Into<String>, design: impl Into<String>, loyer: Rent) -> Self {
        Self {
            num_app: num_app.into(),
            design: design.into(),
            loyer,
            obs: RentLevel::classify(loyer),
        }
    }

    /// Rebuild a field set read back from storage, keeping its stored `obs`.
    pub fn from_stored(
        num_app: impl Into<String>,
        design: impl Into<String>,
        loyer: Rent,
        obs: RentLevel,
    ) -> Self {
        Self {
            num_app: num_app.into(),
            design: design.into(),
            loyer,
            obs,
        }
    }

    /// Apartment number as entered.
    pub fn num_app(&self) -> &str {
        self.num_app.as_str()
    }

    /// Free-form description.
    pub fn design(&self) -> &str {
        self.design.as_str()
    }

    /// Monthly rent.
    pub fn loyer(&self) -> Rent {
        self.loyer
    }

    /// Rent level recorded at write time.
    pub fn obs(&self) -> RentLevel {
        self.obs
    }
}

/// A persisted apartment record.
///
/// Serialises flat, as `{ id, numApp, design, loyer, obs }`.
///
/// # Examples
/// ```
/// use apartments::domain::{Apartment, ApartmentFields, ApartmentId, Rent, RentLevel};
///
/// let apartment = Apartment::new(
///     ApartmentId::new("a1").expect("valid id"),
///     ApartmentFields::new("A1", "Studio", Rent::new(800.0).expect("valid rent")),
/// );
/// assert_eq!(apartment.fields().obs(), RentLevel::Bas);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Apartment {
    id: ApartmentId,
    #[serde(flatten)]
    fields: ApartmentFields,
}

impl Apartment {
    /// Pair an identifier with its fields.
    pub fn new(id: ApartmentId, fields: ApartmentFields) -> Self {
        Self { id, fields }
    }

    /// Repository-assigned identifier.
    pub fn id(&self) -> &ApartmentId {
        &self.id
    }

    /// Stored fields.
    pub fn fields(&self) -> &ApartmentFields {
        &self.fields
    }

    /// Shortcut for the stored rent.
    pub fn loyer(&self) -> Rent {
        self.fields.loyer
    }

    /// Split into identifier and fields.
    pub fn into_parts(self) -> (ApartmentId, ApartmentFields) {
        (self.id, self.fields)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_ids_are_rejected(#[case] raw: &str) {
        assert_eq!(ApartmentId::new(raw), Err(ApartmentIdValidationError::Empty));
    }

    #[rstest]
    fn new_fields_classify_rent() {
        let fields = ApartmentFields::new("B2", "Duplex", Rent::new(6000.0).expect("valid rent"));
        assert_eq!(fields.obs(), RentLevel::Eleve);
    }

    #[rstest]
    fn stored_fields_keep_their_recorded_level() {
        let fields = ApartmentFields::from_stored(
            "B2",
            "Duplex",
            Rent::new(6000.0).expect("valid rent"),
            RentLevel::Moyen,
        );
        assert_eq!(fields.obs(), RentLevel::Moyen);
    }

    #[rstest]
    fn apartment_serialises_flat_with_camel_case_names() {
        let apartment = Apartment::new(
            ApartmentId::new("doc-1").expect("valid id"),
            ApartmentFields::new("12", "Studio", Rent::new(800.0).expect("valid rent")),
        );

        let value = serde_json::to_value(&apartment).expect("serialise apartment");

        assert_eq!(
            value,
            json!({
                "id": "doc-1",
                "numApp": "12",
                "design": "Studio",
                "loyer": 800.0,
                "obs": "bas",
            })
        );
    }
}
