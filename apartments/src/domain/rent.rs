//! Rent amounts and the rent-level classifier.
//!
//! Purpose: keep rent values finite and non-negative at the type level so the
//! classifier is total over every value it can be handed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Rents strictly below this amount are classified as [`RentLevel::Bas`].
pub const LOW_RENT_CEILING: f64 = 1000.0;
/// Rents strictly above this amount are classified as [`RentLevel::Eleve`].
pub const HIGH_RENT_FLOOR: f64 = 5000.0;

/// Validation errors returned by [`Rent::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RentValidationError {
    /// The value was NaN or infinite.
    #[error("rent must be a finite number")]
    NotFinite,
    /// The value was below zero.
    #[error("rent must not be negative")]
    Negative,
}

/// A monthly rent amount.
///
/// ## Invariants
/// - The wrapped value is finite and greater than or equal to zero.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Rent(f64);

impl Rent {
    /// A rent of zero, used when a stored record carries no amount.
    pub const ZERO: Self = Self(0.0);

    /// Validate and construct a [`Rent`].
    ///
    /// # Examples
    /// ```
    /// use apartments::domain::Rent;
    ///
    /// assert_eq!(Rent::new(800.0).map(Rent::value), Ok(800.0));
    /// assert!(Rent::new(f64::NAN).is_err());
    /// assert!(Rent::new(-1.0).is_err());
    /// ```
    pub fn new(value: f64) -> Result<Self, RentValidationError> {
        if !value.is_finite() {
            return Err(RentValidationError::NotFinite);
        }
        if value < 0.0 {
            return Err(RentValidationError::Negative);
        }
        // Only `-0.0` can still carry a sign here.
        if value.is_sign_negative() {
            return Ok(Self::ZERO);
        }
        Ok(Self(value))
    }

    /// The raw amount.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Rent {
    type Error = RentValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rent> for f64 {
    fn from(value: Rent) -> Self {
        value.0
    }
}

impl fmt::Display for Rent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Rent-level classification stored alongside each apartment as `obs`.
///
/// Variants are ordered from cheapest to most expensive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RentLevel {
    /// Rent below [`LOW_RENT_CEILING`].
    #[serde(rename = "bas")]
    Bas,
    /// Rent between [`LOW_RENT_CEILING`] and [`HIGH_RENT_FLOOR`], inclusive.
    #[serde(rename = "moyen")]
    Moyen,
    /// Rent above [`HIGH_RENT_FLOOR`].
    #[serde(rename = "élevé")]
    Eleve,
}

impl RentLevel {
    /// Classify a validated rent.
    ///
    /// # Examples
    /// ```
    /// use apartments::domain::{Rent, RentLevel};
    ///
    /// let rent = Rent::new(5000.0).expect("valid rent");
    /// assert_eq!(RentLevel::classify(rent), RentLevel::Moyen);
    /// ```
    pub fn classify(rent: Rent) -> Self {
        let value = rent.value();
        if value < LOW_RENT_CEILING {
            Self::Bas
        } else if value <= HIGH_RENT_FLOOR {
            Self::Moyen
        } else {
            Self::Eleve
        }
    }

    /// Classify a raw amount, failing fast on NaN, infinite or negative input.
    pub fn try_classify(value: f64) -> Result<Self, RentValidationError> {
        Rent::new(value).map(Self::classify)
    }

    /// The stored label for this level.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bas => "bas",
            Self::Moyen => "moyen",
            Self::Eleve => "élevé",
        }
    }
}

impl fmt::Display for RentLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stored label is not a known [`RentLevel`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown rent level '{label}'")]
pub struct UnknownRentLevel {
    /// The label that failed to parse.
    pub label: String,
}

impl FromStr for RentLevel {
    type Err = UnknownRentLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bas" => Ok(Self::Bas),
            "moyen" => Ok(Self::Moyen),
            "élevé" => Ok(Self::Eleve),
            other => Err(UnknownRentLevel {
                label: other.to_owned(),
            }),
        }
    }
}
