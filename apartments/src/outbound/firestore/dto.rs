//! DTOs for the Firestore REST document format.
//!
//! Firestore wraps every field in a typed value object such as
//! `{"stringValue": "Studio"}`. The adapter decodes into these DTOs first,
//! then maps into domain records in one pass.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{Apartment, ApartmentFields, ApartmentId, Rent, RentLevel};

pub(super) const NUM_APP_FIELD: &str = "numApp";
pub(super) const DESIGN_FIELD: &str = "design";
pub(super) const LOYER_FIELD: &str = "loyer";
pub(super) const OBS_FIELD: &str = "obs";

/// Field paths written on every update, in document order.
pub(super) const WRITTEN_FIELDS: [&str; 4] = [NUM_APP_FIELD, DESIGN_FIELD, LOYER_FIELD, OBS_FIELD];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ListDocumentsDto {
    #[serde(default)]
    pub(super) documents: Vec<DocumentDto>,
    pub(super) next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct DocumentDto {
    pub(super) name: String,
    #[serde(default)]
    pub(super) fields: BTreeMap<String, ValueDto>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ValueDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(super) string_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(super) double_value: Option<f64>,
    // int64 values arrive as JSON strings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(super) integer_value: Option<Value>,
}

#[derive(Debug, Serialize)]
pub(super) struct WriteDocumentDto {
    pub(super) fields: BTreeMap<&'static str, ValueDto>,
}

impl ValueDto {
    fn string(value: impl Into<String>) -> Self {
        Self {
            string_value: Some(value.into()),
            ..Self::default()
        }
    }

    fn double(value: f64) -> Self {
        Self {
            double_value: Some(value),
            ..Self::default()
        }
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "rents are far below the 2^53 limit of exact f64 integers"
    )]
    fn integer(&self) -> Result<Option<f64>, String> {
        match &self.integer_value {
            None => Ok(None),
            Some(Value::String(raw)) => raw
                .parse::<i64>()
                .map(|value| Some(value as f64))
                .map_err(|error| format!("invalid integerValue '{raw}': {error}")),
            Some(Value::Number(number)) => Ok(number.as_f64()),
            Some(other) => Err(format!("invalid integerValue {other}")),
        }
    }

    fn text(&self) -> Option<String> {
        if let Some(text) = &self.string_value {
            return Some(text.clone());
        }
        match &self.integer_value {
            Some(Value::String(raw)) => Some(raw.clone()),
            Some(Value::Number(number)) => Some(number.to_string()),
            _ => None,
        }
    }

    /// Numeric reading of the value; rent text written as a string is parsed.
    fn number(&self) -> Result<Option<f64>, String> {
        if let Some(value) = self.double_value {
            return Ok(Some(value));
        }
        if let Some(value) = self.integer()? {
            return Ok(Some(value));
        }
        match self.string_value.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse::<f64>()
                .map(Some)
                .map_err(|error| format!("invalid numeric string '{raw}': {error}")),
        }
    }
}

impl WriteDocumentDto {
    pub(super) fn from_fields(fields: &ApartmentFields) -> Self {
        let mut encoded = BTreeMap::new();
        encoded.insert(NUM_APP_FIELD, ValueDto::string(fields.num_app()));
        encoded.insert(DESIGN_FIELD, ValueDto::string(fields.design()));
        encoded.insert(LOYER_FIELD, ValueDto::double(fields.loyer().value()));
        encoded.insert(OBS_FIELD, ValueDto::string(fields.obs().as_str()));
        Self { fields: encoded }
    }
}

impl DocumentDto {
    /// The trailing segment of the resource name.
    pub(super) fn document_id(&self) -> Result<ApartmentId, String> {
        let id = self.name.rsplit('/').next().unwrap_or_default();
        ApartmentId::new(id).map_err(|error| format!("document '{}': {error}", self.name))
    }

    /// Map into a domain record; the listing skips documents that fail here.
    ///
    /// Missing text fields read as empty and a missing rent reads as zero.
    /// A stored `obs` is kept as written; a missing or unknown one is derived
    /// from the rent.
    pub(super) fn into_apartment(self) -> Result<Apartment, String> {
        let id = self.document_id()?;
        let text = |field: &str| {
            self.fields
                .get(field)
                .and_then(ValueDto::text)
                .unwrap_or_default()
        };
        let num_app = text(NUM_APP_FIELD);
        let design = text(DESIGN_FIELD);

        let raw_loyer = match self.fields.get(LOYER_FIELD) {
            Some(value) => value
                .number()
                .map_err(|error| format!("document '{id}' {LOYER_FIELD}: {error}"))?
                .unwrap_or(0.0),
            None => 0.0,
        };
        let loyer = Rent::new(raw_loyer)
            .map_err(|error| format!("document '{id}' {LOYER_FIELD}: {error}"))?;

        let obs = self
            .fields
            .get(OBS_FIELD)
            .and_then(|value| value.string_value.as_deref())
            .and_then(|label| label.parse::<RentLevel>().ok())
            .unwrap_or_else(|| RentLevel::classify(loyer));

        Ok(Apartment::new(
            id,
            ApartmentFields::from_stored(num_app, design, loyer, obs),
        ))
    }
}
