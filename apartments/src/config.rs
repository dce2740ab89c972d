//! Repository configuration loaded via OrthoConfig.
//!
//! Values come from `APARTMENTS_*` environment variables or configuration
//! files; every field is optional and falls back to a default below.

use std::str::FromStr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use reqwest::Url;
use serde::Deserialize;

use crate::outbound::firestore::FirestoreSettings;

const DEFAULT_COLLECTION: &str = "Appartements";
const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Which repository adapter backs the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RepositoryBackend {
    /// Process-local store. Each run starts with an empty collection, so
    /// records created by one CLI invocation are gone by the next.
    #[default]
    Memory,
    /// Firestore over REST.
    Firestore,
}

impl FromStr for RepositoryBackend {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "firestore" => Ok(Self::Firestore),
            _ => Err(SettingsError::UnknownBackend {
                value: s.to_owned(),
            }),
        }
    }
}

/// Configuration values that cannot be turned into adapter settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// `backend` names no known adapter.
    #[error("unknown repository backend '{value}', expected 'memory' or 'firestore'")]
    UnknownBackend {
        /// The configured value.
        value: String,
    },
    /// The Firestore backend was selected without a project.
    #[error("APARTMENTS_PROJECT_ID is required for the firestore backend")]
    MissingProjectId,
    /// `base_url` does not parse.
    #[error("invalid firestore base url '{value}': {message}")]
    InvalidBaseUrl {
        /// The configured value.
        value: String,
        /// Parser detail.
        message: String,
    },
}

/// Configuration values selecting and tuning the repository adapter.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "APARTMENTS")]
pub struct ApartmentSettings {
    /// Repository backend: `memory` (default, empty on every run) or
    /// `firestore` (persistent; needs `project_id`).
    pub backend: Option<String>,
    /// Firestore project identifier.
    pub project_id: Option<String>,
    /// Firestore collection name.
    pub collection: Option<String>,
    /// Firestore web API key.
    pub api_key: Option<String>,
    /// Firestore REST root.
    pub base_url: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl ApartmentSettings {
    /// The configured backend, defaulting to [`RepositoryBackend::Memory`].
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::UnknownBackend`] for unrecognised names.
    pub fn backend(&self) -> Result<RepositoryBackend, SettingsError> {
        self.backend
            .as_deref()
            .map_or(Ok(RepositoryBackend::default()), |raw| raw.parse())
    }

    /// The configured collection, falling back to `Appartements`.
    pub fn collection(&self) -> &str {
        self.collection.as_deref().unwrap_or(DEFAULT_COLLECTION)
    }

    /// The configured request timeout, falling back to 30 seconds.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// Settings for the Firestore adapter.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingProjectId`] without a project, or
    /// [`SettingsError::InvalidBaseUrl`] when the base URL does not parse.
    pub fn firestore(&self) -> Result<FirestoreSettings, SettingsError> {
        let project_id = self
            .project_id
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(SettingsError::MissingProjectId)?;
        let raw_url = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let base_url = Url::parse(raw_url).map_err(|error| SettingsError::InvalidBaseUrl {
            value: raw_url.to_owned(),
            message: error.to_string(),
        })?;

        Ok(FirestoreSettings {
            base_url,
            project_id: project_id.to_owned(),
            collection: self.collection().to_owned(),
            api_key: self.api_key.clone(),
            timeout: self.timeout(),
        })
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for repository configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 6] = [
        "APARTMENTS_BACKEND",
        "APARTMENTS_PROJECT_ID",
        "APARTMENTS_COLLECTION",
        "APARTMENTS_API_KEY",
        "APARTMENTS_BASE_URL",
        "APARTMENTS_TIMEOUT_SECS",
    ];

    fn unset() -> ApartmentSettings {
        ApartmentSettings {
            backend: None,
            project_id: None,
            collection: None,
            api_key: None,
            base_url: None,
            timeout_secs: None,
        }
    }

    fn load_from_empty_args() -> ApartmentSettings {
        ApartmentSettings::load_from_iter([OsString::from("apartments")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.backend(), Ok(RepositoryBackend::Memory));
        assert_eq!(settings.collection(), DEFAULT_COLLECTION);
        assert_eq!(settings.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(
            settings.firestore().map(|_| ()),
            Err(SettingsError::MissingProjectId)
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("APARTMENTS_BACKEND", Some("firestore".to_owned())),
            ("APARTMENTS_PROJECT_ID", Some("locations-demo".to_owned())),
            ("APARTMENTS_COLLECTION", Some("Flats".to_owned())),
            ("APARTMENTS_API_KEY", Some("secret".to_owned())),
            (
                "APARTMENTS_BASE_URL",
                Some("http://localhost:8080/v1".to_owned()),
            ),
            ("APARTMENTS_TIMEOUT_SECS", Some("5".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.backend(), Ok(RepositoryBackend::Firestore));

        let firestore = settings.firestore().expect("firestore settings");
        assert_eq!(firestore.project_id, "locations-demo");
        assert_eq!(firestore.collection, "Flats");
        assert_eq!(firestore.api_key.as_deref(), Some("secret"));
        assert_eq!(firestore.base_url.as_str(), "http://localhost:8080/v1");
        assert_eq!(firestore.timeout, Duration::from_secs(5));
    }

    #[rstest]
    #[case("Memory", RepositoryBackend::Memory)]
    #[case(" firestore ", RepositoryBackend::Firestore)]
    fn backend_names_are_case_insensitive(#[case] raw: &str, #[case] expected: RepositoryBackend) {
        assert_eq!(raw.parse::<RepositoryBackend>(), Ok(expected));
    }

    #[rstest]
    fn unknown_backend_is_reported() {
        let settings = ApartmentSettings {
            backend: Some("sqlite".to_owned()),
            ..unset()
        };

        assert_eq!(
            settings.backend(),
            Err(SettingsError::UnknownBackend {
                value: "sqlite".to_owned()
            })
        );
    }

    #[rstest]
    fn malformed_base_url_is_reported() {
        let settings = ApartmentSettings {
            project_id: Some("p".to_owned()),
            base_url: Some("not a url".to_owned()),
            ..unset()
        };

        assert!(matches!(
            settings.firestore(),
            Err(SettingsError::InvalidBaseUrl { .. })
        ));
    }
}
