//! Reqwest-backed Firestore apartment repository.
//!
//! This adapter owns transport details only: URL construction, preconditions,
//! HTTP error mapping, and decoding of Firestore documents into domain records.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use tracing::{debug, warn};

use super::dto::{DocumentDto, ListDocumentsDto, WRITTEN_FIELDS, WriteDocumentDto};
use crate::domain::ports::{ApartmentRepository, ApartmentRepositoryError};
use crate::domain::{Apartment, ApartmentFields, ApartmentId};

const LIST_PAGE_SIZE: u32 = 300;
const DEFAULT_DATABASE: &str = "(default)";

/// Where and how to reach the Firestore collection.
#[derive(Debug, Clone)]
pub struct FirestoreSettings {
    /// REST root, e.g. `https://firestore.googleapis.com/v1`.
    pub base_url: Url,
    /// Google Cloud project identifier.
    pub project_id: String,
    /// Collection holding apartment documents.
    pub collection: String,
    /// Web API key sent as the `key` query parameter, if any.
    pub api_key: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

/// Errors raised while building the adapter.
#[derive(Debug, thiserror::Error)]
pub enum FirestoreSetupError {
    /// The base URL cannot carry path segments.
    #[error("firestore base url '{url}' cannot be used as a base")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
    },
    /// The HTTP client could not be constructed.
    #[error("failed to build firestore http client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Apartment repository backed by one Firestore collection over REST.
#[derive(Debug, Clone)]
pub struct FirestoreApartmentRepository {
    client: Client,
    collection_url: Url,
    api_key: Option<String>,
}

impl FirestoreApartmentRepository {
    /// Build an adapter using a reqwest client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL is unusable or the reqwest client
    /// cannot be constructed.
    pub fn new(settings: FirestoreSettings) -> Result<Self, FirestoreSetupError> {
        let collection_url = collection_url(
            &settings.base_url,
            &settings.project_id,
            &settings.collection,
        )?;
        let client = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self {
            client,
            collection_url,
            api_key: settings.api_key,
        })
    }

    fn document_url(&self, id: &ApartmentId) -> Url {
        let mut url = self.collection_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(id.as_ref());
        }
        url
    }

    async fn fetch_page(
        &self,
        page_token: Option<String>,
    ) -> Result<Vec<u8>, ApartmentRepositoryError> {
        let mut request = self
            .client
            .get(self.collection_url.clone())
            .query(&[("pageSize", LIST_PAGE_SIZE)]);
        if let Some(token) = page_token {
            request = request.query(&[("pageToken", token)]);
        }
        self.send(request, None).await
    }

    async fn send(
        &self,
        request: RequestBuilder,
        id: Option<&ApartmentId>,
    ) -> Result<Vec<u8>, ApartmentRepositoryError> {
        let request = match &self.api_key {
            Some(key) => request.query(&[("key", key.as_str())]),
            None => request,
        };
        let response = request
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref(), id));
        }
        Ok(body.to_vec())
    }
}

/// Drive `fetch` across the listing, one call per page, starting without a
/// token and stopping once the store returns no further token.
async fn collect_pages<F, Fut>(mut fetch: F) -> Result<Vec<Apartment>, ApartmentRepositoryError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Vec<u8>, ApartmentRepositoryError>>,
{
    let mut apartments = Vec::new();
    let mut page_token = None;
    loop {
        let body = fetch(page_token.take()).await?;
        match decode_page(&body, &mut apartments)? {
            Some(token) => page_token = Some(token),
            None => return Ok(apartments),
        }
    }
}

/// Append the readable documents of one page and return the next token.
///
/// A document that cannot be read as an apartment is skipped with a warning
/// so one bad record does not hide the rest of the collection.
fn decode_page(
    body: &[u8],
    apartments: &mut Vec<Apartment>,
) -> Result<Option<String>, ApartmentRepositoryError> {
    let page: ListDocumentsDto = decode(body)?;
    for document in page.documents {
        match document.into_apartment() {
            Ok(apartment) => apartments.push(apartment),
            Err(error) => warn!(%error, "skipping unreadable apartment document"),
        }
    }
    Ok(page.next_page_token.filter(|token| !token.is_empty()))
}

/// Identifier assigned by the store, read from a create response.
fn created_id(body: &[u8]) -> Result<ApartmentId, ApartmentRepositoryError> {
    let document: DocumentDto = decode(body)?;
    document
        .document_id()
        .map_err(ApartmentRepositoryError::decode)
}

fn collection_url(
    base_url: &Url,
    project_id: &str,
    collection: &str,
) -> Result<Url, FirestoreSetupError> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|()| FirestoreSetupError::InvalidBaseUrl {
            url: base_url.to_string(),
        })?
        .pop_if_empty()
        .extend([
            "projects",
            project_id,
            "databases",
            DEFAULT_DATABASE,
            "documents",
            collection,
        ]);
    Ok(url)
}

#[async_trait]
impl ApartmentRepository for FirestoreApartmentRepository {
    async fn list(&self) -> Result<Vec<Apartment>, ApartmentRepositoryError> {
        let apartments = collect_pages(move |page_token| self.fetch_page(page_token)).await?;
        debug!(count = apartments.len(), "firestore collection listed");
        Ok(apartments)
    }

    async fn create(
        &self,
        fields: &ApartmentFields,
    ) -> Result<ApartmentId, ApartmentRepositoryError> {
        let request = self
            .client
            .post(self.collection_url.clone())
            .json(&WriteDocumentDto::from_fields(fields));
        let body = self.send(request, None).await?;
        created_id(&body)
    }

    async fn update(
        &self,
        id: &ApartmentId,
        fields: &ApartmentFields,
    ) -> Result<(), ApartmentRepositoryError> {
        let mask: Vec<_> = WRITTEN_FIELDS
            .iter()
            .map(|field| ("updateMask.fieldPaths", *field))
            .collect();
        let request = self
            .client
            .patch(self.document_url(id))
            .query(&[("currentDocument.exists", "true")])
            .query(&mask)
            .json(&WriteDocumentDto::from_fields(fields));
        self.send(request, Some(id)).await?;
        Ok(())
    }

    async fn delete(&self, id: &ApartmentId) -> Result<(), ApartmentRepositoryError> {
        let request = self
            .client
            .delete(self.document_url(id))
            .query(&[("currentDocument.exists", "true")]);
        self.send(request, Some(id)).await?;
        Ok(())
    }
}

fn decode<T>(body: &[u8]) -> Result<T, ApartmentRepositoryError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_slice(body).map_err(|error| {
        ApartmentRepositoryError::decode(format!("invalid Firestore JSON payload: {error}"))
    })
}

fn map_transport_error(error: reqwest::Error) -> ApartmentRepositoryError {
    ApartmentRepositoryError::connection(error.to_string())
}

fn map_status_error(
    status: StatusCode,
    body: &[u8],
    id: Option<&ApartmentId>,
) -> ApartmentRepositoryError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::NOT_FOUND => match id {
            Some(id) => ApartmentRepositoryError::not_found(id.to_string()),
            None => ApartmentRepositoryError::query(message),
        },
        StatusCode::UNAUTHORIZED
        | StatusCode::FORBIDDEN
        | StatusCode::REQUEST_TIMEOUT
        | StatusCode::TOO_MANY_REQUESTS => ApartmentRepositoryError::connection(message),
        _ if status.is_server_error() => ApartmentRepositoryError::connection(message),
        _ => ApartmentRepositoryError::query(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
