//! Catalog Client contract and its TMDB implementation.
//!
//! The rest of the workspace only sees the `CatalogClient` trait, so the
//! aggregator can be exercised against in-memory fakes and the HTTP details
//! stay in this module.
//!
//! ## Endpoints used
//! - `GET /search/{movie|tv}?query=..`     → title search
//! - `GET /{movie|tv}/{id}/similar`         → "similar to" list
//! - `GET /{movie|tv}/{id}`                 → detail record (404 = absent)
//! - `GET /{movie|tv}/popular`              → trending list

use crate::error::{CatalogError, Result};
use crate::types::{CatalogDetails, CatalogEntity, CatalogId, MediaKind};
use reqwest::{Client as HttpClient, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Read-only access to the external movie/show catalog.
///
/// Implementations must report failures as `Err` and reserve `Ok(vec![])`
/// for "the catalog has nothing".
#[async_trait::async_trait]
pub trait CatalogClient: Send + Sync {
    /// Search titles of one kind, best match first.
    async fn search_title(&self, query: &str, kind: MediaKind) -> Result<Vec<CatalogEntity>>;

    /// Titles the catalog considers similar to `id`.
    async fn similar_to(&self, id: CatalogId, kind: MediaKind) -> Result<Vec<CatalogEntity>>;

    /// Full record for `id`, or `None` if the catalog does not know it.
    async fn details(&self, id: CatalogId, kind: MediaKind) -> Result<Option<CatalogDetails>>;

    /// Currently popular titles of one kind.
    async fn popular(&self, kind: MediaKind) -> Result<Vec<CatalogEntity>>;

    /// Client name for logging
    fn name(&self) -> &'static str;
}

/// One page of list results.
#[derive(Debug, Deserialize)]
struct Page {
    #[serde(default)]
    results: Vec<CatalogEntity>,
}

#[derive(Debug, Deserialize)]
struct GenreRef {
    id: u32,
    name: String,
}

/// Detail payload. Movies and shows spell several fields differently.
#[derive(Debug, Deserialize)]
struct DetailsRecord {
    id: CatalogId,
    #[serde(alias = "name", default)]
    title: String,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    first_air_date: Option<String>,
    #[serde(default)]
    vote_average: f32,
    #[serde(default)]
    poster_path: Option<String>,
    #[serde(default)]
    overview: Option<String>,
    #[serde(default)]
    runtime: Option<u32>,
    #[serde(default)]
    episode_run_time: Vec<u32>,
    #[serde(default)]
    genres: Vec<GenreRef>,
    #[serde(default)]
    tagline: Option<String>,
}

impl From<DetailsRecord> for CatalogDetails {
    fn from(record: DetailsRecord) -> Self {
        let runtime = record
            .runtime
            .or_else(|| record.episode_run_time.first().copied());
        let entity = CatalogEntity {
            id: record.id,
            title: record.title,
            release_date: record.release_date,
            first_air_date: record.first_air_date,
            vote_average: record.vote_average,
            genre_ids: record.genres.iter().map(|g| g.id).collect(),
            poster_path: record.poster_path,
            overview: record.overview,
        };
        CatalogDetails {
            entity,
            runtime,
            genres: record.genres.into_iter().map(|g| g.name).collect(),
            tagline: record.tagline.filter(|t| !t.is_empty()),
        }
    }
}

/// TMDB v3 client authenticated with a bearer access token.
#[derive(Clone)]
pub struct TmdbClient {
    http_client: HttpClient,
    access_token: String,
    api_url: String,
}

impl TmdbClient {
    /// Build a client.
    ///
    /// # Arguments
    /// * `access_token` - TMDB v4 read access token
    /// * `api_url` - Base URL, e.g. "https://api.themoviedb.org/3"
    /// * `timeout` - Upper bound for a single request
    pub fn new(
        access_token: impl Into<String>,
        api_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            access_token: access_token.into(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn send(&self, path: &str, params: &[(&str, &str)]) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.api_url, path);
        debug!("GET {} ({} params)", url, params.len());

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.access_token)
            .header("accept", "application/json")
            .query(params)
            .send()
            .await?;
        Ok(response)
    }

    /// Check the status and decode the body.
    async fn decode<T: DeserializeOwned>(path: &str, response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| CatalogError::InvalidResponse {
            endpoint: path.to_string(),
            reason: e.to_string(),
        })
    }

    async fn list(&self, path: &str, params: &[(&str, &str)]) -> Result<Vec<CatalogEntity>> {
        let response = self.send(path, params).await?;
        let page: Page = Self::decode(path, response).await?;
        debug!("{} returned {} results", path, page.results.len());
        Ok(page.results)
    }
}

#[async_trait::async_trait]
impl CatalogClient for TmdbClient {
    async fn search_title(&self, query: &str, kind: MediaKind) -> Result<Vec<CatalogEntity>> {
        let path = format!("/search/{}", kind.path_segment());
        self.list(
            &path,
            &[
                ("query", query),
                ("include_adult", "false"),
                ("language", "en-US"),
                ("page", "1"),
            ],
        )
        .await
    }

    async fn similar_to(&self, id: CatalogId, kind: MediaKind) -> Result<Vec<CatalogEntity>> {
        let path = format!("/{}/{}/similar", kind.path_segment(), id);
        self.list(&path, &[]).await
    }

    async fn details(&self, id: CatalogId, kind: MediaKind) -> Result<Option<CatalogDetails>> {
        let path = format!("/{}/{}", kind.path_segment(), id);
        let response = self.send(&path, &[]).await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!("{} not found", path);
            return Ok(None);
        }
        let record: DetailsRecord = Self::decode(&path, response).await?;
        Ok(Some(record.into()))
    }

    async fn popular(&self, kind: MediaKind) -> Result<Vec<CatalogEntity>> {
        let path = format!("/{}/popular", kind.path_segment());
        self.list(&path, &[]).await
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
