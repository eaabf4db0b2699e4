//! API client for the TV catalog service.
//!
//! This module provides the [`CatalogClient`] seam the controller talks to and
//! [`TvMazeClient`], its HTTP implementation against a TVmaze-compatible API.

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::types::{Episode, EpisodeKey, Show, ShowId};
use async_trait::async_trait;
use log::{debug, warn};
use serde::Deserialize;
use std::time::Duration;

/// Read-only access to the show catalog.
///
/// Implementations must not retry: a single failed call surfaces immediately
/// as [`AppError::CatalogUnavailable`] or [`AppError::MalformedResponse`].
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// List all shows, in whatever order the catalog returns them.
    async fn fetch_shows(&self) -> Result<Vec<Show>>;

    /// List the episodes of one show.
    async fn fetch_episodes(&self, show: ShowId) -> Result<Vec<Episode>>;
}

// Response types for /shows and /shows/{id}/episodes
#[derive(Debug, Deserialize)]
struct TvMazeShow {
    id: u64,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    genres: Vec<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    runtime: Option<u32>,
    #[serde(default)]
    rating: Option<TvMazeRating>,
    #[serde(default)]
    image: Option<TvMazeImage>,
}

#[derive(Debug, Deserialize)]
struct TvMazeRating {
    #[serde(default)]
    average: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct TvMazeImage {
    #[serde(default)]
    medium: Option<String>,
    #[serde(default)]
    original: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TvMazeEpisode {
    id: u64,
    #[serde(default)]
    name: Option<String>,
    season: u32,
    /// Null for specials
    #[serde(default)]
    number: Option<u32>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    image: Option<TvMazeImage>,
}

impl TvMazeImage {
    fn into_url(self) -> Option<String> {
        self.medium.or(self.original)
    }
}

fn name_or_unknown(name: Option<String>) -> String {
    name.filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Parse a `/shows` response body.
///
/// # Examples
///
/// ```
/// use show_browser::api::parse_shows;
///
/// let shows = parse_shows(r#"[{"id": 1, "name": "Under the Dome", "genres": ["Drama"]}]"#).unwrap();
/// assert_eq!(shows[0].name, "Under the Dome");
/// assert!(parse_shows("{}").is_err());
/// ```
pub fn parse_shows(body: &str) -> Result<Vec<Show>> {
    let raw: Vec<TvMazeShow> = serde_json::from_str(body)?;

    Ok(raw
        .into_iter()
        .map(|s| Show {
            id: ShowId(s.id),
            name: name_or_unknown(s.name),
            summary: s.summary,
            genres: s.genres,
            status: s.status,
            runtime: s.runtime,
            rating: s.rating.and_then(|r| r.average),
            image: s.image.and_then(TvMazeImage::into_url),
        })
        .collect())
}

/// Parse a `/shows/{id}/episodes` response body.
///
/// Episodes without a number (specials) have no `season-number` key and are
/// skipped.
pub fn parse_episodes(show: ShowId, body: &str) -> Result<Vec<Episode>> {
    let raw: Vec<TvMazeEpisode> = serde_json::from_str(body)?;

    Ok(raw
        .into_iter()
        .filter_map(|e| {
            let Some(number) = e.number else {
                debug!("Skipping unnumbered episode {} of show {}", e.id, show);
                return None;
            };
            Some(Episode {
                id: e.id,
                show_id: show,
                key: EpisodeKey::new(e.season, number),
                name: name_or_unknown(e.name),
                summary: e.summary,
                image: e.image.and_then(TvMazeImage::into_url),
            })
        })
        .collect())
}

/// HTTP catalog client for TVmaze-compatible APIs.
#[derive(Clone)]
pub struct TvMazeClient {
    client: reqwest::Client,
    base_url: String,
}

impl TvMazeClient {
    /// Build a client from the user's configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` and return the body of a successful response.
    async fn get_body(&self, path: &str) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let resp = self.client.get(&url).send().await.map_err(|e| {
            warn!("Request to {} failed: {}", url, e);
            AppError::CatalogUnavailable(format!("request to {} failed: {}", url, e))
        })?;

        let status = resp.status();
        if !status.is_success() {
            warn!("{} answered HTTP {}", url, status.as_u16());
            return Err(AppError::CatalogUnavailable(format!(
                "HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        Ok(resp.text().await?)
    }
}

#[async_trait]
impl CatalogClient for TvMazeClient {
    async fn fetch_shows(&self) -> Result<Vec<Show>> {
        let body = self.get_body("/shows").await?;
        let shows = parse_shows(&body)?;
        debug!("Fetched {} shows", shows.len());
        Ok(shows)
    }

    async fn fetch_episodes(&self, show: ShowId) -> Result<Vec<Episode>> {
        let body = self.get_body(&format!("/shows/{}/episodes", show)).await?;
        let episodes = parse_episodes(show, &body)?;
        debug!("Fetched {} episodes for show {}", episodes.len(), show);
        Ok(episodes)
    }
}
