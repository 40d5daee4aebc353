//! REST client for the remote catalog.

use crate::error::{CatalogError, Result};
use crate::playlists::assemble_playlists;
use crate::types::{CatalogConfig, NewTrackRow, PlaylistItemRow, PlaylistRow, StorageObject, TrackRow};
use dhikr_core::{Playlist, Track, TrackId};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info};

/// Table holding the audio catalog.
pub const TRACKS_TABLE: &str = "dzikiraudio";
/// Table holding playlist headers.
pub const PLAYLISTS_TABLE: &str = "playlists";
/// Table holding ordered playlist membership.
pub const PLAYLIST_ITEMS_TABLE: &str = "playlist_items";

/// Client for the catalog's REST and storage endpoints.
///
/// # Example
///
/// ```ignore
/// use dhikr_catalog::{CatalogClient, CatalogConfig};
///
/// let client = CatalogClient::new(CatalogConfig::new("https://xyz.supabase.co", "anon-key"))?;
/// let tracks = client.fetch_tracks().await?;
/// let playlists = client.fetch_playlists().await?;
/// ```
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    config: CatalogConfig,
}

impl CatalogClient {
    /// Create a new client with the given configuration.
    pub fn new(config: CatalogConfig) -> Result<Self> {
        if config.url.trim().is_empty() {
            return Err(CatalogError::InvalidUrl("URL cannot be empty".into()));
        }

        let url = config.url.trim().trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(CatalogError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        ::url::Url::parse(&url).map_err(|e| CatalogError::InvalidUrl(e.to_string()))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("DhikrPlayer/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            config: CatalogConfig {
                url,
                api_key: config.api_key,
            },
        })
    }

    /// Normalized base URL.
    pub fn url(&self) -> &str {
        &self.config.url
    }

    // ===== Tracks =====

    /// Fetch every track, oldest first.
    pub async fn fetch_tracks(&self) -> Result<Vec<Track>> {
        let rows: Vec<TrackRow> = self
            .select(TRACKS_TABLE, &[("select", "*"), ("order", "created_at.asc")])
            .await?;

        debug!(tracks = rows.len(), "Fetched tracks");
        Ok(rows.into_iter().map(TrackRow::into_track).collect())
    }

    /// Fetch a single track by ID.
    ///
    /// Returns `Ok(None)` when no row matches.
    pub async fn fetch_track(&self, id: &TrackId) -> Result<Option<Track>> {
        let filter = format!("eq.{id}");
        let rows: Vec<TrackRow> = self
            .select(TRACKS_TABLE, &[("select", "*"), ("id", filter.as_str())])
            .await?;

        Ok(rows.into_iter().next().map(TrackRow::into_track))
    }

    /// Look up the ID of the track whose `audiourl` equals `audio_url`.
    pub async fn find_track_by_audio_url(&self, audio_url: &str) -> Result<Option<String>> {
        #[derive(serde::Deserialize)]
        struct IdOnly {
            #[serde(deserialize_with = "crate::types::id_string")]
            id: String,
        }

        let filter = format!("eq.{audio_url}");
        let rows: Vec<IdOnly> = self
            .select(TRACKS_TABLE, &[("select", "id"), ("audiourl", filter.as_str())])
            .await?;

        Ok(rows.into_iter().next().map(|row| row.id))
    }

    /// Insert a new track row and return the stored row.
    pub async fn insert_track(&self, row: &NewTrackRow) -> Result<TrackRow> {
        let url = self.rest_url(TRACKS_TABLE);
        debug!(url = %url, audiourl = %row.audiourl, "Inserting track");

        let response = self
            .request(Method::POST, &url)
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await?;

        let rows: Vec<TrackRow> = parse_json(check_status(response).await?, "insert").await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| CatalogError::Parse("Insert returned no rows".into()))
    }

    // ===== Playlists =====

    /// Fetch every playlist with its tracks in item order.
    pub async fn fetch_playlists(&self) -> Result<Vec<Playlist>> {
        let playlists: Vec<PlaylistRow> = self
            .select(PLAYLISTS_TABLE, &[("select", "*"), ("order", "created_at.asc")])
            .await?;
        let tracks = self.fetch_tracks().await?;
        let items: Vec<PlaylistItemRow> = self
            .select(PLAYLIST_ITEMS_TABLE, &[("select", "*"), ("order", "position.asc")])
            .await?;

        debug!(
            playlists = playlists.len(),
            items = items.len(),
            tracks = tracks.len(),
            "Assembling playlists"
        );

        Ok(assemble_playlists(playlists, items, &tracks))
    }

    // ===== Storage =====

    /// List the objects at the root of a storage bucket.
    pub async fn list_objects(&self, bucket: &str) -> Result<Vec<StorageObject>> {
        let url = format!("{}/storage/v1/object/list/{}", self.config.url, bucket);
        debug!(url = %url, "Listing bucket");

        let response = self
            .request(Method::POST, &url)
            .json(&json!({
                "prefix": "",
                "limit": 1000,
                "offset": 0,
                "sortBy": { "column": "name", "order": "asc" },
            }))
            .send()
            .await?;

        let objects: Vec<StorageObject> =
            parse_json(check_status(response).await?, "storage list").await?;
        info!(bucket, objects = objects.len(), "Listed bucket");
        Ok(objects)
    }

    // ===== Internal =====

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.url, table)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
    }

    async fn select<T: DeserializeOwned>(&self, table: &str, query: &[(&str, &str)]) -> Result<Vec<T>> {
        let url = self.rest_url(table);
        debug!(url = %url, ?query, "Selecting rows");

        let response = self.request(Method::GET, &url).query(query).send().await?;
        parse_json(check_status(response).await?, table).await
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    match status.as_u16() {
        401 | 403 => Err(CatalogError::Unauthorized(message)),
        code => Err(CatalogError::Server {
            status: code,
            message,
        }),
    }
}

async fn parse_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    response
        .json()
        .await
        .map_err(|e| CatalogError::Parse(format!("Failed to parse {what} response: {e}")))
}
