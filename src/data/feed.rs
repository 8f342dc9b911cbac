//! NASA NeoWs feed client
//!
//! This module fetches the near-Earth-object feed for a single date and parses
//! it into the raw upstream record types. Mapping those records into
//! [`NeoItem`](super::NeoItem) lives in [`transform`](super::transform).

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use tracing::debug;

/// Base URL for the NeoWs feed endpoint
pub const NEO_FEED_BASE_URL: &str = "https://api.nasa.gov/neo/rest/v1/feed";

/// User agent sent with every upstream request
const USER_AGENT: &str = "NASA-Dashboard/1.0";

/// Errors that can occur when fetching the feed
#[derive(Debug, Error)]
pub enum FeedError {
    /// Upstream answered 429
    #[error("NASA API rate limit exceeded")]
    RateLimited,

    /// Upstream answered 403
    #[error("NASA API access denied. Please check your API key.")]
    AccessDenied,

    /// Any other non-success status
    #[error("NASA API error: {status} - {status_text}")]
    Upstream { status: u16, status_text: String },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Top-level feed response, keyed by calendar date
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub near_earth_objects: HashMap<String, Vec<RawNeo>>,
}

/// A single near-Earth-object record as returned by the feed
#[derive(Debug, Clone, Deserialize)]
pub struct RawNeo {
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub estimated_diameter: Option<EstimatedDiameter>,
    #[serde(default)]
    pub close_approach_data: Option<Vec<CloseApproach>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EstimatedDiameter {
    #[serde(default)]
    pub meters: Option<DiameterRange>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiameterRange {
    pub estimated_diameter_min: f64,
    pub estimated_diameter_max: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CloseApproach {
    pub miss_distance: MissDistance,
    pub relative_velocity: RelativeVelocity,
}

/// The feed reports distances and velocities as decimal strings
#[derive(Debug, Clone, Deserialize)]
pub struct MissDistance {
    #[serde(deserialize_with = "string_or_number")]
    pub kilometers: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelativeVelocity {
    #[serde(deserialize_with = "string_or_number")]
    pub kilometers_per_second: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

impl From<TextOrNumber> for String {
    fn from(raw: TextOrNumber) -> Self {
        match raw {
            TextOrNumber::Text(s) => s,
            TextOrNumber::Number(n) => n.to_string(),
        }
    }
}

/// Accepts either a JSON string or a JSON number and yields its text form
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(TextOrNumber::deserialize(deserializer)?.into())
}

/// Like [`string_or_number`], with `null` read as an empty string
fn optional_string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<TextOrNumber>::deserialize(deserializer)?
        .map(String::from)
        .unwrap_or_default())
}

/// Reads `null` as the type's default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Source of near-Earth-object feed data
///
/// The query handler depends on this trait rather than on [`NeoWsClient`]
/// directly so it can be driven by a stub feed in tests.
#[async_trait]
pub trait NeoFeed: Send + Sync {
    /// Fetches the feed for a single calendar date
    async fn fetch_feed(&self, date: &str, api_key: &str) -> Result<FeedResponse, FeedError>;
}

/// Client for fetching data from the NeoWs feed endpoint
#[derive(Debug, Clone)]
pub struct NeoWsClient {
    client: Client,
    base_url: String,
}

impl Default for NeoWsClient {
    fn default() -> Self {
        Self::new()
    }
}

impl NeoWsClient {
    /// Create a new NeoWsClient pointed at the public NeoWs endpoint
    pub fn new() -> Self {
        Self::with_base_url(NEO_FEED_BASE_URL)
    }

    /// Create a new NeoWsClient with a custom feed URL (stub servers, mirrors)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Returns the feed URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl NeoFeed for NeoWsClient {
    /// Fetch the feed with `date` as both start and end of the range
    ///
    /// Single attempt, no retry and no timeout.
    async fn fetch_feed(&self, date: &str, api_key: &str) -> Result<FeedResponse, FeedError> {
        debug!(date, url = %self.base_url, "requesting NeoWs feed");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("start_date", date), ("end_date", date), ("api_key", api_key)])
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(match status {
                StatusCode::TOO_MANY_REQUESTS => FeedError::RateLimited,
                StatusCode::FORBIDDEN => FeedError::AccessDenied,
                other => FeedError::Upstream {
                    status: other.as_u16(),
                    status_text: other.canonical_reason().unwrap_or_default().to_string(),
                },
            });
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}
