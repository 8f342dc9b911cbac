//! Core data models for neowatch
//!
//! This module contains the near-Earth-object types shared by the proxy server
//! and the dashboard, plus the upstream feed client and its transformation.

pub mod fallback;
pub mod feed;
pub mod transform;

pub use fallback::{sample_response, SampleLabel};
pub use feed::{FeedError, FeedResponse, NeoFeed, NeoWsClient};
pub use transform::{to_neo_item, to_neo_response};

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use utoipa::ToSchema;

/// Parses a strict `YYYY-MM-DD` calendar date
///
/// Rejects unpadded forms such as `2024-1-1` that chrono would otherwise accept.
pub fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    let bytes = s.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// A single near-Earth object as shown in the dashboard table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NeoItem {
    /// Upstream identifier, unique per object within one response
    pub id: String,
    /// Designation of the object
    pub name: String,
    /// Mean of the estimated min/max diameter in meters
    pub size_meters: f64,
    /// Closest approach distance in kilometers, infinite when unknown
    #[serde(
        serialize_with = "serialize_non_finite_as_null",
        deserialize_with = "deserialize_null_as_infinity"
    )]
    #[schema(value_type = Option<f64>)]
    pub miss_distance_km: f64,
    /// Relative velocity at closest approach in km/s
    pub relative_velocity_kps: f64,
}

/// All near-Earth objects for one calendar date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NeoResponse {
    /// Calendar date in `YYYY-MM-DD` format
    pub date: String,
    /// Objects in upstream order
    pub objects: Vec<NeoItem>,
}

/// Columns of [`NeoItem`] the dashboard can sort by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    SizeMeters,
    MissDistanceKm,
    RelativeVelocityKps,
}

impl NeoItem {
    /// Returns the numeric value of the given sort column
    pub fn value(&self, key: SortKey) -> f64 {
        match key {
            SortKey::SizeMeters => self.size_meters,
            SortKey::MissDistanceKm => self.miss_distance_km,
            SortKey::RelativeVelocityKps => self.relative_velocity_kps,
        }
    }
}

/// JSON has no infinity, so non-finite distances go over the wire as `null`.
fn serialize_non_finite_as_null<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else {
        serializer.serialize_none()
    }
}

fn deserialize_null_as_infinity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
}
