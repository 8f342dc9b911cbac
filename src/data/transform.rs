//! Mapping from raw feed records to dashboard items

use super::feed::{FeedResponse, RawNeo};
use super::{NeoItem, NeoResponse};

/// Builds the response for `date` from a feed payload
///
/// A feed without an entry for `date` yields an empty object list.
pub fn to_neo_response(date: &str, feed: &FeedResponse) -> NeoResponse {
    let objects = feed
        .near_earth_objects
        .get(date)
        .map(|records| records.iter().map(to_neo_item).collect())
        .unwrap_or_default();

    NeoResponse {
        date: date.to_string(),
        objects,
    }
}

/// Maps one feed record to a [`NeoItem`]
///
/// Only the first close-approach entry is considered.
pub fn to_neo_item(raw: &RawNeo) -> NeoItem {
    let size_meters = raw
        .estimated_diameter
        .as_ref()
        .and_then(|d| d.meters.as_ref())
        .map(|m| (m.estimated_diameter_min + m.estimated_diameter_max) / 2.0)
        .unwrap_or(0.0);

    let approach = raw
        .close_approach_data
        .as_ref()
        .and_then(|data| data.first());

    let miss_distance_km = approach
        .map(|a| parse_decimal(&a.miss_distance.kilometers))
        .unwrap_or(f64::INFINITY);
    let relative_velocity_kps = approach
        .map(|a| parse_decimal(&a.relative_velocity.kilometers_per_second))
        .unwrap_or(0.0);

    NeoItem {
        id: raw.id.clone(),
        name: raw.name.clone(),
        size_meters,
        miss_distance_km,
        relative_velocity_kps,
    }
}

/// Unparseable decimals become NaN rather than failing the whole record
fn parse_decimal(text: &str) -> f64 {
    text.trim().parse().unwrap_or(f64::NAN)
}
