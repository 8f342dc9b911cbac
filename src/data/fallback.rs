//! Fixed sample data served when the feed is unavailable

use super::{NeoItem, NeoResponse};

/// Which failure the sample data stands in for; shows up in the object names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleLabel {
    RateLimited,
    ApiError,
}

impl SampleLabel {
    fn as_str(self) -> &'static str {
        match self {
            SampleLabel::RateLimited => "Rate Limited",
            SampleLabel::ApiError => "API Error",
        }
    }
}

/// (size m, miss distance km, velocity km/s) per sample asteroid
const SAMPLES: [(f64, f64, f64); 2] = [(150.0, 5_000_000.0, 15.2), (75.0, 12_000_000.0, 8.7)];

/// Builds the two-object sample response for `date`
pub fn sample_response(date: &str, label: SampleLabel) -> NeoResponse {
    let objects = SAMPLES
        .iter()
        .enumerate()
        .map(|(i, &(size_meters, miss_distance_km, relative_velocity_kps))| NeoItem {
            id: format!("sample-{}", i + 1),
            name: format!("(Sample Asteroid {}) - {}", i + 1, label.as_str()),
            size_meters,
            miss_distance_km,
            relative_velocity_kps,
        })
        .collect();

    NeoResponse {
        date: date.to_string(),
        objects,
    }
}
