//! Near-Earth-object query handling
//!
//! `NeoService` answers "what passes Earth on this date" by combining the
//! response cache, the upstream feed and the fixed sample data. It never fails:
//! every upstream problem degrades to sample data, and the degrade reason is
//! kept in the returned [`NeoOutcome`] so callers can log or assert on it.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cache::{cache_key, CacheManager};
use crate::data::{sample_response, to_neo_response, FeedError, NeoFeed, NeoResponse, SampleLabel};

/// Credential sent to the feed unless configured otherwise
pub const DEMO_API_KEY: &str = "DEMO_KEY";

/// Why a query was answered with sample data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DegradeReason {
    /// Upstream answered 429
    RateLimited,
    /// Any other upstream, network or parse failure, with its message
    UpstreamFailure(String),
}

/// Result of a query
#[derive(Debug, Clone, PartialEq)]
pub enum NeoOutcome {
    /// Real upstream data, fresh or replayed from cache
    Success(NeoResponse),
    /// Sample data standing in for a failed upstream call
    Degraded(NeoResponse, DegradeReason),
}

impl NeoOutcome {
    /// The response to send, whichever way it was produced
    pub fn response(&self) -> &NeoResponse {
        match self {
            NeoOutcome::Success(response) | NeoOutcome::Degraded(response, _) => response,
        }
    }

    pub fn into_response(self) -> NeoResponse {
        match self {
            NeoOutcome::Success(response) | NeoOutcome::Degraded(response, _) => response,
        }
    }

    pub fn degrade_reason(&self) -> Option<&DegradeReason> {
        match self {
            NeoOutcome::Success(_) => None,
            NeoOutcome::Degraded(_, reason) => Some(reason),
        }
    }
}

/// Orchestrates cache lookup, feed access and fallback selection
pub struct NeoService {
    feed: Arc<dyn NeoFeed>,
    cache: Arc<CacheManager<NeoResponse>>,
    api_key: String,
}

impl NeoService {
    /// Creates a service over the given feed and cache
    pub fn new(feed: Arc<dyn NeoFeed>, cache: Arc<CacheManager<NeoResponse>>, api_key: impl Into<String>) -> Self {
        Self {
            feed,
            cache,
            api_key: api_key.into(),
        }
    }

    /// Shared handle to the response cache
    pub fn cache(&self) -> &Arc<CacheManager<NeoResponse>> {
        &self.cache
    }

    /// Returns the near-Earth objects for `date`
    ///
    /// `date` must already be a validated `YYYY-MM-DD` string.
    ///
    /// # Behavior
    /// - A fresh cache entry is returned verbatim without touching the feed
    /// - Otherwise the feed is called once
    /// - 429 stores and returns the "Rate Limited" samples
    /// - Any other failure stores and returns the "API Error" samples
    /// - Success maps the records for `date`, stores and returns them
    ///
    /// Sample data is cached like real data and replayed until it goes stale.
    pub async fn query(&self, date: &str) -> NeoOutcome {
        let key = cache_key(date, &self.api_key);

        if let Some(cached) = self.cache.lookup(&key) {
            if !cached.is_expired {
                debug!(date, cached_at = %cached.cached_at, "serving NEO data from cache");
                return NeoOutcome::Success(cached.data);
            }
        }

        info!(date, "fetching NEO feed");

        match self.feed.fetch_feed(date, &self.api_key).await {
            Ok(feed) => {
                let response = to_neo_response(date, &feed);
                info!(date, objects = response.objects.len(), "NEO feed fetched");
                self.cache.store(&key, response.clone());
                NeoOutcome::Success(response)
            }
            Err(FeedError::RateLimited) => {
                warn!(date, "NEO feed rate limited, serving sample data");
                let response = sample_response(date, SampleLabel::RateLimited);
                self.cache.store(&key, response.clone());
                NeoOutcome::Degraded(response, DegradeReason::RateLimited)
            }
            Err(err) => {
                warn!(date, error = %err, "NEO feed failed, serving sample data");
                let response = sample_response(date, SampleLabel::ApiError);
                self.cache.store(&key, response.clone());
                NeoOutcome::Degraded(response, DegradeReason::UpstreamFailure(err.to_string()))
            }
        }
    }
}
