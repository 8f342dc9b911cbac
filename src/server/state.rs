//! App state: query service, start time.

use std::sync::Arc;
use std::time::Instant;

use crate::cache::CacheManager;
use crate::config::ServerConfig;
use crate::data::NeoWsClient;
use crate::service::NeoService;

pub struct AppState {
    pub service: NeoService,
    pub started_at: Instant,
}

impl AppState {
    /// Wires the real feed client and a fresh cache from `config`
    pub fn new(config: &ServerConfig) -> Self {
        let feed = Arc::new(NeoWsClient::with_base_url(config.feed_url.clone()));
        let cache = Arc::new(CacheManager::new());
        Self::with_service(NeoService::new(feed, cache, config.api_key.clone()))
    }

    pub fn with_service(service: NeoService) -> Self {
        Self {
            service,
            started_at: Instant::now(),
        }
    }

    /// Seconds since this state was created
    pub fn uptime(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}
