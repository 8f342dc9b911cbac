//! Dashboard fetch wrapper for the proxy's `/api/neo` endpoint

use reqwest::Client;
use thiserror::Error;

use crate::data::NeoResponse;

/// Server the dashboard talks to unless told otherwise
pub const DEFAULT_SERVER_URL: &str = "http://localhost:4000";

/// Errors that can occur when fetching from the proxy
#[derive(Debug, Error)]
pub enum ClientError {
    /// The proxy answered with a non-success status
    #[error("Failed to fetch NEOs: {status} {body}")]
    Status { status: u16, body: String },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The body was not a valid NEO response
    #[error("Failed to parse NEO response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Client for the proxy's near-Earth-object endpoint
#[derive(Debug, Clone)]
pub struct NeoClient {
    client: Client,
    base_url: String,
}

impl Default for NeoClient {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER_URL)
    }
}

impl NeoClient {
    /// Create a new NeoClient for the proxy at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the objects for `date`
    ///
    /// # Returns
    /// * `Ok(NeoResponse)` - on a 2xx answer
    /// * `Err(ClientError::Status)` - with the status and body text otherwise
    pub async fn fetch_neo(&self, date: &str) -> Result<NeoResponse, ClientError> {
        let url = format!("{}/api/neo", self.base_url);

        let response = self.client.get(&url).query(&[("date", date)]).send().await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_trailing_slash_is_trimmed() {
        assert_eq!(NeoClient::new("http://localhost:4000/").base_url(), "http://localhost:4000");
    }

    #[tokio::test]
    async fn test_fetch_neo_decodes_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/neo"))
            .and(query_param("date", "2024-01-01"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"date":"2024-01-01","objects":[{"id":"1","name":"Test Rock","sizeMeters":0,"missDistanceKm":null,"relativeVelocityKps":0}]}"#,
            ))
            .mount(&server)
            .await;

        let response = NeoClient::new(server.uri()).fetch_neo("2024-01-01").await.expect("fetch");

        assert_eq!(response.date, "2024-01-01");
        assert_eq!(response.objects[0].name, "Test Rock");
        assert!(response.objects[0].miss_distance_km.is_infinite());
    }

    #[tokio::test]
    async fn test_fetch_neo_reports_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad date"))
            .mount(&server)
            .await;

        let err = NeoClient::new(server.uri())
            .fetch_neo("2024-01-01")
            .await
            .expect_err("should fail");

        assert_eq!(err.to_string(), "Failed to fetch NEOs: 400 bad date");
    }

    #[tokio::test]
    async fn test_non_json_success_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;

        let err = NeoClient::new(server.uri())
            .fetch_neo("2024-01-01")
            .await
            .expect_err("should fail");

        assert!(matches!(err, ClientError::Decode(_)));
    }
}
