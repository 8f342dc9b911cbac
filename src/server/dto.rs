//! Request and response DTOs that are specific to the HTTP surface.
//!
//! [`NeoResponse`](crate::data::NeoResponse) is served as-is and lives with the
//! domain models.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::data::parse_calendar_date;
use crate::server::error::ApiError;

/// Query string for `GET /api/neo`
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NeoQuery {
    /// Calendar date in `YYYY-MM-DD` format (required)
    pub date: Option<String>,
}

impl NeoQuery {
    /// Returns the date if present and well-formed
    pub fn validated_date(self) -> Result<String, ApiError> {
        let date = self
            .date
            .ok_or_else(|| ApiError::bad_request("querystring must have required property 'date'"))?;

        if parse_calendar_date(&date).is_none() {
            return Err(ApiError::bad_request(format!(
                "querystring/date must match format \"date\" (YYYY-MM-DD), got '{}'",
                date
            )));
        }

        Ok(date)
    }
}

/// Body of `GET /health`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    /// Seconds since the server started
    pub uptime: f64,
}
