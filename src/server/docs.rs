//! OpenAPI document and the Swagger UI page that renders it.

use utoipa::OpenApi;

use crate::data::{NeoItem, NeoResponse};
use crate::server::dto::HealthResponse;
use crate::server::error::ErrorResponse;
use crate::server::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "NASA Dashboard API",
        version = "1.0.0",
        description = "Backend API for NASA Near Earth Objects dashboard"
    ),
    paths(handlers::health_check, handlers::get_neo),
    components(schemas(HealthResponse, NeoItem, NeoResponse, ErrorResponse)),
    tags(
        (name = "health", description = "Service health"),
        (name = "neo", description = "Near Earth Objects")
    )
)]
pub struct ApiDoc;

/// Swagger UI shell; assets come from the public CDN, the document from this server.
pub const SWAGGER_UI_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>NASA Dashboard API</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
  <script>
    window.ui = SwaggerUIBundle({
      url: "/docs/openapi.json",
      dom_id: "#swagger-ui",
      docExpansion: "list",
      deepLinking: false
    });
  </script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_both_routes() {
        let doc = serde_json::to_value(ApiDoc::openapi()).expect("serialize openapi");

        assert!(doc["paths"]["/health"]["get"].is_object());
        assert!(doc["paths"]["/api/neo"]["get"].is_object());
        assert_eq!(doc["info"]["title"], "NASA Dashboard API");
    }

    #[test]
    fn test_openapi_has_neo_schemas() {
        let doc = serde_json::to_value(ApiDoc::openapi()).expect("serialize openapi");
        let schemas = &doc["components"]["schemas"];

        assert!(schemas["NeoItem"].is_object());
        assert!(schemas["NeoResponse"].is_object());
        assert!(schemas["HealthResponse"].is_object());
    }

    #[test]
    fn test_swagger_page_points_at_document() {
        assert!(SWAGGER_UI_HTML.contains("/docs/openapi.json"));
        assert!(SWAGGER_UI_HTML.contains(r##"dom_id: "#swagger-ui""##));
        assert!(SWAGGER_UI_HTML.trim_end().ends_with("</html>"));
    }
}
