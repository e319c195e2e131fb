pub mod analyze;

use crate::AppState;
use axum::routing::post;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for the scan pipeline entry (mounted at /api/scan)
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(analyze::analyze))
}

#[derive(OpenApi)]
#[openapi(
    paths(analyze::analyze),
    components(schemas(analyze::AnalyzeScanRequest, analyze::AnalyzeScanResponse))
)]
pub struct ApiDoc;
