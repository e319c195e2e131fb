pub mod get;
pub mod list;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/cards endpoints (mounted at /api/cards)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_cards))
        .route("/{id}", get(get::get_card))
}

#[derive(OpenApi)]
#[openapi(
    paths(list::list_cards, get::get_card),
    components(schemas(
        list::ListCardsResponse,
        list::CardSummary,
        get::CardResponse,
    ))
)]
pub struct ApiDoc;
