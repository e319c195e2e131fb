pub mod auth;
pub mod ping;

use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for the unauthenticated endpoints
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/signup", post(auth::signup::signup))
        .route("/api/auth/login", post(auth::login::login))
        .route("/api/test/unauthed-ping", get(ping::unauthed_ping))
}

#[derive(OpenApi)]
#[openapi(
    paths(auth::signup::signup, auth::login::login, ping::unauthed_ping),
    components(schemas(
        auth::signup::SignupRequest,
        auth::signup::SignupResponse,
        auth::login::LoginRequest,
        auth::login::LoginResponse,
        ping::UnauthedPingResponse,
    ))
)]
pub struct ApiDoc;
