use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::Card;
use crate::schema::cards;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;
use vitadex_core::SpeciesMetadata;

/// The full record the card-render screen consumes.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CardResponse {
    pub id: String,
    #[schema(value_type = Object)]
    pub metadata: SpeciesMetadata,
    /// Base64-encoded background PNG
    pub background_image: String,
    /// Base64-encoded subject PNG
    pub subject_image: String,
    pub html_card_markup: Option<String>,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[utoipa::path(
    get,
    path = "/api/cards/{id}",
    tag = "cards",
    params(
        ("id" = String, Path, description = "Derived card id")
    ),
    responses(
        (status = 200, description = "Card details", body = CardResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Card not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_card(
    AuthUser(_user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    // Deliberately not owner-filtered: dedup is global by derived key, so
    // a scan can resolve to a record first written by another user, and
    // its render screen still needs to load it.
    let card: Card = match cards::table
        .find(id.as_str())
        .select(Card::as_select())
        .first(&mut conn)
    {
        Ok(c) => c,
        Err(diesel::NotFound) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "Card not found".to_string(),
                }),
            )
                .into_response()
        }
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch card".to_string(),
                }),
            )
                .into_response()
        }
    };

    let record = match card.into_record() {
        Ok(r) => r,
        Err(e) => {
            tracing::error!(card_id = %id, "Corrupt card row: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch card".to_string(),
                }),
            )
                .into_response();
        }
    };

    let response = CardResponse {
        id: record.id,
        metadata: record.metadata,
        background_image: BASE64.encode(&record.background_png),
        subject_image: BASE64.encode(&record.subject_png),
        html_card_markup: record.html_card,
        owner_id: record.owner_id,
        created_at: record.created_at,
    };

    (StatusCode::OK, Json(response)).into_response()
}
