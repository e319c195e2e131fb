use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::schema::cards;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

/// One gallery tile: enough to draw the dex grid without the full record.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CardSummary {
    pub id: String,
    pub common_name: String,
    pub category: String,
    pub rarity: String,
    /// Base64-encoded subject PNG
    pub subject_image: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListCardsResponse {
    pub cards: Vec<CardSummary>,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = cards)]
struct CardRow {
    id: String,
    common_name: String,
    category: String,
    rarity: String,
    subject_png: Vec<u8>,
    created_at: DateTime<Utc>,
}

#[utoipa::path(
    get,
    path = "/api/cards",
    tag = "cards",
    responses(
        (status = 200, description = "The caller's cards, newest first", body = ListCardsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_cards(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let rows: Vec<CardRow> = match cards::table
        .filter(cards::owner_id.eq(user.id))
        .order(cards::created_at.desc())
        .select(CardRow::as_select())
        .load(&mut conn)
    {
        Ok(rows) => rows,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to list cards".to_string(),
                }),
            )
                .into_response()
        }
    };

    let cards = rows
        .into_iter()
        .map(|row| CardSummary {
            id: row.id,
            common_name: row.common_name,
            category: row.category,
            rarity: row.rarity,
            subject_image: BASE64.encode(&row.subject_png),
            created_at: row.created_at,
        })
        .collect();

    (StatusCode::OK, Json(ListCardsResponse { cards })).into_response()
}
