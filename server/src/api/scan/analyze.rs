use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::store::PgCardStore;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::{ImageFormat, ImageReader};
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use utoipa::ToSchema;
use vitadex_core::ai::create_client_from_env;
use vitadex_core::{ScanInput, ScanRequest, SpeciesMetadata};

/// Photo formats a scan may upload.
const ALLOWED_FORMATS: &[ImageFormat] = &[
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::Gif,
    ImageFormat::WebP,
];

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AnalyzeScanRequest {
    /// Base64-encoded photo of the sighted organism
    #[serde(default)]
    pub image_base64: Option<String>,
    /// Free-text description, as an alternative to a photo
    #[serde(default)]
    pub text_description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AnalyzeScanResponse {
    /// Derived card id (slugified common name + continent)
    pub id: String,
    #[schema(value_type = Object)]
    pub metadata: SpeciesMetadata,
    /// Base64-encoded background PNG
    pub background_image: String,
    /// Base64-encoded subject PNG
    pub subject_image: String,
    pub html_card_markup: Option<String>,
}

/// Validate the wire body into the pipeline's tagged input.
///
/// Exactly one of photo/description plus both coordinates, checked before
/// any outbound model call is issued.
fn parse_scan_request(req: &AnalyzeScanRequest) -> Result<ScanRequest, String> {
    let (latitude, longitude) = match (req.latitude, req.longitude) {
        (Some(latitude), Some(longitude)) => (latitude, longitude),
        _ => return Err("Missing parameters".to_string()),
    };

    let image = req
        .image_base64
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let description = req
        .text_description
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let input = match (image, description) {
        (Some(base64), None) => {
            let bytes = BASE64
                .decode(base64)
                .map_err(|_| "image_base64 is not valid base64".to_string())?;
            let media_type = sniff_media_type(&bytes)?;
            ScanInput::Photo {
                base64: base64.to_string(),
                media_type,
            }
        }
        (None, Some(text)) => ScanInput::Description(text.to_string()),
        _ => return Err("Missing parameters".to_string()),
    };

    Ok(ScanRequest {
        input,
        latitude,
        longitude,
    })
}

/// Detect the photo's media type from magic bytes and check the allow-list.
fn sniff_media_type(data: &[u8]) -> Result<String, String> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| format!("Failed to read image: {}", e))?;

    let format = reader
        .format()
        .ok_or_else(|| "Could not detect image format".to_string())?;

    if !ALLOWED_FORMATS.contains(&format) {
        return Err(format!(
            "Unsupported image format: {:?}. Allowed: JPEG, PNG, GIF, WebP",
            format
        ));
    }

    Ok(format.to_mime_type().to_string())
}

#[utoipa::path(
    post,
    path = "/api/scan",
    tag = "scan",
    request_body = AnalyzeScanRequest,
    responses(
        (status = 200, description = "Card created or resolved from the store", body = AnalyzeScanResponse),
        (status = 400, description = "Missing or invalid parameters", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Extraction, generation, persistence or configuration failure", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn analyze(
    AuthUser(user): AuthUser,
    State(pool): State<AppState>,
    Json(request): Json<AnalyzeScanRequest>,
) -> impl IntoResponse {
    let scan_request = match parse_scan_request(&request) {
        Ok(r) => r,
        Err(message) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse { error: message }),
            )
                .into_response()
        }
    };

    // Constructed per request so a missing credential is a request-scoped
    // failure, not a startup crash.
    let ai = match create_client_from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("AI client unavailable: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response();
        }
    };

    tracing::debug!(provider = ai.provider_name(), "Running scan pipeline");

    let store = PgCardStore::new(pool.clone());

    match vitadex_core::scan::analyze_scan(ai.as_ref(), &store, user.id, &scan_request).await {
        Ok(outcome) => {
            tracing::info!(
                card_id = %outcome.record.id,
                cache_hit = outcome.cache_hit,
                "Scan analyzed"
            );
            let record = outcome.record;
            (
                StatusCode::OK,
                Json(AnalyzeScanResponse {
                    id: record.id,
                    metadata: record.metadata,
                    background_image: BASE64.encode(&record.background_png),
                    subject_image: BASE64.encode(&record.subject_png),
                    html_card_markup: record.html_card,
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Scan pipeline failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitadex_core::ai::TINY_PNG;

    fn body(
        image: Option<&str>,
        text: Option<&str>,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> AnalyzeScanRequest {
        AnalyzeScanRequest {
            image_base64: image.map(str::to_string),
            text_description: text.map(str::to_string),
            latitude,
            longitude,
        }
    }

    #[test]
    fn test_rejects_missing_coordinates() {
        let req = body(None, Some("a fox"), None, Some(2.35));
        assert_eq!(parse_scan_request(&req).unwrap_err(), "Missing parameters");

        let req = body(None, Some("a fox"), Some(48.85), None);
        assert_eq!(parse_scan_request(&req).unwrap_err(), "Missing parameters");
    }

    #[test]
    fn test_rejects_missing_and_conflicting_inputs() {
        let req = body(None, None, Some(48.85), Some(2.35));
        assert_eq!(parse_scan_request(&req).unwrap_err(), "Missing parameters");

        let png = BASE64.encode(TINY_PNG);
        let req = body(Some(&png), Some("a fox"), Some(48.85), Some(2.35));
        assert_eq!(parse_scan_request(&req).unwrap_err(), "Missing parameters");
    }

    #[test]
    fn test_blank_strings_count_as_absent() {
        let req = body(Some("   "), Some(""), Some(48.85), Some(2.35));
        assert_eq!(parse_scan_request(&req).unwrap_err(), "Missing parameters");
    }

    #[test]
    fn test_accepts_description_input() {
        let req = body(None, Some("a russet fox"), Some(48.85), Some(2.35));
        let parsed = parse_scan_request(&req).unwrap();
        assert!(matches!(parsed.input, ScanInput::Description(ref d) if d == "a russet fox"));
        assert_eq!(parsed.latitude, 48.85);
    }

    #[test]
    fn test_accepts_png_photo_and_sniffs_media_type() {
        let png = BASE64.encode(TINY_PNG);
        let req = body(Some(&png), None, Some(48.85), Some(2.35));
        let parsed = parse_scan_request(&req).unwrap();
        match parsed.input {
            ScanInput::Photo { media_type, .. } => assert_eq!(media_type, "image/png"),
            other => panic!("expected photo input, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_invalid_base64() {
        let req = body(Some("!!not-base64!!"), None, Some(48.85), Some(2.35));
        let err = parse_scan_request(&req).unwrap_err();
        assert!(err.contains("base64"));
    }

    #[test]
    fn test_rejects_non_image_payload() {
        let blob = BASE64.encode(b"just some text, not an image");
        let req = body(Some(&blob), None, Some(48.85), Some(2.35));
        assert!(parse_scan_request(&req).is_err());
    }
}
