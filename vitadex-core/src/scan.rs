//! The scan-to-card pipeline.
//!
//! One strictly sequential pass per request: extract metadata, derive the
//! record key, check the store, and only on a miss pay for the two image
//! generations before writing the record. The dedup check runs after
//! extraction (the key depends on extracted fields) and before any
//! generation call, which is the expensive step it guards.

use chrono::Utc;
use uuid::Uuid;

use crate::ai::AiClient;
use crate::error::ScanError;
use crate::extract::extract_species;
use crate::ident::card_id;
use crate::store::CardStore;
use crate::synth::generate_card_art;
use crate::types::{CardRecord, ScanRequest};

/// Outcome of one scan: the record plus whether it came from the store.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub record: CardRecord,
    pub cache_hit: bool,
}

/// Run the full pipeline for one scan request.
///
/// On a dedup hit the stored record is returned verbatim; records are
/// permanent, so there is no staleness check. Concurrent scans of the same
/// species may both miss and both write; the upsert semantic makes the
/// race harmless (last write wins). If persistence fails the generated
/// payloads are discarded and the error surfaces; the next identical
/// request starts from scratch.
pub async fn analyze_scan(
    ai: &dyn AiClient,
    store: &dyn CardStore,
    owner_id: Uuid,
    request: &ScanRequest,
) -> Result<ScanOutcome, ScanError> {
    let extraction = extract_species(ai, request).await?;
    let id = card_id(
        &extraction.metadata.common_name,
        &extraction.metadata.continent,
    );

    if let Some(existing) = store.get(&id).await? {
        tracing::info!(card_id = %id, "Scan resolved to existing card");
        return Ok(ScanOutcome {
            record: existing,
            cache_hit: true,
        });
    }

    let art = generate_card_art(ai, &extraction.metadata).await?;

    let record = CardRecord {
        id: id.clone(),
        metadata: extraction.metadata,
        background_png: art.background_png,
        subject_png: art.subject_png,
        html_card: extraction.html_card,
        owner_id,
        created_at: Utc::now(),
    };

    store.upsert(&record).await?;
    tracing::info!(card_id = %id, "Created card");

    Ok(ScanOutcome {
        record,
        cache_hit: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::FakeAiClient;
    use crate::error::{ExtractError, StoreError, SynthError};
    use crate::store::MemoryStore;
    use crate::types::ScanInput;
    use async_trait::async_trait;

    fn photo_request() -> ScanRequest {
        ScanRequest {
            input: ScanInput::Photo {
                base64: "aGVsbG8=".to_string(),
                media_type: "image/jpeg".to_string(),
            },
            latitude: 48.85,
            longitude: 2.35,
        }
    }

    fn owner() -> Uuid {
        Uuid::nil()
    }

    /// Store whose writes always fail, for the no-rollback path.
    #[derive(Debug, Default)]
    struct FailingStore;

    #[async_trait]
    impl CardStore for FailingStore {
        async fn get(&self, _id: &str) -> Result<Option<CardRecord>, StoreError> {
            Ok(None)
        }

        async fn upsert(&self, _record: &CardRecord) -> Result<(), StoreError> {
            Err(StoreError::Backend("write refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_first_scan_generates_and_persists() {
        let ai = FakeAiClient::default();
        let store = MemoryStore::new();

        let outcome = analyze_scan(&ai, &store, owner(), &photo_request())
            .await
            .unwrap();

        assert_eq!(outcome.record.id, "renard-roux_Europe");
        assert!(!outcome.cache_hit);
        assert_eq!(ai.image_calls(), 2);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_second_scan_is_idempotent_and_free() {
        let ai = FakeAiClient::default();
        let store = MemoryStore::new();

        let first = analyze_scan(&ai, &store, owner(), &photo_request())
            .await
            .unwrap();
        let second = analyze_scan(&ai, &store, owner(), &photo_request())
            .await
            .unwrap();

        assert_eq!(second.record.id, first.record.id);
        assert_eq!(
            second.record.metadata.common_name,
            first.record.metadata.common_name
        );
        assert!(second.cache_hit);
        // Extraction ran again; the billable generation step did not.
        assert_eq!(ai.extract_calls(), 2);
        assert_eq!(ai.image_calls(), 2);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_dedup_hit_keeps_original_owner() {
        let ai = FakeAiClient::default();
        let store = MemoryStore::new();
        let first_owner = Uuid::new_v4();
        let second_owner = Uuid::new_v4();

        analyze_scan(&ai, &store, first_owner, &photo_request())
            .await
            .unwrap();
        let outcome = analyze_scan(&ai, &store, second_owner, &photo_request())
            .await
            .unwrap();

        assert_eq!(outcome.record.owner_id, first_owner);
    }

    #[tokio::test]
    async fn test_malformed_extraction_writes_nothing() {
        let ai = FakeAiClient::with_extraction("{ not json");
        let store = MemoryStore::new();

        let err = analyze_scan(&ai, &store, owner(), &photo_request())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ScanError::Extraction(ExtractError::Malformed(_))
        ));
        assert!(store.is_empty());
        assert_eq!(ai.image_calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_extraction_writes_nothing() {
        let ai = FakeAiClient::with_empty_extraction();
        let store = MemoryStore::new();

        let err = analyze_scan(&ai, &store, owner(), &photo_request())
            .await
            .unwrap_err();

        assert!(matches!(err, ScanError::Extraction(ExtractError::Empty)));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_image_failure_is_terminal_and_writes_nothing() {
        let ai = FakeAiClient::default().failing_images();
        let store = MemoryStore::new();

        let err = analyze_scan(&ai, &store, owner(), &photo_request())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ScanError::ImageGeneration(SynthError::Generation(_))
        ));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_persistence_failure_surfaces_and_discards() {
        let ai = FakeAiClient::default();
        let store = FailingStore;

        let err = analyze_scan(&ai, &store, owner(), &photo_request())
            .await
            .unwrap_err();

        assert!(matches!(err, ScanError::Persistence(_)));
        // Generation happened; its output was simply dropped.
        assert_eq!(ai.image_calls(), 2);
    }

    #[tokio::test]
    async fn test_description_input_follows_the_same_path() {
        let ai = FakeAiClient::default();
        let store = MemoryStore::new();
        let request = ScanRequest {
            input: ScanInput::Description("a russet fox near a hedgerow".to_string()),
            latitude: 48.85,
            longitude: 2.35,
        };

        let outcome = analyze_scan(&ai, &store, owner(), &request).await.unwrap();
        assert_eq!(outcome.record.id, "renard-roux_Europe");
    }
}
