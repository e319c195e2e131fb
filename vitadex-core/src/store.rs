//! Record store abstraction.
//!
//! The pipeline only sees this trait; the server provides the Postgres
//! implementation and tests use [`MemoryStore`].

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::StoreError;
use crate::types::CardRecord;

/// Store of card records keyed by the derived id.
#[async_trait]
pub trait CardStore: Send + Sync {
    /// Fetch a record by derived id.
    async fn get(&self, id: &str) -> Result<Option<CardRecord>, StoreError>;

    /// Write a record, merging over any concurrent writer's row for the
    /// same key (last write wins per field). Never fails on a duplicate.
    async fn upsert(&self, record: &CardRecord) -> Result<(), StoreError>;
}

/// In-memory store for tests and in-process use.
#[derive(Debug, Default)]
pub struct MemoryStore {
    cards: RwLock<HashMap<String, CardRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.cards.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.read().unwrap().is_empty()
    }
}

#[async_trait]
impl CardStore for MemoryStore {
    async fn get(&self, id: &str) -> Result<Option<CardRecord>, StoreError> {
        Ok(self.cards.read().unwrap().get(id).cloned())
    }

    async fn upsert(&self, record: &CardRecord) -> Result<(), StoreError> {
        self.cards
            .write()
            .unwrap()
            .insert(record.id.clone(), record.clone());
        Ok(())
    }
}
