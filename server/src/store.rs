//! Postgres-backed card store.

use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use crate::db::DbPool;
use crate::models::{Card, NewCard};
use crate::schema::cards;
use vitadex_core::{CardRecord, CardStore, StoreError};

/// [`CardStore`] over the shared connection pool.
#[derive(Clone)]
pub struct PgCardStore {
    pool: Arc<DbPool>,
}

impl PgCardStore {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CardStore for PgCardStore {
    async fn get(&self, id: &str) -> Result<Option<CardRecord>, StoreError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let row: Option<Card> = cards::table
            .find(id)
            .select(Card::as_select())
            .first(&mut conn)
            .optional()
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        row.map(|card| card.into_record().map_err(StoreError::Backend))
            .transpose()
    }

    async fn upsert(&self, record: &CardRecord) -> Result<(), StoreError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let new_card = NewCard::from_record(record);

        // Concurrent scans of the same species may race to this write; the
        // conflict arm makes the duplicate a merge instead of an error.
        diesel::insert_into(cards::table)
            .values(&new_card)
            .on_conflict(cards::id)
            .do_update()
            .set(&new_card)
            .execute(&mut conn)
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(())
    }
}
