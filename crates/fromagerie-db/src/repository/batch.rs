//! # Batch Repository
//!
//! Database operations for draft orders and their line items.
//!
//! ## Data Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  batches                      batch_items                           │
//! │  ┌──────────────────┐         ┌──────────────────────────┐          │
//! │  │ id               │────┐    │ id                       │          │
//! │  │ manager_id ──► users│  └───►│ batch_id                 │          │
//! │  │ created_at       │         │ product_id ──► products  │          │
//! │  └──────────────────┘         │ quantity                 │          │
//! │                               └──────────────────────────┘          │
//! │                                                                     │
//! │  No totals columns anywhere: each read joins the CURRENT product    │
//! │  rows and recomputes. Deleting a batch or a product cascades into   │
//! │  batch_items.                                                       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use fromagerie_core::{Batch, BatchItem, Product};

/// Repository for batch and batch-item operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = BatchRepository::new(pool);
///
/// let batch = Batch::new(&manager.id);
/// repo.create(&batch).await?;
/// repo.add_item(&BatchItem::new(&batch.id, &brynza.id, 7)).await?;
/// let lines = repo.list_items_with_products(&batch.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct BatchRepository {
    pool: SqlitePool,
}

impl BatchRepository {
    /// Creates a new BatchRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BatchRepository { pool }
    }

    // -------------------------------------------------------------------------
    // Batches
    // -------------------------------------------------------------------------

    /// Inserts a new (empty) batch.
    pub async fn create(&self, batch: &Batch) -> DbResult<()> {
        debug!(id = %batch.id, manager_id = %batch.manager_id, "Creating batch");

        sqlx::query("INSERT INTO batches (id, manager_id, created_at) VALUES (?, ?, ?)")
            .bind(&batch.id)
            .bind(&batch.manager_id)
            .bind(batch.created_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Fetches a batch by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Batch> {
        sqlx::query_as::<_, Batch>("SELECT * FROM batches WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("Batch", id))
    }

    /// Lists one manager's batches, newest first.
    pub async fn list_for_manager(&self, manager_id: &str) -> DbResult<Vec<Batch>> {
        let batches = sqlx::query_as::<_, Batch>(
            "SELECT * FROM batches WHERE manager_id = ? ORDER BY created_at DESC",
        )
        .bind(manager_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(batches)
    }

    /// Lists every batch, newest first. Admin-only view.
    pub async fn list_all(&self) -> DbResult<Vec<Batch>> {
        let batches =
            sqlx::query_as::<_, Batch>("SELECT * FROM batches ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(batches)
    }

    /// Deletes a batch. Its line items cascade away.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting batch");

        let result = sqlx::query("DELETE FROM batches WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Batch", id));
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Batch Items
    // -------------------------------------------------------------------------

    /// Inserts a line item.
    pub async fn add_item(&self, item: &BatchItem) -> DbResult<()> {
        debug!(
            batch_id = %item.batch_id,
            product_id = %item.product_id,
            quantity = item.quantity,
            "Adding batch item"
        );

        sqlx::query(
            "INSERT INTO batch_items (id, batch_id, product_id, quantity, created_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&item.id)
        .bind(&item.batch_id)
        .bind(&item.product_id)
        .bind(item.quantity)
        .bind(item.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Fetches a single line item.
    pub async fn get_item(&self, item_id: &str) -> DbResult<BatchItem> {
        sqlx::query_as::<_, BatchItem>("SELECT * FROM batch_items WHERE id = ?")
            .bind(item_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("BatchItem", item_id))
    }

    /// Updates a line item's quantity.
    pub async fn update_item_quantity(&self, item_id: &str, quantity: i64) -> DbResult<()> {
        let result = sqlx::query("UPDATE batch_items SET quantity = ? WHERE id = ?")
            .bind(quantity)
            .bind(item_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("BatchItem", item_id));
        }
        Ok(())
    }

    /// Deletes a line item.
    pub async fn delete_item(&self, item_id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM batch_items WHERE id = ?")
            .bind(item_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("BatchItem", item_id));
        }
        Ok(())
    }

    /// Lists a batch's line items in insertion order.
    pub async fn list_items(&self, batch_id: &str) -> DbResult<Vec<BatchItem>> {
        let items = sqlx::query_as::<_, BatchItem>(
            "SELECT * FROM batch_items WHERE batch_id = ? ORDER BY created_at ASC, id ASC",
        )
        .bind(batch_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    /// Lists a batch's line items joined with their current product rows.
    ///
    /// This is the read the load-bearing totals are computed from, so it
    /// must reflect prices as stored right now.
    pub async fn list_items_with_products(
        &self,
        batch_id: &str,
    ) -> DbResult<Vec<(BatchItem, Product)>> {
        let items = self.list_items(batch_id).await?;
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new("SELECT * FROM products WHERE id IN (");
        let mut separated = builder.separated(", ");
        for item in &items {
            separated.push_bind(&item.product_id);
        }
        separated.push_unseparated(")");

        let products = builder
            .build_query_as::<Product>()
            .fetch_all(&self.pool)
            .await?;

        let by_id: HashMap<String, Product> = products
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect();

        // Several lines may reference the same product, so look up by
        // clone instead of consuming the map. FK guarantees every item
        // has its product row.
        items
            .into_iter()
            .map(|item| {
                let product_id = item.product_id.clone();
                by_id
                    .get(&product_id)
                    .cloned()
                    .map(|product| (item, product))
                    .ok_or_else(|| DbError::not_found("Product", product_id))
            })
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
