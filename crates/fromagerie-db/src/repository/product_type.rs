//! # Cheese Type Repository
//!
//! Database operations for product categories (soft, hard, blue, ...).
//! Small lookup table, so the API is deliberately minimal.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use fromagerie_core::ProductType;

/// Repository for cheese-type operations.
#[derive(Debug, Clone)]
pub struct ProductTypeRepository {
    pool: SqlitePool,
}

impl ProductTypeRepository {
    /// Creates a new ProductTypeRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductTypeRepository { pool }
    }

    /// Inserts a new cheese type. Names are unique.
    pub async fn insert(&self, cheese_type: &ProductType) -> DbResult<()> {
        debug!(id = %cheese_type.id, name = %cheese_type.name, "Inserting cheese type");

        sqlx::query("INSERT INTO product_types (id, name) VALUES (?, ?)")
            .bind(&cheese_type.id)
            .bind(&cheese_type.name)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Fetches a cheese type by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<ProductType> {
        sqlx::query_as::<_, ProductType>("SELECT * FROM product_types WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("ProductType", id))
    }

    /// Lists all cheese types alphabetically.
    pub async fn list(&self) -> DbResult<Vec<ProductType>> {
        let types =
            sqlx::query_as::<_, ProductType>("SELECT * FROM product_types ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(types)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_insert_list_and_get() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let soft = ProductType::new("soft");
        let hard = ProductType::new("hard");
        db.product_types().insert(&soft).await.unwrap();
        db.product_types().insert(&hard).await.unwrap();

        let all = db.product_types().list().await.unwrap();
        assert_eq!(
            all.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(),
            ["hard", "soft"]
        );

        let loaded = db.product_types().get_by_id(&soft.id).await.unwrap();
        assert_eq!(loaded.name, "soft");
    }

    #[tokio::test]
    async fn test_duplicate_name_is_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        db.product_types()
            .insert(&ProductType::new("blue"))
            .await
            .unwrap();
        let err = db
            .product_types()
            .insert(&ProductType::new("blue"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }
}
