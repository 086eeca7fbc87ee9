//! # Product Repository
//!
//! Database operations for catalog products.
//!
//! ## Key Operations
//! - CRUD with runtime-checked queries
//! - Filtered listing (name search, category, stock flag)
//! - Caller-chosen ordering
//!
//! ## Filtering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  ProductFilter { search, product_type_id, in_stock }                │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  WHERE name LIKE '%brynza%'                                         │
//! │    AND product_type_id = ?                                          │
//! │    AND in_stock = ?                                                 │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ORDER BY <ProductOrder>  (name | price | newest)                   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//! Missing filter fields simply drop out of the WHERE clause.

use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use fromagerie_core::Product;

/// Optional listing filters. Every field is independent: `None` means
/// "don't filter on this".
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Case-insensitive substring match on the product name.
    pub search: Option<String>,

    /// Restrict to one cheese type.
    pub product_type_id: Option<String>,

    /// Restrict by availability.
    pub in_stock: Option<bool>,
}

/// Sort order for product listings.
///
/// A closed enum instead of a raw ORDER BY string, so callers can never
/// smuggle SQL through the sort parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductOrder {
    /// Alphabetical by name (default).
    #[default]
    Name,
    /// Reverse alphabetical.
    NameDesc,
    /// Cheapest base price first.
    PriceAsc,
    /// Most expensive base price first.
    PriceDesc,
    /// Oldest production date first.
    ProductionAsc,
    /// Freshest production date first.
    ProductionDesc,
}

impl ProductOrder {
    fn sql(&self) -> &'static str {
        match self {
            ProductOrder::Name => "name ASC",
            ProductOrder::NameDesc => "name DESC",
            ProductOrder::PriceAsc => "base_price_cents ASC",
            ProductOrder::PriceDesc => "base_price_cents DESC",
            ProductOrder::ProductionAsc => "production_date ASC",
            ProductOrder::ProductionDesc => "production_date DESC",
        }
    }
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let brynza = repo.get_by_id("uuid-here").await?;
/// let soft = repo
///     .list(&ProductFilter { product_type_id: Some(soft_id), ..Default::default() },
///           ProductOrder::PriceAsc)
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a new product.
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, name = %product.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, base_price_cents,
                small_opt_price_cents, small_opt_min_qty,
                big_opt_price_cents, big_opt_min_qty,
                weight_grams, product_type_id, in_stock,
                production_date, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(product.base_price_cents)
        .bind(product.small_opt_price_cents)
        .bind(product.small_opt_min_qty)
        .bind(product.big_opt_price_cents)
        .bind(product.big_opt_min_qty)
        .bind(product.weight_grams)
        .bind(&product.product_type_id)
        .bind(product.in_stock)
        .bind(product.production_date)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an existing product. All columns are overwritten; the
    /// caller is expected to have loaded the current row first.
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?,
                base_price_cents = ?,
                small_opt_price_cents = ?,
                small_opt_min_qty = ?,
                big_opt_price_cents = ?,
                big_opt_min_qty = ?,
                weight_grams = ?,
                product_type_id = ?,
                in_stock = ?,
                production_date = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&product.name)
        .bind(product.base_price_cents)
        .bind(product.small_opt_price_cents)
        .bind(product.small_opt_min_qty)
        .bind(product.big_opt_price_cents)
        .bind(product.big_opt_min_qty)
        .bind(product.weight_grams)
        .bind(&product.product_type_id)
        .bind(product.in_stock)
        .bind(product.production_date)
        .bind(product.updated_at)
        .bind(&product.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", &product.id));
        }
        Ok(())
    }

    /// Deletes a product. Line items referencing it cascade away, which
    /// silently re-prices any batch that contained it.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }
        Ok(())
    }

    /// Fetches a product by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Product> {
        sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Lists products matching `filter`, sorted by `order`.
    pub async fn list(&self, filter: &ProductFilter, order: ProductOrder) -> DbResult<Vec<Product>> {
        debug!(?filter, ?order, "Listing products");

        let mut builder: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new("SELECT * FROM products WHERE 1 = 1");

        if let Some(search) = filter.search.as_deref().map(str::trim) {
            if !search.is_empty() {
                builder.push(" AND name LIKE ");
                builder.push_bind(format!("%{search}%"));
            }
        }
        if let Some(type_id) = &filter.product_type_id {
            builder.push(" AND product_type_id = ");
            builder.push_bind(type_id);
        }
        if let Some(in_stock) = filter.in_stock {
            builder.push(" AND in_stock = ");
            builder.push_bind(in_stock);
        }

        builder.push(" ORDER BY ");
        builder.push(order.sql());

        let products = builder
            .build_query_as::<Product>()
            .fetch_all(&self.pool)
            .await?;

        debug!(count = products.len(), "Listing returned products");
        Ok(products)
    }

    /// Counts all products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
