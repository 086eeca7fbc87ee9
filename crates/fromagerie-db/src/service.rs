//! # Catalog Service
//!
//! Use-case orchestration: every operation authorizes first, validates
//! second, and only then touches a repository.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  HTTP / UI layer (out of scope)                                     │
//! │       │  actor resolved from the session                            │
//! │       ▼                                                             │
//! │  Catalog::add_batch_item(actor, batch_id, product_id, qty)          │
//! │       │                                                             │
//! │       ├── 1. load batch → find its owner                            │
//! │       ├── 2. access::authorize(actor, owner, EditBatch)             │
//! │       ├── 3. validation::validate_quantity(qty)                     │
//! │       ├── 4. verify the product exists                              │
//! │       └── 5. BatchRepository::add_item                              │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Result<BatchItem, ServiceError>                                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Batch totals are assembled fresh on every read: line items only store
//! (product_id, quantity), so a product price edit re-prices every draft
//! that contains it the next time someone looks.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use fromagerie_core::access::{self, Action};
use fromagerie_core::batch::{aggregate_batch, BatchLine, BatchTotals};
use fromagerie_core::{
    pricing, validation, Batch, BatchItem, CoreError, LineQuote, Product, Role, User,
};

use crate::error::DbError;
use crate::pool::Database;
use crate::repository::product::{ProductFilter, ProductOrder};

// =============================================================================
// Errors
// =============================================================================

/// Failures surfaced by catalog use-cases.
///
/// Core errors carry denials and rejected input; database errors carry
/// missing rows and constraint violations. The request layer maps them
/// onto status codes (PermissionDenied → 403, NotFound → 404, ...).
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Db(#[from] DbError),
}

/// Result type for catalog use-cases.
pub type ServiceResult<T> = Result<T, ServiceError>;

// =============================================================================
// Read Models
// =============================================================================

/// One batch line priced at current catalog rates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineView {
    pub item_id: String,
    pub product_id: String,
    pub product_name: String,
    pub quantity: i64,
    pub quote: LineQuote,
}

/// A batch with its priced lines and aggregated totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    pub batch: Batch,
    pub lines: Vec<LineView>,
    pub totals: BatchTotals,
}

// =============================================================================
// Catalog
// =============================================================================

/// The catalog's use-case facade.
///
/// Cheap to clone; wraps the [`Database`] handle. `actor` is `None` for
/// unauthenticated requests throughout.
#[derive(Debug, Clone)]
pub struct Catalog {
    db: Database,
}

impl Catalog {
    /// Creates a catalog service over an open database.
    pub fn new(db: Database) -> Self {
        Catalog { db }
    }

    /// Access to the underlying database handle.
    pub fn db(&self) -> &Database {
        &self.db
    }

    // -------------------------------------------------------------------------
    // Products
    // -------------------------------------------------------------------------

    /// Lists catalog products. Public: anonymous browsing is allowed.
    pub async fn list_products(
        &self,
        actor: Option<&User>,
        filter: &ProductFilter,
        order: ProductOrder,
    ) -> ServiceResult<Vec<Product>> {
        access::authorize(actor, None, Action::ReadProduct)?;
        Ok(self.db.products().list(filter, order).await?)
    }

    /// Fetches one product. Public.
    pub async fn get_product(&self, actor: Option<&User>, id: &str) -> ServiceResult<Product> {
        access::authorize(actor, None, Action::ReadProduct)?;
        Ok(self.db.products().get_by_id(id).await?)
    }

    /// Prices one prospective line without touching any batch. Public,
    /// so storefront quantity pickers can show live tier prices.
    pub async fn quote_line(
        &self,
        actor: Option<&User>,
        product_id: &str,
        quantity: i64,
    ) -> ServiceResult<LineQuote> {
        access::authorize(actor, None, Action::ReadProduct)?;
        let product = self.db.products().get_by_id(product_id).await?;
        Ok(pricing::quote(&product, quantity)?)
    }

    /// Creates a product. Admin and product managers only.
    pub async fn create_product(
        &self,
        actor: Option<&User>,
        product: Product,
    ) -> ServiceResult<Product> {
        access::authorize(actor, None, Action::CreateProduct)?;
        validate_product(&product)?;

        // The category must exist before the FK gets a say, so the
        // caller sees a targeted NotFound instead of a raw violation.
        self.db
            .product_types()
            .get_by_id(&product.product_type_id)
            .await?;

        self.db.products().insert(&product).await?;
        info!(id = %product.id, name = %product.name, "Product created");
        Ok(product)
    }

    /// Updates a product. Admin and product managers only.
    pub async fn update_product(
        &self,
        actor: Option<&User>,
        mut product: Product,
    ) -> ServiceResult<Product> {
        access::authorize(actor, None, Action::EditProduct)?;
        validate_product(&product)?;

        // Same targeted NotFound as the create path when the product is
        // being moved to a category that doesn't exist.
        self.db
            .product_types()
            .get_by_id(&product.product_type_id)
            .await?;

        product.updated_at = Utc::now();
        self.db.products().update(&product).await?;
        info!(id = %product.id, "Product updated");
        Ok(product)
    }

    /// Deletes a product. Admin only. Cascades into any batch lines
    /// that referenced it.
    pub async fn delete_product(&self, actor: Option<&User>, id: &str) -> ServiceResult<()> {
        access::authorize(actor, None, Action::DeleteProduct)?;
        self.db.products().delete(id).await?;
        info!(id = %id, "Product deleted");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Batches
    // -------------------------------------------------------------------------

    /// Opens a new empty draft owned by the actor.
    pub async fn create_batch(&self, actor: Option<&User>) -> ServiceResult<Batch> {
        access::authorize(actor, None, Action::CreateBatch)?;

        // authorize() rejected None above.
        let owner = actor.ok_or(CoreError::PermissionDenied {
            role: None,
            action: Action::CreateBatch,
        })?;

        let batch = Batch::new(&owner.id);
        self.db.batches().create(&batch).await?;
        info!(id = %batch.id, manager_id = %batch.manager_id, "Batch created");
        Ok(batch)
    }

    /// Lists the actor's own drafts; admin sees everyone's.
    pub async fn list_batches(&self, actor: Option<&User>) -> ServiceResult<Vec<Batch>> {
        let user = match actor {
            Some(user) => user,
            None => {
                return Err(CoreError::PermissionDenied {
                    role: None,
                    action: Action::ReadBatch,
                }
                .into())
            }
        };

        let batches = if user.role == Role::Admin {
            self.db.batches().list_all().await?
        } else {
            self.db.batches().list_for_manager(&user.id).await?
        };
        Ok(batches)
    }

    /// Deletes a draft. Owner or admin.
    pub async fn delete_batch(&self, actor: Option<&User>, batch_id: &str) -> ServiceResult<()> {
        let batch = self.db.batches().get_by_id(batch_id).await?;
        access::authorize(actor, Some(&batch.manager_id), Action::DeleteBatch)?;

        self.db.batches().delete(batch_id).await?;
        info!(id = %batch_id, "Batch deleted");
        Ok(())
    }

    /// Adds a line to a draft. Owner or admin.
    pub async fn add_batch_item(
        &self,
        actor: Option<&User>,
        batch_id: &str,
        product_id: &str,
        quantity: i64,
    ) -> ServiceResult<BatchItem> {
        let batch = self.db.batches().get_by_id(batch_id).await?;
        access::authorize(actor, Some(&batch.manager_id), Action::EditBatch)?;
        validation::validate_quantity(quantity).map_err(CoreError::from)?;

        // Verify the product before inserting for a targeted NotFound.
        self.db.products().get_by_id(product_id).await?;

        let item = BatchItem::new(batch_id, product_id, quantity);
        self.db.batches().add_item(&item).await?;
        info!(batch_id = %batch_id, product_id = %product_id, quantity, "Batch item added");
        Ok(item)
    }

    /// Changes a line's quantity. Owner or admin.
    pub async fn update_batch_item(
        &self,
        actor: Option<&User>,
        item_id: &str,
        quantity: i64,
    ) -> ServiceResult<()> {
        let item = self.db.batches().get_item(item_id).await?;
        let batch = self.db.batches().get_by_id(&item.batch_id).await?;
        access::authorize(actor, Some(&batch.manager_id), Action::EditBatch)?;
        validation::validate_quantity(quantity).map_err(CoreError::from)?;

        self.db.batches().update_item_quantity(item_id, quantity).await?;
        Ok(())
    }

    /// Removes a line. Owner or admin.
    pub async fn remove_batch_item(
        &self,
        actor: Option<&User>,
        item_id: &str,
    ) -> ServiceResult<()> {
        let item = self.db.batches().get_item(item_id).await?;
        let batch = self.db.batches().get_by_id(&item.batch_id).await?;
        access::authorize(actor, Some(&batch.manager_id), Action::EditBatch)?;

        self.db.batches().delete_item(item_id).await?;
        Ok(())
    }

    /// Reads a draft with its lines priced at current catalog rates and
    /// the aggregated totals. Owner or admin.
    pub async fn batch_summary(
        &self,
        actor: Option<&User>,
        batch_id: &str,
    ) -> ServiceResult<BatchSummary> {
        let batch = self.db.batches().get_by_id(batch_id).await?;
        access::authorize(actor, Some(&batch.manager_id), Action::ReadBatch)?;

        let rows = self.db.batches().list_items_with_products(batch_id).await?;

        let lines = rows
            .iter()
            .map(|(item, product)| {
                Ok(LineView {
                    item_id: item.id.clone(),
                    product_id: product.id.clone(),
                    product_name: product.name.clone(),
                    quantity: item.quantity,
                    quote: pricing::quote(product, item.quantity)?,
                })
            })
            .collect::<Result<Vec<_>, CoreError>>()?;

        let batch_lines: Vec<BatchLine<'_>> = rows
            .iter()
            .map(|(item, product)| BatchLine {
                product,
                quantity: item.quantity,
            })
            .collect();
        let totals = aggregate_batch(&batch_lines)?;

        Ok(BatchSummary { batch, lines, totals })
    }
}

/// Field checks shared by product create and update.
fn validate_product(product: &Product) -> Result<(), CoreError> {
    validation::validate_name(&product.name)?;
    validation::validate_price_cents(product.base_price_cents)?;
    for tier_price in [product.small_opt_price_cents, product.big_opt_price_cents]
        .into_iter()
        .flatten()
    {
        validation::validate_price_cents(tier_price)?;
    }
    for min_qty in [product.small_opt_min_qty, product.big_opt_min_qty]
        .into_iter()
        .flatten()
    {
        validation::validate_quantity(min_qty)?;
    }
    validation::validate_weight_grams(product.weight_grams)?;
    Ok(())
}

// =============================================================================
// Integration-Style Tests (in-memory database)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::DbConfig;
    use fromagerie_core::{Money, Percent, ProductType};

    struct World {
        catalog: Catalog,
        admin: User,
        product_manager: User,
        sales: User,
        other_sales: User,
        brynza: Product,
    }

    async fn world() -> World {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let catalog = Catalog::new(db.clone());

        let admin = User::new("admin", Role::Admin);
        let product_manager = User::new("pm", Role::ProductManager);
        let sales = User::new("rivka", Role::SalesManager);
        let other_sales = User::new("lea", Role::SalesManager);
        for user in [&admin, &product_manager, &sales, &other_sales] {
            db.users().insert(user).await.unwrap();
        }

        let soft = ProductType::new("soft");
        db.product_types().insert(&soft).await.unwrap();

        let brynza = catalog
            .create_product(
                Some(&product_manager),
                Product::new("Brynza", 10_000, &soft.id)
                    .with_small_tier(7_000, 5)
                    .with_big_tier(5_000, 10),
            )
            .await
            .unwrap();

        World {
            catalog,
            admin,
            product_manager,
            sales,
            other_sales,
            brynza,
        }
    }

    fn is_denied(err: &ServiceError) -> bool {
        matches!(err, ServiceError::Core(CoreError::PermissionDenied { .. }))
    }

    #[tokio::test]
    async fn test_anonymous_browses_but_cannot_mutate() {
        let w = world().await;

        let listing = w
            .catalog
            .list_products(None, &ProductFilter::default(), ProductOrder::Name)
            .await
            .unwrap();
        assert_eq!(listing.len(), 1);

        let quote = w.catalog.quote_line(None, &w.brynza.id, 7).await.unwrap();
        assert_eq!(quote.unit_price, Money::from_cents(7_000));

        let err = w.catalog.create_batch(None).await.unwrap_err();
        assert!(is_denied(&err));
    }

    #[tokio::test]
    async fn test_product_write_permissions() {
        let w = world().await;

        // Sales managers have no product write access at all.
        let err = w
            .catalog
            .update_product(Some(&w.sales), w.brynza.clone())
            .await
            .unwrap_err();
        assert!(is_denied(&err));

        // Product managers edit but never delete.
        let mut cheaper = w.brynza.clone();
        cheaper.base_price_cents = 9_000;
        w.catalog
            .update_product(Some(&w.product_manager), cheaper)
            .await
            .unwrap();

        let err = w
            .catalog
            .delete_product(Some(&w.product_manager), &w.brynza.id)
            .await
            .unwrap_err();
        assert!(is_denied(&err));

        w.catalog
            .delete_product(Some(&w.admin), &w.brynza.id)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_product_validation_rejects_bad_input() {
        let w = world().await;
        let soft_id = w.brynza.product_type_id.clone();

        let err = w
            .catalog
            .create_product(Some(&w.admin), Product::new("   ", 1_000, &soft_id))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Core(CoreError::Validation(_))));

        let err = w
            .catalog
            .create_product(Some(&w.admin), Product::new("Negative", -5, &soft_id))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Core(CoreError::Validation(_))));

        // Prices past the cap are rejected before they can overflow a
        // line total.
        let err = w
            .catalog
            .create_product(
                Some(&w.admin),
                Product::new("Solid gold wheel", validation::MAX_PRICE_CENTS + 1, &soft_id),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Core(CoreError::Validation(_))));

        // Unknown category surfaces as NotFound, not an FK violation.
        let err = w
            .catalog
            .create_product(Some(&w.admin), Product::new("Lost", 1_000, "nope"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Db(DbError::NotFound { .. })));

        // Same on update: reassigning to a missing category is NotFound.
        let mut moved = w.brynza.clone();
        moved.product_type_id = "nope".to_string();
        let err = w
            .catalog
            .update_product(Some(&w.admin), moved)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Db(DbError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_batch_ownership_rules() {
        let w = world().await;

        let batch = w.catalog.create_batch(Some(&w.sales)).await.unwrap();
        w.catalog
            .add_batch_item(Some(&w.sales), &batch.id, &w.brynza.id, 3)
            .await
            .unwrap();

        // A different sales manager cannot read, edit, or delete it.
        let err = w
            .catalog
            .batch_summary(Some(&w.other_sales), &batch.id)
            .await
            .unwrap_err();
        assert!(is_denied(&err));

        let err = w
            .catalog
            .add_batch_item(Some(&w.other_sales), &batch.id, &w.brynza.id, 1)
            .await
            .unwrap_err();
        assert!(is_denied(&err));

        let err = w
            .catalog
            .delete_batch(Some(&w.other_sales), &batch.id)
            .await
            .unwrap_err();
        assert!(is_denied(&err));

        // Admin bypasses ownership.
        let summary = w
            .catalog
            .batch_summary(Some(&w.admin), &batch.id)
            .await
            .unwrap();
        assert_eq!(summary.lines.len(), 1);

        w.catalog
            .delete_batch(Some(&w.admin), &batch.id)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_batch_summary_reference_totals() {
        let w = world().await;

        let batch = w.catalog.create_batch(Some(&w.sales)).await.unwrap();
        w.catalog
            .add_batch_item(Some(&w.sales), &batch.id, &w.brynza.id, 3)
            .await
            .unwrap();
        w.catalog
            .add_batch_item(Some(&w.sales), &batch.id, &w.brynza.id, 7)
            .await
            .unwrap();

        let summary = w
            .catalog
            .batch_summary(Some(&w.sales), &batch.id)
            .await
            .unwrap();

        assert_eq!(summary.lines.len(), 2);
        assert_eq!(summary.lines[0].quote.unit_price, Money::from_cents(10_000));
        assert_eq!(summary.lines[1].quote.unit_price, Money::from_cents(7_000));

        assert_eq!(summary.totals.total_base_price, Money::from_cents(100_000));
        assert_eq!(summary.totals.total_price, Money::from_cents(79_000));
        assert_eq!(
            summary.totals.total_discount_amount,
            Money::from_cents(21_000)
        );
        assert_eq!(
            summary.totals.total_discount_percent,
            Percent::from_bps(2_100)
        );
    }

    #[tokio::test]
    async fn test_batch_summary_json_payload() {
        // The read model is what a frontend consumes; pin its shape.
        let w = world().await;

        let batch = w.catalog.create_batch(Some(&w.sales)).await.unwrap();
        w.catalog
            .add_batch_item(Some(&w.sales), &batch.id, &w.brynza.id, 7)
            .await
            .unwrap();

        let summary = w
            .catalog
            .batch_summary(Some(&w.sales), &batch.id)
            .await
            .unwrap();
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["batch"]["manager_id"], w.sales.id.as_str());
        assert_eq!(json["lines"][0]["product_name"], "Brynza");
        assert_eq!(json["lines"][0]["quantity"], 7);
        assert_eq!(json["lines"][0]["quote"]["unit_price"], 7_000);
        assert_eq!(json["lines"][0]["quote"]["line_total"], 49_000);
        assert_eq!(json["lines"][0]["quote"]["discount_percent"], 3_000);
        assert_eq!(json["totals"]["total_price"], 49_000);
    }

    #[tokio::test]
    async fn test_totals_track_current_prices() {
        let w = world().await;

        let batch = w.catalog.create_batch(Some(&w.sales)).await.unwrap();
        w.catalog
            .add_batch_item(Some(&w.sales), &batch.id, &w.brynza.id, 2)
            .await
            .unwrap();

        let before = w
            .catalog
            .batch_summary(Some(&w.sales), &batch.id)
            .await
            .unwrap();
        assert_eq!(before.totals.total_price, Money::from_cents(20_000));

        // A later price edit re-prices the existing draft on read.
        let mut pricier = w.brynza.clone();
        pricier.base_price_cents = 15_000;
        w.catalog
            .update_product(Some(&w.product_manager), pricier)
            .await
            .unwrap();

        let after = w
            .catalog
            .batch_summary(Some(&w.sales), &batch.id)
            .await
            .unwrap();
        assert_eq!(after.totals.total_price, Money::from_cents(30_000));
    }

    #[tokio::test]
    async fn test_item_quantity_validation() {
        let w = world().await;
        let batch = w.catalog.create_batch(Some(&w.sales)).await.unwrap();

        let err = w
            .catalog
            .add_batch_item(Some(&w.sales), &batch.id, &w.brynza.id, 0)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Core(CoreError::Validation(_))));

        let item = w
            .catalog
            .add_batch_item(Some(&w.sales), &batch.id, &w.brynza.id, 5)
            .await
            .unwrap();

        let err = w
            .catalog
            .update_batch_item(Some(&w.sales), &item.id, -1)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Core(CoreError::Validation(_))));

        w.catalog
            .update_batch_item(Some(&w.sales), &item.id, 10)
            .await
            .unwrap();
        let summary = w
            .catalog
            .batch_summary(Some(&w.sales), &batch.id)
            .await
            .unwrap();
        assert_eq!(summary.lines[0].quote.unit_price, Money::from_cents(5_000));
    }

    #[tokio::test]
    async fn test_admin_listing_sees_everyone() {
        let w = world().await;

        w.catalog.create_batch(Some(&w.sales)).await.unwrap();
        w.catalog.create_batch(Some(&w.other_sales)).await.unwrap();

        assert_eq!(w.catalog.list_batches(Some(&w.sales)).await.unwrap().len(), 1);
        assert_eq!(w.catalog.list_batches(Some(&w.admin)).await.unwrap().len(), 2);
        assert!(w.catalog.list_batches(None).await.is_err());
    }
}
