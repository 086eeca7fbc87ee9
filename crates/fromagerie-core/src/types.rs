//! # Domain Types
//!
//! Core domain types for the Fromagerie wholesale catalog.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌────────────────┐   ┌────────────────┐   ┌────────────────┐      │
//! │  │    Product     │   │     Batch      │   │   BatchItem    │      │
//! │  │  ────────────  │   │  ────────────  │   │  ────────────  │      │
//! │  │  id (UUID)     │   │  id (UUID)     │   │  id (UUID)     │      │
//! │  │  base price    │   │  manager_id    │   │  batch_id (FK) │      │
//! │  │  2 opt tiers   │   │  created_at    │   │  product_id    │      │
//! │  │  weight, date  │   │                │   │  quantity      │      │
//! │  └────────────────┘   └────────────────┘   └────────────────┘      │
//! │                                                                     │
//! │  ┌────────────────┐   ┌────────────────┐                           │
//! │  │      User      │   │      Role      │                           │
//! │  │  ────────────  │   │  ────────────  │                           │
//! │  │  id (UUID)     │   │  Admin         │                           │
//! │  │  username      │   │  ProductManager│                           │
//! │  │  role          │   │  SalesManager  │                           │
//! │  └────────────────┘   │  Guest         │                           │
//! │                       └────────────────┘                           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Live Pricing (No Snapshots)
//! A `BatchItem` stores only a product reference and a quantity. Its unit
//! price, line total, and discount percent are derived from the product's
//! CURRENT price schedule every time they are read. Editing a product's
//! price therefore changes existing batch totals on the next read. This is
//! deliberate and covered by tests.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::money::Money;

// =============================================================================
// Role
// =============================================================================

/// User role - the sole authorization input.
///
/// A closed enumeration instead of a free-form string so the access rule
/// table in [`crate::access`] can be matched exhaustively by the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full control over products, batches, and batch items.
    Admin,
    /// May create and edit products; never deletes them.
    ProductManager,
    /// Assembles batches; owns what they create.
    SalesManager,
    /// Authenticated browser with no staff privileges.
    Guest,
}

impl Role {
    /// Stable snake_case label, matching the stored representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::ProductManager => "product_manager",
            Role::SalesManager => "sales_manager",
            Role::Guest => "guest",
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Guest
    }
}

// =============================================================================
// Product Type
// =============================================================================

/// A descriptive grouping of cheeses (soft, hard, blue, ...).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct ProductType {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,
}

impl ProductType {
    /// Creates a product type with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        ProductType {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
        }
    }
}

// =============================================================================
// Price Tier
// =============================================================================

/// A usable wholesale tier: a discounted unit price granted at or above a
/// minimum order quantity.
///
/// Only materialized when BOTH the price and the minimum quantity are
/// stored; a tier with a missing partner field is treated as absent, never
/// as a configuration error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceTier {
    pub price: Money,
    pub min_qty: i64,
}

// =============================================================================
// Product
// =============================================================================

/// A cheese in the wholesale catalog.
///
/// Carries the full tiered price schedule: a mandatory base price plus up
/// to two optional wholesale tiers (small opt / big opt). The big tier is
/// intended to be the steeper discount and is always checked first when
/// pricing (see [`crate::pricing`]).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown in the catalog.
    pub name: String,

    /// Undiscounted per-unit price in cents. Never negative.
    pub base_price_cents: i64,

    /// Small-wholesale unit price in cents, if the tier is configured.
    pub small_opt_price_cents: Option<i64>,

    /// Minimum quantity for the small-wholesale tier.
    pub small_opt_min_qty: Option<i64>,

    /// Big-wholesale unit price in cents, if the tier is configured.
    pub big_opt_price_cents: Option<i64>,

    /// Minimum quantity for the big-wholesale tier.
    pub big_opt_min_qty: Option<i64>,

    /// Unit weight in grams.
    pub weight_grams: i64,

    /// Product type reference.
    pub product_type_id: String,

    /// Whether the cheese is currently in stock.
    pub in_stock: bool,

    /// Production date of the lot.
    #[ts(as = "String")]
    pub production_date: NaiveDate,

    /// When the product was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Creates a product with a fresh id, the given base price, and no
    /// wholesale tiers.
    pub fn new(
        name: impl Into<String>,
        base_price_cents: i64,
        product_type_id: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Product {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            base_price_cents,
            small_opt_price_cents: None,
            small_opt_min_qty: None,
            big_opt_price_cents: None,
            big_opt_min_qty: None,
            // 1 kg unless the builder says otherwise, same as the
            // schema default
            weight_grams: 1_000,
            product_type_id: product_type_id.into(),
            in_stock: true,
            production_date: now.date_naive(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the small-wholesale tier.
    pub fn with_small_tier(mut self, price_cents: i64, min_qty: i64) -> Self {
        self.small_opt_price_cents = Some(price_cents);
        self.small_opt_min_qty = Some(min_qty);
        self
    }

    /// Sets the big-wholesale tier.
    pub fn with_big_tier(mut self, price_cents: i64, min_qty: i64) -> Self {
        self.big_opt_price_cents = Some(price_cents);
        self.big_opt_min_qty = Some(min_qty);
        self
    }

    /// Sets the unit weight in grams.
    pub fn with_weight_grams(mut self, grams: i64) -> Self {
        self.weight_grams = grams;
        self
    }

    /// Returns the base price as a Money type.
    #[inline]
    pub fn base_price(&self) -> Money {
        Money::from_cents(self.base_price_cents)
    }

    /// Returns the small-wholesale tier when it is usable.
    ///
    /// Both the price and the minimum quantity must be present; otherwise
    /// the tier is silently absent.
    pub fn small_tier(&self) -> Option<PriceTier> {
        match (self.small_opt_price_cents, self.small_opt_min_qty) {
            (Some(price), Some(min_qty)) => Some(PriceTier {
                price: Money::from_cents(price),
                min_qty,
            }),
            _ => None,
        }
    }

    /// Returns the big-wholesale tier when it is usable.
    pub fn big_tier(&self) -> Option<PriceTier> {
        match (self.big_opt_price_cents, self.big_opt_min_qty) {
            (Some(price), Some(min_qty)) => Some(PriceTier {
                price: Money::from_cents(price),
                min_qty,
            }),
            _ => None,
        }
    }
}

// =============================================================================
// User
// =============================================================================

/// A catalog user. The role is the sole authorization input; credential
/// storage and verification live in the request layer, not here.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct User {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Login name, unique per user.
    pub username: String,

    /// Authorization role.
    pub role: Role,

    /// When the account was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a user with a fresh id.
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        User {
            id: Uuid::new_v4().to_string(),
            username: username.into(),
            role,
            created_at: Utc::now(),
        }
    }
}

// =============================================================================
// Batch
// =============================================================================

/// A draft wholesale order owned by exactly one manager.
///
/// Batch items are cascade-deleted with the batch by the persistence
/// layer.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Batch {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// User who owns this batch.
    pub manager_id: String,

    /// When the batch was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Batch {
    /// Creates a batch with a fresh id owned by the given manager.
    pub fn new(manager_id: impl Into<String>) -> Self {
        Batch {
            id: Uuid::new_v4().to_string(),
            manager_id: manager_id.into(),
            created_at: Utc::now(),
        }
    }
}

// =============================================================================
// Batch Item
// =============================================================================

/// One line of a batch: a product reference and a quantity.
///
/// Prices are intentionally NOT stored here. Unit price, line total, and
/// discount percent are derived from the referenced product's current
/// schedule at read time (see [`crate::pricing::quote`]).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct BatchItem {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Owning batch.
    pub batch_id: String,

    /// Priced product.
    pub product_id: String,

    /// Ordered quantity. Positive.
    pub quantity: i64,

    /// When the line was added.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl BatchItem {
    /// Creates a batch item with a fresh id.
    pub fn new(
        batch_id: impl Into<String>,
        product_id: impl Into<String>,
        quantity: i64,
    ) -> Self {
        BatchItem {
            id: Uuid::new_v4().to_string(),
            batch_id: batch_id.into(),
            product_id: product_id.into(),
            quantity,
            created_at: Utc::now(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
