//! # fromagerie-core: Pure Business Logic for the Fromagerie Catalog
//!
//! This crate is the **heart** of the Fromagerie wholesale cheese catalog.
//! It contains all business logic as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Fromagerie Architecture                          │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                 Web Frontend (separate deployable)            │  │
//! │  │   Catalog page ──► Batch screens ──► Admin forms              │  │
//! │  └────────────────────────────┬──────────────────────────────────┘  │
//! │                               │                                     │
//! │  ┌────────────────────────────▼──────────────────────────────────┐  │
//! │  │             fromagerie-db (Catalog service + SQLite)          │  │
//! │  │   authorize ──► repository call ──► price ──► aggregate       │  │
//! │  └────────────────────────────┬──────────────────────────────────┘  │
//! │                               │                                     │
//! │  ┌────────────────────────────▼──────────────────────────────────┐  │
//! │  │              ★ fromagerie-core (THIS CRATE) ★                 │  │
//! │  │                                                               │  │
//! │  │  ┌────────┐ ┌────────┐ ┌─────────┐ ┌────────┐ ┌────────────┐  │  │
//! │  │  │ types  │ │ money  │ │ pricing │ │ batch  │ │   access   │  │  │
//! │  │  │Product │ │ Money  │ │  tier   │ │ totals │ │ role rules │  │  │
//! │  │  │ Batch  │ │Percent │ │ select  │ │  fold  │ │ ownership  │  │  │
//! │  │  └────────┘ └────────┘ └─────────┘ └────────┘ └────────────┘  │  │
//! │  │                                                               │  │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS          │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Batch, BatchItem, User, etc.)
//! - [`money`] - Money and Percent types with integer arithmetic (no floats!)
//! - [`pricing`] - Quantity-tier price selection and line totals
//! - [`batch`] - Batch-level total and discount aggregation
//! - [`access`] - Role/ownership access control rules
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use fromagerie_core::money::Money;
//! use fromagerie_core::pricing;
//! use fromagerie_core::types::Product;
//!
//! // Brynza: 100.00 base, 70.00 from 5 units, 50.00 from 10 units
//! let brynza = Product::new("Brynza", 10_000, "soft-cheese-type-id")
//!     .with_small_tier(7_000, 5)
//!     .with_big_tier(5_000, 10);
//!
//! // 12 units qualify for both tiers; the big tier wins
//! let unit = pricing::unit_price(&brynza, 12).unwrap();
//! assert_eq!(unit, Money::from_cents(5_000));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod access;
pub mod batch;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use fromagerie_core::Money` instead of
// `use fromagerie_core::money::Money`

pub use access::Action;
pub use batch::{BatchLine, BatchTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, Percent};
pub use pricing::LineQuote;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single line item in a batch
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 10000 instead of 10).
/// Wholesale orders legitimately reach the hundreds, so the cap is generous.
pub const MAX_ITEM_QUANTITY: i64 = 9_999;
