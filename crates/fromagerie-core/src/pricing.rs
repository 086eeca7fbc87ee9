//! # Pricing Engine
//!
//! Selects the applicable unit price from a product's tiered wholesale
//! schedule and derives line totals and discount percentages.
//!
//! ## Tier Selection
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  unit_price(product, quantity)                                      │
//! │                                                                     │
//! │  1. big tier usable AND quantity >= its minimum?  → big price       │
//! │  2. small tier usable AND quantity >= its minimum? → small price    │
//! │  3. otherwise                                      → base price     │
//! │                                                                     │
//! │  The big tier is checked FIRST on purpose: the two tiers are not    │
//! │  mutually exclusive by construction (nothing stops a stored         │
//! │  big_opt_min_qty below small_opt_min_qty), and checking the steeper │
//! │  discount first guarantees the customer always gets the best price  │
//! │  they qualify for, however the tiers were configured.               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A tier missing either its price or its minimum quantity is silently
//! skipped, never treated as a configuration error. The only rejected
//! input is a non-positive (or absurdly large) quantity.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::money::{Money, Percent};
use crate::types::Product;
use crate::validation::validate_quantity;

/// The derived price facts for one (product, quantity) pairing.
///
/// These are the non-stored attributes of a batch item: computed live
/// from the product's current schedule, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineQuote {
    /// Applicable per-unit price after tier selection.
    pub unit_price: Money,
    /// Exact `unit_price * quantity`, no intermediate rounding.
    pub line_total: Money,
    /// Discount versus the base price, rounded to 2 decimal places.
    pub discount_percent: Percent,
}

/// Returns the applicable unit price for the given quantity.
///
/// Validates the quantity first; pricing itself is a total function over
/// any product configuration.
///
/// ## Example
/// ```rust
/// use fromagerie_core::money::Money;
/// use fromagerie_core::pricing::unit_price;
/// use fromagerie_core::types::Product;
///
/// let brynza = Product::new("Brynza", 10_000, "soft")
///     .with_small_tier(7_000, 5)
///     .with_big_tier(5_000, 10);
///
/// assert_eq!(unit_price(&brynza, 3).unwrap(), Money::from_cents(10_000));
/// assert_eq!(unit_price(&brynza, 7).unwrap(), Money::from_cents(7_000));
/// // 12 also satisfies the small tier; the big tier still wins
/// assert_eq!(unit_price(&brynza, 12).unwrap(), Money::from_cents(5_000));
/// ```
pub fn unit_price(product: &Product, quantity: i64) -> CoreResult<Money> {
    validate_quantity(quantity)?;
    Ok(select_unit_price(product, quantity))
}

/// Tier selection proper. Quantity is assumed validated.
fn select_unit_price(product: &Product, quantity: i64) -> Money {
    if let Some(big) = product.big_tier() {
        if quantity >= big.min_qty {
            return big.price;
        }
    }

    if let Some(small) = product.small_tier() {
        if quantity >= small.min_qty {
            return small.price;
        }
    }

    product.base_price()
}

/// Returns the exact line total: `unit_price * quantity`.
pub fn line_total(product: &Product, quantity: i64) -> CoreResult<Money> {
    validate_quantity(quantity)?;
    Ok(select_unit_price(product, quantity).multiply_quantity(quantity))
}

/// Returns the discount percent versus the base price, 2 decimal places.
///
/// A zero base price yields 0% by definition (free items carry no
/// meaningful discount ratio), never a division error.
pub fn discount_percent(product: &Product, quantity: i64) -> CoreResult<Percent> {
    validate_quantity(quantity)?;
    let unit = select_unit_price(product, quantity);
    Ok(Percent::ratio(product.base_price() - unit, product.base_price()))
}

/// Computes all derived price facts for one line at once.
pub fn quote(product: &Product, quantity: i64) -> CoreResult<LineQuote> {
    validate_quantity(quantity)?;

    let unit = select_unit_price(product, quantity);
    Ok(LineQuote {
        unit_price: unit,
        line_total: unit.multiply_quantity(quantity),
        discount_percent: Percent::ratio(product.base_price() - unit, product.base_price()),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
