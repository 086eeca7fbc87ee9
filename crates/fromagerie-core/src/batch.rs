//! # Batch Aggregation
//!
//! Folds a batch's line items into batch-level totals and an overall
//! discount percentage.
//!
//! ## What Gets Summed
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  For each line (product, quantity):                                 │
//! │                                                                     │
//! │    base contribution   = product.base_price * quantity              │
//! │    priced contribution = tier unit price    * quantity              │
//! │                                                                     │
//! │  total_base_price                  = Σ base contributions           │
//! │  total_price_before_batch_discount = Σ priced contributions         │
//! │  total_discount_amount             = base Σ − priced Σ  (exact)     │
//! │  total_discount_percent            = amount / base Σ, 2 dp          │
//! │  total_price                       = priced Σ                       │
//! │                                                                     │
//! │  Despite the naming there is NO separate batch-level discount       │
//! │  layer: each line already carries its own tier discount, and the    │
//! │  batch's payable total is simply their sum.                         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This is a pure read-side fold over whatever quantities and product
//! prices are stored RIGHT NOW. Prices are not snapshotted at add time,
//! so editing a product re-prices existing batches on the next read.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::money::{Money, Percent};
use crate::pricing;
use crate::types::Product;

/// One batch line joined with its product as currently stored.
#[derive(Debug, Clone, Copy)]
pub struct BatchLine<'a> {
    pub product: &'a Product,
    pub quantity: i64,
}

/// Batch-level summary totals.
///
/// Money fields serialize as plain cents, the percent as basis points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BatchTotals {
    /// Pure base-rate sum: Σ base_price × quantity, ignoring every tier.
    pub total_base_price: Money,

    /// Σ of line totals, each already reflecting its own tier discount.
    pub total_price_before_batch_discount: Money,

    /// Exact `total_base_price − total_price_before_batch_discount`.
    pub total_discount_amount: Money,

    /// Overall discount ratio, rounded to 2 decimal places.
    /// 0% for an empty or zero-base batch, never NaN.
    pub total_discount_percent: Percent,

    /// The batch's final payable total. Equals
    /// `total_price_before_batch_discount`.
    pub total_price: Money,
}

/// Aggregates a batch's lines into summary totals.
///
/// Pure and side-effect free. An empty slice yields all-zero totals with
/// a 0% discount. Any line with an invalid quantity rejects the whole
/// aggregation before any arithmetic happens.
///
/// ## Example
/// ```rust
/// use fromagerie_core::batch::{aggregate_batch, BatchLine};
/// use fromagerie_core::money::Money;
/// use fromagerie_core::types::Product;
///
/// let brynza = Product::new("Brynza", 10_000, "soft")
///     .with_small_tier(7_000, 5)
///     .with_big_tier(5_000, 10);
///
/// let totals = aggregate_batch(&[
///     BatchLine { product: &brynza, quantity: 3 }, // base rate
///     BatchLine { product: &brynza, quantity: 7 }, // small tier
/// ])
/// .unwrap();
///
/// assert_eq!(totals.total_base_price, Money::from_cents(100_000));
/// assert_eq!(totals.total_price, Money::from_cents(79_000));
/// assert_eq!(totals.total_discount_percent.bps(), 2_100); // 21.00%
/// ```
pub fn aggregate_batch(lines: &[BatchLine<'_>]) -> CoreResult<BatchTotals> {
    let mut total_base = Money::zero();
    let mut total_priced = Money::zero();

    for line in lines {
        // line_total validates the quantity; the base contribution uses
        // the same validated quantity so both sums stay consistent.
        total_priced += pricing::line_total(line.product, line.quantity)?;
        total_base += line.product.base_price().multiply_quantity(line.quantity);
    }

    let discount_amount = total_base - total_priced;

    Ok(BatchTotals {
        total_base_price: total_base,
        total_price_before_batch_discount: total_priced,
        total_discount_amount: discount_amount,
        total_discount_percent: Percent::ratio(discount_amount, total_base),
        total_price: total_priced,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, ValidationError};

    fn brynza() -> Product {
        Product::new("Brynza", 10_000, "soft")
            .with_small_tier(7_000, 5)
            .with_big_tier(5_000, 10)
    }

    #[test]
    fn test_empty_batch_is_all_zeros() {
        let totals = aggregate_batch(&[]).unwrap();
        assert_eq!(totals, BatchTotals::default());
        assert!(totals.total_discount_percent.is_zero());
    }

    #[test]
    fn test_reference_batch() {
        // qty 3 at base 100.00, qty 7 at small-tier 70.00
        let p = brynza();
        let totals = aggregate_batch(&[
            BatchLine { product: &p, quantity: 3 },
            BatchLine { product: &p, quantity: 7 },
        ])
        .unwrap();

        assert_eq!(totals.total_base_price, Money::from_cents(100_000));
        assert_eq!(
            totals.total_price_before_batch_discount,
            Money::from_cents(79_000)
        );
        assert_eq!(totals.total_discount_amount, Money::from_cents(21_000));
        assert_eq!(totals.total_discount_percent, Percent::from_bps(2_100));
        assert_eq!(totals.total_price, Money::from_cents(79_000));
    }

    #[test]
    fn test_discount_amount_is_exact_subtraction() {
        let p = brynza();
        let q = Product::new("Gouda", 9_999, "hard").with_small_tier(8_887, 3);

        let totals = aggregate_batch(&[
            BatchLine { product: &p, quantity: 11 },
            BatchLine { product: &q, quantity: 3 },
            BatchLine { product: &q, quantity: 2 },
        ])
        .unwrap();

        assert_eq!(
            totals.total_discount_amount,
            totals.total_base_price - totals.total_price_before_batch_discount
        );
        assert_eq!(totals.total_price, totals.total_price_before_batch_discount);
    }

    #[test]
    fn test_undiscounted_batch_has_zero_percent() {
        let plain = Product::new("Plain", 4_200, "soft");
        let totals = aggregate_batch(&[
            BatchLine { product: &plain, quantity: 2 },
            BatchLine { product: &plain, quantity: 9 },
        ])
        .unwrap();

        assert_eq!(totals.total_base_price, Money::from_cents(46_200));
        assert_eq!(totals.total_discount_amount, Money::zero());
        assert!(totals.total_discount_percent.is_zero());
    }

    #[test]
    fn test_zero_base_prices_yield_zero_percent() {
        let free = Product::new("Tasting sample", 0, "soft");
        let totals =
            aggregate_batch(&[BatchLine { product: &free, quantity: 4 }]).unwrap();

        assert_eq!(totals.total_base_price, Money::zero());
        assert_eq!(totals.total_price, Money::zero());
        assert!(totals.total_discount_percent.is_zero());
    }

    #[test]
    fn test_invalid_line_quantity_rejects_the_batch() {
        let p = brynza();
        let err = aggregate_batch(&[
            BatchLine { product: &p, quantity: 3 },
            BatchLine { product: &p, quantity: 0 },
        ])
        .unwrap_err();

        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::MustBePositive { .. })
        ));
    }

    #[test]
    fn test_totals_serialize_as_plain_integers() {
        // Money crosses the wire as cents and Percent as basis points,
        // with no floats anywhere in the payload.
        let p = brynza();
        let totals = aggregate_batch(&[
            BatchLine { product: &p, quantity: 3 },
            BatchLine { product: &p, quantity: 7 },
        ])
        .unwrap();

        let json = serde_json::to_value(totals).unwrap();
        assert_eq!(json["total_base_price"], 100_000);
        assert_eq!(json["total_price_before_batch_discount"], 79_000);
        assert_eq!(json["total_discount_amount"], 21_000);
        assert_eq!(json["total_discount_percent"], 2_100);
        assert_eq!(json["total_price"], 79_000);

        let back: BatchTotals = serde_json::from_value(json).unwrap();
        assert_eq!(back, totals);
    }

    #[test]
    fn test_mixed_products_price_independently() {
        // Brynza qty 12 hits its big tier, Gouda qty 2 stays at base.
        let p = brynza();
        let q = Product::new("Gouda", 8_000, "hard").with_small_tier(6_000, 10);

        let totals = aggregate_batch(&[
            BatchLine { product: &p, quantity: 12 },
            BatchLine { product: &q, quantity: 2 },
        ])
        .unwrap();

        // base: 12*100.00 + 2*80.00 = 1360.00
        assert_eq!(totals.total_base_price, Money::from_cents(136_000));
        // priced: 12*50.00 + 2*80.00 = 760.00
        assert_eq!(totals.total_price, Money::from_cents(76_000));
        assert_eq!(totals.total_discount_amount, Money::from_cents(60_000));
        // 600.00 / 1360.00 = 44.1176..% → 44.12%
        assert_eq!(totals.total_discount_percent, Percent::from_bps(4_412));
    }
}
