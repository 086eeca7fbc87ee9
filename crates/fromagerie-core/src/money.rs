//! # Money Module
//!
//! Provides the `Money` and `Percent` types for handling monetary values
//! and discount percentages safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                         │
//! │                                                                     │
//! │  In binary floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                       │
//! │                                                                     │
//! │  In a discount engine that error compounds:                         │
//! │    21% of 790.00 cents-off drifts by a cent across a batch          │
//! │                                                                     │
//! │  OUR SOLUTION: Integer Cents + Integer Basis Points                 │
//! │    Prices are i64 cents, percentages are i64 basis points           │
//! │    (2100 bps = 21.00%). All arithmetic is exact; rounding happens   │
//! │    once, explicitly, when a ratio is turned into a Percent.         │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use fromagerie_core::money::{Money, Percent};
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(10_000); // 100.00
//!
//! // Arithmetic operations
//! let line = price * 7;                  // 700.00
//!
//! // 210.00 off a 1000.00 base is 21.00%
//! let pct = Percent::ratio(Money::from_cents(21_000), Money::from_cents(100_000));
//! assert_eq!(pct.bps(), 2_100);
//!
//! // NEVER do this:
//! // let bad = Money::from_float(10.99); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for discount deltas
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization (plain number)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use fromagerie_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents 10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    ///
    /// ## Why Cents?
    /// Using the smallest unit eliminates all floating-point concerns.
    /// The database, calculations, and API all use cents.
    /// Only the UI converts to major units for display.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ## Example
    /// ```rust
    /// use fromagerie_core::money::Money;
    ///
    /// let price = Money::from_major_minor(10, 99); // 10.99
    /// assert_eq!(price.cents(), 1099);
    ///
    /// let negative = Money::from_major_minor(-5, 50); // -5.50
    /// assert_eq!(negative.cents(), -550);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        // Handle sign: if major is negative, minor should subtract
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use fromagerie_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(7_000); // 70.00
    /// let line_total = unit_price.multiply_quantity(7);
    /// assert_eq!(line_total.cents(), 49_000);    // 490.00
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Percent Type
// =============================================================================

/// A percentage with 2 decimal places, stored as integer basis points.
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000. A percentage rounded to 2 decimal
/// places is therefore an exact integer number of basis points:
/// 21.00% = 2100 bps. No binary float ever enters discount math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Percent(i64);

impl Percent {
    /// Creates a percentage from basis points (2100 = 21.00%).
    #[inline]
    pub const fn from_bps(bps: i64) -> Self {
        Percent(bps)
    }

    /// Returns the percentage in basis points.
    #[inline]
    pub const fn bps(&self) -> i64 {
        self.0
    }

    /// Zero percent.
    #[inline]
    pub const fn zero() -> Self {
        Percent(0)
    }

    /// Checks if the percentage is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Computes `part / whole * 100` rounded to 2 decimal places.
    ///
    /// ## Rounding Rule
    /// Half-away-from-zero, applied once, on the final basis-point value.
    /// Implemented with i128 integer math so no intermediate result is
    /// ever a binary float.
    ///
    /// ## Zero Denominator
    /// A `whole` of zero (or less) yields 0% by definition, never a
    /// division error. An empty or free-of-charge batch has no meaningful
    /// discount ratio.
    ///
    /// ## Example
    /// ```rust
    /// use fromagerie_core::money::{Money, Percent};
    ///
    /// let pct = Percent::ratio(Money::from_cents(210), Money::from_cents(1000));
    /// assert_eq!(pct.bps(), 2_100); // 21.00%
    ///
    /// let none = Percent::ratio(Money::from_cents(210), Money::zero());
    /// assert!(none.is_zero());
    /// ```
    pub fn ratio(part: Money, whole: Money) -> Percent {
        if whole.cents() <= 0 {
            return Percent::zero();
        }

        // part / whole * 100, expressed in basis points:
        // bps = part * 10_000 / whole, rounded half away from zero.
        let numer = part.cents() as i128 * 10_000;
        let denom = whole.cents() as i128;

        let bps = if numer >= 0 {
            (numer + denom / 2) / denom
        } else {
            -((-numer + denom / 2) / denom)
        };

        Percent(bps as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and logs. Use frontend formatting for actual UI
/// display to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.cents_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Display shows "21.00%".
impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}%", sign, (self.0 / 100).abs(), (self.0 % 100).abs())
    }
}

/// Default percent is zero.
impl Default for Percent {
    fn default() -> Self {
        Percent::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        let money = Money::from_major_minor(10, 99);
        assert_eq!(money.cents(), 1099);

        let negative = Money::from_major_minor(-5, 50);
        assert_eq!(negative.cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        let result: Money = a * 3;
        assert_eq!(result.cents(), 3000);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Money::from_cents(100);
        assert!(positive.is_positive());

        let negative = Money::from_cents(-100);
        assert!(negative.is_negative());
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_cents(7_000);
        let line_total = unit_price.multiply_quantity(7);
        assert_eq!(line_total.cents(), 49_000);
    }

    #[test]
    fn test_percent_ratio_exact() {
        // 210.00 of 1000.00 is exactly 21.00%
        let pct = Percent::ratio(Money::from_cents(21_000), Money::from_cents(100_000));
        assert_eq!(pct.bps(), 2_100);
        assert_eq!(format!("{}", pct), "21.00%");
    }

    #[test]
    fn test_percent_ratio_rounds_half_away_from_zero() {
        // 1 of 3 = 33.333..% → 33.33%
        let third = Percent::ratio(Money::from_cents(1), Money::from_cents(3));
        assert_eq!(third.bps(), 3_333);

        // 1 of 16 = 6.25% exactly (no rounding needed)
        let sixteenth = Percent::ratio(Money::from_cents(1), Money::from_cents(16));
        assert_eq!(sixteenth.bps(), 625);

        // 1 of 8 = 12.5% exactly
        let eighth = Percent::ratio(Money::from_cents(1), Money::from_cents(8));
        assert_eq!(eighth.bps(), 1_250);

        // 1 of 4000 = 0.025% = 2.5 bps → rounds away from zero to 3 bps
        let tiny = Percent::ratio(Money::from_cents(1), Money::from_cents(4_000));
        assert_eq!(tiny.bps(), 3);

        // -1 of 4000 → -3 bps (symmetric)
        let neg = Percent::ratio(Money::from_cents(-1), Money::from_cents(4_000));
        assert_eq!(neg.bps(), -3);
    }

    #[test]
    fn test_percent_ratio_zero_whole() {
        let pct = Percent::ratio(Money::from_cents(500), Money::zero());
        assert!(pct.is_zero());

        let pct = Percent::ratio(Money::from_cents(500), Money::from_cents(-100));
        assert!(pct.is_zero());
    }

    #[test]
    fn test_percent_display() {
        assert_eq!(format!("{}", Percent::from_bps(0)), "0.00%");
        assert_eq!(format!("{}", Percent::from_bps(2_100)), "21.00%");
        assert_eq!(format!("{}", Percent::from_bps(3_333)), "33.33%");
        assert_eq!(format!("{}", Percent::from_bps(-250)), "-2.50%");
        assert_eq!(format!("{}", Percent::from_bps(10_000)), "100.00%");
    }
}
