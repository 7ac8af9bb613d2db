//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//!
//! The original register this system replaces kept prices in floating
//! point, where `0.1 + 0.2 != 0.3` and a three-way split of $10.00
//! silently loses a cent. Every monetary value here is an integer count
//! of cents; the only place a decimal point exists is display formatting.
//!
//! ## Usage
//! ```rust
//! use pawshop_core::money::Money;
//!
//! let price = Money::from_cents(1099); // $10.99
//! let line = price * 3i64;             // $32.97
//! let discount = line.percentage(1000); // 10% of the line
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: change calculations and margins can go negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Serde transparent**: persists as a bare integer in the JSON slots
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// For negative amounts only the major unit should be negative:
    /// `from_major_minor(-5, 50)` is -$5.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the larger of two values. Used for change (`max(0, cash - total)`).
    #[inline]
    pub fn max(self, other: Money) -> Money {
        Money(self.0.max(other.0))
    }

    /// Calculates a basis-point percentage of this amount, rounded half-up.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`. The +5000 provides
    /// rounding (5000/10000 = 0.5). i128 intermediate prevents overflow.
    ///
    /// ## Example
    /// ```rust
    /// use pawshop_core::money::Money;
    ///
    /// let subtotal = Money::from_cents(5500); // $55.00
    /// assert_eq!(subtotal.percentage(1000).cents(), 550); // 10% = $5.50
    /// ```
    pub fn percentage(&self, bps: u32) -> Money {
        let part = (self.0 as i128 * bps as i128 + 5000) / 10000;
        Money::from_cents(part as i64)
    }

    /// Calculates tax on this amount at the given rate.
    ///
    /// ## Example
    /// ```rust
    /// use pawshop_core::money::Money;
    /// use pawshop_core::types::TaxRate;
    ///
    /// let taxable = Money::from_cents(4950);       // $49.50
    /// let tax = taxable.calculate_tax(TaxRate::from_bps(1600)); // 16%
    /// assert_eq!(tax.cents(), 792);                // $7.92
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        self.percentage(rate.bps())
    }

    /// Multiplies by a quantity (line totals).
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Returns this amount reduced by a basis-point discount.
    ///
    /// Used by the storefront for per-product percentage discounts.
    pub fn apply_percentage_discount(&self, discount_bps: u32) -> Money {
        *self - self.percentage(discount_bps)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Human-readable `$D.CC`. UI layers may localize; this is the receipt and
/// log format.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0 * qty as i64)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, m| acc + m)
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
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(10, 99).cents(), 1099);
        assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3i64).cents(), 3000);

        let total: Money = [a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_percentage_rounding() {
        // $10.00 at 8.25% = $0.825 -> rounds to $0.83
        assert_eq!(Money::from_cents(1000).percentage(825).cents(), 83);
        // $55.00 at 10% = $5.50 exactly
        assert_eq!(Money::from_cents(5500).percentage(1000).cents(), 550);
    }

    #[test]
    fn test_register_tax_rate() {
        // The fixed register rate: 16% on the discounted base.
        let taxable = Money::from_cents(4950);
        assert_eq!(taxable.calculate_tax(TaxRate::from_bps(1600)).cents(), 792);
    }

    #[test]
    fn test_percentage_discount() {
        let price = Money::from_cents(10000);
        assert_eq!(price.apply_percentage_discount(1000).cents(), 9000);
        assert_eq!(price.apply_percentage_discount(0).cents(), 10000);
    }

    #[test]
    fn test_max_for_change() {
        let total = Money::from_cents(5220);
        let cash = Money::from_cents(5000);
        assert_eq!((cash - total).max(Money::zero()).cents(), 0);

        let cash = Money::from_cents(6000);
        assert_eq!((cash - total).max(Money::zero()).cents(), 780);
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&Money::from_cents(5742)).unwrap();
        assert_eq!(json, "5742");
        let back: Money = serde_json::from_str("5742").unwrap();
        assert_eq!(back.cents(), 5742);
    }
}
