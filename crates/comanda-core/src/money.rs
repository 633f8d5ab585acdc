//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Averaging two pizza flavors in floating point:                         │
//! │    (35.9 + 38.3) / 2 = 37.099999999999994  ❌ WRONG!                    │
//! │                                                                         │
//! │  An empty flavor list in floating point:                                │
//! │    Math.max() = -Infinity, 0 / 0 = NaN      ❌ LEAKS INTO THE ORDER      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    (3590 + 3830) / 2 = 3710 cents                                       │
//! │    average(&[]) = None, so the caller must decide what to do            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use comanda_core::money::Money;
//!
//! let size_price = Money::from_cents(3000); // $30.00
//! let extras = Money::from_cents(350) + Money::from_cents(200);
//!
//! let unit = size_price + extras;
//! assert_eq!(unit.cents(), 3550);
//! assert_eq!(unit.multiply_quantity(2).cents(), 7100);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Where Money Flows
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Size.price ─┐                                                          │
/// │              ├─► base price ─┐                                          │
/// │  Flavor.price┘               ├─► unit price ─► line total ─► subtotal   │
/// │  Addon.price ─► surcharge ───┘                                          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use comanda_core::money::Money;
    ///
    /// let price = Money::from_cents(4200); // Represents $42.00
    /// assert_eq!(price.cents(), 4200);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use comanda_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(3550);
    /// assert_eq!(unit_price.multiply_quantity(2).cents(), 7100);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Arithmetic mean of a set of amounts, rounded to the nearest cent.
    ///
    /// Halves round away from zero. Returns `None` for an empty slice so an
    /// "average of nothing" can never turn into a price.
    ///
    /// ## Example
    /// ```rust
    /// use comanda_core::money::Money;
    ///
    /// let avg = Money::average(&[Money::from_cents(1000), Money::from_cents(1400)]);
    /// assert_eq!(avg, Some(Money::from_cents(1200)));
    ///
    /// // 10.01 / 2 = 5.005 → 5.01
    /// let avg = Money::average(&[Money::from_cents(1001), Money::zero()]);
    /// assert_eq!(avg, Some(Money::from_cents(501)));
    ///
    /// assert_eq!(Money::average(&[]), None);
    /// ```
    pub fn average(amounts: &[Money]) -> Option<Money> {
        if amounts.is_empty() {
            return None;
        }

        // i128 so summing many large amounts cannot overflow
        let total: i128 = amounts.iter().map(|m| m.0 as i128).sum();
        let count = amounts.len() as i128;
        let rounded = (total.abs() * 2 + count) / (count * 2);
        let signed = if total < 0 { -rounded } else { rounded };

        Some(Money(signed as i64))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for logs and diagnostics. The terminal formats amounts with the
/// configured currency symbol for anything customer-facing.
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

impl Default for Money {
    fn default() -> Self {
        Money::zero()
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

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
