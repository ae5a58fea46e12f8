//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │    0.1 + 0.2 = 0.30000000000000004                                      │
//! │                                                                         │
//! │  Stored prices are decimal numbers (the persisted contract is shared    │
//! │  with a JavaScript front end), so every amount is converted to integer  │
//! │  cents when it enters a computation and converted back only when a      │
//! │  snapshot is written.                                                   │
//! │                                                                         │
//! │    30.00 → 3000 cents   ×2 nights → 6000 cents → 60.0                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pousada_core::money::Money;
//!
//! let rate = Money::from_decimal(150.0);
//! let stay = rate.multiply_quantity(2);
//! assert_eq!(stay.cents(), 30000);
//! assert_eq!(stay.to_decimal(), 300.0);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (centavos).
///
/// ## Where Money is Used
/// ```text
/// Room.daily_rate ─────────► room_total ──┐
/// Product.price (meals) ───► meal_total ──┤
/// OrderItem.product_price ─► order_total ─┼──► total_amount ──► PaymentLedger
/// Room.package_price ──────► package_total┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from a stored decimal amount, rounding to the
    /// nearest cent.
    ///
    /// Non-finite input (NaN, infinity) is treated as zero.
    ///
    /// ## Example
    /// ```rust
    /// use pousada_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(10.99).cents(), 1099);
    /// assert_eq!(Money::from_decimal(0.1 + 0.2).cents(), 30);
    /// assert_eq!(Money::from_decimal(f64::NAN).cents(), 0);
    /// ```
    pub fn from_decimal(value: f64) -> Self {
        if !value.is_finite() {
            return Money::zero();
        }
        Money((value * 100.0).round() as i64)
    }

    /// Converts back to the decimal representation used by stored records.
    #[inline]
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (reais) portion.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

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

    /// Multiplies money by a quantity (nights, units ordered), saturating at
    /// the `i64` bounds.
    ///
    /// ## Example
    /// ```rust
    /// use pousada_core::money::Money;
    ///
    /// let breakfast = Money::from_cents(3000);
    /// assert_eq!(breakfast.multiply_quantity(3).cents(), 9000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Divides the amount into `parts` equal shares, rounded to the nearest
    /// cent. Used for the bill-splitting display only.
    ///
    /// Returns `None` for zero parts.
    ///
    /// ## Example
    /// ```rust
    /// use pousada_core::money::Money;
    ///
    /// let total = Money::from_cents(1000);
    /// assert_eq!(total.split(3).map(|m| m.cents()), Some(333));
    /// assert_eq!(total.split(0), None);
    /// ```
    pub fn split(&self, parts: u32) -> Option<Money> {
        if parts == 0 {
            return None;
        }
        let parts = parts as i128;
        let value = self.0 as i128;
        // Round half away from zero.
        let share = if value >= 0 {
            (value * 2 + parts) / (parts * 2)
        } else {
            (value * 2 - parts) / (parts * 2)
        };
        Some(Money(share as i64))
    }

    /// Returns `self - other`, floored at zero.
    #[inline]
    pub fn saturating_excess_over(&self, other: Money) -> Money {
        if self.0 > other.0 {
            Money(self.0.saturating_sub(other.0))
        } else {
            Money::zero()
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================
//
// Arithmetic saturates instead of overflowing: stored stays are not bounded by
// input validation, and a bill must never panic.

/// Plain decimal rendering (`1234.50`). Currency symbols and separators are a
/// presentation concern handled by the application configuration.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.units().abs(), self.cents_part())
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
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
