//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer whole units                                      │
//! │    The storefront prices in UZS with no subunit, so one unit = 1 so'm. │
//! │    Totals are plain integer sums and never drift.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use atlas_core::money::Money;
//!
//! let price = Money::from_units(250_000);
//! let line_total = price.multiply_quantity(2);
//! assert_eq!(line_total.units(), 500_000);
//! assert_eq!(line_total.to_string(), "500,000 UZS");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use ts_rs::TS;

use crate::CURRENCY_CODE;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole currency units.
///
/// ## Design Decisions
/// - **i64 (signed)**: matches the JSON number the storefront stores
/// - **Saturating arithmetic**: a cart total can never wrap around
/// - **Newtype serde**: serializes as a bare number
///
/// ## Where Money is Used
/// ```text
/// LineItem.price ──► LineItem::line_total() ──► CartTotals.total_price
///                                                    │
///                                                    └──► "600,000 UZS" in UI
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(#[ts(type = "number")] i64);

impl Money {
    /// Creates a Money value from whole units.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in whole units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
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

    /// Multiplies money by a quantity, saturating at the i64 bounds.
    ///
    /// ## Example
    /// ```rust
    /// use atlas_core::money::Money;
    ///
    /// let unit_price = Money::from_units(200_000);
    /// assert_eq!(unit_price.multiply_quantity(3).units(), 600_000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Formats the amount with a thousands separator and no currency code.
    ///
    /// ## Example
    /// ```rust
    /// use atlas_core::money::Money;
    ///
    /// assert_eq!(Money::from_units(1_250_000).format_grouped(' '), "1 250 000");
    /// assert_eq!(Money::from_units(-5_000).format_grouped(','), "-5,000");
    /// ```
    pub fn format_grouped(&self, separator: char) -> String {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

        if self.0 < 0 {
            grouped.push('-');
        }

        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(separator);
            }
            grouped.push(ch);
        }

        grouped
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the grouped amount followed by the currency code,
/// the same way the storefront renders prices ("600,000 UZS").
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.format_grouped(','), CURRENCY_CODE)
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

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
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
    fn test_from_units() {
        let money = Money::from_units(250_000);
        assert_eq!(money.units(), 250_000);
        assert!(!money.is_zero());
    }

    #[test]
    fn test_binding_matches_wire_number() {
        assert_eq!(Money::inline(), "number");
        assert_eq!(serde_json::to_string(&Money::from_units(600_000)).unwrap(), "600000");
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_units(600_000).to_string(), "600,000 UZS");
        assert_eq!(Money::from_units(999).to_string(), "999 UZS");
        assert_eq!(Money::from_units(1_000).to_string(), "1,000 UZS");
        assert_eq!(Money::zero().to_string(), "0 UZS");
        assert_eq!(Money::from_units(-1_500).to_string(), "-1,500 UZS");
    }

    #[test]
    fn test_format_grouped_large() {
        assert_eq!(
            Money::from_units(i64::MAX).format_grouped(','),
            "9,223,372,036,854,775,807"
        );
        assert_eq!(
            Money::from_units(i64::MIN).format_grouped(','),
            "-9,223,372,036,854,775,808"
        );
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_units(250_000);
        let b = Money::from_units(350_000);

        assert_eq!((a + b).units(), 600_000);

        let mut c = a;
        c += b;
        assert_eq!(c.units(), 600_000);

        let total: Money = vec![a, b, Money::from_units(1)].into_iter().sum();
        assert_eq!(total.units(), 600_001);
    }

    #[test]
    fn test_multiply_quantity_saturates() {
        let price = Money::from_units(i64::MAX / 2);
        assert_eq!(price.multiply_quantity(3).units(), i64::MAX);
        assert_eq!((Money::from_units(i64::MAX) + Money::from_units(1)).units(), i64::MAX);
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&Money::from_units(200_000)).unwrap();
        assert_eq!(json, "200000");
    }
}
