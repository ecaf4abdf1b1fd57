//! # Money Module
//!
//! Provides the `Money` type for handling prices safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The catalog sends prices as JSON numbers:                              │
//! │    { "price": 179.9 }                                                   │
//! │                                                                         │
//! │  Summing floats for a cart total drifts:                                │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    179.9 is converted ONCE when a total is needed → 17990 cents         │
//! │    Every subtotal and total after that is integer math                  │
//! │    Arithmetic saturates at i64::MIN / i64::MAX instead of wrapping      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rocket_core::money::Money;
//!
//! let price = Money::from_cents(17990); // R$ 179,90
//! let line = price * 2;
//! assert_eq!(line.cents(), 35980);
//! assert_eq!(line.to_string(), "R$ 359,80");
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (centavos for BRL).
///
/// ## Design Decisions
/// - **i64 (signed)**: totals never go negative today, but differences can
/// - **Single field tuple struct**: Zero-cost abstraction over i64
///
/// ## Where Money Flows
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Catalog price (JSON number) ──► unit_price() ──► LineItem.subtotal     │
/// │                                                          │              │
/// │                                                          ▼              │
/// │                                       Cart.total ──► "R$ 539,70" in UI  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use rocket_core::money::Money;
    ///
    /// let price = Money::from_cents(13990);
    /// assert_eq!(price.cents(), 13990);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Reads a catalog price (a decimal JSON number) as cents.
    ///
    /// Rounds to the nearest cent. Prices beyond the i64 range clamp to it.
    ///
    /// ## Example
    /// ```rust
    /// use rocket_core::money::Money;
    /// use serde_json::Number;
    ///
    /// let price = Number::from_f64(179.9).unwrap();
    /// assert_eq!(Money::from_price(&price).cents(), 17990);
    /// assert_eq!(Money::from_price(&Number::from(200)).cents(), 20000);
    /// ```
    pub fn from_price(price: &Number) -> Self {
        if let Some(whole) = price.as_i64() {
            Money(whole.saturating_mul(100))
        } else if price.is_u64() {
            Money(i64::MAX)
        } else {
            // `as` saturates on out-of-range floats
            Money((price.as_f64().unwrap_or(0.0) * 100.0).round() as i64)
        }
    }

    /// Writes this value as a catalog price: an integer when whole,
    /// otherwise a decimal.
    pub fn to_price(&self) -> Number {
        if self.0 % 100 == 0 {
            return Number::from(self.0 / 100);
        }
        Number::from_f64(self.0 as f64 / 100.0).unwrap_or_else(|| Number::from(self.major()))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (reais) portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
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

    /// Multiplies a unit price by a line amount, saturating on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use rocket_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(13990);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 41970);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Formats as Brazilian Real the way the storefront does (`R$ 1.234,50`).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.major().abs().to_string();

        // Group thousands with '.'
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }

        write!(f, "{}R$ {},{:02}", sign, grouped, self.minor())
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

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
