//! # Money
//!
//! Cent-exact amounts for prices, line subtotals and bill totals.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Three dimes as f64:  0.1 + 0.1 + 0.1 = 0.30000000000000004             │
//! │  Three dimes as i64:  10 + 10 + 10    = 30                              │
//! │                                                                         │
//! │  Every amount in the till is an i64 count of cents. The catalog        │
//! │  service sends decimals ("2.50" or 2.5); those are read digit by       │
//! │  digit into cents at the boundary and never re-enter float math.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ```rust
//! use till_core::money::Money;
//!
//! let scone: Money = "3.25".parse().unwrap();
//! assert_eq!(scone.multiply_quantity(2).to_string(), "$6.50");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Money Type
// =============================================================================

/// An amount in cents.
///
/// Signed so that differences between totals can go below zero. Serde
/// derives encode the raw cent count (snapshots, logs); the catalog service
/// wire format goes through [`decimal`] instead.
///
/// ## Where Money is Used
/// ```text
/// CatalogItem.price ──► CartLine.unit_price ──► SnapshotLine.subtotal
///                                                      │
///                             CartSnapshot.total ◄─────┘
///                                     │
///                                     ▼
///                   BillLine.unit_price ──► Bill.total_amount
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Wraps a raw cent count: `Money::from_cents(1099)` is $10.99.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole-dollar part, truncated toward zero.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Cents after the decimal point, 0 through 99 regardless of sign.
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
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Line subtotal: unit price times quantity.
    ///
    /// Callers must keep `qty` within range; see
    /// [`Money::checked_multiply_quantity`].
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Line subtotal, or `None` when it does not fit in `i64` cents.
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Parses a decimal amount such as `"2.50"`, `"2.5"`, `"-3"` or
    /// `"0.30000000000000004"`.
    ///
    /// ## Rounding
    /// Amounts with more than two fractional digits are rounded to the
    /// nearest cent, half away from zero. The catalog service sums floats,
    /// so totals like `0.30000000000000004` do reach us and must land on
    /// 30 cents. Rounding operates on the decimal digits themselves.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("2.5").unwrap().cents(), 250);
    /// assert_eq!(Money::parse_decimal("2.675").unwrap().cents(), 268);
    /// assert!(Money::parse_decimal("two").is_err());
    /// ```
    pub fn parse_decimal(input: &str) -> CoreResult<Money> {
        let invalid = |reason: &str| CoreError::InvalidAmount {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = input.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        let (whole, fraction) = match unsigned.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (unsigned, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid("no digits"));
        }
        if !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid("expected a decimal number"));
        }

        let major: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid("amount out of range"))?
        };

        let mut digits = fraction.bytes().map(|b| i64::from(b - b'0'));
        let tens = digits.next().unwrap_or(0);
        let units = digits.next().unwrap_or(0);
        let round_up = digits.next().is_some_and(|d| d >= 5);

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(tens * 10 + units + i64::from(round_up)))
            .ok_or_else(|| invalid("amount out of range"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }

    /// Returns the amount as a decimal number for JSON encoding.
    ///
    /// Only used at the wire boundary: never feed the result back into
    /// arithmetic.
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// `$10.99`, `-$5.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        // pad() so column widths like {:>10} apply
        f.pad(&format!(
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        ))
    }
}

impl FromStr for Money {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::parse_decimal(s)
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

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Wire Codec
// =============================================================================

/// Serde adapter for decimal amounts on the wire.
///
/// Decodes JSON numbers (`2.5`, `3`) and decimal strings (`"2.50"`) into
/// cents; encodes as a JSON number. Use with
/// `#[serde(with = "till_core::money::decimal")]`.
pub mod decimal {
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    use super::Money;

    pub fn serialize<S>(money: &Money, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(money.to_decimal())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Money, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(DecimalVisitor)
    }

    struct DecimalVisitor;

    impl<'de> Visitor<'de> for DecimalVisitor {
        type Value = Money;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a decimal amount as a number or string")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
            v.checked_mul(100)
                .map(Money::from_cents)
                .ok_or_else(|| E::custom(format!("amount {} out of range", v)))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
            let v = i64::try_from(v).map_err(|_| E::custom("amount out of range"))?;
            self.visit_i64(v)
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
            if !v.is_finite() {
                return Err(E::custom("amount must be finite"));
            }
            // Display yields the shortest round-trip digits ("2.5" for 2.5)
            // and never scientific notation.
            Money::parse_decimal(&v.to_string()).map_err(E::custom)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
            Money::parse_decimal(v).map_err(E::custom)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
