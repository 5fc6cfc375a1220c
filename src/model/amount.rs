//! Amount type for handling monetary values.
//!
//! This module provides the `Amount` type which wraps `Decimal` and handles parsing values that
//! may or may not include thousands separators.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// Represents an amount of money in the single configured currency.
///
/// Sums are exact: no rounding happens until an `Amount` is displayed, and display always shows
/// exactly two fractional digits with commas as thousands separators. A single expense may not
/// exceed `Amount::LIMIT`, which keeps any realistic total far inside `Decimal`'s range; sums that
/// would still overflow saturate at `Decimal::MAX`.
///
/// # Examples
///
/// ```
/// # use expense_tracker::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("1,234.5").unwrap();
/// assert_eq!(amount.to_string(), "1,234.50");
/// ```
///
/// When persisted, an amount is a plain JSON number:
/// ```
/// # use expense_tracker::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("75").unwrap();
/// assert_eq!(serde_json::to_string(&amount).unwrap(), "75.0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount {
    #[serde(with = "rust_decimal::serde::float")]
    value: Decimal,
}

impl Amount {
    pub const ZERO: Amount = Amount::new(Decimal::ZERO);

    /// The largest amount a single expense may have: one quadrillion.
    pub const LIMIT: Amount =
        Amount::new(Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0));

    /// Creates a new Amount from a Decimal value.
    pub const fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Returns true if the amount is positive.
    pub fn is_positive(&self) -> bool {
        !self.value.is_zero() && self.value.is_sign_positive()
    }

    /// Returns true if the amount is positive and no greater than `Amount::LIMIT`.
    pub fn is_valid_expense(&self) -> bool {
        self.is_positive() && self.value <= Self::LIMIT.value
    }

    /// Lossy conversion for chart widgets, which only deal in floats.
    pub fn to_f64(&self) -> f64 {
        self.value.to_f64().unwrap_or_default()
    }
}

/// An error that can occur when parsing strings into `Amount` values.
pub struct AmountError(rust_decimal::Error);

impl Debug for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl std::error::Error for AmountError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Thousands separators are allowed but carry no meaning
        let without_commas = s.trim().replace(',', "");
        let value = Decimal::from_str(&without_commas).map_err(AmountError)?;
        Ok(Amount::new(value))
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let rounded = self
            .value
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        let fixed = format!("{:.2}", rounded.abs());
        let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
        write!(f, "{sign}{}.{fraction}", group_thousands(whole))
    }
}

/// Inserts a comma between every group of three digits, counting from the right.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (ix, c) in digits.chars().enumerate() {
        if ix > 0 && (digits.len() - ix) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Self) -> Self::Output {
        Amount::new(self.value.saturating_add(rhs.value))
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.value = self.value.saturating_add(rhs.value);
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}
