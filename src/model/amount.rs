//! Amount type for handling monetary values that may arrive as numbers or as text.
//!
//! This module provides the `Amount` type which wraps `Decimal`. Every value that enters the
//! program, whether typed by the user or read back from storage, passes through
//! [`Amount::coerce`] or the `Deserialize` impl, so an `Amount` held in memory is always numeric.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use std::str::FromStr;

/// Represents a monetary amount.
///
/// Amounts are displayed with exactly two decimal places and serialized as JSON numbers carrying
/// every stored digit. Arithmetic saturates at the bounds of `Decimal` instead of panicking.
///
/// # Examples
///
/// Parsing user input:
/// ```
/// # use finance_tracker::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str(" 1,200.5 ").unwrap();
/// assert_eq!(amount.to_string(), "1200.50");
/// ```
///
/// Blank or non-numeric input does not coerce:
/// ```
/// # use finance_tracker::model::Amount;
/// assert!(Amount::coerce("").is_none());
/// assert!(Amount::coerce("abc").is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// The largest magnitude accepted from user input: one quadrillion.
    pub const MAX: Amount = Amount(Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0));

    /// Creates a new Amount from a Decimal value.
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is positive.
    pub fn is_positive(&self) -> bool {
        !self.is_zero() && self.0.is_sign_positive()
    }

    /// Returns true if the amount is negative.
    pub fn is_negative(&self) -> bool {
        !self.is_zero() && self.0.is_sign_negative()
    }

    /// Returns true if the magnitude of the amount does not exceed `Amount::MAX`.
    pub fn is_within_limit(&self) -> bool {
        self.0.abs() <= Self::MAX.0
    }

    /// Turns raw text into an `Amount`. Returns `None` when the text is blank or is not a number.
    pub fn coerce(raw: &str) -> Option<Amount> {
        if raw.trim().is_empty() {
            return None;
        }
        Amount::from_str(raw).ok()
    }

    /// The percentage that `self` represents of `whole`. A zero `whole` yields zero rather than an
    /// undefined value, as does a result too large to represent.
    pub fn percent_of(&self, whole: Amount) -> Decimal {
        if whole.is_zero() {
            return Decimal::ZERO;
        }
        self.0
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|scaled| scaled.checked_div(whole.0))
            .unwrap_or(Decimal::ZERO)
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
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        // Handle empty string
        if trimmed.is_empty() {
            return Ok(Amount::default());
        }

        // Remove commas (thousand separators)
        let without_commas = trimmed.replace(',', "");

        let value = Decimal::from_str(&without_commas)
            .or_else(|_| Decimal::from_scientific(&without_commas))
            .map_err(AmountError)?;
        Ok(Amount(value))
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::Error as _;
        let number = serde_json::Number::from_str(&self.0.normalize().to_string())
            .map_err(|e| S::Error::custom(format!("amount {} is not a number: {e}", self.0)))?;
        number.serialize(serializer)
    }
}

/// Stored amounts may have been written as numbers or as numeric-looking strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredAmount {
    Number(serde_json::Number),
    Text(String),
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = match Option::<StoredAmount>::deserialize(deserializer)? {
            None => return Ok(Amount::ZERO),
            Some(StoredAmount::Number(n)) => n.to_string(),
            Some(StoredAmount::Text(s)) => s,
        };
        Amount::from_str(&text).map_err(serde::de::Error::custom)
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

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Amount(Decimal::from(value))
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Amount) -> Amount {
        Amount(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
