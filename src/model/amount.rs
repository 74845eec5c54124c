//! Amount type for handling monetary values read from spreadsheet cells.
//!
//! This module provides the `Amount` type which wraps `Decimal` and handles parsing values that
//! may or may not include a currency symbol and thousands separators.

use anyhow::anyhow;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// The symbol used when displaying amounts.
pub const CURRENCY: &str = "₹";

/// Currency symbols that are tolerated, and discarded, when parsing.
const SYMBOLS: &[char] = &['₹', '$'];

/// Cell values that spreadsheet authors use to mean "nothing here".
const PLACEHOLDERS: &[&str] = &["-", "N/A"];

/// Represents a monetary amount.
///
/// Parsing is forgiving about the shapes that spreadsheet cells take: `"1,200"`, `"₹1,200"`,
/// `"-$50.00"` and `"1200"` all parse. Displaying always produces the dashboard currency format:
/// a rupee sign, thousands separators and no decimals.
///
/// # Examples
///
/// ```
/// # use expense_dashboard::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("1,200").unwrap();
/// assert_eq!(amount.to_string(), "₹1,200");
/// ```
///
/// Values that cannot be parsed coerce to zero:
/// ```
/// # use expense_dashboard::model::Amount;
/// assert!(Amount::coerce("N/A").is_zero());
/// assert!(Amount::coerce("abc").is_zero());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// Creates a new Amount from a Decimal value.
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Parses `s`, mapping blanks, placeholders and anything non-numeric to zero.
    pub fn coerce(s: &str) -> Self {
        if is_placeholder(s) {
            return Amount::ZERO;
        }
        Amount::from_str(s).unwrap_or_default()
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

    /// Returns the amount as an `f64` for charting.
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or_default()
    }

    /// `self + rhs`, or an error when the sum is too large for a `Decimal`.
    pub fn checked_add(self, rhs: Amount) -> anyhow::Result<Amount> {
        self.0
            .checked_add(rhs.0)
            .map(Amount)
            .ok_or_else(|| anyhow!("The sum of {} and {} is too large", self.0, rhs.0))
    }

    /// `self - rhs`, or an error when the difference is too large for a `Decimal`.
    pub fn checked_sub(self, rhs: Amount) -> anyhow::Result<Amount> {
        self.0
            .checked_sub(rhs.0)
            .map(Amount)
            .ok_or_else(|| anyhow!("The difference of {} and {} is too large", self.0, rhs.0))
    }

    /// `self / rhs`, or an error when `rhs` is zero or the quotient is too large.
    pub fn checked_div(self, rhs: Decimal) -> anyhow::Result<Amount> {
        self.0
            .checked_div(rhs)
            .map(Amount)
            .ok_or_else(|| anyhow!("Unable to divide {} by {rhs}", self.0))
    }

    /// `self` as a percentage of `whole`, or zero when `whole` is not positive. Fails when the
    /// percentage is too large for a `Decimal`.
    pub fn percent_of(&self, whole: Amount) -> anyhow::Result<Decimal> {
        if !whole.is_positive() {
            return Ok(Decimal::ZERO);
        }
        self.0
            .checked_div(whole.0)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .ok_or_else(|| anyhow!("{} as a percentage of {} is too large", self.0, whole.0))
    }
}

/// True for a cell that is blank or holds one of the conventional "no value" markers.
pub fn is_placeholder(s: &str) -> bool {
    let trimmed = s.trim();
    trimmed.is_empty() || PLACEHOLDERS.contains(&trimmed)
}

/// An error that can occur when parsing strings into `Decimal` values.
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
        if trimmed.is_empty() {
            return Ok(Amount::default());
        }

        // Move the sign in front of any currency symbol: "-₹50" and "₹-50" both become "-50"
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, trimmed),
        };
        let unsigned = unsigned.trim_start_matches(SYMBOLS).trim_start();
        let (negative, unsigned) = match unsigned.strip_prefix('-') {
            Some(rest) => (!negative, rest),
            None => (negative, unsigned),
        };

        // Remove commas (thousand separators)
        let digits = unsigned.replace(',', "");
        let parsed = Decimal::from_str(&digits)
            .or_else(|_| Decimal::from_scientific(&digits))
            .map_err(AmountError)?;
        Ok(Amount(if negative { -parsed } else { parsed }))
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let num = self.0.abs().to_f64().unwrap_or_default();
        write!(
            f,
            "{sign}{CURRENCY}{}",
            format_num::format_num!(",.0f", num)
        )
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.to_f64())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Amount::from_str(&s).map_err(serde::de::Error::custom)
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

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_plain() {
        let amount = Amount::from_str("50000").unwrap();
        assert_eq!(amount.value(), dec("50000"));
    }

    #[test]
    fn test_parse_with_commas() {
        let amount = Amount::from_str("1,200").unwrap();
        assert_eq!(amount.value(), dec("1200"));
    }

    #[test]
    fn test_parse_multiple_commas() {
        let amount = Amount::from_str("1,234,567.89").unwrap();
        assert_eq!(amount.value(), dec("1234567.89"));
    }

    #[test]
    fn test_parse_with_rupee_sign() {
        let amount = Amount::from_str("₹12,000").unwrap();
        assert_eq!(amount.value(), dec("12000"));
    }

    #[test]
    fn test_parse_negative_with_dollar_sign() {
        let amount = Amount::from_str("-$50.00").unwrap();
        assert_eq!(amount.value(), dec("-50.00"));
    }

    #[test]
    fn test_parse_sign_after_symbol() {
        let amount = Amount::from_str("₹-500").unwrap();
        assert_eq!(amount.value(), dec("-500"));
    }

    #[test]
    fn test_parse_float_rendering() {
        let amount = Amount::from_str("1234.5").unwrap();
        assert_eq!(amount.value(), dec("1234.5"));
    }

    #[test]
    fn test_parse_scientific() {
        let amount = Amount::from_str("1.5e3").unwrap();
        assert_eq!(amount.value(), dec("1500"));
    }

    #[test]
    fn test_parse_empty_string() {
        let amount = Amount::from_str("").unwrap();
        assert!(amount.is_zero());
    }

    #[test]
    fn test_parse_garbage_is_err() {
        assert!(Amount::from_str("abc").is_err());
        assert!(Amount::from_str("N/A").is_err());
    }

    #[test]
    fn test_coerce() {
        assert_eq!(Amount::coerce("1,200").value(), dec("1200"));
        assert!(Amount::coerce("").is_zero());
        assert!(Amount::coerce("  ").is_zero());
        assert!(Amount::coerce("-").is_zero());
        assert!(Amount::coerce("N/A").is_zero());
        assert!(Amount::coerce("twelve").is_zero());
    }

    #[test]
    fn test_is_placeholder() {
        assert!(is_placeholder(""));
        assert!(is_placeholder(" - "));
        assert!(is_placeholder("N/A"));
        assert!(!is_placeholder("0"));
        assert!(!is_placeholder("-5"));
    }

    #[test]
    fn test_display() {
        assert_eq!(Amount::new(dec("50000")).to_string(), "₹50,000");
        assert_eq!(Amount::new(dec("-1200")).to_string(), "-₹1,200");
        assert_eq!(Amount::new(Decimal::ZERO).to_string(), "₹0");
        assert_eq!(Amount::new(dec("999")).to_string(), "₹999");
    }

    #[test]
    fn test_zero_is_not_positive_or_negative() {
        let zero = Amount::from_str("0").unwrap();
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());
        assert!(zero.is_zero());
    }

    #[test]
    fn test_percent_of() {
        let part = Amount::new(dec("4000"));
        assert_eq!(part.percent_of(Amount::new(dec("40000"))).unwrap(), dec("10"));
        assert_eq!(part.percent_of(Amount::ZERO).unwrap(), Decimal::ZERO);
        assert_eq!(part.percent_of(Amount::new(dec("-5"))).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_percent_of_too_large() {
        let part = Amount::new(dec("100000000000000000000000"));
        let err = part.percent_of(Amount::new(dec("0.000001"))).unwrap_err();
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn test_arithmetic() {
        let a = Amount::new(dec("50000"));
        let b = Amount::new(dec("12000"));
        assert_eq!(a.checked_sub(b).unwrap().value(), dec("38000"));
        assert_eq!(a.checked_add(b).unwrap().value(), dec("62000"));
        assert_eq!(b.checked_div(Decimal::TWO).unwrap().value(), dec("6000"));
        assert!(b.checked_div(Decimal::ZERO).is_err());
    }

    #[test]
    fn test_arithmetic_overflow_is_err() {
        let max = Amount::new(Decimal::MAX);
        assert!(max.checked_add(Amount::new(Decimal::ONE)).is_err());
        assert!(Amount::new(Decimal::MIN)
            .checked_sub(Amount::new(Decimal::ONE))
            .is_err());
        assert!(max.checked_div(dec("0.5")).is_err());
    }

    #[test]
    fn test_serialize_as_number() {
        let amount = Amount::new(dec("1200"));
        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, "1200.0");
    }

    #[test]
    fn test_deserialize_from_string() {
        let amount: Amount = serde_json::from_str("\"₹1,200\"").unwrap();
        assert_eq!(amount.value(), dec("1200"));
    }
}
