//! Whole-unit price representation.
//!
//! Catalog prices are non-negative integers in the store currency's display
//! unit (the storefront lists rupees without paise). Decimal arithmetic is
//! only used at the display-to-data boundary, when a formatted price string
//! has to be turned back into a number.

use core::fmt;
use core::iter::Sum;
use core::str::FromStr;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Characters stripped from display text before parsing a price.
const CURRENCY_SYMBOLS: &[char] = &['₹', '$', '€', '£'];

/// A non-negative price.
///
/// Serializes as a bare JSON number so persisted cart entries keep the
/// `"price": 1999` shape. Deserializing accepts any JSON number: negative
/// values become zero and fractions round to the nearest unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(0);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// Get the underlying amount.
    #[must_use]
    pub const fn amount(&self) -> u64 {
        self.0
    }

    /// Add two prices, clamping at `u64::MAX`.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Parse a price out of localized display text such as `"₹1,999"`.
    ///
    /// Currency symbols, thousands separators and whitespace are stripped
    /// before parsing. Anything that still fails to parse yields zero, as do
    /// negative amounts. Fractional amounts round to the nearest unit.
    ///
    /// ```
    /// use pashle_core::Price;
    ///
    /// assert_eq!(Price::from_display("₹1,23,456").amount(), 123_456);
    /// assert_eq!(Price::from_display("Sold out").amount(), 0);
    /// ```
    #[must_use]
    pub fn from_display(text: &str) -> Self {
        let cleaned: String = text
            .chars()
            .filter(|c| !CURRENCY_SYMBOLS.contains(c) && *c != ',' && !c.is_whitespace())
            .collect();

        if cleaned.is_empty() {
            return Self::ZERO;
        }

        Decimal::from_str(&cleaned)
            .ok()
            .map_or(Self::ZERO, Self::from_decimal)
    }

    /// Round a decimal amount to whole units. Negative amounts are zero.
    fn from_decimal(amount: Decimal) -> Self {
        if amount.is_sign_negative() {
            return Self::ZERO;
        }
        amount
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u64()
            .map_or(Self::ZERO, Self)
    }

    /// Format for display in the given currency (e.g., `₹1,23,456`).
    #[must_use]
    pub fn display(&self, currency: CurrencyCode) -> String {
        let digits = self.0.to_string();
        let grouped = match currency {
            CurrencyCode::INR => group_indian(&digits),
            _ => group_thousands(&digits),
        };
        format!("{}{grouped}", currency.symbol())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PriceVisitor)
    }
}

struct PriceVisitor;

impl Visitor<'_> for PriceVisitor {
    type Value = Price;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON number")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Price, E> {
        Ok(Price(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Price, E> {
        Ok(u64::try_from(v).map_or(Price::ZERO, Price))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Price, E> {
        Ok(Decimal::from_f64(v).map_or(Price::ZERO, Price::from_decimal))
    }
}

impl From<u64> for Price {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

impl From<Price> for u64 {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}

impl<'a> Sum<&'a Self> for Price {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    INR,
    USD,
    EUR,
    GBP,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::INR => "₹",
            Self::USD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }
}

impl FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "INR" => Ok(Self::INR),
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            _ => Err(format!("unsupported currency: {s}")),
        }
    }
}

/// Group ASCII digits in threes: `1234567` -> `1,234,567`.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Indian digit grouping: last three digits, then pairs: `1234567` -> `12,34,567`.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_owned();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut out = String::with_capacity(digits.len() + digits.len() / 2);
    for (i, c) in head.chars().enumerate() {
        if i > 0 && (head.len() - i) % 2 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.push(',');
    out.push_str(tail);
    out
}
