//! Type-safe money representation using integer minor units.
//!
//! Amounts are stored as whole cents so that cart totals are exact across any
//! number of mutations. Decimal strings (e.g. `"24.99"`) cross the boundary via
//! [`rust_decimal`], never through floating point.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;
use core::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Basis points in one whole (100%).
const BPS_PER_UNIT: i128 = 10_000;

/// Errors that can occur when parsing a [`Money`] amount.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// The input is not a decimal number.
    #[error("invalid amount: {0}")]
    Invalid(String),
    /// The amount is below zero.
    #[error("amount cannot be negative")]
    Negative,
    /// The amount has more fractional digits than the currency allows.
    #[error("amount must have at most 2 decimal places")]
    TooPrecise,
    /// The amount does not fit in the cent range.
    #[error("amount is out of range")]
    OutOfRange,
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
    INR,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
            Self::INR => "₹",
        }
    }

    /// Three-letter ISO code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
            Self::INR => "INR",
        }
    }
}

/// A monetary amount in cents with its currency.
///
/// Arithmetic saturates at the `i64` cent bounds instead of wrapping.
///
/// ## Examples
///
/// ```
/// use artisan_market_core::{CurrencyCode, Money};
///
/// let price = Money::parse("24.99").unwrap();
/// assert_eq!(price.cents(), 2499);
/// assert_eq!(price.times(3).to_string(), "$74.97");
///
/// assert!(Money::parse("-1").is_err());
/// assert!(Money::parse("1.001").is_err());
/// assert_eq!(Money::from_cents(500, CurrencyCode::GBP).to_string(), "£5.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "MoneyRepr", into = "MoneyRepr")]
pub struct Money {
    cents: i64,
    currency: CurrencyCode,
}

impl Money {
    /// Create an amount from whole cents.
    #[must_use]
    pub const fn from_cents(cents: i64, currency: CurrencyCode) -> Self {
        Self { cents, currency }
    }

    /// Zero in the given currency.
    #[must_use]
    pub const fn zero(currency: CurrencyCode) -> Self {
        Self::from_cents(0, currency)
    }

    /// Parse a non-negative decimal amount in major units, in USD.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a decimal, is negative, has more
    /// than two fractional digits, or does not fit in the cent range.
    pub fn parse(s: &str) -> Result<Self, MoneyError> {
        let amount = Decimal::from_str(s.trim()).map_err(|_| MoneyError::Invalid(s.to_owned()))?;
        Self::from_decimal(amount, CurrencyCode::default())
    }

    /// Convert a decimal amount in major units into cents.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is negative, has more than two
    /// fractional digits, or does not fit in the cent range.
    pub fn from_decimal(amount: Decimal, currency: CurrencyCode) -> Result<Self, MoneyError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(MoneyError::Negative);
        }
        if amount.normalize().scale() > 2 {
            return Err(MoneyError::TooPrecise);
        }
        let cents = amount
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|c| c.to_i64())
            .ok_or(MoneyError::OutOfRange)?;
        Ok(Self { cents, currency })
    }

    /// The amount in cents.
    #[must_use]
    pub const fn cents(&self) -> i64 {
        self.cents
    }

    /// The currency of the amount.
    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// The amount in major units as an exact decimal.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        Decimal::new(self.cents, 2)
    }

    /// Whether the amount is exactly zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.cents == 0
    }

    /// Multiply by a quantity.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self {
            cents: self.cents.saturating_mul(i64::from(quantity)),
            currency: self.currency,
        }
    }

    /// Saturating addition, or `None` when the currencies differ.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        (self.currency == rhs.currency).then(|| Self {
            cents: self.cents.saturating_add(rhs.cents),
            currency: self.currency,
        })
    }

    /// Apply a rate expressed in basis points (800 = 8%), rounding half away
    /// from zero to the nearest cent.
    #[must_use]
    pub fn percent_bps(self, bps: u32) -> Self {
        let scaled = i128::from(self.cents) * i128::from(bps);
        let half = BPS_PER_UNIT / 2;
        let rounded = if scaled >= 0 {
            (scaled + half) / BPS_PER_UNIT
        } else {
            (scaled - half) / BPS_PER_UNIT
        };
        let cents = i64::try_from(rounded).unwrap_or(if rounded > 0 { i64::MAX } else { i64::MIN });
        Self {
            cents,
            currency: self.currency,
        }
    }
}

impl Add for Money {
    type Output = Self;

    /// Saturating addition.
    ///
    /// # Panics
    ///
    /// Panics if the operands are in different currencies. Use
    /// [`Money::checked_add`] when that can happen.
    fn add(self, rhs: Self) -> Self {
        match self.checked_add(rhs) {
            Some(sum) => sum,
            None => panic!(
                "cannot add {} to {}",
                rhs.currency.code(),
                self.currency.code()
            ),
        }
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.reduce(Add::add)
            .unwrap_or_else(|| Self::zero(CurrencyCode::default()))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let magnitude = Decimal::new(self.cents, 2).abs();
        write!(f, "{sign}{}{magnitude}", self.currency.symbol())
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Wire shape of [`Money`]: a decimal string plus its currency code.
#[derive(Serialize, Deserialize)]
struct MoneyRepr {
    amount: Decimal,
    #[serde(default)]
    currency_code: CurrencyCode,
}

impl TryFrom<MoneyRepr> for Money {
    type Error = MoneyError;

    fn try_from(repr: MoneyRepr) -> Result<Self, Self::Error> {
        Self::from_decimal(repr.amount, repr.currency_code)
    }
}

impl From<Money> for MoneyRepr {
    fn from(money: Money) -> Self {
        Self {
            amount: money.amount(),
            currency_code: money.currency,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_amounts() {
        assert_eq!(Money::parse("24.99").unwrap().cents(), 2499);
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("0.5").unwrap().cents(), 50);
        assert_eq!(Money::parse("9.990").unwrap().cents(), 999);
        assert_eq!(Money::parse(" 3.00 ").unwrap().cents(), 300);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(Money::parse("abc"), Err(MoneyError::Invalid(_))));
        assert!(matches!(Money::parse("-0.01"), Err(MoneyError::Negative)));
        assert!(matches!(Money::parse("1.001"), Err(MoneyError::TooPrecise)));
    }

    #[test]
    fn test_percent_bps_rounds_half_away_from_zero() {
        let usd = CurrencyCode::USD;
        assert_eq!(Money::from_cents(1000, usd).percent_bps(800).cents(), 80);
        // 2499.99 * 8% = 199.9992
        assert_eq!(Money::from_cents(249_999, usd).percent_bps(800).cents(), 20_000);
        // 0.0624 -> 0.06
        assert_eq!(Money::from_cents(78, usd).percent_bps(800).cents(), 6);
        assert_eq!(Money::from_cents(-1000, usd).percent_bps(800).cents(), -80);
    }

    #[test]
    fn test_times_and_sum() {
        let price = Money::from_cents(1999, CurrencyCode::USD);
        assert_eq!(price.times(3).cents(), 5997);
        assert_eq!(price.times(0).cents(), 0);

        let total: Money = [price, price.times(2)].into_iter().sum();
        assert_eq!(total.cents(), 5997);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Money::from_cents(i64::MAX - 1, CurrencyCode::USD);
        assert_eq!(huge.times(u32::MAX).cents(), i64::MAX);
        assert_eq!((huge + huge).cents(), i64::MAX);
    }

    #[test]
    fn test_checked_add_requires_same_currency() {
        let usd = Money::from_cents(100, CurrencyCode::USD);
        let inr = Money::from_cents(2000, CurrencyCode::INR);
        assert_eq!(usd.checked_add(usd), Some(Money::from_cents(200, CurrencyCode::USD)));
        assert_eq!(usd.checked_add(inr), None);
        assert_eq!(inr.checked_add(usd), None);
    }

    #[test]
    #[should_panic(expected = "cannot add INR to USD")]
    fn test_add_panics_on_currency_mismatch() {
        let _ = Money::from_cents(100, CurrencyCode::USD) + Money::from_cents(2000, CurrencyCode::INR);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(2079, CurrencyCode::USD).to_string(), "$20.79");
        assert_eq!(Money::from_cents(0, CurrencyCode::USD).to_string(), "$0.00");
        assert_eq!(Money::from_cents(-150, CurrencyCode::EUR).to_string(), "-€1.50");
        assert_eq!(Money::from_cents(129_999, CurrencyCode::INR).to_string(), "₹1299.99");
    }

    #[test]
    fn test_serde_shape() {
        let money = Money::from_cents(999, CurrencyCode::USD);
        let json = serde_json::to_value(money).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "amount": "9.99", "currency_code": "USD" })
        );

        let parsed: Money = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, money);
    }

    #[test]
    fn test_deserialize_defaults_currency_and_validates() {
        let parsed: Money = serde_json::from_str(r#"{ "amount": "5.00" }"#).unwrap();
        assert_eq!(parsed, Money::from_cents(500, CurrencyCode::USD));

        assert!(serde_json::from_str::<Money>(r#"{ "amount": "-5.00" }"#).is_err());
    }
}
