//! Money

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use thiserror::Error;

/// A monetary amount in the storefront currency.
pub type Amount = Money<'static, Currency>;

/// Minor units per major unit for every supported currency.
const MINOR_PER_MAJOR: i64 = 100;

/// Errors raised while converting wire amounts into [`Amount`]s.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    /// The amount cannot be represented in minor units.
    #[error("amount {0} cannot be represented in minor units")]
    OutOfRange(Decimal),

    /// The currency code is not one the storefront trades in.
    #[error("unsupported currency: {0}")]
    UnknownCurrency(String),
}

/// Currency used when none is configured.
pub fn default_currency() -> &'static Currency {
    iso::INR
}

/// Look up a supported currency by ISO code (case-insensitive).
///
/// # Errors
///
/// Returns [`AmountError::UnknownCurrency`] for codes outside the supported set.
pub fn parse_currency(code: &str) -> Result<&'static Currency, AmountError> {
    match code.trim().to_ascii_uppercase().as_str() {
        "INR" => Ok(iso::INR),
        "NPR" => Ok(iso::NPR),
        "PKR" => Ok(iso::PKR),
        "USD" => Ok(iso::USD),
        "GBP" => Ok(iso::GBP),
        "EUR" => Ok(iso::EUR),
        other => Err(AmountError::UnknownCurrency(other.to_string())),
    }
}

/// Convert a major-unit decimal (e.g. `20.80`) to an [`Amount`], rounding half away from zero.
///
/// # Errors
///
/// Returns [`AmountError::OutOfRange`] if the value overflows `i64` minor units.
pub fn amount_from_decimal(value: Decimal, currency: &'static Currency) -> Result<Amount, AmountError> {
    let minor = value
        .checked_mul(Decimal::from(MINOR_PER_MAJOR))
        .map(|scaled| scaled.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|scaled| scaled.to_i64())
        .ok_or(AmountError::OutOfRange(value))?;

    Ok(Money::from_minor(minor, currency))
}

/// Convert an amount back into a major-unit decimal for the wire.
pub fn amount_to_decimal(amount: &Amount) -> Decimal {
    Decimal::new(amount.to_minor_units(), 2).normalize()
}

/// Zero in the given currency.
pub fn zero(currency: &'static Currency) -> Amount {
    Money::from_minor(0, currency)
}

/// Format an amount the way the storefront displays prices, e.g. `Rs. 2080`.
///
/// Whole amounts drop their fractional part; other amounts keep two decimals.
pub fn display_amount(amount: &Amount) -> String {
    let currency = amount.currency();

    let prefix = match currency.iso_alpha_code {
        "INR" | "NPR" | "PKR" => "Rs.",
        other => other,
    };

    let minor = amount.to_minor_units();

    let value = if minor % MINOR_PER_MAJOR == 0 {
        Decimal::from(minor / MINOR_PER_MAJOR)
    } else {
        Decimal::new(minor, 2)
    };

    format!("{prefix} {value}")
}
