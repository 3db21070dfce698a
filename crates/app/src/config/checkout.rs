//! Checkout Config

use std::time::Duration;

use clap::Args;
use rust_decimal::Decimal;
use rusty_money::iso::Currency;

use storefront::{
    money::{amount_from_decimal, parse_currency},
    prelude::Amount,
};

use crate::config::ConfigError;

/// Checkout and payment settings.
#[derive(Debug, Args)]
pub struct CheckoutConfig {
    /// Flat delivery fee in major units
    #[arg(long, env = "STOREFRONT_DELIVERY_FEE", default_value = "280", global = true)]
    pub delivery_fee: Decimal,

    /// ISO currency code for all amounts
    #[arg(long, env = "STOREFRONT_CURRENCY", default_value = "INR", global = true)]
    pub currency: String,

    /// Receipt lookups after a successful payment
    #[arg(long, env = "STOREFRONT_RECEIPT_POLL_ATTEMPTS", default_value_t = 5_usize, global = true)]
    pub receipt_poll_attempts: usize,

    /// Initial delay between receipt lookups in milliseconds
    #[arg(long, env = "STOREFRONT_RECEIPT_POLL_MIN_DELAY_MS", default_value_t = 500_u64, global = true)]
    pub receipt_poll_min_delay_ms: u64,

    /// Upper bound for the delay between receipt lookups in milliseconds
    #[arg(long, env = "STOREFRONT_RECEIPT_POLL_MAX_DELAY_MS", default_value_t = 4_000_u64, global = true)]
    pub receipt_poll_max_delay_ms: u64,
}

impl CheckoutConfig {
    /// # Errors
    ///
    /// Returns an error for an unsupported currency code.
    pub fn currency(&self) -> Result<&'static Currency, ConfigError> {
        Ok(parse_currency(&self.currency)?)
    }

    /// # Errors
    ///
    /// Returns an error for an unsupported currency or a negative fee.
    pub fn delivery_fee(&self) -> Result<Amount, ConfigError> {
        if self.delivery_fee.is_sign_negative() && !self.delivery_fee.is_zero() {
            return Err(ConfigError::NegativeDeliveryFee);
        }

        Ok(amount_from_decimal(self.delivery_fee, self.currency()?)?)
    }

    /// Min and max delay between receipt lookups.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPollDelays`] if min exceeds max.
    pub fn receipt_poll_delays(&self) -> Result<(Duration, Duration), ConfigError> {
        if self.receipt_poll_min_delay_ms > self.receipt_poll_max_delay_ms {
            return Err(ConfigError::InvalidPollDelays);
        }

        Ok((
            Duration::from_millis(self.receipt_poll_min_delay_ms),
            Duration::from_millis(self.receipt_poll_max_delay_ms),
        ))
    }
}
