//! Client configuration

use std::{path::PathBuf, time::Duration};

use clap::Args;
use rusty_money::iso::Currency;
use thiserror::Error;

use storefront::prelude::{Amount, AmountError};

use crate::{
    config::{
        backend::BackendConfig, checkout::CheckoutConfig, logging::LoggingConfig,
        session::SessionConfig,
    },
    session::default_token_path,
};

pub mod backend;
pub mod checkout;
pub mod logging;
pub mod session;

pub use logging::LogFormat;

/// Errors raised while deriving runtime settings from the parsed configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Unsupported currency, or a fee that does not fit minor units.
    #[error(transparent)]
    Amount(#[from] AmountError),

    #[error("delivery fee cannot be negative")]
    NegativeDeliveryFee,

    #[error("min receipt poll delay exceeds max delay")]
    InvalidPollDelays,

    /// No `--token-file` given and the platform has no config directory.
    #[error("no token file location; pass --token-file")]
    NoTokenPath,
}

/// Storefront client configuration, shared by every command.
#[derive(Debug, Args)]
pub struct AppConfig {
    /// Backend connection settings.
    #[command(flatten)]
    pub backend: BackendConfig,

    /// Session persistence settings.
    #[command(flatten)]
    pub session: SessionConfig,

    /// Checkout and payment settings.
    #[command(flatten)]
    pub checkout: CheckoutConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Currency every amount is expressed in.
    ///
    /// # Errors
    ///
    /// Returns an error for an unsupported currency code.
    pub fn currency(&self) -> Result<&'static Currency, ConfigError> {
        self.checkout.currency()
    }

    /// Flat delivery fee added to every order.
    ///
    /// # Errors
    ///
    /// Returns an error for an unsupported currency or a negative fee.
    pub fn delivery_fee(&self) -> Result<Amount, ConfigError> {
        self.checkout.delivery_fee()
    }

    /// Where the bearer token is persisted.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoTokenPath`] when no path is configured and no
    /// default exists.
    pub fn token_path(&self) -> Result<PathBuf, ConfigError> {
        self.session
            .token_file
            .clone()
            .or_else(default_token_path)
            .ok_or(ConfigError::NoTokenPath)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        self.backend.request_timeout()
    }
}
