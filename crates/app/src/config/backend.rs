//! Backend Config

use std::time::Duration;

use clap::Args;
use reqwest::Url;

/// Backend connection settings.
#[derive(Debug, Args)]
pub struct BackendConfig {
    /// Storefront backend base URL
    #[arg(
        long,
        env = "STOREFRONT_BASE_URL",
        default_value = "http://localhost:8080",
        global = true
    )]
    pub base_url: Url,

    /// Per-request timeout in seconds
    #[arg(
        long,
        env = "STOREFRONT_REQUEST_TIMEOUT_SECONDS",
        default_value_t = 30_u64,
        global = true
    )]
    pub request_timeout_seconds: u64,
}

impl BackendConfig {
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}
