//! Session Config

use std::path::PathBuf;

use clap::Args;

/// Session persistence settings.
#[derive(Debug, Args)]
pub struct SessionConfig {
    /// File the bearer token is kept in; defaults to the user config directory
    #[arg(long, env = "STOREFRONT_TOKEN_FILE", global = true)]
    pub token_file: Option<PathBuf>,
}
