//! API errors.

use reqwest::StatusCode;
use thiserror::Error;

use storefront::prelude::{AmountError, CartError};

use crate::session::SessionError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend refused the request with a message for the user.
    #[error("{message}")]
    Rejected {
        status: StatusCode,
        message: String,
    },

    /// The backend answered 401; the session has been reset.
    #[error("session expired, please log in again")]
    Unauthorized,

    /// The session expired earlier and no new token has been set.
    #[error("not logged in")]
    SessionExpired,

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response from backend: {0}")]
    UnexpectedResponse(String),

    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),

    #[error("invalid amount in response")]
    Amount(#[from] AmountError),

    #[error("invalid cart line in response")]
    Cart(#[from] CartError),

    #[error("session storage error")]
    Session(#[from] SessionError),
}

impl ApiError {
    /// Message suitable for showing to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Whether this error reset the session.
    #[must_use]
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::Unauthorized | Self::SessionExpired)
    }
}
