//! Bearer token handling.

use std::fmt;

use zeroize::Zeroize;

use crate::session::SessionError;

/// An access token issued by the backend at login.
///
/// The token is wiped from memory on drop and never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Parse a raw token, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::EmptyToken`] for blank input.
    pub fn parse(raw: &str) -> Result<Self, SessionError> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(SessionError::EmptyToken);
        }

        Ok(Self(trimmed.to_string()))
    }

    /// The raw token, for the `Authorization` header and the token store.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(**redacted**)")
    }
}

impl Drop for BearerToken {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}
