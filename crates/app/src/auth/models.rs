//! Auth Models

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::Zeroize;

/// Login form input.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .finish()
    }
}

impl Drop for Credentials {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

/// Sign-up form checks run before anything is sent.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("All fields are required")]
    MissingField,

    #[error("Name must be 2-50 characters, letters only")]
    InvalidName,

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Password must be at least 8 chars, include uppercase, lowercase, number & special char")]
    WeakPassword,

    #[error("Passwords do not match")]
    PasswordMismatch,
}

/// A validated sign-up request.
#[derive(Clone, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    password: String,
}

impl Registration {
    /// Validate the sign-up form.
    ///
    /// Checks run in form order and the first failure is reported.
    ///
    /// # Errors
    ///
    /// Returns the [`RegistrationError`] for the first field that fails.
    pub fn new(
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<Self, RegistrationError> {
        if [name, email, password, confirm_password].iter().any(|field| field.is_empty()) {
            return Err(RegistrationError::MissingField);
        }

        if !valid_name(name) {
            return Err(RegistrationError::InvalidName);
        }

        if !valid_email(email) {
            return Err(RegistrationError::InvalidEmail);
        }

        if !strong_password(password) {
            return Err(RegistrationError::WeakPassword);
        }

        if password != confirm_password {
            return Err(RegistrationError::PasswordMismatch);
        }

        Ok(Self {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        })
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .finish()
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

fn valid_name(name: &str) -> bool {
    (2..=50).contains(&name.chars().count())
        && name.chars().all(|c| c.is_ascii_alphabetic() || c == ' ')
}

fn valid_email(email: &str) -> bool {
    let invalid = |c: char| c == '@' || c.is_whitespace();

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !local.contains(invalid)
        && !domain.contains(invalid)
        && domain
            .char_indices()
            .any(|(at, c)| c == '.' && at > 0 && at + 1 < domain.len())
}

fn strong_password(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| !c.is_ascii_alphanumeric())
}

/// The code from an email verification link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationCode {
    code: String,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Verification link is missing!")]
pub struct MissingVerificationCode;

impl VerificationCode {
    /// Accept either the bare code or the whole link from the email.
    ///
    /// # Errors
    ///
    /// Returns [`MissingVerificationCode`] if no code can be found.
    pub fn parse(raw: &str) -> Result<Self, MissingVerificationCode> {
        let raw = raw.trim();

        let code = match raw.split_once('?') {
            Some((_, query)) => query
                .split(['&', '#'])
                .find_map(|pair| pair.strip_prefix("code="))
                .unwrap_or_default(),
            None => raw,
        };

        if code.is_empty() {
            return Err(MissingVerificationCode);
        }

        Ok(Self {
            code: code.to_string(),
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.code
    }
}

#[derive(Deserialize)]
pub(crate) struct LoginRecord {
    #[serde(rename = "accessToken")]
    pub access_token: String,
}

impl Drop for LoginRecord {
    fn drop(&mut self) {
        self.access_token.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_hides_password() {
        let credentials = Credentials::new("a@example.com", "hunter2");

        let debug = format!("{credentials:?}");

        assert!(debug.contains("a@example.com"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn valid_registration_is_accepted() {
        let registration = Registration::new("Asha Rao", "asha@example.com", "Str0ng!pw", "Str0ng!pw");

        assert!(registration.is_ok_and(|registration| !format!("{registration:?}").contains("Str0ng")));
    }

    #[test]
    fn first_failing_check_is_reported() {
        let check = |name, email, password, confirm| {
            Registration::new(name, email, password, confirm).map(|_| ())
        };

        assert_eq!(
            check("", "a@b.co", "Str0ng!pw", "Str0ng!pw"),
            Err(RegistrationError::MissingField)
        );
        assert_eq!(
            check("A", "a@b.co", "Str0ng!pw", "Str0ng!pw"),
            Err(RegistrationError::InvalidName)
        );
        assert_eq!(
            check("Asha 2", "a@b.co", "Str0ng!pw", "Str0ng!pw"),
            Err(RegistrationError::InvalidName)
        );
        assert_eq!(
            check("Asha", "a@b", "weak", "weak"),
            Err(RegistrationError::InvalidEmail)
        );
        assert_eq!(
            check("Asha", "a b@c.co", "Str0ng!pw", "Str0ng!pw"),
            Err(RegistrationError::InvalidEmail)
        );
        assert_eq!(
            check("Asha", "a@b.co", "str0ng!pw", "str0ng!pw"),
            Err(RegistrationError::WeakPassword)
        );
        assert_eq!(
            check("Asha", "a@b.co", "Str0ngpw1", "Str0ngpw1"),
            Err(RegistrationError::WeakPassword)
        );
        assert_eq!(
            check("Asha", "a@b.co", "Str0ng!pw", "Str0ng!pW"),
            Err(RegistrationError::PasswordMismatch)
        );
    }

    #[test]
    fn underscore_counts_as_special_character() {
        assert!(strong_password("Abcdef1_"));
    }

    #[test]
    fn verification_code_from_link_or_bare() {
        let from_link = VerificationCode::parse("https://shop.example/verify-email?code=abc123&x=1");
        let bare = VerificationCode::parse(" abc123 ");

        assert_eq!(from_link.as_ref().map(VerificationCode::as_str), Ok("abc123"));
        assert_eq!(bare.as_ref().map(VerificationCode::as_str), Ok("abc123"));
    }

    #[test]
    fn link_without_code_is_missing() {
        assert_eq!(
            VerificationCode::parse("https://shop.example/verify-email?x=1"),
            Err(MissingVerificationCode)
        );
        assert_eq!(VerificationCode::parse("   "), Err(MissingVerificationCode));
    }
}
