//! Coupons

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::money::Amount;

/// Errors raised while validating a coupon locally.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CouponError {
    /// The code was empty after trimming.
    #[error("enter a coupon code")]
    EmptyCode,

    /// The backend returned a negative discount.
    #[error("coupon {0} carries a negative discount")]
    NegativeDiscount(CouponCode),
}

/// A trimmed, non-empty coupon code as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CouponCode(String);

impl CouponCode {
    /// Validate a user-supplied code.
    ///
    /// # Errors
    ///
    /// Returns [`CouponError::EmptyCode`] when nothing but whitespace was supplied.
    pub fn parse(raw: &str) -> Result<Self, CouponError> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(CouponError::EmptyCode);
        }

        Ok(Self(trimmed.to_string()))
    }

    /// The code as sent to the backend.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CouponCode {
    type Err = CouponError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl fmt::Display for CouponCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A coupon the backend accepted, with the discount it grants.
#[derive(Debug, Clone, PartialEq)]
pub struct CouponApplication {
    code: CouponCode,
    discount: Amount,
}

impl CouponApplication {
    /// Record an accepted coupon.
    ///
    /// # Errors
    ///
    /// Returns [`CouponError::NegativeDiscount`] if `discount` is below zero.
    pub fn new(code: CouponCode, discount: Amount) -> Result<Self, CouponError> {
        if discount.to_minor_units() < 0 {
            return Err(CouponError::NegativeDiscount(code));
        }

        Ok(Self { code, discount })
    }

    /// Accepted code
    pub fn code(&self) -> &CouponCode {
        &self.code
    }

    /// Discount granted by the backend, before any clamping against the items total.
    pub fn discount(&self) -> &Amount {
        &self.discount
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parse_trims_whitespace() -> TestResult {
        assert_eq!(CouponCode::parse("  SAVE10 ")?.as_str(), "SAVE10");

        Ok(())
    }

    #[test]
    fn parse_rejects_blank() {
        assert_eq!(CouponCode::parse("   "), Err(CouponError::EmptyCode));
        assert_eq!("".parse::<CouponCode>(), Err(CouponError::EmptyCode));
    }

    #[test]
    fn application_rejects_negative_discount() -> TestResult {
        let code = CouponCode::parse("BAD")?;

        let result = CouponApplication::new(code.clone(), Money::from_minor(-5, iso::INR));

        assert_eq!(result, Err(CouponError::NegativeDiscount(code)));

        Ok(())
    }
}
