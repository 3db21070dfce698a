//! Coupon Records

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use storefront::prelude::CouponCode;

#[derive(Debug, Serialize)]
pub(crate) struct ApplyCouponBody<'a> {
    pub code: &'a str,

    #[serde(rename = "orderAmount", with = "rust_decimal::serde::float")]
    pub order_amount: Decimal,
}

impl<'a> ApplyCouponBody<'a> {
    pub(crate) fn new(code: &'a CouponCode, order_amount: Decimal) -> Self {
        Self {
            code: code.as_str(),
            order_amount,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CouponRecord {
    #[serde(rename = "discountAmount", with = "rust_decimal::serde::float")]
    pub discount_amount: Decimal,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn body_sends_amount_as_number() -> TestResult {
        let code = CouponCode::parse("SAVE10")?;
        let body = serde_json::to_value(ApplyCouponBody::new(&code, Decimal::new(2000, 0)))?;

        assert_eq!(body, json!({ "code": "SAVE10", "orderAmount": 2000.0 }));

        Ok(())
    }
}
