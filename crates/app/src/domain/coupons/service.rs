//! Coupons service.

use async_trait::async_trait;
use mockall::automock;

use storefront::{
    money::{amount_from_decimal, amount_to_decimal},
    prelude::{Amount, CouponCode},
};

use crate::{
    api::{ApiClient, ApiError, Endpoint},
    domain::coupons::records::{ApplyCouponBody, CouponRecord},
};

#[derive(Debug, Clone)]
pub struct HttpCouponsService {
    api: ApiClient,
}

impl HttpCouponsService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CouponsService for HttpCouponsService {
    #[tracing::instrument(skip(self), fields(code = %code), err)]
    async fn apply_coupon(&self, code: &CouponCode, items_total: &Amount) -> Result<Amount, ApiError> {
        let body = ApplyCouponBody::new(code, amount_to_decimal(items_total));

        let record: CouponRecord = self
            .api
            .call_with(&Endpoint::ApplyCoupon, &body)
            .await?
            .data()?;

        Ok(amount_from_decimal(record.discount_amount, items_total.currency())?)
    }
}

#[automock]
#[async_trait]
pub trait CouponsService: Send + Sync {
    /// Ask the backend what `code` is worth against `items_total`.
    ///
    /// Unknown or expired codes come back as [`ApiError::Rejected`].
    async fn apply_coupon(&self, code: &CouponCode, items_total: &Amount) -> Result<Amount, ApiError>;
}
