//! Coupon application.

use tracing::info;

use storefront::prelude::{CouponApplication, CouponCode, OrderDraft, OrderTotals};

use crate::{checkout::CouponFlowError, domain::coupons::CouponsService};

/// Validate `raw`, ask the backend for its discount and apply it to `draft`.
///
/// A blank code fails before any request is sent. On any failure the draft
/// keeps its previous coupon and totals.
///
/// # Errors
///
/// - [`CouponFlowError::Invalid`]: blank code, or a negative discount from the backend.
/// - [`CouponFlowError::Rejected`]: the backend refused the code.
/// - [`CouponFlowError::Totals`]: the draft's totals cannot be derived.
pub async fn apply_coupon(
    coupons: &dyn CouponsService,
    draft: &mut OrderDraft,
    raw: &str,
) -> Result<OrderTotals, CouponFlowError> {
    let code = CouponCode::parse(raw)?;
    let items_total = draft.totals()?.items_total();

    let discount = coupons
        .apply_coupon(&code, &items_total)
        .await
        .map_err(CouponFlowError::Rejected)?;

    let totals = draft.apply_coupon(CouponApplication::new(code, discount)?)?;

    info!(discount = %totals.discount(), "coupon applied");

    Ok(totals)
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use reqwest::StatusCode;
    use rusty_money::{Money, iso};
    use storefront::prelude::{Cart, CartLine, CartLineId, CouponError, ProductId, ProductRef};
    use testresult::TestResult;

    use crate::{api::ApiError, domain::coupons::MockCouponsService};

    use super::*;

    fn draft() -> Result<OrderDraft, Box<dyn std::error::Error>> {
        let line = CartLine::new(
            CartLineId::new("l1"),
            ProductRef {
                id: ProductId::new("p1"),
                name: "Kettle".to_string(),
                image: None,
            },
            Money::from_major(1000, iso::INR),
            2,
        )?;

        Ok(OrderDraft::from_cart(
            &Cart::with_lines([line], iso::INR)?,
            Money::from_major(280, iso::INR),
        )?)
    }

    #[tokio::test]
    async fn blank_code_sends_nothing() -> TestResult {
        let mut coupons = MockCouponsService::new();

        coupons.expect_apply_coupon().never();

        let mut draft = draft()?;
        let result = apply_coupon(&coupons, &mut draft, "   ").await;

        assert!(matches!(result, Err(CouponFlowError::Invalid(CouponError::EmptyCode))));

        Ok(())
    }

    #[tokio::test]
    async fn known_code_reduces_grand_total() -> TestResult {
        let mut coupons = MockCouponsService::new();

        coupons
            .expect_apply_coupon()
            .with(
                eq(CouponCode::parse("SAVE10")?),
                eq(Money::from_major(2000, iso::INR)),
            )
            .once()
            .returning(|_, _| Ok(Money::from_major(200, iso::INR)));

        let mut draft = draft()?;
        let totals = apply_coupon(&coupons, &mut draft, " SAVE10 ").await?;

        assert_eq!(totals.grand_total(), Money::from_major(2080, iso::INR));
        assert_eq!(draft.coupon().map(|coupon| coupon.code().as_str()), Some("SAVE10"));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_code_keeps_previous_discount() -> TestResult {
        let mut coupons = MockCouponsService::new();

        coupons
            .expect_apply_coupon()
            .with(eq(CouponCode::parse("SAVE10")?), mockall::predicate::always())
            .once()
            .returning(|_, _| Ok(Money::from_major(200, iso::INR)));

        coupons
            .expect_apply_coupon()
            .with(eq(CouponCode::parse("BOGUS")?), mockall::predicate::always())
            .once()
            .returning(|_, _| {
                Err(ApiError::Rejected {
                    status: StatusCode::NOT_FOUND,
                    message: "Invalid coupon".to_string(),
                })
            });

        let mut draft = draft()?;

        apply_coupon(&coupons, &mut draft, "SAVE10").await?;

        let result = apply_coupon(&coupons, &mut draft, "BOGUS").await;

        assert!(matches!(result, Err(CouponFlowError::Rejected(_))));

        let totals = draft.totals()?;

        assert_eq!(totals.items_total(), Money::from_major(2000, iso::INR));
        assert_eq!(totals.discount(), Money::from_major(200, iso::INR));
        assert_eq!(totals.grand_total(), Money::from_major(2080, iso::INR));

        Ok(())
    }
}
