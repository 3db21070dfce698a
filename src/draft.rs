//! Order drafts

use rusty_money::iso::Currency;

use crate::{
    addresses::AddressId,
    cart::{Cart, CartError, CartLine, CartLineId},
    coupons::CouponApplication,
    money::Amount,
    totals::{OrderTotals, TotalsError},
};

/// Lines, delivery fee, coupon and address carried from the cart to checkout.
///
/// Totals are derived on demand through [`OrderDraft::totals`].
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    lines: Vec<CartLine>,
    delivery_fee: Amount,
    coupon: Option<CouponApplication>,
    address: Option<AddressId>,
}

impl OrderDraft {
    /// Start a draft from the given lines.
    ///
    /// # Errors
    ///
    /// - [`TotalsError::NoOrderData`]: `lines` is empty.
    /// - Any error [`OrderTotals::compute`] reports for these inputs.
    pub fn new(lines: impl Into<Vec<CartLine>>, delivery_fee: Amount) -> Result<Self, TotalsError> {
        let draft = Self {
            lines: lines.into(),
            delivery_fee,
            coupon: None,
            address: None,
        };

        draft.totals()?;

        Ok(draft)
    }

    /// Start a draft from every line in the cart.
    ///
    /// # Errors
    ///
    /// Returns [`TotalsError::NoOrderData`] for an empty cart.
    pub fn from_cart(cart: &Cart, delivery_fee: Amount) -> Result<Self, TotalsError> {
        Self::new(cart.lines().to_vec(), delivery_fee)
    }

    /// Current totals.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalsError`] if the totals cannot be derived.
    pub fn totals(&self) -> Result<OrderTotals, TotalsError> {
        OrderTotals::compute(
            &self.lines,
            self.delivery_fee,
            self.coupon.as_ref().map(|coupon| *coupon.discount()),
        )
    }

    /// Apply a coupon, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalsError`] if the discount cannot be combined with the
    /// draft. The draft is left unchanged in that case.
    pub fn apply_coupon(&mut self, coupon: CouponApplication) -> Result<OrderTotals, TotalsError> {
        let totals = OrderTotals::compute(&self.lines, self.delivery_fee, Some(*coupon.discount()))?;

        self.coupon = Some(coupon);

        Ok(totals)
    }

    /// Drop the applied coupon, if any.
    pub fn remove_coupon(&mut self) -> Option<CouponApplication> {
        self.coupon.take()
    }

    /// Change a line's quantity.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] for unknown lines or zero quantities.
    pub fn set_quantity(&mut self, id: &CartLineId, quantity: u32) -> Result<(), CartError> {
        self.lines
            .iter_mut()
            .find(|line| line.id() == id)
            .ok_or_else(|| CartError::UnknownLine(id.clone()))?
            .set_quantity(quantity)
    }

    /// Select the delivery address.
    pub fn select_address(&mut self, address: AddressId) {
        self.address = Some(address);
    }

    /// Lines in the draft
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Delivery fee
    pub fn delivery_fee(&self) -> &Amount {
        &self.delivery_fee
    }

    /// Applied coupon
    pub fn coupon(&self) -> Option<&CouponApplication> {
        self.coupon.as_ref()
    }

    /// Selected address
    pub fn address(&self) -> Option<&AddressId> {
        self.address.as_ref()
    }

    /// Currency of the draft
    pub fn currency(&self) -> &'static Currency {
        self.delivery_fee.currency()
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso};
    use testresult::TestResult;

    use crate::{
        cart::test_support::line,
        coupons::{CouponApplication, CouponCode},
    };

    use super::*;

    fn fee() -> Amount {
        Money::from_major(280, iso::INR)
    }

    #[test]
    fn empty_cart_is_no_order_data() {
        let cart = Cart::new(iso::INR);

        assert_eq!(OrderDraft::from_cart(&cart, fee()), Err(TotalsError::NoOrderData));
    }

    #[test]
    fn totals_follow_quantity_edits() -> TestResult {
        let mut draft = OrderDraft::new([line("a", 1000, 2)], fee())?;

        assert_eq!(draft.totals()?.grand_total(), Money::from_major(2280, iso::INR));

        draft.set_quantity(&CartLineId::new("a"), 3)?;

        assert_eq!(draft.totals()?.grand_total(), Money::from_major(3280, iso::INR));

        Ok(())
    }

    #[test]
    fn apply_coupon_replaces_previous() -> TestResult {
        let mut draft = OrderDraft::new([line("a", 1000, 2)], fee())?;

        draft.apply_coupon(CouponApplication::new(
            CouponCode::parse("FIRST")?,
            Money::from_major(100, iso::INR),
        )?)?;

        let totals = draft.apply_coupon(CouponApplication::new(
            CouponCode::parse("SAVE10")?,
            Money::from_major(200, iso::INR),
        )?)?;

        assert_eq!(totals.grand_total(), Money::from_major(2080, iso::INR));
        assert_eq!(draft.coupon().map(|c| c.code().as_str()), Some("SAVE10"));

        Ok(())
    }

    #[test]
    fn failed_coupon_leaves_draft_unchanged() -> TestResult {
        let mut draft = OrderDraft::new([line("a", 1000, 2)], fee())?;

        draft.apply_coupon(CouponApplication::new(
            CouponCode::parse("SAVE10")?,
            Money::from_major(200, iso::INR),
        )?)?;

        let before = draft.clone();

        let result = draft.apply_coupon(CouponApplication::new(
            CouponCode::parse("DOLLARS")?,
            Money::from_major(5, iso::USD),
        )?);

        assert!(result.is_err(), "mismatched currency should be rejected");
        assert_eq!(draft, before);

        Ok(())
    }
}
