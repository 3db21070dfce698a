//! End-to-end walk through the checkout domain:
//!
//! 1. Cart of one product at Rs. 1000 x 2 with a Rs. 280 delivery fee
//!    - Items total: Rs. 2000
//!    - Grand total: Rs. 2280
//! 2. Coupon `SAVE10` worth Rs. 200
//!    - Grand total: Rs. 2080
//! 3. Address selected, order submitted, backend returns the created order
//!    - Payment screen shows the backend's `Rs. 2080`

use rusty_money::{Money, iso};
use testresult::TestResult;

use storefront::prelude::*;

fn cart() -> Result<Cart, CartError> {
    let line = CartLine::new(
        CartLineId::new("line-1"),
        ProductRef {
            id: ProductId::new("prod-1"),
            name: "Kettle".to_string(),
            image: None,
        },
        Money::from_major(1000, iso::INR),
        2,
    )?;

    Cart::with_lines([line], iso::INR)
}

#[test]
fn cart_to_payment_scenario() -> TestResult {
    let fee = Money::from_major(280, iso::INR);
    let mut draft = OrderDraft::from_cart(&cart()?, fee)?;

    let totals = draft.totals()?;

    assert_eq!(totals.items_total(), Money::from_major(2000, iso::INR));
    assert_eq!(totals.grand_total(), Money::from_major(2280, iso::INR));

    let totals = draft.apply_coupon(CouponApplication::new(
        CouponCode::parse("SAVE10")?,
        Money::from_major(200, iso::INR),
    )?)?;

    assert_eq!(totals.grand_total(), Money::from_major(2080, iso::INR));

    let mut checkout = Checkout::new(draft);

    checkout.select_address(AddressId::new("addr-1"))?;

    let request = checkout.begin_submission("ORD-1".to_string())?;

    assert_eq!(request.coupon.as_ref().map(CouponCode::as_str), Some("SAVE10"));

    checkout.order_created(CreatedOrder {
        id: OrderId::new("66f0c0ffee"),
        total_amount: Money::from_major(2080, iso::INR),
        payment_status: PaymentStatus::Pending,
    })?;

    let handoff = checkout.cart_clear_finished(true)?;

    let mut navigator = Navigator::default();

    navigator.navigate(Route::Payment, Some(Handoff::Payment(handoff.order)), true);

    let order = navigator.payment_order()?;

    assert_eq!(order.id.as_str(), "66f0c0ffee");
    assert_eq!(display_amount(&order.total_amount), "Rs. 2080");

    Ok(())
}

#[test]
fn empty_cart_never_reaches_checkout() {
    let result = OrderDraft::from_cart(&Cart::new(iso::INR), Money::from_major(280, iso::INR));

    assert_eq!(result, Err(TotalsError::NoOrderData));
}
