use clap::Args;

use storefront::{
    addresses::latest,
    prelude::{AddressId, Checkout, Handoff, PaymentHandoff, Route, display_amount},
};
use storefront_app::{
    checkout::{CartView, apply_coupon},
    context::AppContext,
};

use crate::cli::{pay, render};

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// Coupon code to apply
    #[arg(long)]
    coupon: Option<String>,

    /// Delivery address id; defaults to the most recently saved address
    #[arg(long)]
    address: Option<String>,

    /// Pay right after the order is placed, with the status the payment widget reported
    #[arg(long, value_name = "STATUS")]
    pay: Option<String>,
}

pub(crate) async fn run(app: &AppContext, args: CheckoutArgs) -> Result<(), String> {
    super::enter(app, Route::Cart, None)?;

    let view = CartView::load(app.carts.clone())
        .await
        .map_err(|error| format!("failed to load cart: {error}"))?;

    let draft = view.checkout(app.delivery_fee).map_err(|error| error.to_string())?;

    let navigator = super::enter(app, Route::Checkout, Some(Handoff::Checkout(draft)))?;
    let draft = navigator
        .checkout_draft()
        .map_err(|error| error.to_string())?
        .clone();

    let mut checkout = Checkout::new(draft);

    if let Some(code) = args.coupon.as_deref() {
        let draft = checkout.draft_mut().map_err(|error| error.to_string())?;

        apply_coupon(app.coupons.as_ref(), draft, code)
            .await
            .map_err(|error| format!("coupon not applied: {error}"))?;
    }

    let address = resolve_address(app, args.address).await?;

    checkout
        .select_address(address)
        .map_err(|error| error.to_string())?;

    let totals = checkout
        .draft()
        .totals()
        .map_err(|error| error.to_string())?;

    println!("{}", render::totals(&totals));

    let handoff = app
        .sequencer()
        .submit(&mut checkout)
        .await
        .map_err(|error| format!("failed to place order: {error}"))?;

    placed(app, handoff, args.pay.as_deref()).await
}

/// Report a placed order and continue to payment if asked to.
pub(crate) async fn placed(
    app: &AppContext,
    handoff: PaymentHandoff,
    reported_status: Option<&str>,
) -> Result<(), String> {
    println!("order placed: {}", handoff.order.id);
    println!("amount due: {}", display_amount(&handoff.order.total_amount));

    if !handoff.cart_cleared {
        println!("note: the cart could not be cleared; remove the ordered items manually");
    }

    if let Some(status) = reported_status {
        return pay::pay_order(app, handoff.order, status).await;
    }

    println!(
        "pay with: storefront pay --order {} --status <STATUS>",
        handoff.order.id
    );

    Ok(())
}

async fn resolve_address(app: &AppContext, explicit: Option<String>) -> Result<AddressId, String> {
    if let Some(id) = explicit {
        return Ok(AddressId::new(id));
    }

    let addresses = app
        .addresses
        .list_addresses()
        .await
        .map_err(|error| format!("failed to load addresses: {}", error.user_message()))?;

    let address = latest(&addresses).ok_or_else(|| "Please add delivery address".to_string())?;

    println!("delivering to: {address}");

    Ok(address.id.clone())
}
