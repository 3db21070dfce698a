use clap::Args;

use storefront::prelude::{ProductId, Route};
use storefront_app::{
    checkout::{apply_coupon, buy_now},
    context::AppContext,
};

use crate::cli::{checkout::placed, render};

#[derive(Debug, Args)]
pub(crate) struct BuyNowArgs {
    /// Product id
    #[arg(long)]
    product: String,

    /// Units to order
    #[arg(long, default_value_t = 1_u32)]
    quantity: u32,

    /// Coupon code to apply
    #[arg(long)]
    coupon: Option<String>,

    /// Pay right after the order is placed, with the status the payment widget reported
    #[arg(long, value_name = "STATUS")]
    pay: Option<String>,
}

pub(crate) async fn run(app: &AppContext, args: BuyNowArgs) -> Result<(), String> {
    super::enter(app, Route::Checkout, None)?;

    let product = app
        .products
        .get_product(&ProductId::new(args.product))
        .await
        .map_err(|error| format!("failed to load product: {}", error.user_message()))?;

    let mut checkout = buy_now(
        app.addresses.as_ref(),
        &product,
        args.quantity,
        app.delivery_fee,
    )
    .await
    .map_err(|error| error.to_string())?;

    if let Some(code) = args.coupon.as_deref() {
        let draft = checkout.draft_mut().map_err(|error| error.to_string())?;

        apply_coupon(app.coupons.as_ref(), draft, code)
            .await
            .map_err(|error| format!("coupon not applied: {error}"))?;
    }

    let totals = checkout
        .draft()
        .totals()
        .map_err(|error| error.to_string())?;

    println!("{} x {}", args.quantity, product.name);
    println!("{}", render::totals(&totals));

    let handoff = app
        .sequencer()
        .submit_direct(&mut checkout)
        .await
        .map_err(|error| format!("failed to place order: {error}"))?;

    placed(app, handoff, args.pay.as_deref()).await
}
