use clap::Args;
use tokio::signal;

use storefront::prelude::{CreatedOrder, Handoff, OrderId, PaymentStatus, Route};
use storefront_app::{
    checkout::{ExternalConfirmation, ReceiptStatus},
    context::AppContext,
    retry::cancellation,
};

#[derive(Debug, Args)]
pub(crate) struct PayArgs {
    /// Order id to pay for
    #[arg(long)]
    order: String,

    /// Status reported by the payment widget once the card was confirmed
    #[arg(long)]
    status: String,
}

pub(crate) async fn run(app: &AppContext, args: PayArgs) -> Result<(), String> {
    super::enter(app, Route::Orders, None)?;

    let order = app
        .orders
        .get_order(&OrderId::new(args.order))
        .await
        .map_err(|error| format!("failed to load order: {}", error.user_message()))?;

    if order.payment_status == PaymentStatus::Paid {
        return Err(format!("order {} is already paid", order.id));
    }

    pay_order(app, order.to_created(), &args.status).await
}

/// Charge the backend total of `order`, then reconcile and fetch the receipt.
pub(crate) async fn pay_order(
    app: &AppContext,
    order: CreatedOrder,
    status: &str,
) -> Result<(), String> {
    let navigator = super::enter(app, Route::Payment, Some(Handoff::Payment(order)))?;
    let step = app.payment_step();

    let prepared = step
        .prepare(navigator.payment_order().ok())
        .await
        .map_err(|error| format!("failed to initialize payment: {error}"))?;

    println!("order: {}", prepared.order().id);
    println!("amount: {}", prepared.display_amount());
    println!("payment_intent: {}", prepared.intent().intent_id);
    println!("client_secret: {}", prepared.intent().client_secret);

    let (handle, cancellation) = cancellation();

    let interrupt = tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            handle.cancel();
        }
    });

    let outcome = step
        .confirm(
            &prepared,
            &ExternalConfirmation::new(status),
            cancellation,
        )
        .await;

    interrupt.abort();

    let outcome = outcome.map_err(|error| error.to_string())?;

    super::enter(app, Route::OrderSuccess, Some(outcome.handoff()))?;

    println!("payment succeeded");
    println!("payment_id: {}", outcome.payment_id);

    match outcome.receipt {
        ReceiptStatus::Available(url) => println!("receipt: {url}"),
        ReceiptStatus::NotAvailableYet => {
            println!("receipt: not available yet; check `storefront payments` later");
        }
    }

    Ok(())
}
