use storefront::prelude::Route;
use storefront_app::context::AppContext;

use crate::cli::render;

pub(crate) async fn run(app: &AppContext) -> Result<(), String> {
    super::enter(app, Route::Orders, None)?;

    let payments = app
        .payments
        .payment_history()
        .await
        .map_err(|error| format!("failed to list payments: {}", error.user_message()))?;

    if payments.is_empty() {
        println!("no payments yet");
        return Ok(());
    }

    println!("{}", render::payments(&payments));

    Ok(())
}
