use storefront_app::{
    checkout::{CartView, CartViewError},
    context::AppContext,
};

use crate::cli::render;

pub(crate) async fn run(app: &AppContext) -> Result<(), String> {
    let view = CartView::load(app.carts.clone())
        .await
        .map_err(|error| format!("failed to load cart: {error}"))?;

    if view.cart().is_empty() && view.unavailable().is_empty() {
        println!("your cart is empty");
        return Ok(());
    }

    println!("{}", render::cart(view.cart(), view.unavailable()));

    match view.checkout(app.delivery_fee) {
        Ok(draft) => {
            let totals = draft
                .totals()
                .map_err(|error| format!("failed to compute totals: {error}"))?;

            println!("{}", render::totals(&totals));
        }
        Err(CartViewError::Empty) => {}
        Err(error) => return Err(format!("failed to compute totals: {error}")),
    }

    Ok(())
}
