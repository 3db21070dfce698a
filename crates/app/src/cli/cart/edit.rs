use clap::Args;

use storefront::prelude::{CartLineId, ProductId};
use storefront_app::{
    checkout::{CartView, QuantityChange},
    context::AppContext,
};

#[derive(Debug, Args)]
pub(crate) struct AddArgs {
    /// Product id
    #[arg(long)]
    product: String,

    /// Units to add
    #[arg(long, default_value_t = 1_u32)]
    quantity: u32,
}

#[derive(Debug, Args)]
pub(crate) struct UpdateArgs {
    /// Cart line id
    #[arg(long)]
    line: String,

    /// New quantity; values below one are ignored
    #[arg(long, allow_negative_numbers = true)]
    quantity: i64,
}

#[derive(Debug, Args)]
pub(crate) struct LineArgs {
    /// Cart line id
    #[arg(long)]
    line: String,
}

pub(crate) async fn add(app: &AppContext, args: AddArgs) -> Result<(), String> {
    if args.quantity == 0 {
        return Err("quantity must be at least 1".to_string());
    }

    let product = ProductId::new(args.product);

    app.carts
        .add_item(&product, args.quantity)
        .await
        .map_err(|error| format!("failed to add to cart: {}", error.user_message()))?;

    println!("added {} x {product} to cart", args.quantity);

    Ok(())
}

pub(crate) async fn update(app: &AppContext, args: UpdateArgs) -> Result<(), String> {
    let mut view = load(app).await?;
    let line = CartLineId::new(args.line);

    let change = view
        .change_quantity(&line, args.quantity)
        .await
        .map_err(|error| format!("failed to update quantity: {error}"))?;

    report(&line, change);

    Ok(())
}

pub(crate) async fn increment(app: &AppContext, args: LineArgs) -> Result<(), String> {
    let mut view = load(app).await?;
    let line = CartLineId::new(args.line);

    let change = view
        .increment(&line)
        .await
        .map_err(|error| format!("failed to update quantity: {error}"))?;

    report(&line, change);

    Ok(())
}

pub(crate) async fn decrement(app: &AppContext, args: LineArgs) -> Result<(), String> {
    let mut view = load(app).await?;
    let line = CartLineId::new(args.line);

    let change = view
        .decrement(&line)
        .await
        .map_err(|error| format!("failed to update quantity: {error}"))?;

    report(&line, change);

    Ok(())
}

pub(crate) async fn remove(app: &AppContext, args: LineArgs) -> Result<(), String> {
    let mut view = load(app).await?;
    let line = CartLineId::new(args.line);

    view.remove(&line)
        .await
        .map_err(|error| format!("failed to remove line: {error}"))?;

    println!("removed line {line}");

    Ok(())
}

pub(crate) async fn clear(app: &AppContext) -> Result<(), String> {
    app.carts
        .clear_cart()
        .await
        .map_err(|error| format!("failed to clear cart: {}", error.user_message()))?;

    println!("cart cleared");

    Ok(())
}

fn report(line: &CartLineId, change: QuantityChange) {
    match change {
        QuantityChange::Updated(quantity) => println!("line {line} now has quantity {quantity}"),
        QuantityChange::Ignored => println!("quantity below 1 ignored; line {line} unchanged"),
    }
}

async fn load(app: &AppContext) -> Result<CartView, String> {
    CartView::load(app.carts.clone())
        .await
        .map_err(|error| format!("failed to load cart: {error}"))
}
