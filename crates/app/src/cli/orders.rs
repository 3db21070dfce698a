use clap::{Args, Subcommand};

use storefront::prelude::{OrderId, Route, display_amount};
use storefront_app::context::AppContext;

use crate::cli::render;

#[derive(Debug, Args)]
pub(crate) struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    /// List placed orders
    List,

    /// Show one order
    Show(ShowOrderArgs),
}

#[derive(Debug, Args)]
struct ShowOrderArgs {
    /// Order id
    #[arg(long)]
    order: String,
}

pub(crate) async fn run(app: &AppContext, command: OrdersCommand) -> Result<(), String> {
    super::enter(app, Route::Orders, None)?;

    match command.command {
        OrdersSubcommand::List => list(app).await,
        OrdersSubcommand::Show(args) => show(app, args).await,
    }
}

async fn list(app: &AppContext) -> Result<(), String> {
    let orders = app
        .orders
        .list_orders()
        .await
        .map_err(|error| format!("failed to list orders: {}", error.user_message()))?;

    if orders.is_empty() {
        println!("no orders yet");
        return Ok(());
    }

    println!("{}", render::orders(&orders));

    Ok(())
}

async fn show(app: &AppContext, args: ShowOrderArgs) -> Result<(), String> {
    let order = app
        .orders
        .get_order(&OrderId::new(args.order))
        .await
        .map_err(|error| format!("failed to load order: {}", error.user_message()))?;

    println!("order_id: {}", order.id);
    if let Some(order_ref) = &order.order_ref {
        println!("reference: {order_ref}");
    }
    if let Some(created_at) = order.created_at {
        println!("placed_at: {created_at}");
    }
    println!("payment_status: {}", order.payment_status);
    println!(
        "delivery_status: {}",
        order.delivery_status.as_deref().unwrap_or("-")
    );
    println!("total: {}", display_amount(&order.total_amount));

    if !order.items.is_empty() {
        println!("{}", render::order_items(&order));
    }

    Ok(())
}
