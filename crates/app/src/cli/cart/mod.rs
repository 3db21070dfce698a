use clap::{Args, Subcommand};

use storefront::prelude::Route;
use storefront_app::context::AppContext;

mod edit;
mod show;

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// List cart lines and totals
    Show,

    /// Add a product to the cart
    Add(edit::AddArgs),

    /// Set the quantity of a cart line
    Update(edit::UpdateArgs),

    /// Add one unit to a cart line
    Increment(edit::LineArgs),

    /// Remove one unit from a cart line
    Decrement(edit::LineArgs),

    /// Remove a cart line
    Remove(edit::LineArgs),

    /// Remove every line
    Clear,
}

pub(crate) async fn run(app: &AppContext, command: CartCommand) -> Result<(), String> {
    super::enter(app, Route::Cart, None)?;

    match command.command {
        CartSubcommand::Show => show::run(app).await,
        CartSubcommand::Add(args) => edit::add(app, args).await,
        CartSubcommand::Update(args) => edit::update(app, args).await,
        CartSubcommand::Increment(args) => edit::increment(app, args).await,
        CartSubcommand::Decrement(args) => edit::decrement(app, args).await,
        CartSubcommand::Remove(args) => edit::remove(app, args).await,
        CartSubcommand::Clear => edit::clear(app).await,
    }
}
