use clap::{Args, Subcommand};

use storefront::prelude::Route;
use storefront_app::context::AppContext;

use crate::cli::render;

#[derive(Debug, Args)]
pub(crate) struct ProductsCommand {
    #[command(subcommand)]
    command: ProductsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductsSubcommand {
    /// List products
    List(ListProductsArgs),

    /// List product categories
    Categories,
}

#[derive(Debug, Args)]
struct ListProductsArgs {
    /// Only products in the category with this name
    #[arg(long)]
    category: Option<String>,

    /// Only products whose name contains this keyword
    #[arg(long)]
    search: Option<String>,
}

pub(crate) async fn run(app: &AppContext, command: ProductsCommand) -> Result<(), String> {
    super::enter(app, Route::Home, None)?;

    match command.command {
        ProductsSubcommand::List(args) => list(app, args).await,
        ProductsSubcommand::Categories => categories(app).await,
    }
}

async fn list(app: &AppContext, args: ListProductsArgs) -> Result<(), String> {
    let category = match args.category.as_deref() {
        Some(name) => Some(
            app.products
                .find_category(name)
                .await
                .map_err(|error| format!("failed to find category: {}", error.user_message()))?
                .id,
        ),
        None => None,
    };

    let mut products = app
        .products
        .list_products(category)
        .await
        .map_err(|error| format!("failed to list products: {}", error.user_message()))?;

    if let Some(keyword) = args.search.as_deref() {
        products.retain(|product| product.matches_keyword(keyword));
    }

    if products.is_empty() {
        println!("no products found");
        return Ok(());
    }

    println!("{}", render::products(&products));

    Ok(())
}

async fn categories(app: &AppContext) -> Result<(), String> {
    let categories = app
        .products
        .list_categories()
        .await
        .map_err(|error| format!("failed to list categories: {}", error.user_message()))?;

    if categories.is_empty() {
        println!("no categories");
        return Ok(());
    }

    println!("{}", render::categories(&categories));

    Ok(())
}
