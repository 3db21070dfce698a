use clap::{Args, Subcommand};

use storefront::prelude::{ProductId, Route};
use storefront_app::{
    context::AppContext,
    domain::reviews::models::{NewReview, Rating},
};

use crate::cli::render;

#[derive(Debug, Args)]
pub(crate) struct ReviewsCommand {
    #[command(subcommand)]
    command: ReviewsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ReviewsSubcommand {
    /// Show a product's reviews and rating breakdown
    List(ProductArgs),

    /// Review a product
    Add(AddReviewArgs),
}

#[derive(Debug, Args)]
struct ProductArgs {
    /// Product id
    #[arg(long)]
    product: String,
}

#[derive(Debug, Args)]
struct AddReviewArgs {
    /// Product id
    #[arg(long)]
    product: String,

    /// Stars, 1 to 5
    #[arg(long)]
    rating: u8,

    #[arg(long, default_value = "")]
    comment: String,
}

pub(crate) async fn run(app: &AppContext, command: ReviewsCommand) -> Result<(), String> {
    match command.command {
        ReviewsSubcommand::List(args) => list(app, args).await,
        ReviewsSubcommand::Add(args) => add(app, args).await,
    }
}

async fn list(app: &AppContext, args: ProductArgs) -> Result<(), String> {
    super::enter(app, Route::Home, None)?;

    let reviews = app
        .reviews
        .product_reviews(&ProductId::new(args.product))
        .await
        .map_err(|error| format!("Failed to load reviews: {}", error.user_message()))?;

    println!("rating: {}/5 from {} ratings", reviews.average_display(), reviews.total);
    println!("{}", render::rating_breakdown(&reviews));

    if !reviews.reviews.is_empty() {
        println!("{}", render::reviews(&reviews.reviews));
    }

    Ok(())
}

async fn add(app: &AppContext, args: AddReviewArgs) -> Result<(), String> {
    if !app.session.is_authenticated() {
        return Err("You must be logged in to post a review".to_string());
    }

    let review = NewReview {
        product: ProductId::new(args.product),
        rating: Rating::new(args.rating).map_err(|error| error.to_string())?,
        comment: args.comment,
    };

    let message = app
        .reviews
        .post_review(&review)
        .await
        .map_err(|error| format!("Failed to submit review: {}", error.user_message()))?;

    println!("{message}");

    Ok(())
}
