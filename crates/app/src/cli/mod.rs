use clap::{Parser, Subcommand};

use storefront::prelude::{Handoff, Navigator, Route};
use storefront_app::{
    config::AppConfig,
    context::{AppContext, AppInitError},
};

mod address;
mod buy_now;
mod cart;
mod checkout;
mod login;
mod logout;
mod notifications;
mod orders;
mod pay;
mod payments;
mod products;
mod register;
mod render;
mod reviews;
mod verify_email;

#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Storefront checkout client", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create an account
    Register(register::RegisterArgs),

    /// Confirm the email address from the verification link
    VerifyEmail(verify_email::VerifyEmailArgs),

    /// Log in and store the session token
    Login(login::LoginArgs),

    /// End the session
    Logout,

    /// Browse products and categories
    Products(products::ProductsCommand),

    /// Product reviews
    Reviews(reviews::ReviewsCommand),

    /// Show and edit the cart
    Cart(cart::CartCommand),

    /// Place an order for the cart contents
    Checkout(checkout::CheckoutArgs),

    /// Place an order for a single product, bypassing the cart
    BuyNow(buy_now::BuyNowArgs),

    /// Pay for a placed order
    Pay(pay::PayArgs),

    /// Order history
    Orders(orders::OrdersCommand),

    /// Payment history
    Payments,

    /// Delivery addresses
    Address(address::AddressCommand),

    /// Account notifications
    Notifications(notifications::NotificationsCommand),
}

impl Cli {
    /// Load `.env`, then parse arguments.
    pub(crate) fn load() -> Result<Self, clap::Error> {
        let _env = dotenvy::dotenv();

        Self::try_parse()
    }

    pub(crate) async fn run(self) -> Result<(), String> {
        let app = AppContext::from_config(&self.config).map_err(init_error)?;

        match self.command {
            Commands::Register(args) => register::run(&app, args).await,
            Commands::VerifyEmail(args) => verify_email::run(&app, args).await,
            Commands::Login(args) => login::run(&app, args).await,
            Commands::Logout => logout::run(&app).await,
            Commands::Products(command) => products::run(&app, command).await,
            Commands::Reviews(command) => reviews::run(&app, command).await,
            Commands::Cart(command) => cart::run(&app, command).await,
            Commands::Checkout(args) => checkout::run(&app, args).await,
            Commands::BuyNow(args) => buy_now::run(&app, args).await,
            Commands::Pay(args) => pay::run(&app, args).await,
            Commands::Orders(command) => orders::run(&app, command).await,
            Commands::Payments => payments::run(&app).await,
            Commands::Address(command) => address::run(&app, command).await,
            Commands::Notifications(command) => notifications::run(&app, command).await,
        }
    }
}

fn init_error(error: AppInitError) -> String {
    format!("failed to initialize: {error}")
}

/// Enter `route`, applying the login guard and recording the location on the session.
pub(crate) fn enter(
    app: &AppContext,
    route: Route,
    handoff: Option<Handoff>,
) -> Result<Navigator, String> {
    let mut navigator = Navigator::default();

    let entered = navigator
        .navigate(route, handoff, app.session.is_authenticated())
        .clone();

    if let Route::Login { return_to } = entered {
        return Err(format!(
            "not logged in; run `storefront login` to continue at {}",
            return_to.as_deref().unwrap_or(Route::Home.path())
        ));
    }

    app.session.set_location(entered.path());

    Ok(navigator)
}
