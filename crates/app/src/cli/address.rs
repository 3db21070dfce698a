use clap::{Args, Subcommand};

use storefront::prelude::Route;
use storefront_app::{context::AppContext, domain::addresses::models::NewAddress};

use crate::cli::render;

#[derive(Debug, Args)]
pub(crate) struct AddressCommand {
    #[command(subcommand)]
    command: AddressSubcommand,
}

#[derive(Debug, Subcommand)]
enum AddressSubcommand {
    /// List saved addresses, oldest first
    List,

    /// Save a new address
    Add(AddAddressArgs),
}

#[derive(Debug, Args)]
struct AddAddressArgs {
    /// Recipient name
    #[arg(long)]
    name: Option<String>,

    /// Contact number
    #[arg(long)]
    mobile: String,

    /// Street line
    #[arg(long)]
    address_line: String,

    #[arg(long)]
    city: String,

    #[arg(long)]
    state: String,

    /// Postal code
    #[arg(long)]
    pincode: String,

    #[arg(long)]
    country: String,
}

pub(crate) async fn run(app: &AppContext, command: AddressCommand) -> Result<(), String> {
    super::enter(app, Route::Dashboard, None)?;

    match command.command {
        AddressSubcommand::List => list(app).await,
        AddressSubcommand::Add(args) => add(app, args).await,
    }
}

async fn list(app: &AppContext) -> Result<(), String> {
    let addresses = app
        .addresses
        .list_addresses()
        .await
        .map_err(|error| format!("failed to list addresses: {}", error.user_message()))?;

    if addresses.is_empty() {
        println!("no saved addresses");
        return Ok(());
    }

    println!("{}", render::addresses(&addresses));

    Ok(())
}

async fn add(app: &AppContext, args: AddAddressArgs) -> Result<(), String> {
    let address = NewAddress {
        name: args.name,
        mobile: args.mobile,
        address_line: args.address_line,
        city: args.city,
        state: args.state,
        pincode: args.pincode,
        country: args.country,
    };

    app.addresses
        .create_address(&address)
        .await
        .map_err(|error| format!("failed to save address: {}", error.user_message()))?;

    println!("address saved");

    list(app).await
}
