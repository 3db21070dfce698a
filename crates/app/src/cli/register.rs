use clap::Args;

use storefront_app::{auth::Registration, context::AppContext};

#[derive(Debug, Args)]
pub(crate) struct RegisterArgs {
    /// Full name, letters and spaces only
    #[arg(long)]
    name: String,

    /// Account email
    #[arg(long, env = "STOREFRONT_EMAIL")]
    email: String,

    /// Account password
    #[arg(long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
    password: String,

    /// Password again
    #[arg(long, env = "STOREFRONT_CONFIRM_PASSWORD", hide_env_values = true)]
    confirm_password: String,
}

pub(crate) async fn run(app: &AppContext, args: RegisterArgs) -> Result<(), String> {
    let registration = Registration::new(
        &args.name,
        &args.email,
        &args.password,
        &args.confirm_password,
    )
    .map_err(|error| error.to_string())?;

    app.auth
        .register(&registration)
        .await
        .map_err(|error| format!("registration failed: {}", error.user_message()))?;

    println!("Registration successful! Check your email for verification.");
    println!("then run: storefront verify-email <LINK>");

    Ok(())
}
