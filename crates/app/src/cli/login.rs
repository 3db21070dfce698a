use clap::Args;

use storefront::prelude::Route;
use storefront_app::{auth::Credentials, context::AppContext};

#[derive(Debug, Args)]
pub(crate) struct LoginArgs {
    /// Account email
    #[arg(long, env = "STOREFRONT_EMAIL")]
    email: String,

    /// Account password
    #[arg(long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
    password: String,
}

pub(crate) async fn run(app: &AppContext, args: LoginArgs) -> Result<(), String> {
    super::enter(app, Route::Login { return_to: None }, None)?;

    let redirect = app
        .auth
        .login(Credentials::new(args.email, args.password))
        .await
        .map_err(|error| format!("login failed: {}", error.user_message()))?;

    println!("logged in");
    println!("continue at: {redirect}");

    Ok(())
}
