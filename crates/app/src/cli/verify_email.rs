use clap::Args;

use storefront_app::{auth::VerificationCode, context::AppContext};

#[derive(Debug, Args)]
pub(crate) struct VerifyEmailArgs {
    /// Verification link from the email, or just its code
    link: String,
}

pub(crate) async fn run(app: &AppContext, args: VerifyEmailArgs) -> Result<(), String> {
    let code = VerificationCode::parse(&args.link).map_err(|error| error.to_string())?;

    let message = app
        .auth
        .verify_email(&code)
        .await
        .map_err(|error| format!("verification failed: {}", error.user_message()))?;

    println!("{message}");
    println!("log in with: storefront login");

    Ok(())
}
