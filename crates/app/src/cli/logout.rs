use storefront_app::context::AppContext;

pub(crate) async fn run(app: &AppContext) -> Result<(), String> {
    app.auth
        .logout()
        .await
        .map_err(|error| format!("failed to clear session: {error}"))?;

    println!("logged out");

    Ok(())
}
