use clap::{Args, Subcommand};

use storefront::prelude::Route;
use storefront_app::{context::AppContext, domain::notifications::models::NotificationId};

use crate::cli::render;

#[derive(Debug, Args)]
pub(crate) struct NotificationsCommand {
    #[command(subcommand)]
    command: NotificationsSubcommand,
}

#[derive(Debug, Subcommand)]
enum NotificationsSubcommand {
    /// List notifications
    List,

    /// Mark a notification read
    Read(NotificationArgs),

    /// Delete a notification
    Delete(NotificationArgs),
}

#[derive(Debug, Args)]
struct NotificationArgs {
    /// Notification id
    #[arg(long)]
    id: String,
}

pub(crate) async fn run(app: &AppContext, command: NotificationsCommand) -> Result<(), String> {
    super::enter(app, Route::Dashboard, None)?;

    match command.command {
        NotificationsSubcommand::List => list(app).await,
        NotificationsSubcommand::Read(args) => {
            let notification = app
                .notifications
                .mark_read(&NotificationId::new(args.id))
                .await
                .map_err(|error| format!("Failed to mark as read: {}", error.user_message()))?;

            println!("{}", render::notifications(&[notification]));

            Ok(())
        }
        NotificationsSubcommand::Delete(args) => {
            app.notifications
                .delete_notification(&NotificationId::new(args.id))
                .await
                .map_err(|error| {
                    format!("Failed to delete notification: {}", error.user_message())
                })?;

            println!("Deleted notification");

            Ok(())
        }
    }
}

async fn list(app: &AppContext) -> Result<(), String> {
    let notifications = app
        .notifications
        .list_notifications()
        .await
        .map_err(|error| format!("Failed to load notifications: {}", error.user_message()))?;

    if notifications.is_empty() {
        println!("no notifications");
        return Ok(());
    }

    println!("{}", render::notifications(&notifications));

    Ok(())
}
