// portfolio-cli/src/commands/notifications.rs
use crate::output::{print_response, Response};
use anyhow::Result;
use portfolio_client::PortfolioClient;

#[derive(clap::Subcommand, Clone, Debug)]
pub enum NotificationCommands {
    /// Number of unread notifications
    Count,
    /// Mark one notification as read
    Read {
        /// Notification ID
        id: u64,
    },
    /// Mark every notification as read
    ReadAll,
}

pub async fn handle_notifications(
    client: &PortfolioClient,
    cmd: NotificationCommands,
) -> Result<()> {
    match cmd {
        NotificationCommands::Count => {
            let count = client.unread_notification_count().await?;
            print_response(&Response::ok(serde_json::json!({ "unread_count": count })))
        }
        NotificationCommands::Read { id } => {
            client.mark_notification_read(id).await?;
            print_response(&Response::ok(serde_json::json!({ "id": id, "read": true })))
        }
        NotificationCommands::ReadAll => {
            client.mark_all_notifications_read().await?;
            print_response(&Response::ok(serde_json::json!({ "read": "all" })))
        }
    }
}
