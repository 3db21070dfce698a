//! Notifications service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    api::{ApiClient, ApiError, Endpoint},
    domain::notifications::{
        models::{Notification, NotificationId},
        records::NotificationRecord,
    },
};

#[derive(Debug, Clone)]
pub struct HttpNotificationsService {
    api: ApiClient,
}

impl HttpNotificationsService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl NotificationsService for HttpNotificationsService {
    async fn list_notifications(&self) -> Result<Vec<Notification>, ApiError> {
        let records: Option<Vec<NotificationRecord>> =
            self.api.call(&Endpoint::Notifications).await?.data()?;

        Ok(records
            .unwrap_or_default()
            .into_iter()
            .map(Notification::from)
            .collect())
    }

    async fn mark_read(&self, notification: &NotificationId) -> Result<Notification, ApiError> {
        let record: NotificationRecord = self
            .api
            .call(&Endpoint::MarkNotificationRead(notification.clone()))
            .await?
            .data()?;

        Ok(record.into())
    }

    async fn delete_notification(&self, notification: &NotificationId) -> Result<(), ApiError> {
        self.api
            .call(&Endpoint::DeleteNotification(notification.clone()))
            .await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait NotificationsService: Send + Sync {
    /// Notifications for the logged-in user, as the backend orders them.
    async fn list_notifications(&self) -> Result<Vec<Notification>, ApiError>;

    /// Mark a notification read; returns it as updated.
    async fn mark_read(&self, notification: &NotificationId) -> Result<Notification, ApiError>;

    async fn delete_notification(&self, notification: &NotificationId) -> Result<(), ApiError>;
}
