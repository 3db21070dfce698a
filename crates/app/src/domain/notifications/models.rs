//! Notification Models

use jiff::Timestamp;

use storefront::prelude::TypedId;

/// Notification identifier.
pub type NotificationId = TypedId<Notification>;

/// An account notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub read: bool,
    pub created_at: Option<Timestamp>,
}
