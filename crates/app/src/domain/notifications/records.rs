//! Notification Records

use jiff::Timestamp;
use serde::Deserialize;

use crate::domain::notifications::models::Notification;

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct NotificationRecord {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default)]
    pub message: String,

    #[serde(default)]
    pub read: bool,

    #[serde(rename = "createdAt", default)]
    pub created_at: Option<Timestamp>,
}

impl From<NotificationRecord> for Notification {
    fn from(record: NotificationRecord) -> Self {
        Self {
            id: record.id.into(),
            message: record.message,
            read: record.read,
            created_at: record.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn unread_by_default() -> TestResult {
        let record: NotificationRecord = serde_json::from_str(
            r#"{ "_id": "n1", "message": "Order shipped", "createdAt": "2025-03-01T08:30:00Z" }"#,
        )?;

        let notification = Notification::from(record);

        assert!(!notification.read);
        assert_eq!(notification.message, "Order shipped");
        assert!(notification.created_at.is_some());

        Ok(())
    }
}
