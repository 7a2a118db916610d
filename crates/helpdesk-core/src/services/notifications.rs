use crate::api::{ApiClient, ApiError};
use crate::models::{Notification, UnreadCount};

use super::Resource;

const NOTIFICATIONS_PATH: &str = "/notifications";

/// Notifications addressed to the logged-in user.
#[derive(Clone)]
pub struct NotificationService {
    notifications: Resource<Notification>,
}

impl NotificationService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            notifications: Resource::new(api, NOTIFICATIONS_PATH),
        }
    }

    pub async fn list(&self) -> Result<Vec<Notification>, ApiError> {
        self.notifications.list().await
    }

    pub async fn unread_count(&self) -> Result<u32, ApiError> {
        let path = format!("{}/unread-count", NOTIFICATIONS_PATH);
        let count: UnreadCount = self.notifications.api().get_json(&path).await?;
        Ok(count.count)
    }

    pub async fn mark_read(&self, id: i64) -> Result<(), ApiError> {
        let path = format!("{}/read", self.notifications.item_path(id));
        self.notifications
            .api()
            .post_unit(&path, &serde_json::json!({}))
            .await
    }

    pub async fn mark_all_read(&self) -> Result<(), ApiError> {
        let path = format!("{}/read-all", NOTIFICATIONS_PATH);
        self.notifications
            .api()
            .post_unit(&path, &serde_json::json!({}))
            .await
    }
}
