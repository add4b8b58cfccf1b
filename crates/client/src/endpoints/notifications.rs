//! Notification endpoints (`/notifications/...`).

use serde::Deserialize;
use serde_json::Value;

use whitebox_core::notification::{Notification, NotificationPreference};

use crate::error::ApiError;
use crate::http::ApiClient;

pub struct NotificationsApi<'a> {
    pub(crate) client: &'a ApiClient,
}

#[derive(Debug, Deserialize)]
pub struct UnreadCount {
    pub unread_count: u64,
}

impl NotificationsApi<'_> {
    pub async fn list(&self) -> Result<Vec<Notification>, ApiError> {
        self.client
            .get_list("/notifications/notifications/")
            .await
    }

    pub async fn list_unread(&self) -> Result<Vec<Notification>, ApiError> {
        self.client
            .get_list("/notifications/notifications/unread/")
            .await
    }

    pub async fn mark_as_read(&self, notification_id: &str) -> Result<(), ApiError> {
        self.client
            .post_empty(&format!(
                "/notifications/notifications/{notification_id}/mark_as_read/"
            ))
            .await
    }

    pub async fn mark_all_as_read(&self) -> Result<(), ApiError> {
        self.client
            .post_empty("/notifications/notifications/mark_all_as_read/")
            .await
    }

    pub async fn count_unread(&self) -> Result<UnreadCount, ApiError> {
        self.client
            .get_json("/notifications/notifications/count_unread/")
            .await
    }

    pub async fn get_preferences(&self) -> Result<Vec<NotificationPreference>, ApiError> {
        self.client.get_list("/notifications/preferences/").await
    }

    pub async fn update_preferences(
        &self,
        preferences_id: &str,
        payload: &Value,
    ) -> Result<NotificationPreference, ApiError> {
        self.client
            .put_json(&format!("/notifications/preferences/{preferences_id}/"), payload)
            .await
    }
}
