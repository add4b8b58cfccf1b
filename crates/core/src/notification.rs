//! Notifications and the optimistic feed state behind the bell widget.
//!
//! The feed is pure data: the polling service in the client crate
//! fetches and then applies these transitions locally before the
//! network confirms. On a failed mark call the service refetches the
//! whole feed instead of rolling the optimistic change back in place.

use serde::{Deserialize, Serialize};

use crate::types::EntityId;

/// A notification as returned by `/notifications/notifications/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: EntityId,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub notification_type: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    pub is_read: bool,
    #[serde(default)]
    pub action_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub time_since: Option<String>,
}

/// Per-channel notification switches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationPreference {
    pub id: EntityId,
    #[serde(default)]
    pub course_updates: bool,
    #[serde(default)]
    pub new_content: bool,
    #[serde(default)]
    pub deadline_reminders: bool,
    #[serde(default)]
    pub certificate_issued: bool,
    #[serde(default)]
    pub course_completed: bool,
    #[serde(default)]
    pub system_alerts: bool,
    #[serde(default)]
    pub email_notifications: bool,
    #[serde(default)]
    pub in_app_notifications: bool,
}

/// Local state for the bell widget: the visible list plus the unread
/// counter from the dedicated count endpoint.
#[derive(Debug, Clone, Default)]
pub struct NotificationFeed {
    pub notifications: Vec<Notification>,
    pub unread_count: u64,
}

impl NotificationFeed {
    /// Replace the feed with freshly fetched data.
    pub fn replace(&mut self, notifications: Vec<Notification>, unread_count: u64) {
        self.notifications = notifications;
        self.unread_count = unread_count;
    }

    /// Optimistically mark one notification read: flag it in the list
    /// and decrement the counter, clamped at zero.
    pub fn apply_mark_read(&mut self, id: &str) {
        for n in &mut self.notifications {
            if n.id == id {
                n.is_read = true;
            }
        }
        self.unread_count = self.unread_count.saturating_sub(1);
    }

    /// Optimistically mark everything read.
    pub fn apply_mark_all_read(&mut self) {
        for n in &mut self.notifications {
            n.is_read = true;
        }
        self.unread_count = 0;
    }

    /// Badge text: counts above 99 collapse to "99+".
    pub fn badge_label(&self) -> Option<String> {
        match self.unread_count {
            0 => None,
            n if n > 99 => Some("99+".to_string()),
            n => Some(n.to_string()),
        }
    }
}
