//! Background notification polling and the optimistic bell feed.
//!
//! [`NotificationBell`] refreshes the feed on start and on a fixed
//! interval until its [`CancellationToken`] fires. Mark-read actions
//! mutate the local feed first and reconcile by refetching when the
//! server call fails; the optimistic change is never rolled back in
//! place.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use whitebox_core::notification::NotificationFeed;

use crate::http::ApiClient;

/// Shared bell state. Clone freely; all clones see one feed.
#[derive(Clone)]
pub struct NotificationBell {
    client: ApiClient,
    feed: Arc<Mutex<NotificationFeed>>,
}

impl NotificationBell {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            feed: Arc::new(Mutex::new(NotificationFeed::default())),
        }
    }

    /// Snapshot of the current feed for rendering.
    pub fn feed(&self) -> NotificationFeed {
        self.feed.lock().map(|guard| guard.clone()).unwrap_or_default()
    }

    /// Poll until cancelled. The first tick fires immediately, so the
    /// feed is populated on startup without a separate call.
    pub async fn run(&self, poll_interval: Duration, shutdown: CancellationToken) {
        let mut interval = tokio::time::interval(poll_interval);
        tracing::info!(interval_secs = poll_interval.as_secs(), "notification poll started");
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::info!("notification poll stopped");
                    break;
                }
                _ = interval.tick() => {
                    self.refresh().await;
                }
            }
        }
    }

    /// Fetch the list and the unread count in parallel and replace the
    /// feed. On failure the previous feed stays visible.
    pub async fn refresh(&self) {
        let notifications_api = self.client.notifications();
        let (notifications, count) = tokio::join!(
            notifications_api.list(),
            notifications_api.count_unread(),
        );
        match (notifications, count) {
            (Ok(notifications), Ok(count)) => {
                if let Ok(mut feed) = self.feed.lock() {
                    feed.replace(notifications, count.unread_count);
                }
            }
            (Err(error), _) | (_, Err(error)) => {
                tracing::warn!(%error, "notification refresh failed");
            }
        }
    }

    /// Mark one notification read: local feed first, then the server.
    /// A failed call triggers a refetch to reconcile.
    pub async fn mark_read(&self, notification_id: &str) {
        if let Ok(mut feed) = self.feed.lock() {
            feed.apply_mark_read(notification_id);
        }
        if let Err(error) = self.client.notifications().mark_as_read(notification_id).await {
            tracing::warn!(%notification_id, %error, "mark read failed, refetching");
            self.refresh().await;
        }
    }

    /// Mark everything read, same optimistic-then-reconcile shape.
    pub async fn mark_all_read(&self) {
        if let Ok(mut feed) = self.feed.lock() {
            feed.apply_mark_all_read();
        }
        if let Err(error) = self.client.notifications().mark_all_as_read().await {
            tracing::warn!(%error, "mark all read failed, refetching");
            self.refresh().await;
        }
    }

    /// Badge text for the bell icon ("99+" above 99, nothing at zero).
    pub fn badge_label(&self) -> Option<String> {
        self.feed.lock().ok().and_then(|feed| feed.badge_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use whitebox_core::notification::Notification;

    use crate::config::ClientConfig;
    use crate::token::MemoryTokenStore;

    fn bell() -> NotificationBell {
        let config = ClientConfig {
            api_base_url: "http://localhost:8000/api".into(),
            notification_poll_secs: 30,
        };
        let tokens: Arc<MemoryTokenStore> = MemoryTokenStore::new();
        NotificationBell::new(ApiClient::new(&config, tokens))
    }

    fn notification(id: &str, is_read: bool) -> Notification {
        Notification {
            id: id.into(),
            title: "t".into(),
            message: "m".into(),
            notification_type: None,
            priority: None,
            is_read,
            action_url: None,
            created_at: None,
            time_since: None,
        }
    }

    #[test]
    fn feed_snapshot_reflects_local_state() {
        let bell = bell();
        {
            let mut feed = bell.feed.lock().unwrap();
            feed.replace(vec![notification("n1", false)], 3);
        }
        assert_eq!(bell.feed().unread_count, 3);
        assert_eq!(bell.badge_label().as_deref(), Some("3"));
    }

    #[test]
    fn optimistic_mark_read_applies_before_any_network_confirmation() {
        let bell = bell();
        {
            let mut feed = bell.feed.lock().unwrap();
            feed.replace(vec![notification("n1", false), notification("n2", false)], 3);
        }
        {
            let mut feed = bell.feed.lock().unwrap();
            feed.apply_mark_read("n1");
        }
        let snapshot = bell.feed();
        assert_eq!(snapshot.unread_count, 2);
        assert!(snapshot.notifications[0].is_read);
        assert!(!snapshot.notifications[1].is_read);
    }
}
