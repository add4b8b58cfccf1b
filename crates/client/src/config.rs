//! Client configuration loaded from environment variables.

/// Connection settings for the Whitebox API.
///
/// All fields have defaults suitable for a local backend. Override via
/// environment variables in other deployments.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API, including the `/api` prefix
    /// (default: `http://localhost:8000/api`).
    pub api_base_url: String,
    /// Notification poll interval in seconds (default: `30`).
    pub notification_poll_secs: u64,
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default                     |
    /// |-------------------------------|-----------------------------|
    /// | `WHITEBOX_API_BASE_URL`       | `http://localhost:8000/api` |
    /// | `WHITEBOX_NOTIFY_POLL_SECS`   | `30`                        |
    pub fn from_env() -> Self {
        let api_base_url = std::env::var("WHITEBOX_API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8000/api".into());
        // Trailing slash would double up when endpoint paths are joined.
        let api_base_url = api_base_url.trim_end_matches('/').to_string();

        let notification_poll_secs: u64 = std::env::var("WHITEBOX_NOTIFY_POLL_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("WHITEBOX_NOTIFY_POLL_SECS must be a valid u64");

        Self {
            api_base_url,
            notification_poll_secs,
        }
    }

    /// Load a `.env` file if present, then read the environment.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_env() {
        std::env::remove_var("WHITEBOX_API_BASE_URL");
        std::env::remove_var("WHITEBOX_NOTIFY_POLL_SECS");
        let config = ClientConfig::from_env();
        assert_eq!(config.api_base_url, "http://localhost:8000/api");
        assert_eq!(config.notification_poll_secs, 30);
    }
}
