//! Access/refresh token storage.
//!
//! The HTTP layer reads the access token on every request; the session
//! layer writes the pair on login and clears it on logout or when a
//! refresh attempt fails. Hosts that persist tokens (keychain, disk)
//! supply their own [`TokenStore`].

use std::sync::{Arc, RwLock};

/// An access/refresh token pair as issued by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Storage for the current token pair.
///
/// Implementations must be cheap to read; the client calls
/// [`access_token`](TokenStore::access_token) once per request.
pub trait TokenStore: Send + Sync {
    /// Current access token, if any.
    fn access_token(&self) -> Option<String>;
    /// Current refresh token, if any.
    fn refresh_token(&self) -> Option<String>;
    /// Replace the stored pair.
    fn set_tokens(&self, tokens: TokenPair);
    /// Replace only the access token, keeping the refresh token.
    fn set_access_token(&self, access: String);
    /// Drop both tokens.
    fn clear(&self);
}

/// In-memory token store. The default for tests and short-lived hosts.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    tokens: RwLock<Option<TokenPair>>,
}

impl MemoryTokenStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

impl TokenStore for MemoryTokenStore {
    fn access_token(&self) -> Option<String> {
        self.tokens
            .read()
            .ok()
            .and_then(|guard| guard.as_ref().map(|t| t.access.clone()))
    }

    fn refresh_token(&self) -> Option<String> {
        self.tokens
            .read()
            .ok()
            .and_then(|guard| guard.as_ref().map(|t| t.refresh.clone()))
    }

    fn set_tokens(&self, tokens: TokenPair) {
        if let Ok(mut guard) = self.tokens.write() {
            *guard = Some(tokens);
        }
    }

    fn set_access_token(&self, access: String) {
        if let Ok(mut guard) = self.tokens.write() {
            if let Some(pair) = guard.as_mut() {
                pair.access = access;
            } else {
                *guard = Some(TokenPair {
                    access,
                    refresh: String::new(),
                });
            }
        }
    }

    fn clear(&self) {
        if let Ok(mut guard) = self.tokens.write() {
            *guard = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_clear_round_trip() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.access_token(), None);

        store.set_tokens(TokenPair {
            access: "a1".into(),
            refresh: "r1".into(),
        });
        assert_eq!(store.access_token().as_deref(), Some("a1"));
        assert_eq!(store.refresh_token().as_deref(), Some("r1"));

        store.clear();
        assert_eq!(store.access_token(), None);
        assert_eq!(store.refresh_token(), None);
    }

    #[test]
    fn refresh_keeps_old_refresh_token() {
        let store = MemoryTokenStore::new();
        store.set_tokens(TokenPair {
            access: "a1".into(),
            refresh: "r1".into(),
        });
        store.set_access_token("a2".into());
        assert_eq!(store.access_token().as_deref(), Some("a2"));
        assert_eq!(store.refresh_token().as_deref(), Some("r1"));
    }
}
