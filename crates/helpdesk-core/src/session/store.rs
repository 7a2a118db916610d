use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use anyhow::Result;

/// Key holding the bearer token
pub const TOKEN_KEY: &str = "token";

/// Key holding the JSON profile of the logged-in user
pub const USER_KEY: &str = "user";

/// Persistent key/value storage for session state.
///
/// Reads never fail: backends load their contents when opened and serve
/// reads from memory. Writes go through to the backing medium.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;

    /// Remove every key.
    fn clear(&self) -> Result<()>;

    fn is_empty(&self) -> bool;

    /// The stored bearer token, if any
    fn token(&self) -> Option<String> {
        self.get(TOKEN_KEY)
    }
}

/// Whether requests currently go out with a credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Authenticated,
    Unauthenticated,
}

impl SessionState {
    pub fn of(store: &dyn SessionStore) -> Self {
        match store.token() {
            Some(token) if !token.is_empty() => SessionState::Authenticated,
            _ => SessionState::Unauthenticated,
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Authenticated => write!(f, "authenticated"),
            SessionState::Unauthenticated => write!(f, "not logged in"),
        }
    }
}

/// In-process store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a token
    pub fn with_token(token: &str) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(TOKEN_KEY.to_string(), token.to_string());
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// Snapshot of every stored entry
    pub fn entries(&self) -> BTreeMap<String, String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        Ok(())
    }

    fn is_empty(&self) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}
