use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use anyhow::{Context, Result};
use keyring::Entry;
use tracing::warn;

use super::store::SessionStore;

const SERVICE_NAME: &str = "helpdesk";

/// Session state kept in the OS keychain as a single JSON secret.
pub struct KeyringSessionStore {
    entry: Entry,
    entries: RwLock<BTreeMap<String, String>>,
}

impl KeyringSessionStore {
    /// Open the keychain entry for `account`, loading any stored session
    pub fn open(account: &str) -> Result<Self> {
        let entry = Entry::new(SERVICE_NAME, account).context("Failed to create keyring entry")?;
        Self::from_entry(entry)
    }

    fn from_entry(entry: Entry) -> Result<Self> {
        let entries = match entry.get_password() {
            Ok(secret) => {
                serde_json::from_str(&secret).context("Failed to parse session from keychain")?
            }
            Err(keyring::Error::NoEntry) => BTreeMap::new(),
            Err(e) => return Err(e).context("Failed to read session from keychain"),
        };

        Ok(Self {
            entry,
            entries: RwLock::new(entries),
        })
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if entries.is_empty() {
            return match self.entry.delete_credential() {
                Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
                Err(delete_err) => {
                    // Leave an empty session behind rather than the old token
                    warn!(error = %delete_err, "Failed to delete keychain entry, blanking it");
                    self.entry
                        .set_password("{}")
                        .with_context(|| format!("Failed to delete session from keychain: {}", delete_err))
                }
            };
        }
        let secret = serde_json::to_string(entries)?;
        self.entry
            .set_password(&secret)
            .context("Failed to store session in keychain")
    }

    fn modify(&self, change: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        change(&mut entries);
        self.persist(&entries)
    }
}

impl SessionStore for KeyringSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.modify(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.modify(|entries| {
            entries.remove(key);
        })
    }

    fn clear(&self) -> Result<()> {
        self.modify(BTreeMap::clear)
    }

    fn is_empty(&self) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

impl std::fmt::Debug for KeyringSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyringSessionStore")
            .field("service", &SERVICE_NAME)
            .finish_non_exhaustive()
    }
}
