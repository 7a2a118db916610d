use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use super::store::SessionStore;

/// Session file name in the session directory
const SESSION_FILE: &str = "session.json";

/// Session state persisted as a JSON object in `<dir>/session.json`.
///
/// The file is read once on open. Every write rewrites it, readable by the
/// owner only on unix; clearing the store deletes it.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileSessionStore {
    /// Open the store in `dir`, loading an existing session file if present
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let path = dir.into().join(SESSION_FILE);
        let entries = if path.exists() {
            let contents =
                std::fs::read_to_string(&path).context("Failed to read session file")?;
            serde_json::from_str(&contents).context("Failed to parse session file")?
        } else {
            BTreeMap::new()
        };
        debug!(path = %path.display(), keys = entries.len(), "Session file opened");

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if entries.is_empty() {
            return self.remove_file();
        }

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(entries)?;
        write_private(&self.path, &contents).context("Failed to write session file")?;
        Ok(())
    }

    /// Delete the session file. If it cannot be deleted, blank it so the
    /// token does not outlive the process.
    fn remove_file(&self) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(remove_err) => {
                warn!(error = %remove_err, path = %self.path.display(), "Failed to remove session file, blanking it");
                write_private(&self.path, "{}")
                    .with_context(|| format!("Failed to remove session file: {}", remove_err))
            }
        }
    }

    /// Apply `change` to the in-memory map, then write the result to disk.
    /// The in-memory change stands even when the write fails.
    fn modify(&self, change: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        change(&mut entries);
        self.persist(&entries)
    }
}

/// Write `contents` to `path`, readable by the owner only
fn write_private(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;

    // mode() only applies to new files
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    }

    file.write_all(contents.as_bytes())
}

impl SessionStore for FileSessionStore {
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
