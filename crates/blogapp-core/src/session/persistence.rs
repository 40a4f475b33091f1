//! Durable credential storage.
//!
//! The token and the serialized user profile live in two string slots of a
//! [`KeyValueStore`]. [`CredentialStore`] keeps them paired and never lets a
//! storage failure escape: problems are logged and read back as "no session".

use std::collections::BTreeMap;
use std::fs;
#[cfg(not(unix))]
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{Context, Result};

use super::{Session, UserProfile};
use crate::config::paths;

/// Namespace prefix for every slot this app writes.
pub const KEY_PREFIX: &str = "@BlogApp:";
/// Slot holding the bearer token.
pub const TOKEN_KEY: &str = "@BlogApp:token";
/// Slot holding the JSON-encoded user profile.
pub const USER_KEY: &str = "@BlogApp:user";

/// String-only durable key-value storage.
///
/// The multi-key operations default to one call per key. Backends that can
/// write several keys in one step should override them so paired slots land
/// together.
pub trait KeyValueStore: Send + Sync {
    /// Reads a slot. `Ok(None)` when the key is absent.
    ///
    /// # Errors
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// # Errors
    /// Returns an error if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// # Errors
    /// Returns an error if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<()>;

    /// # Errors
    /// Returns an error if any write fails.
    fn multi_set(&self, pairs: &[(&str, &str)]) -> Result<()> {
        for (key, value) in pairs {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// # Errors
    /// Returns an error if any removal fails.
    fn multi_remove(&self, keys: &[&str]) -> Result<()> {
        for key in keys {
            self.remove(key)?;
        }
        Ok(())
    }
}

/// Volatile in-process storage.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    slots: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.slots().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.slots().remove(key);
        Ok(())
    }

    fn multi_set(&self, pairs: &[(&str, &str)]) -> Result<()> {
        let mut slots = self.slots();
        for (key, value) in pairs {
            slots.insert((*key).to_string(), (*value).to_string());
        }
        Ok(())
    }

    fn multi_remove(&self, keys: &[&str]) -> Result<()> {
        let mut slots = self.slots();
        for key in keys {
            slots.remove(*key);
        }
        Ok(())
    }
}

/// JSON object file on disk, written with restricted permissions (0600).
///
/// Every write rewrites the whole file through a temporary sibling and a
/// rename, so multi-key writes are all-or-nothing.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Storage file under `$BLOGAPP_HOME`.
    pub fn default_location() -> Self {
        Self::new(paths::storage_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw file contents; `None` when the file is missing or blank.
    fn read_raw(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read storage from {}", self.path.display()))?;
        Ok(Some(contents).filter(|c| !c.trim().is_empty()))
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        let Some(contents) = self.read_raw()? else {
            return Ok(BTreeMap::new());
        };
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse storage from {}", self.path.display()))
    }

    fn write_all(&self, slots: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents = serde_json::to_string_pretty(slots).context("Failed to serialize storage")?;
        let tmp_path = self.path.with_extension("json.tmp");

        #[cfg(unix)]
        {
            use std::io::Write;
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&tmp_path)
                .with_context(|| format!("Failed to open {} for writing", tmp_path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", tmp_path.display()))?;
        }

        #[cfg(not(unix))]
        {
            let mut file = fs::File::create(&tmp_path)
                .with_context(|| format!("Failed to open {} for writing", tmp_path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", tmp_path.display()))?;
        }

        fs::rename(&tmp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                self.path.display()
            )
        })
    }

    fn update(&self, apply: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        // A malformed file is overwritten; read failures still abort.
        let mut slots = match self.read_raw()? {
            None => BTreeMap::new(),
            Some(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "storage file is malformed; replacing it"
                );
                BTreeMap::new()
            }),
        };
        apply(&mut slots);
        self.write_all(&slots)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.update(|slots| {
            slots.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.update(|slots| {
            slots.remove(key);
        })
    }

    fn multi_set(&self, pairs: &[(&str, &str)]) -> Result<()> {
        self.update(|slots| {
            for (key, value) in pairs {
                slots.insert((*key).to_string(), (*value).to_string());
            }
        })
    }

    fn multi_remove(&self, keys: &[&str]) -> Result<()> {
        self.update(|slots| {
            for key in keys {
                slots.remove(*key);
            }
        })
    }
}

/// Durable mirror of the [`SessionStore`](super::SessionStore).
///
/// `save` and `clear` touch both slots in one backend call. None of the
/// methods return errors: storage failures are logged and the in-memory
/// session stays authoritative for the rest of the process.
#[derive(Clone)]
pub struct CredentialStore {
    backend: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore").finish_non_exhaustive()
    }
}

impl CredentialStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Reads the persisted session.
    ///
    /// Returns `None` unless both slots are present, non-empty, and the user
    /// slot parses as a profile.
    pub fn load(&self) -> Option<Session> {
        let token = match self.backend.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(err) => {
                tracing::warn!(error = %format!("{err:#}"), "failed to read stored token");
                return None;
            }
        };
        let user_json = match self.backend.get(USER_KEY) {
            Ok(user) => user.filter(|u| !u.is_empty()),
            Err(err) => {
                tracing::warn!(error = %format!("{err:#}"), "failed to read stored user");
                return None;
            }
        };

        let (Some(token), Some(user_json)) = (token, user_json) else {
            tracing::debug!("no stored session");
            return None;
        };

        match serde_json::from_str::<UserProfile>(&user_json) {
            Ok(user) => Some(Session { token, user }),
            Err(err) => {
                tracing::warn!(error = %err, "stored user profile is malformed; ignoring it");
                None
            }
        }
    }

    /// Writes both slots. Failure is logged and otherwise ignored.
    ///
    /// Returns whether the write reached durable storage.
    pub fn save(&self, token: &str, user: &UserProfile) -> bool {
        let user_json = match serde_json::to_string(user) {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!(error = %err, "failed to serialize user profile");
                return false;
            }
        };

        match self
            .backend
            .multi_set(&[(TOKEN_KEY, token), (USER_KEY, user_json.as_str())])
        {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %format!("{err:#}"), "failed to persist credentials");
                // A failed multi-key write may have landed one slot; drop both.
                self.clear();
                false
            }
        }
    }

    /// Removes both slots. Failure is logged and otherwise ignored.
    pub fn clear(&self) -> bool {
        match self.backend.multi_remove(&[TOKEN_KEY, USER_KEY]) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %format!("{err:#}"), "failed to remove stored credentials");
                false
            }
        }
    }
}
