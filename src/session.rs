//! Session context holding the auth token.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{AppError, Result};

/// Key under which the auth token is persisted.
pub const TOKEN_KEY: &str = "token";

/// Small JSON key/value file used as persistent client storage.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(entries)?)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    /// Entries to rewrite. An unreadable file is replaced rather than kept.
    fn read_for_write(&self) -> BTreeMap<String, String> {
        self.read_all().unwrap_or_else(|e| {
            warn!("Overwriting unreadable token store {:?}: {}", self.path, e);
            BTreeMap::new()
        })
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.read_for_write();
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        match self.read_all() {
            Ok(mut entries) => {
                if entries.remove(key).is_some() {
                    self.write_all(&entries)?;
                }
                Ok(())
            }
            Err(e) => {
                warn!("Resetting unreadable token store {:?}: {}", self.path, e);
                self.write_all(&BTreeMap::new())
            }
        }
    }
}

/// Process-wide session state, passed explicitly to whatever needs it.
///
/// Set on successful sign-in or OTP verification, read by the staff screen
/// guard, cleared on sign-out.
#[derive(Debug)]
pub struct Session {
    store: TokenStore,
    token: Option<String>,
}

impl Session {
    /// Restore the session from `store`. An unreadable store starts signed out.
    pub fn restore(store: TokenStore) -> Self {
        let token = match store.get(TOKEN_KEY) {
            Ok(token) => token,
            Err(e) => {
                warn!("Ignoring unreadable token store {:?}: {}", store.path(), e);
                None
            }
        };
        if token.is_some() {
            info!("Restored session from {:?}", store.path());
        }
        Self { store, token }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Store a fresh token in memory and on disk.
    pub fn set_token(&mut self, token: impl Into<String>) -> Result<()> {
        let token = token.into();
        if token.is_empty() {
            return Err(AppError::session("refusing to store an empty token"));
        }
        self.store.set(TOKEN_KEY, &token)?;
        self.token = Some(token);
        debug!("Session token stored");
        Ok(())
    }

    /// Forget the token. The in-memory token is dropped even if the store
    /// cannot be updated.
    pub fn clear(&mut self) -> Result<()> {
        self.token = None;
        self.store.remove(TOKEN_KEY)?;
        info!("Session cleared");
        Ok(())
    }
}
