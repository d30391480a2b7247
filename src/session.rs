//! Local credential and cached user record
//!
//! Stored as JSON in ~/.config/fest/session.json. Nothing else the client
//! shows is persisted.

use crate::config::Config;
use crate::profile::UserRecord;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const NO_TOKEN: &str = "No authentication token found";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub user: UserRecord,
}

impl Session {
    pub fn default_path() -> Option<PathBuf> {
        Config::config_dir().map(|p| p.join("session.json"))
    }

    /// Read the session at `path`; `Ok(None)` when nobody is signed in
    pub fn load_from(path: &Path) -> Result<Option<Self>> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).with_context(|| format!("Cannot read {}", path.display())),
        };

        let session: Session = serde_json::from_str(&contents)
            .with_context(|| format!("Corrupt session file {}", path.display()))?;
        if session.access_token.is_empty() {
            return Ok(None);
        }
        Ok(Some(session))
    }

    /// Read the session or fail with "No authentication token found"
    pub fn require(path: &Path) -> Result<Self> {
        Self::load_from(path)?.context(NO_TOKEN)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).with_context(|| format!("Cannot write {}", path.display()))?;
        tracing::debug!("Session saved to {}", path.display());
        Ok(())
    }

    /// Remove the session file; returns whether one existed
    pub fn clear(path: &Path) -> Result<bool> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e).with_context(|| format!("Cannot remove {}", path.display())),
        }
    }
}
