// ABOUTME: Persisted login metadata (who is signed in and with which role)
// The bearer token itself lives in the keychain, see credentials.rs

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::UserProfile;

/// Session metadata persisted to disk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionFile {
    /// Whether a login completed and was not logged out since
    #[serde(default)]
    pub logged_in: bool,

    /// When the login happened (ISO 8601 timestamp)
    #[serde(default)]
    pub logged_in_at: Option<String>,

    /// Profile returned by the login endpoint
    #[serde(default)]
    pub user: Option<UserProfile>,
}

impl SessionFile {
    pub fn path() -> Result<PathBuf> {
        Ok(super::config_dir()?.join("session.toml"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read session from {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse session from {}", path.display()))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize session")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write session to {}", path.display()))?;

        Ok(())
    }

    pub fn mark_logged_in(&mut self, user: UserProfile) {
        self.logged_in = true;
        self.logged_in_at = Some(Utc::now().to_rfc3339());
        self.user = Some(user);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Remove the session file from disk
    pub fn remove() -> Result<()> {
        let path = Self::path()?;
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use tempfile::TempDir;

    fn profile() -> UserProfile {
        UserProfile {
            id: "u1".to_string(),
            name: "Ana Ruiz".to_string(),
            email: "ana@example.com".to_string(),
            role: Role::Admin,
        }
    }

    #[test]
    fn test_default_session() {
        let session = SessionFile::default();
        assert!(!session.logged_in);
        assert!(session.user.is_none());
    }

    #[test]
    fn test_mark_logged_in_and_clear() {
        let mut session = SessionFile::default();
        session.mark_logged_in(profile());
        assert!(session.logged_in);
        assert!(session.logged_in_at.is_some());

        session.clear();
        assert_eq!(session, SessionFile::default());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.toml");
        let mut session = SessionFile::default();
        session.mark_logged_in(profile());

        session.save_to(&path).unwrap();
        let loaded = SessionFile::load_from(&path).unwrap();
        assert_eq!(loaded, session);
        assert_eq!(loaded.user.unwrap().role, Role::Admin);
    }
}
