use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::usecase::ports::identity::Session;
use crate::usecase::ports::session_store::SessionStore;

/// JSON file in the application data directory.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read session: {}", self.path.display()))?;
        let session = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse session: {}", self.path.display()))?;
        Ok(Some(session))
    }

    fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create parent dir: {}", parent.display()))?;
        }
        let raw = serde_json::to_string(session).context("failed to encode session")?;
        fs::write(&self.path, raw)
            .with_context(|| format!("failed to write session: {}", self.path.display()))
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("failed to remove session: {}", self.path.display()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn session() -> Session {
        Session {
            email: "equipe@clinica.com".to_string(),
            id_token: "token".to_string(),
            expires_at: Utc
                .with_ymd_and_hms(2024, 1, 2, 10, 0, 0)
                .single()
                .expect("valid instant"),
        }
    }

    #[test]
    fn save_load_and_clear() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let store = FileSessionStore::new(dir.path().join("nested").join("session.json"));

        assert_eq!(store.load().expect("load should succeed"), None);

        store.save(&session()).expect("save should succeed");
        assert_eq!(store.load().expect("load should succeed"), Some(session()));

        store.clear().expect("clear should succeed");
        assert!(!store.path().exists());
        store.clear().expect("clearing twice is fine");
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").expect("should write fixture");

        assert!(FileSessionStore::new(path).load().is_err());
    }
}
