//! Session persistence
//!
//! The bearer token is carried by an explicit [`Session`] value instead of
//! process-wide state. [`SessionStorage`] keeps it on disk between runs.

use serde::{Deserialize, Serialize};
use shared::models::UserPreview;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{ClientResult, NetworkHttpClient};

/// Signed-in user and their bearer token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: UserPreview,
}

impl Session {
    pub fn new(token: impl Into<String>, user: UserPreview) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user.id
    }

    /// Attach this session's token to an HTTP client
    pub fn authorize(&self, http: NetworkHttpClient) -> NetworkHttpClient {
        http.with_token(self.token.clone())
    }
}

/// JSON file storage for a [`Session`]
#[derive(Debug, Clone)]
pub struct SessionStorage {
    path: PathBuf,
}

impl SessionStorage {
    pub const DEFAULT_FILE_NAME: &'static str = "session.json";

    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self::with_file_name(base_path, Self::DEFAULT_FILE_NAME)
    }

    pub fn with_file_name(base_path: impl Into<PathBuf>, file_name: &str) -> Self {
        Self {
            path: base_path.into().join(file_name),
        }
    }

    fn ensure_dir(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Save the session, replacing any previous one
    pub fn save(&self, session: &Session) -> ClientResult<()> {
        self.ensure_dir()?;
        let json = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, json)?;
        tracing::debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    /// Load the stored session
    ///
    /// A missing or unreadable file counts as signed out.
    pub fn load(&self) -> Option<Session> {
        let json = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&json) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Ignoring corrupt session file");
                None
            }
        }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Remove the stored session
    pub fn clear(&self) -> ClientResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn session() -> Session {
        Session::new(
            "token-1",
            UserPreview {
                id: "u1".into(),
                name: "Ada".into(),
                avatar_url: None,
            },
        )
    }

    #[test]
    fn test_save_load_clear() {
        let dir = TempDir::new().unwrap();
        let storage = SessionStorage::new(dir.path().join("nested"));
        assert!(storage.load().is_none());

        storage.save(&session()).unwrap();
        assert!(storage.exists());
        assert_eq!(storage.load(), Some(session()));

        storage.clear().unwrap();
        assert!(!storage.exists());
        assert!(storage.load().is_none());
        // clearing twice is fine
        storage.clear().unwrap();
    }

    #[test]
    fn test_corrupt_file_is_signed_out() {
        let dir = TempDir::new().unwrap();
        let storage = SessionStorage::with_file_name(dir.path(), "s.json");
        fs::write(storage.path(), "{not json").unwrap();
        assert!(storage.load().is_none());
    }

    #[test]
    fn test_authorize_attaches_token() {
        use crate::{ClientConfig, HttpClient};
        let http = NetworkHttpClient::new(&ClientConfig::default()).unwrap();
        let http = session().authorize(http);
        assert_eq!(http.token(), Some("token-1"));
    }
}
