//! Who is signed in.
//!
//! Sign-in is local: `tomato login <user>` writes the user id to a session
//! file in the data directory and `tomato logout` removes it.

use super::data_storage::DataStorage;
use super::record::UserId;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const SESSION_FILE_NAME: &str = "session.json";

pub trait Identity {
    fn current_user(&self) -> Option<UserId>;
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionFile {
    user_id: UserId,
}

/// Identity persisted in the session file.
pub struct FileIdentity {
    path: PathBuf,
}

impl FileIdentity {
    pub fn new() -> Result<Self> {
        Ok(Self::at(DataStorage::new().get_path(SESSION_FILE_NAME)?))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn login(&self, user: &UserId) -> Result<()> {
        let session = SessionFile { user_id: user.clone() };
        fs::write(&self.path, serde_json::to_string_pretty(&session)?)?;
        Ok(())
    }

    /// Returns false when nobody was signed in.
    pub fn logout(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)?;
        Ok(true)
    }
}

impl Identity for FileIdentity {
    fn current_user(&self) -> Option<UserId> {
        let content = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str::<SessionFile>(&content) {
            Ok(session) if !session.user_id.as_str().trim().is_empty() => Some(session.user_id),
            Ok(_) => None,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "ignoring unreadable session file");
                None
            }
        }
    }
}

/// Fixed identity, for callers that already know the user.
pub struct StaticIdentity(pub Option<UserId>);

impl Identity for StaticIdentity {
    fn current_user(&self) -> Option<UserId> {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn login_then_logout_round_trip() {
        let dir = TempDir::new().unwrap();
        let identity = FileIdentity::at(dir.path().join(SESSION_FILE_NAME));
        assert_eq!(identity.current_user(), None);

        identity.login(&UserId::new("alice")).unwrap();
        assert_eq!(identity.current_user(), Some(UserId::new("alice")));

        assert!(identity.logout().unwrap());
        assert!(!identity.logout().unwrap());
        assert_eq!(identity.current_user(), None);
    }

    #[test]
    fn garbage_session_file_means_signed_out() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SESSION_FILE_NAME);
        fs::write(&path, "not json").unwrap();

        assert_eq!(FileIdentity::at(path).current_user(), None);
    }
}
