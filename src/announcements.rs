//! File-backed announcement store.
//!
//! Each country keeps at most one announcement, stored together in a JSON
//! array of `{"user": ..., "message": ...}` records. The batch run reads the
//! whole list and turns every record into an article. Edits read the file
//! strictly, so a store that cannot be decoded is never overwritten.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised by the announcement store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode announcements: {0}")]
    Encode(#[from] serde_json::Error),
}

/// One country's announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub message: String,
}

/// JSON file holding every announcement.
#[derive(Debug, Clone)]
pub struct AnnouncementStore {
    path: PathBuf,
}

impl AnnouncementStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        AnnouncementStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every announcement.
    ///
    /// A missing file or one that is not a valid announcement list reads as
    /// empty; only other IO failures are errors. Records without a user are
    /// skipped.
    pub fn load(&self) -> Result<Vec<Announcement>, StoreError> {
        match self.read_records() {
            Ok(records) => Ok(records.into_iter().filter(|a| !a.user.is_empty()).collect()),
            Err(StoreError::Decode { path, source }) => {
                warn!(path = %path.display(), error = %source, "ignoring unreadable announcement store");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Reads every record as stored, failing on anything that does not decode.
    fn read_records(&self) -> Result<Vec<Announcement>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no announcement store yet");
                return Ok(Vec::new());
            }
            Err(source) => return Err(StoreError::Read { path: self.path.clone(), source }),
        };
        serde_json::from_str(&raw)
            .map_err(|source| StoreError::Decode { path: self.path.clone(), source })
    }

    /// Returns the message `user` posted, or an empty string.
    pub fn message_for(&self, user: &str) -> Result<String, StoreError> {
        Ok(self
            .load()?
            .into_iter()
            .find(|a| a.user == user)
            .map(|a| a.message)
            .unwrap_or_default())
    }

    /// Posts `message` for `user`, replacing their previous one.
    pub fn save(&self, user: &str, message: &str) -> Result<(), StoreError> {
        let mut announcements = self.read_records()?;
        match announcements.iter_mut().find(|a| a.user == user) {
            Some(existing) => existing.message = message.to_string(),
            None => announcements.push(Announcement {
                user: user.to_string(),
                message: message.to_string(),
            }),
        }
        self.write(&announcements)
    }

    /// Removes `user`'s announcement. Does nothing if there is no store.
    pub fn delete(&self, user: &str) -> Result<(), StoreError> {
        if !self.path.exists() {
            return Ok(());
        }
        let mut announcements = self.read_records()?;
        announcements.retain(|a| a.user != user);
        self.write(&announcements)
    }

    fn write(&self, announcements: &[Announcement]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(announcements)?;
        fs::write(&self.path, json)
            .map_err(|source| StoreError::Write { path: self.path.clone(), source })
    }
}
