//! File-backed storage for placement attempts.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::{debug, instrument};

use crate::store::attempt::PlacementAttempt;
use crate::store::error::StoreError;

/// Stores one JSON file per user under a base directory.
///
/// Saves write to a sibling temp file and rename into place, so a crash
/// mid-write leaves either the previous record or the new one, never a
/// truncated file.
#[derive(Debug, Clone)]
pub struct AttemptStore {
    base_dir: PathBuf,
}

impl AttemptStore {
    /// Opens a store rooted at `base_dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the directory cannot be created.
    #[instrument]
    pub fn new(base_dir: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(base_dir)
            .map_err(|e| StoreError::new(format!("creating {}: {e}", base_dir.display())))?;
        Ok(Self {
            base_dir: base_dir.to_path_buf(),
        })
    }

    /// Opens the store in the platform data directory.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when no home directory can be resolved or the
    /// directory cannot be created.
    #[instrument]
    pub fn open_default() -> Result<Self, StoreError> {
        let dirs = ProjectDirs::from("", "", "wortspiel")
            .ok_or_else(|| StoreError::new("no home directory available"))?;
        Self::new(dirs.data_dir())
    }

    // Usernames are login names; anything outside a conservative filename
    // alphabet is mapped to '_'.
    fn attempt_path(&self, username: &str) -> PathBuf {
        let safe: String = username
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.base_dir.join(format!("placement_{safe}.json"))
    }

    /// Loads the persisted attempt for the user, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the file exists but cannot be read or
    /// parsed.
    #[instrument(skip(self))]
    pub fn load(&self, username: &str) -> Result<Option<PlacementAttempt>, StoreError> {
        let path = self.attempt_path(username);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)
            .map_err(|e| StoreError::new(format!("reading {}: {e}", path.display())))?;
        let attempt = serde_json::from_str(&raw)
            .map_err(|e| StoreError::new(format!("parsing {}: {e}", path.display())))?;
        debug!("Loaded placement attempt from {}", path.display());
        Ok(Some(attempt))
    }

    /// Writes the attempt to disk, replacing any previous record for the user.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when serialization or the write fails.
    #[instrument(skip(self, attempt))]
    pub fn save(&self, attempt: &PlacementAttempt) -> Result<(), StoreError> {
        let path = self.attempt_path(attempt.username());
        let raw = serde_json::to_string_pretty(attempt)
            .map_err(|e| StoreError::new(format!("serializing attempt: {e}")))?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, raw)
            .map_err(|e| StoreError::new(format!("writing {}: {e}", tmp.display())))?;
        fs::rename(&tmp, &path)
            .map_err(|e| StoreError::new(format!("renaming into {}: {e}", path.display())))?;
        debug!("Saved placement attempt to {}", path.display());
        Ok(())
    }

    /// Removes the persisted attempt for the user. Missing files are fine.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the file exists but cannot be removed.
    #[instrument(skip(self))]
    pub fn clear(&self, username: &str) -> Result<(), StoreError> {
        let path = self.attempt_path(username);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("Cleared placement attempt at {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::new(format!(
                "removing {}: {e}",
                path.display()
            ))),
        }
    }
}
