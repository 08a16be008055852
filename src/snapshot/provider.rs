// src/snapshot/provider.rs
//! Where snapshots come from.
//!
//! The live wiki fetcher and its cache sit outside this crate; what they
//! leave behind is a directory of `<space>.json` files that
//! [`DirectoryProvider`] serves.

use super::{Snapshot, SnapshotFile};
use crate::error::{Result, ScoutError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

const SNAPSHOT_EXT: &str = "json";

pub trait SnapshotProvider {
    /// Fetches the current snapshot of a space.
    ///
    /// # Errors
    /// Returns `SnapshotUnavailable` when the snapshot cannot be obtained and
    /// `MalformedSnapshot` when it can but its content is inconsistent.
    fn fetch_snapshot(&self, space: &str) -> Result<Snapshot>;

    /// Lists the space keys this provider can serve, sorted.
    ///
    /// # Errors
    /// Returns `SnapshotUnavailable` if the listing itself fails.
    fn list_spaces(&self) -> Result<Vec<String>>;
}

#[derive(Debug, Clone)]
pub struct DirectoryProvider {
    root: PathBuf,
}

impl DirectoryProvider {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes a snapshot back under its space key (temp file + rename).
    ///
    /// # Errors
    /// Returns `Io` if the write fails.
    pub fn store(&self, snapshot: &Snapshot) -> Result<()> {
        let path = self.path_for(snapshot.space())?;
        let content = snapshot.to_json()?;
        atomic_write(&path, &content)
    }

    fn path_for(&self, space: &str) -> Result<PathBuf> {
        if !is_valid_space_key(space) {
            return Err(ScoutError::unavailable(space, "invalid space key"));
        }
        Ok(self.root.join(format!("{space}.{SNAPSHOT_EXT}")))
    }
}

impl SnapshotProvider for DirectoryProvider {
    fn fetch_snapshot(&self, space: &str) -> Result<Snapshot> {
        let path = self.path_for(space)?;
        debug!(path = %path.display(), "reading snapshot");

        let content = fs::read_to_string(&path)
            .map_err(|e| ScoutError::unavailable(space, format!("{}: {e}", path.display())))?;
        let file: SnapshotFile = serde_json::from_str(&content)
            .map_err(|e| ScoutError::unavailable(space, format!("{}: {e}", path.display())))?;

        if !file.space.is_empty() && file.space != space {
            warn!(
                requested = space,
                recorded = %file.space,
                "snapshot file records a different space key"
            );
        }

        Snapshot::new(space, file.pages)
    }

    fn list_spaces(&self) -> Result<Vec<String>> {
        if !self.root.is_dir() {
            return Err(ScoutError::unavailable(
                "*",
                format!("snapshot directory not found: {}", self.root.display()),
            ));
        }

        let mut spaces = Vec::new();
        for entry in WalkDir::new(&self.root).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| ScoutError::unavailable("*", e))?;
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(SNAPSHOT_EXT)
            {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                spaces.push(stem.to_string());
            }
        }

        spaces.sort();
        Ok(spaces)
    }
}

fn is_valid_space_key(space: &str) -> bool {
    !space.is_empty()
        && space != "."
        && space != ".."
        && !space.contains(|c| c == '/' || c == '\\')
}

fn atomic_write(path: &Path, content: &str) -> Result<()> {
    let temp_path = path.with_extension("json.tmp");

    fs::write(&temp_path, content).map_err(|source| ScoutError::Io {
        source,
        path: temp_path.clone(),
    })?;

    fs::rename(&temp_path, path).map_err(|source| ScoutError::Io {
        source,
        path: path.to_path_buf(),
    })
}
