// src/exit.rs
//! Standardized process exit codes for `labelscout`.
//!
//! Provides a stable contract for scripts and automation.

use crate::error::ScoutError;
use std::process::Termination;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ScoutExit {
    /// Operation completed successfully.
    Success = 0,
    /// Generic error (e.g. IO, serialization).
    Error = 1,
    /// Caller input rejected (empty or stale selection, bad config).
    InvalidInput = 2,
    /// Snapshot content is inconsistent (parent cycle, duplicate ids).
    MalformedSnapshot = 3,
    /// Snapshot could not be obtained.
    SnapshotUnavailable = 4,
    /// At least one mutation in the batch failed.
    MutationFailed = 5,
}

impl ScoutExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Maps an error chain to its exit code by the first [`ScoutError`] in it.
    #[must_use]
    pub fn for_error(err: &anyhow::Error) -> Self {
        match err.chain().find_map(|e| e.downcast_ref::<ScoutError>()) {
            Some(ScoutError::InvalidSelection(_) | ScoutError::Config(_)) => Self::InvalidInput,
            Some(ScoutError::MalformedSnapshot { .. }) => Self::MalformedSnapshot,
            Some(ScoutError::SnapshotUnavailable { .. }) => Self::SnapshotUnavailable,
            Some(ScoutError::Io { .. } | ScoutError::Json(_)) | None => Self::Error,
        }
    }
}

impl Termination for ScoutExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}
