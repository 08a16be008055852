// src/error.rs
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Malformed snapshot at page {page_id}: {reason}")]
    MalformedSnapshot {
        page_id: String,
        reason: Malformation,
    },

    #[error("Snapshot for space '{space}' unavailable: {reason}")]
    SnapshotUnavailable { space: String, reason: String },

    #[error("Invalid selection: {0}")]
    InvalidSelection(SelectionProblem),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why a snapshot was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Malformation {
    /// Parent links loop back on themselves. `path` lists the ids on the loop.
    ParentCycle { path: Vec<String> },
    /// Two pages share one id.
    DuplicatePage,
}

impl fmt::Display for Malformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParentCycle { path } => write!(f, "parent cycle {}", path.join(" -> ")),
            Self::DuplicatePage => write!(f, "duplicate page id"),
        }
    }
}

/// Why a selection was refused before any mutation was attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionProblem {
    Empty,
    UnknownPage { page_id: String },
    BlankLabel { page_id: String },
    /// The marker label would turn a content page into a cluster root.
    MarkerLabel { page_id: String, label: String },
}

impl fmt::Display for SelectionProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "nothing selected"),
            Self::UnknownPage { page_id } => {
                write!(f, "page {page_id} is not a member of any cluster in this analysis")
            }
            Self::BlankLabel { page_id } => write!(f, "blank label selected for page {page_id}"),
            Self::MarkerLabel { page_id, label } => {
                write!(f, "marker label '{label}' cannot be applied to page {page_id}")
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ScoutError>;

// Allow `?` on std::io::Error by converting to ScoutError::Io with unknown path.
impl From<std::io::Error> for ScoutError {
    fn from(source: std::io::Error) -> Self {
        ScoutError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}

impl ScoutError {
    pub(crate) fn malformed(page_id: impl Into<String>, reason: Malformation) -> Self {
        Self::MalformedSnapshot {
            page_id: page_id.into(),
            reason,
        }
    }

    pub(crate) fn unavailable(space: &str, reason: impl fmt::Display) -> Self {
        Self::SnapshotUnavailable {
            space: space.to_string(),
            reason: reason.to_string(),
        }
    }
}
