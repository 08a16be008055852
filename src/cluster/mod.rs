// src/cluster/mod.rs
//! Directory clusters: partitioning a page tree by marker label and
//! counting the labels each cluster already uses.

pub mod partition;
pub mod vocabulary;

pub use partition::{partition, Partition};
pub use vocabulary::{space_vocabulary, LabelVocabulary};

use crate::types::Page;
use serde::Serialize;

/// A directory page plus every page whose nearest marked ancestor it is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cluster {
    pub root: Page,
    /// Ascending by id. Never contains `root`.
    pub members: Vec<Page>,
}

impl Cluster {
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[must_use]
    pub fn member(&self, id: &str) -> Option<&Page> {
        self.members
            .binary_search_by(|p| p.id.as_str().cmp(id))
            .ok()
            .and_then(|idx| self.members.get(idx))
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.member(id).is_some()
    }
}
