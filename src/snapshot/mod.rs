// src/snapshot/mod.rs
//! Immutable, point-in-time view of one space's page tree.
//!
//! Pages are keyed by id in an ordered map; parent links are plain ids
//! resolved by lookup. Nothing here walks the tree, so a snapshot with a
//! parent cycle can still be built. The partitioner is what rejects it.

pub mod provider;

pub use provider::{DirectoryProvider, SnapshotProvider};

use crate::error::{Malformation, Result, ScoutError};
use crate::types::{ApplicationRequest, Page, PageId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// On-disk / on-wire shape of a snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotFile {
    #[serde(default)]
    pub space: String,
    #[serde(default)]
    pub pages: Vec<Page>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    space: String,
    pages: BTreeMap<PageId, Page>,
}

impl Snapshot {
    /// Builds a snapshot from a list of pages.
    ///
    /// # Errors
    /// Returns `MalformedSnapshot` if two pages share an id.
    pub fn new<I>(space: impl Into<String>, pages: I) -> Result<Self>
    where
        I: IntoIterator<Item = Page>,
    {
        let mut map = BTreeMap::new();
        for page in pages {
            if map.contains_key(&page.id) {
                return Err(ScoutError::malformed(
                    page.id.as_str(),
                    Malformation::DuplicatePage,
                ));
            }
            map.insert(page.id.clone(), page);
        }
        Ok(Self {
            space: space.into(),
            pages: map,
        })
    }

    /// Parses the JSON snapshot format.
    ///
    /// # Errors
    /// Returns `Json` on bad input and `MalformedSnapshot` on duplicate ids.
    pub fn from_json(content: &str) -> Result<Self> {
        let file: SnapshotFile = serde_json::from_str(content)?;
        Self::new(file.space, file.pages)
    }

    /// # Errors
    /// Returns `Json` if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        let file = SnapshotFile {
            space: self.space.clone(),
            pages: self.pages.values().cloned().collect(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    #[must_use]
    pub fn space(&self) -> &str {
        &self.space
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Page> {
        self.pages.get(id)
    }

    /// Pages in ascending id order.
    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.pages.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Resolves a page's parent within this snapshot.
    ///
    /// `None` both for top-level pages and for parents outside the snapshot.
    #[must_use]
    pub fn parent_of(&self, page: &Page) -> Option<&Page> {
        page.parent_id.as_ref().and_then(|id| self.pages.get(id))
    }

    /// Returns a copy with the given labels added, as a cache would after a
    /// successful mutation batch. Requests for unknown pages are ignored.
    #[must_use]
    pub fn with_applied(&self, applied: &[ApplicationRequest]) -> Self {
        let mut next = self.clone();
        for request in applied {
            if let Some(page) = next.pages.get_mut(&request.page_id) {
                page.labels.insert(request.label.clone());
            }
        }
        next
    }
}
