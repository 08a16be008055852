// src/types.rs
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;

/// Opaque page identifier as issued by the wiki.
///
/// Ordering is lexicographic on the raw string, which is what every
/// deterministic listing in this crate sorts by.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(String);

impl PageId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PageId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PageId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for PageId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A wiki page as seen in one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    #[serde(default)]
    pub parent_id: Option<PageId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub labels: BTreeSet<String>,
}

impl Page {
    #[must_use]
    pub fn new(id: impl Into<PageId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent_id: None,
            title: title.into(),
            labels: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<PageId>) -> Self {
        self.parent_id = Some(parent.into());
        self
    }

    #[must_use]
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels.extend(labels.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.contains(label)
    }
}

/// A candidate label for a page, scored by how common it is in the cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub page_id: PageId,
    pub label: String,
    pub confidence: f64,
}

/// One (page, label) pair picked by a human from the suggestions.
///
/// `confidence` is carried through for audit only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedSuggestion {
    pub page_id: PageId,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl From<&Suggestion> for SelectedSuggestion {
    fn from(s: &Suggestion) -> Self {
        Self {
            page_id: s.page_id.clone(),
            label: s.label.clone(),
            confidence: Some(s.confidence),
        }
    }
}

/// A validated "add label to page" mutation, ready for a [`crate::apply::MutationSink`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRequest {
    pub page_id: PageId,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}
