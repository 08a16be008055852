// src/cluster/vocabulary.rs
use super::Cluster;
use crate::snapshot::Snapshot;
use crate::types::Page;
use serde::Serialize;
use std::collections::BTreeMap;

/// Label -> number of pages carrying it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LabelVocabulary {
    counts: BTreeMap<String, usize>,
}

impl LabelVocabulary {
    /// Counts labels over a cluster's members. The root is not a member and
    /// is never counted.
    #[must_use]
    pub fn from_cluster(cluster: &Cluster) -> Self {
        Self::from_pages(&cluster.members)
    }

    #[must_use]
    pub fn from_pages<'a, I>(pages: I) -> Self
    where
        I: IntoIterator<Item = &'a Page>,
    {
        let mut counts = BTreeMap::new();
        for page in pages {
            for label in &page.labels {
                *counts.entry(label.clone()).or_insert(0) += 1;
            }
        }
        Self { counts }
    }

    #[must_use]
    pub fn count(&self, label: &str) -> usize {
        self.counts.get(label).copied().unwrap_or(0)
    }

    /// Labels in ascending order with their counts.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(l, c)| (l.as_str(), *c))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Label usage across every page of a space, roots included.
#[must_use]
pub fn space_vocabulary(snapshot: &Snapshot) -> LabelVocabulary {
    LabelVocabulary::from_pages(snapshot.pages())
}
