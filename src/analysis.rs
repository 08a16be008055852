// src/analysis.rs
//! One-shot pipeline: partition, aggregate, suggest.

use crate::cluster::{partition, space_vocabulary, Cluster, LabelVocabulary};
use crate::error::Result;
use crate::snapshot::Snapshot;
use crate::suggest::SuggestionEngine;
use crate::types::{Page, PageId, Suggestion};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterReport {
    pub cluster: Cluster,
    pub vocabulary: LabelVocabulary,
    pub suggestions: Vec<Suggestion>,
}

/// Everything derived from one snapshot. Recomputed per request, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub space: String,
    pub marker: String,
    /// Ascending by root id.
    pub clusters: Vec<ClusterReport>,
    pub unclustered: Vec<PageId>,
    /// Label usage over every page of the space, roots included.
    pub space_labels: LabelVocabulary,
}

impl Analysis {
    #[must_use]
    pub fn cluster(&self, root_id: &str) -> Option<&ClusterReport> {
        self.clusters
            .iter()
            .find(|r| r.cluster.root.id.as_str() == root_id)
    }

    /// Looks a page up among cluster members. Roots and unclustered pages
    /// are not members.
    #[must_use]
    pub fn member(&self, page_id: &str) -> Option<&Page> {
        self.clusters
            .iter()
            .find_map(|r| r.cluster.member(page_id))
    }

    #[must_use]
    pub fn contains_member(&self, page_id: &str) -> bool {
        self.member(page_id).is_some()
    }

    /// All suggestions, cluster by cluster.
    pub fn suggestions(&self) -> impl Iterator<Item = &Suggestion> {
        self.clusters.iter().flat_map(|r| r.suggestions.iter())
    }

    #[must_use]
    pub fn member_count(&self) -> usize {
        self.clusters.iter().map(|r| r.cluster.len()).sum()
    }
}

/// Runs the full analysis for one snapshot.
///
/// # Errors
/// Returns `MalformedSnapshot` if the parent links are cyclic. No partial
/// result is produced in that case.
pub fn analyze(snapshot: &Snapshot, marker: &str) -> Result<Analysis> {
    let partition = partition(snapshot, marker)?;
    let engine = SuggestionEngine::new(marker);

    let clusters = partition
        .clusters
        .into_iter()
        .map(|cluster| {
            let vocabulary = LabelVocabulary::from_cluster(&cluster);
            let suggestions = engine.suggest(&cluster, &vocabulary).collect();
            ClusterReport {
                cluster,
                vocabulary,
                suggestions,
            }
        })
        .collect();

    Ok(Analysis {
        space: snapshot.space().to_string(),
        marker: marker.to_string(),
        clusters,
        unclustered: partition.unclustered,
        space_labels: space_vocabulary(snapshot),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_lookup_excludes_roots() {
        let s = Snapshot::new(
            "S",
            vec![
                Page::new("r", "").with_labels(["directory-pages"]),
                Page::new("m", "").with_parent("r"),
                Page::new("u", ""),
            ],
        )
        .unwrap();
        let a = analyze(&s, "directory-pages").unwrap();
        assert!(a.contains_member("m"));
        assert!(!a.contains_member("r"));
        assert!(!a.contains_member("u"));
        assert_eq!(a.member_count(), 1);
        assert_eq!(a.unclustered, vec![PageId::from("u")]);
        assert_eq!(a.space_labels.count("directory-pages"), 1);
    }
}
