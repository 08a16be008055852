// src/cluster/partition.rs
//! Splits a snapshot into disjoint clusters.
//!
//! Every page carrying the marker label is a root. Every other page walks
//! its parent chain and joins the first root it meets. Chains that end
//! (top-level page, or parent outside the snapshot) leave the page
//! unclustered.

use super::Cluster;
use crate::error::{Malformation, Result, ScoutError};
use crate::snapshot::Snapshot;
use crate::types::{Page, PageId};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, info};

/// Result of partitioning one snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    /// Ascending by root id.
    pub clusters: Vec<Cluster>,
    /// Non-root pages with no marked ancestor, ascending by id.
    pub unclustered: Vec<PageId>,
}

impl Partition {
    #[must_use]
    pub fn cluster(&self, root_id: &str) -> Option<&Cluster> {
        self.clusters.iter().find(|c| c.root.id.as_str() == root_id)
    }

    /// Finds the cluster a page is a member of.
    #[must_use]
    pub fn cluster_of(&self, page_id: &str) -> Option<&Cluster> {
        self.clusters.iter().find(|c| c.contains(page_id))
    }
}

/// Partitions `snapshot` into clusters rooted at pages labelled `marker`.
///
/// # Errors
/// Returns `MalformedSnapshot` if parent links contain a cycle, including
/// cycles that pass through a root.
pub fn partition(snapshot: &Snapshot, marker: &str) -> Result<Partition> {
    ensure_acyclic(snapshot)?;

    let roots: HashSet<&PageId> = snapshot
        .pages()
        .filter(|p| p.has_label(marker))
        .map(|p| &p.id)
        .collect();

    let mut resolver = RootResolver {
        snapshot,
        roots: &roots,
        memo: HashMap::new(),
    };

    let mut members: BTreeMap<&PageId, Vec<Page>> =
        roots.iter().map(|r| (*r, Vec::new())).collect();
    let mut unclustered = Vec::new();

    for page in snapshot.pages() {
        if roots.contains(&page.id) {
            continue;
        }
        match resolver.nearest_root(page)? {
            Some(root) => members.entry(root).or_default().push(page.clone()),
            None => unclustered.push(page.id.clone()),
        }
    }

    let clusters: Vec<Cluster> = members
        .into_iter()
        .filter_map(|(root_id, members)| {
            snapshot.get(root_id.as_str()).map(|root| Cluster {
                root: root.clone(),
                members,
            })
        })
        .collect();

    for cluster in &clusters {
        debug!(root = %cluster.root.id, members = cluster.len(), "cluster");
    }
    info!(
        space = snapshot.space(),
        clusters = clusters.len(),
        clustered = clusters.iter().map(Cluster::len).sum::<usize>(),
        unclustered = unclustered.len(),
        "partitioned snapshot"
    );

    Ok(Partition {
        clusters,
        unclustered,
    })
}

/// Walks parent chains, caching the answer for every page it passes.
struct RootResolver<'a> {
    snapshot: &'a Snapshot,
    roots: &'a HashSet<&'a PageId>,
    memo: HashMap<&'a PageId, Option<&'a PageId>>,
}

impl<'a> RootResolver<'a> {
    fn nearest_root(&mut self, page: &'a Page) -> Result<Option<&'a PageId>> {
        let mut trail: Vec<&'a PageId> = vec![&page.id];
        let mut visited: HashSet<&'a PageId> = HashSet::from([&page.id]);
        let mut current = page;

        let found = loop {
            let Some(parent_id) = current.parent_id.as_ref() else {
                break None;
            };
            let Some(parent) = self.snapshot.get(parent_id.as_str()) else {
                debug!(page = %current.id, parent = %parent_id, "parent outside snapshot");
                break None;
            };
            if self.roots.contains(&parent.id) {
                break Some(&parent.id);
            }
            if let Some(known) = self.memo.get(&parent.id) {
                break *known;
            }
            if !visited.insert(&parent.id) {
                return Err(cycle_error(&trail, &parent.id));
            }
            trail.push(&parent.id);
            current = parent;
        };

        for id in trail {
            self.memo.insert(id, found);
        }
        Ok(found)
    }
}

/// Rejects any parent cycle in the snapshot, whether or not it touches a root.
fn ensure_acyclic(snapshot: &Snapshot) -> Result<()> {
    let mut settled: HashSet<&PageId> = HashSet::new();

    for start in snapshot.pages() {
        let mut trail: Vec<&PageId> = Vec::new();
        let mut on_trail: HashSet<&PageId> = HashSet::new();
        let mut current = Some(start);

        while let Some(page) = current {
            if settled.contains(&page.id) {
                break;
            }
            if !on_trail.insert(&page.id) {
                return Err(cycle_error(&trail, &page.id));
            }
            trail.push(&page.id);
            current = snapshot.parent_of(page);
        }

        settled.extend(trail);
    }

    Ok(())
}

fn cycle_error(trail: &[&PageId], repeated: &PageId) -> ScoutError {
    let start = trail.iter().position(|id| *id == repeated).unwrap_or(0);
    let mut path: Vec<String> = trail.iter().skip(start).map(ToString::to_string).collect();
    path.push(repeated.to_string());
    ScoutError::malformed(repeated.as_str(), Malformation::ParentCycle { path })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKER: &str = "directory-pages";

    fn snap(pages: Vec<Page>) -> Snapshot {
        Snapshot::new("TEST", pages).unwrap()
    }

    fn ids(pages: &[Page]) -> Vec<&str> {
        pages.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_nearest_root_wins() {
        let s = snap(vec![
            Page::new("a", "Outer").with_labels([MARKER]),
            Page::new("b", "Section").with_parent("a"),
            Page::new("c", "Inner").with_parent("b").with_labels([MARKER]),
            Page::new("d", "Leaf").with_parent("c"),
            Page::new("e", "Deep leaf").with_parent("d"),
        ]);
        let part = partition(&s, MARKER).unwrap();

        assert_eq!(part.clusters.len(), 2);
        assert_eq!(ids(&part.cluster("a").unwrap().members), vec!["b"]);
        assert_eq!(ids(&part.cluster("c").unwrap().members), vec!["d", "e"]);
        assert!(part.unclustered.is_empty());
    }

    #[test]
    fn test_root_never_member() {
        let s = snap(vec![
            Page::new("a", "").with_labels([MARKER]),
            Page::new("b", "").with_parent("a").with_labels([MARKER]),
        ]);
        let part = partition(&s, MARKER).unwrap();
        assert!(part.clusters.iter().all(Cluster::is_empty));
        assert_eq!(part.clusters.len(), 2);
    }

    #[test]
    fn test_degenerate_root_without_children() {
        let s = snap(vec![Page::new("solo", "").with_labels([MARKER])]);
        let part = partition(&s, MARKER).unwrap();
        assert_eq!(part.clusters.len(), 1);
        assert!(part.clusters[0].is_empty());
    }

    #[test]
    fn test_unclustered_top_level_and_dangling() {
        let s = snap(vec![
            Page::new("a", "").with_labels([MARKER]),
            Page::new("b", "").with_parent("a"),
            Page::new("top", ""),
            Page::new("under-top", "").with_parent("top"),
            Page::new("dangling", "").with_parent("elsewhere"),
        ]);
        let part = partition(&s, MARKER).unwrap();
        assert_eq!(
            part.unclustered.iter().map(PageId::as_str).collect::<Vec<_>>(),
            vec!["dangling", "top", "under-top"]
        );
        assert_eq!(part.cluster_of("b").map(|c| c.root.id.as_str()), Some("a"));
        assert!(part.cluster_of("top").is_none());
    }

    #[test]
    fn test_cycle_among_members() {
        let s = snap(vec![
            Page::new("x", "").with_parent("y"),
            Page::new("y", "").with_parent("z"),
            Page::new("z", "").with_parent("x"),
        ]);
        match partition(&s, MARKER) {
            Err(ScoutError::MalformedSnapshot {
                reason: Malformation::ParentCycle { path },
                ..
            }) => {
                assert_eq!(path.first(), path.last());
                assert_eq!(path.len(), 4);
            }
            other => panic!("expected cycle, got {other:?}"),
        }
    }

    #[test]
    fn test_cycle_through_root_rejected() {
        let s = snap(vec![
            Page::new("r", "").with_parent("c").with_labels([MARKER]),
            Page::new("c", "").with_parent("r"),
        ]);
        assert!(matches!(
            partition(&s, MARKER),
            Err(ScoutError::MalformedSnapshot { .. })
        ));
    }

    #[test]
    fn test_self_parent_rejected() {
        let s = snap(vec![Page::new("me", "").with_parent("me")]);
        match partition(&s, MARKER) {
            Err(ScoutError::MalformedSnapshot {
                page_id,
                reason: Malformation::ParentCycle { path },
            }) => {
                assert_eq!(page_id, "me");
                assert_eq!(path, vec!["me".to_string(), "me".to_string()]);
            }
            other => panic!("expected cycle, got {other:?}"),
        }
    }

    #[test]
    fn test_members_sorted_regardless_of_tree_shape() {
        let s = snap(vec![
            Page::new("r", "").with_labels([MARKER]),
            Page::new("9", "").with_parent("r"),
            Page::new("1", "").with_parent("9"),
            Page::new("5", "").with_parent("r"),
        ]);
        let part = partition(&s, MARKER).unwrap();
        assert_eq!(ids(&part.clusters[0].members), vec!["1", "5", "9"]);
    }
}
