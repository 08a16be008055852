// src/suggest.rs
//! Missing-label inference.
//!
//! For each member page, every label the cluster already uses but the page
//! lacks becomes a [`Suggestion`]. Confidence is the share of the cluster's
//! members that carry the label:
//!
//! ```text
//! confidence(L) = count(L) / |members|
//! ```
//!
//! The denominator counts the page being scored too. Per page, suggestions
//! come out by descending confidence, then ascending label.

use crate::cluster::{Cluster, LabelVocabulary};
use crate::types::{Page, Suggestion};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy)]
pub struct SuggestionEngine<'m> {
    marker: &'m str,
}

impl<'m> SuggestionEngine<'m> {
    /// `marker` is never suggested: content pages must not become roots.
    #[must_use]
    pub fn new(marker: &'m str) -> Self {
        Self { marker }
    }

    /// Lazily yields suggestions for every member of `cluster`, page by page
    /// in member order.
    pub fn suggest<'a>(
        &self,
        cluster: &'a Cluster,
        vocabulary: &'a LabelVocabulary,
    ) -> impl Iterator<Item = Suggestion> + 'a
    where
        'm: 'a,
    {
        let engine: SuggestionEngine<'a> = SuggestionEngine::new(self.marker);
        let member_count = cluster.len();
        cluster
            .members
            .iter()
            .flat_map(move |page| engine.suggest_for_page(page, vocabulary, member_count))
    }

    /// Ranked suggestions for one page of a cluster with `member_count`
    /// members.
    #[must_use]
    pub fn suggest_for_page(
        &self,
        page: &Page,
        vocabulary: &LabelVocabulary,
        member_count: usize,
    ) -> Vec<Suggestion> {
        if member_count == 0 {
            return Vec::new();
        }

        let mut out: Vec<Suggestion> = vocabulary
            .iter()
            .filter(|(label, _)| *label != self.marker && !page.has_label(label))
            .map(|(label, count)| Suggestion {
                page_id: page.id.clone(),
                label: label.to_string(),
                confidence: confidence(count, member_count),
            })
            .collect();

        out.sort_by(rank);
        out
    }
}

#[allow(clippy::cast_precision_loss)]
fn confidence(count: usize, member_count: usize) -> f64 {
    (count as f64 / member_count as f64).clamp(0.0, 1.0)
}

fn rank(a: &Suggestion, b: &Suggestion) -> Ordering {
    b.confidence
        .total_cmp(&a.confidence)
        .then_with(|| a.label.cmp(&b.label))
}
