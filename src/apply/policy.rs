// src/apply/policy.rs
use crate::analysis::Analysis;
use crate::error::{Result, ScoutError, SelectionProblem};
use crate::types::{ApplicationRequest, SelectedSuggestion};
use serde::Serialize;
use std::collections::HashSet;
use tracing::warn;

/// Validated output of a selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ApplicationPlan {
    /// Mutations to submit, in selection order, without duplicates.
    pub requests: Vec<ApplicationRequest>,
    /// Selected pairs the page already carries. Not re-requested.
    pub already_present: Vec<ApplicationRequest>,
}

impl ApplicationPlan {
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.requests.is_empty()
    }
}

/// Validates a selection against the analysis it was made from.
///
/// Confidence is carried through untouched; thresholds are the caller's
/// business.
///
/// # Errors
/// Returns `InvalidSelection` if the selection is empty, names a page that
/// is not a cluster member in `analysis`, has a blank label, or asks for the
/// marker label. Nothing is planned when any item fails.
pub fn plan_application(
    selection: &[SelectedSuggestion],
    analysis: &Analysis,
) -> Result<ApplicationPlan> {
    if selection.is_empty() {
        return Err(ScoutError::InvalidSelection(SelectionProblem::Empty));
    }

    let mut plan = ApplicationPlan::default();
    let mut seen = HashSet::new();

    for item in selection {
        let page = analysis.member(item.page_id.as_str()).ok_or_else(|| {
            ScoutError::InvalidSelection(SelectionProblem::UnknownPage {
                page_id: item.page_id.to_string(),
            })
        })?;

        if item.label.trim().is_empty() {
            return Err(ScoutError::InvalidSelection(SelectionProblem::BlankLabel {
                page_id: item.page_id.to_string(),
            }));
        }

        if item.label == analysis.marker {
            return Err(ScoutError::InvalidSelection(SelectionProblem::MarkerLabel {
                page_id: item.page_id.to_string(),
                label: item.label.clone(),
            }));
        }

        if !seen.insert((&item.page_id, item.label.as_str())) {
            continue;
        }

        let request = ApplicationRequest {
            page_id: item.page_id.clone(),
            label: item.label.clone(),
            confidence: item.confidence,
        };

        if page.has_label(&item.label) {
            warn!(page = %item.page_id, label = %item.label, "label already present, skipping");
            plan.already_present.push(request);
        } else {
            plan.requests.push(request);
        }
    }

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::snapshot::Snapshot;
    use crate::types::Page;

    fn analysis() -> Analysis {
        let snap = Snapshot::new(
            "S",
            vec![
                Page::new("r", "").with_labels(["directory-pages"]),
                Page::new("a", "").with_parent("r").with_labels(["billing"]),
                Page::new("b", "").with_parent("r"),
                Page::new("loose", ""),
            ],
        )
        .unwrap();
        analyze(&snap, "directory-pages").unwrap()
    }

    fn pick(page: &str, label: &str) -> SelectedSuggestion {
        SelectedSuggestion {
            page_id: page.into(),
            label: label.into(),
            confidence: Some(0.5),
        }
    }

    #[test]
    fn test_duplicates_collapsed_in_order() {
        let plan = plan_application(
            &[pick("b", "billing"), pick("b", "api"), pick("b", "billing")],
            &analysis(),
        )
        .unwrap();
        let labels: Vec<_> = plan.requests.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["billing", "api"]);
        assert_eq!(plan.requests[0].confidence, Some(0.5));
    }

    #[test]
    fn test_already_present_not_requested() {
        let plan = plan_application(&[pick("a", "billing")], &analysis()).unwrap();
        assert!(plan.is_noop());
        assert_eq!(plan.already_present.len(), 1);
    }

    #[test]
    fn test_root_and_unclustered_rejected() {
        for page in ["r", "loose", "ghost"] {
            let err = plan_application(&[pick("b", "billing"), pick(page, "x")], &analysis())
                .unwrap_err();
            assert!(
                matches!(
                    err,
                    ScoutError::InvalidSelection(SelectionProblem::UnknownPage { ref page_id }) if page_id == page
                ),
                "{page}: {err}"
            );
        }
    }

    #[test]
    fn test_marker_label_rejected_before_anything_is_planned() {
        let err = plan_application(
            &[pick("b", "billing"), pick("b", "directory-pages")],
            &analysis(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ScoutError::InvalidSelection(SelectionProblem::MarkerLabel { ref page_id, ref label })
                if page_id == "b" && label == "directory-pages"
        ));
    }

    #[test]
    fn test_blank_label_rejected() {
        let err = plan_application(&[pick("b", "  ")], &analysis()).unwrap_err();
        assert!(matches!(
            err,
            ScoutError::InvalidSelection(SelectionProblem::BlankLabel { .. })
        ));
    }
}
