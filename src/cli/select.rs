//! Front-end selection conveniences. The engine never filters by
//! confidence; this is where a threshold gets applied.

use crate::types::{SelectedSuggestion, Suggestion};

/// Bulk-select: keeps suggestions whose confidence is at least `threshold`.
pub fn select_above<'a, I>(suggestions: I, threshold: f64) -> Vec<&'a Suggestion>
where
    I: IntoIterator<Item = &'a Suggestion>,
{
    suggestions
        .into_iter()
        .filter(|s| s.confidence >= threshold)
        .collect()
}

/// Turns displayed suggestions into a selection file payload.
#[must_use]
pub fn to_selection(suggestions: &[&Suggestion]) -> Vec<SelectedSuggestion> {
    suggestions.iter().map(|s| SelectedSuggestion::from(*s)).collect()
}
