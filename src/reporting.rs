//! Console output for analyses, suggestions and submissions.
//!
//! JSON output bypasses this module entirely; handlers serialize the same
//! structs with `serde_json`.

use crate::analysis::{Analysis, ClusterReport};
use crate::apply::{ApplicationPlan, BatchOutcome};
use crate::types::Suggestion;
use colored::Colorize;
use std::fmt::Write;

/// Cluster overview for one space.
#[must_use]
pub fn render_clusters(analysis: &Analysis) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} (marker: {})",
        "Space".bold(),
        analysis.space.cyan(),
        analysis.marker.yellow()
    );

    if analysis.clusters.is_empty() {
        let _ = writeln!(out, "  {}", "no pages carry the marker label".dimmed());
    }

    for report in &analysis.clusters {
        write_cluster(&mut out, report);
    }

    write_space_labels(&mut out, analysis);

    let _ = writeln!(
        out,
        "\n{} clusters, {} member pages, {} unclustered",
        analysis.clusters.len(),
        analysis.member_count(),
        analysis.unclustered.len()
    );
    out
}

fn write_space_labels(out: &mut String, analysis: &Analysis) {
    if analysis.space_labels.is_empty() {
        return;
    }
    let usage: Vec<String> = analysis
        .space_labels
        .iter()
        .map(|(label, count)| format!("{label}×{count}"))
        .collect();
    let _ = writeln!(out, "\n{} {}", "Space labels:".bold(), usage.join(", "));
}

fn write_cluster(out: &mut String, report: &ClusterReport) {
    let root = &report.cluster.root;
    let _ = writeln!(
        out,
        "\n{} {} [{}] {} members",
        "▸".blue(),
        root.title.bold(),
        root.id,
        report.cluster.len()
    );
    if report.vocabulary.is_empty() {
        let _ = writeln!(out, "    {}", "(no labels in use)".dimmed());
        return;
    }
    let vocab: Vec<String> = report
        .vocabulary
        .iter()
        .map(|(label, count)| format!("{label}×{count}"))
        .collect();
    let _ = writeln!(out, "    {}", vocab.join(", "));
}

/// Suggestions grouped by page, in the order given.
#[must_use]
pub fn render_suggestions(analysis: &Analysis, suggestions: &[&Suggestion]) -> String {
    let mut out = String::new();
    if suggestions.is_empty() {
        let _ = writeln!(out, "{}", "No suggestions.".green());
        return out;
    }

    let mut current: Option<&str> = None;
    for s in suggestions {
        if current != Some(s.page_id.as_str()) {
            let title = analysis
                .member(s.page_id.as_str())
                .map_or("", |p| p.title.as_str());
            let _ = writeln!(out, "\n{} {}", s.page_id.to_string().cyan(), title.bold());
            current = Some(s.page_id.as_str());
        }
        let _ = writeln!(
            out,
            "    {:>5.0}%  {}",
            s.confidence * 100.0,
            colour_by_confidence(&s.label, s.confidence)
        );
    }
    let _ = writeln!(out, "\n{} suggestion(s)", suggestions.len());
    out
}

fn colour_by_confidence(label: &str, confidence: f64) -> colored::ColoredString {
    if confidence >= 0.7 {
        label.green()
    } else if confidence >= 0.4 {
        label.yellow()
    } else {
        label.normal()
    }
}

/// Per-request report of a submission, successes and failures alike.
#[must_use]
pub fn render_outcome(plan: &ApplicationPlan, outcome: &BatchOutcome, dry_run: bool) -> String {
    let mut out = String::new();

    for skipped in &plan.already_present {
        let _ = writeln!(
            out,
            "{} {} already has '{}'",
            "SKIP".dimmed(),
            skipped.page_id,
            skipped.label
        );
    }

    let verb = if dry_run { "PLAN" } else { "OK" };
    for applied in &outcome.applied {
        let _ = writeln!(
            out,
            "{} {} += '{}'",
            verb.green().bold(),
            applied.page_id,
            applied.label
        );
    }
    for failed in &outcome.failed {
        let _ = writeln!(
            out,
            "{} {} += '{}': {}",
            "FAIL".red().bold(),
            failed.request.page_id,
            failed.request.label,
            failed.error
        );
    }

    let _ = writeln!(
        out,
        "{} applied, {} failed, {} skipped",
        outcome.applied.len(),
        outcome.failed.len(),
        plan.already_present.len()
    );
    out
}
