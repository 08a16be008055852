// src/cli/handlers.rs
use super::args::Cli;
use super::select::{select_above, to_selection};
use crate::analysis::{analyze, Analysis};
use crate::apply::{plan_application, submit, ApplicationPlan, BatchOutcome, JsonlSink};
use crate::config::Config;
use crate::exit::ScoutExit;
use crate::reporting;
use crate::snapshot::{DirectoryProvider, SnapshotProvider};
use crate::types::SelectedSuggestion;
use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Resolved settings shared by every command.
pub struct Session {
    pub config: Config,
    pub provider: DirectoryProvider,
}

impl Session {
    /// Loads `labelscout.toml` and applies command-line overrides.
    ///
    /// # Errors
    /// Returns error if the config file is invalid or an override fails
    /// validation.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut config = Config::load()?;
        if let Some(marker) = &cli.marker {
            config.analysis.cluster_label.clone_from(marker);
        }
        if let Some(dir) = &cli.snapshots {
            config.snapshot.dir.clone_from(dir);
        }
        config.validate()?;

        let provider = DirectoryProvider::new(config.snapshot.dir.clone());
        Ok(Self { config, provider })
    }

    fn analyze(&self, space: &str) -> Result<Analysis> {
        let snapshot = self.provider.fetch_snapshot(space)?;
        let analysis = analyze(&snapshot, &self.config.analysis.cluster_label)
            .with_context(|| format!("Failed to analyze space {space}"))?;
        Ok(analysis)
    }
}

/// Arguments for the apply command.
#[derive(Debug, Clone, Default)]
pub struct ApplyArgs {
    pub space: String,
    pub selection: PathBuf,
    pub out: Option<PathBuf>,
    pub dry_run: bool,
    pub update_snapshot: bool,
    pub json: bool,
}

/// Handles the spaces command.
///
/// # Errors
/// Returns error if the snapshot directory cannot be listed.
pub fn handle_spaces(session: &Session, json: bool) -> Result<ScoutExit> {
    let spaces = session.provider.list_spaces()?;
    if json {
        print_json(&spaces)?;
    } else if spaces.is_empty() {
        println!("No snapshots in {}", session.provider.root().display());
    } else {
        for space in spaces {
            println!("{space}");
        }
    }
    Ok(ScoutExit::Success)
}

/// Handles the clusters command.
///
/// # Errors
/// Returns error if the snapshot is unavailable or malformed.
pub fn handle_clusters(session: &Session, space: &str, json: bool) -> Result<ScoutExit> {
    let analysis = session.analyze(space)?;
    if json {
        print_json(&analysis)?;
    } else {
        print!("{}", reporting::render_clusters(&analysis));
    }
    Ok(ScoutExit::Success)
}

/// Handles the suggest command. `threshold` of `None` shows everything.
///
/// # Errors
/// Returns error if the snapshot is unavailable or malformed, or the
/// requested cluster does not exist.
pub fn handle_suggest(
    session: &Session,
    space: &str,
    cluster: Option<&str>,
    threshold: Option<f64>,
    json: bool,
) -> Result<ScoutExit> {
    let analysis = session.analyze(space)?;

    let pool: Vec<_> = match cluster {
        Some(root) => analysis
            .cluster(root)
            .ok_or_else(|| anyhow!("No cluster rooted at page {root} in {space}"))?
            .suggestions
            .iter()
            .collect(),
        None => analysis.suggestions().collect(),
    };
    let shown = select_above(pool, threshold.unwrap_or(0.0));

    if json {
        print_json(&to_selection(&shown))?;
    } else {
        print!("{}", reporting::render_suggestions(&analysis, &shown));
    }
    Ok(ScoutExit::Success)
}

#[derive(Serialize)]
struct ApplyReport<'a> {
    dry_run: bool,
    plan: &'a ApplicationPlan,
    outcome: &'a BatchOutcome,
}

/// Handles the apply command.
///
/// # Errors
/// Returns error if the selection is unreadable or invalid, or the snapshot
/// cannot be analyzed. Individual mutation failures are reported, not
/// returned.
pub fn handle_apply(session: &Session, args: &ApplyArgs) -> Result<ScoutExit> {
    let selection = read_selection(&args.selection)?;
    let snapshot = session.provider.fetch_snapshot(&args.space)?;
    let analysis = analyze(&snapshot, &session.config.analysis.cluster_label)?;

    let plan = plan_application(&selection, &analysis)
        .with_context(|| format!("Rejected selection {}", args.selection.display()))?;
    info!(
        requests = plan.requests.len(),
        already_present = plan.already_present.len(),
        "selection validated"
    );

    let outcome = if args.dry_run {
        BatchOutcome {
            applied: plan.requests.clone(),
            failed: Vec::new(),
        }
    } else {
        emit(&plan, args.out.as_deref())?
    };

    if args.update_snapshot && !outcome.applied.is_empty() {
        session
            .provider
            .store(&snapshot.with_applied(&outcome.applied))
            .context("Failed to update stored snapshot")?;
    }

    // Mutations own stdout unless they were sent to a file.
    let report_to_stdout = args.dry_run || args.out.is_some();
    let rendered = if args.json {
        serde_json::to_string_pretty(&ApplyReport {
            dry_run: args.dry_run,
            plan: &plan,
            outcome: &outcome,
        })? + "\n"
    } else {
        reporting::render_outcome(&plan, &outcome, args.dry_run)
    };
    if report_to_stdout {
        print!("{rendered}");
    } else {
        eprint!("{rendered}");
    }

    if outcome.is_clean() {
        Ok(ScoutExit::Success)
    } else {
        Ok(ScoutExit::MutationFailed)
    }
}

fn read_selection(path: &Path) -> Result<Vec<SelectedSuggestion>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read selection {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid selection JSON in {}", path.display()))
}

fn emit(plan: &ApplicationPlan, out: Option<&Path>) -> Result<BatchOutcome> {
    match out {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut sink = JsonlSink::new(BufWriter::new(file));
            Ok(submit(plan, &mut sink))
        }
        None => {
            let mut sink = JsonlSink::new(io::stdout().lock());
            Ok(submit(plan, &mut sink))
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
