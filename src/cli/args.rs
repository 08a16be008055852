use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "labelscout",
    version,
    about = "Find directory clusters in a wiki space and suggest the labels their pages are missing"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
    /// Marker label for directory pages (overrides labelscout.toml)
    #[arg(long, global = true, value_name = "LABEL")]
    pub marker: Option<String>,
    /// Directory holding `<space>.json` snapshots (overrides labelscout.toml)
    #[arg(long, global = true, value_name = "DIR")]
    pub snapshots: Option<PathBuf>,
    /// Enable debug logging on stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List spaces with a stored snapshot
    Spaces {
        #[arg(long)]
        json: bool,
    },
    /// Show the clusters of a space and the labels each one uses
    Clusters {
        space: String,
        #[arg(long)]
        json: bool,
    },
    /// Suggest missing labels for cluster members
    Suggest {
        space: String,
        /// Only this cluster (root page id)
        #[arg(long, value_name = "ROOT_ID")]
        cluster: Option<String>,
        /// Lowest confidence to show (overrides labelscout.toml)
        #[arg(long, value_name = "X")]
        min_confidence: Option<f64>,
        /// Show every suggestion regardless of confidence
        #[arg(long, conflicts_with = "min_confidence")]
        all: bool,
        #[arg(long)]
        json: bool,
    },
    /// Validate a selection and emit label mutations as JSON lines
    Apply {
        space: String,
        /// JSON array of {page_id, label, confidence?}
        #[arg(long, value_name = "FILE")]
        selection: PathBuf,
        /// Write mutations here instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
        /// Validate and report without emitting mutations
        #[arg(long)]
        dry_run: bool,
        /// Record applied labels in the stored snapshot
        #[arg(long, conflicts_with = "dry_run")]
        update_snapshot: bool,
        #[arg(long)]
        json: bool,
    },
}
