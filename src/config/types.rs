use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub snapshot: SnapshotConfig,
    #[serde(default)]
    pub selection: SelectionConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Marker label that turns a page into a cluster root.
    #[serde(default = "default_cluster_label")]
    pub cluster_label: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            cluster_label: default_cluster_label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotConfig {
    #[serde(default = "default_snapshot_dir")]
    pub dir: PathBuf,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            dir: default_snapshot_dir(),
        }
    }
}

/// Front-end selection defaults. The engine itself never reads these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionConfig {
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            min_confidence: default_min_confidence(),
        }
    }
}

fn default_cluster_label() -> String { "directory-pages".to_string() }
fn default_snapshot_dir() -> PathBuf { PathBuf::from("snapshots") }
const fn default_min_confidence() -> f64 { 0.7 }
