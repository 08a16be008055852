//! Directory-cluster analysis and label suggestions for wiki spaces.
//!
//! A space snapshot is split into clusters rooted at pages carrying a marker
//! label; each member page is then offered the labels its cluster already
//! uses but it lacks. Selections made from those suggestions are validated
//! into label mutations for an external sink.

pub mod analysis;
pub mod apply;
pub mod cli;
pub mod cluster;
pub mod config;
pub mod error;
pub mod exit;
pub mod reporting;
pub mod snapshot;
pub mod suggest;
pub mod types;

pub use analysis::{analyze, Analysis, ClusterReport};
pub use apply::{plan_application, submit, ApplicationPlan, BatchOutcome, MutationSink};
pub use cluster::{partition, Cluster, LabelVocabulary, Partition};
pub use error::{Result, ScoutError};
pub use snapshot::{Snapshot, SnapshotProvider};
pub use suggest::SuggestionEngine;
pub use types::{ApplicationRequest, Page, PageId, SelectedSuggestion, Suggestion};
