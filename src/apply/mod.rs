// src/apply/mod.rs
//! Turning a human selection into label mutations.
//!
//! [`policy`] validates and deduplicates without touching anything outside
//! the process. [`submit`] is the caller-side half that hands each request
//! to a [`MutationSink`] and records per-request outcomes.

pub mod policy;
pub mod submit;

pub use policy::{plan_application, ApplicationPlan};
pub use submit::{submit, BatchOutcome, FailedRequest, JsonlSink, MutationFailure, MutationSink};
