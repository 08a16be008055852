// src/apply/submit.rs
use super::ApplicationPlan;
use crate::types::ApplicationRequest;
use serde::Serialize;
use std::io::Write;
use thiserror::Error;
use tracing::{debug, warn};

/// A single mutation the wiki (or whatever stands in for it) refused.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct MutationFailure {
    pub message: String,
}

impl MutationFailure {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Outbound side: something that can add one label to one page.
pub trait MutationSink {
    /// # Errors
    /// Returns the failure for this request only.
    fn apply(&mut self, request: &ApplicationRequest) -> Result<(), MutationFailure>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedRequest {
    pub request: ApplicationRequest,
    pub error: String,
}

/// Per-request results of one submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchOutcome {
    pub applied: Vec<ApplicationRequest>,
    pub failed: Vec<FailedRequest>,
}

impl BatchOutcome {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Sends every planned request to `sink`, one at a time. A failure is
/// recorded against its request and the batch carries on.
pub fn submit(plan: &ApplicationPlan, sink: &mut dyn MutationSink) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();

    for request in &plan.requests {
        match sink.apply(request) {
            Ok(()) => {
                debug!(page = %request.page_id, label = %request.label, "applied");
                outcome.applied.push(request.clone());
            }
            Err(e) => {
                warn!(page = %request.page_id, label = %request.label, error = %e, "mutation failed");
                outcome.failed.push(FailedRequest {
                    request: request.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    outcome
}

/// Writes each request as one JSON line for an external mutation tool.
#[derive(Debug)]
pub struct JsonlSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonlSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> MutationSink for JsonlSink<W> {
    fn apply(&mut self, request: &ApplicationRequest) -> Result<(), MutationFailure> {
        let line =
            serde_json::to_string(request).map_err(|e| MutationFailure::new(e.to_string()))?;
        writeln!(self.writer, "{line}")
            .and_then(|()| self.writer.flush())
            .map_err(|e| MutationFailure::new(e.to_string()))
    }
}
