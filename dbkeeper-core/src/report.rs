//! Per-operation outcome reporting.
//!
//! Each operation iterates its connections and records every step as a
//! success or a failure instead of swallowing errors, so callers and tests
//! can assert on the full outcome set rather than only on side effects.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;
use tracing::error;

use crate::error::DbKeeperError;

/// The three top-level operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    /// Back up every configured database
    DumpAll,
    /// Export per-connection query results
    RunQueries,
    /// Merge every configured database into the target database
    Merge,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::DumpAll => "dump-all",
            Self::RunQueries => "run-queries",
            Self::Merge => "merge",
        };
        f.write_str(name)
    }
}

/// One completed step of an operation.
#[derive(Debug, Clone, Serialize)]
pub struct StepOutcome {
    /// Database the step operated on
    pub database: String,
    /// Destination the step produced (file path, or the previewed command)
    pub destination: String,
}

/// One failed step of an operation.
#[derive(Debug, Clone, Serialize)]
pub struct StepFailure {
    /// Database the step operated on
    pub database: String,
    /// What the step was doing when it failed
    pub context: String,
    /// Display text of the underlying error
    pub error: String,
}

/// Outcome of one operation over the selected connections.
#[derive(Debug, Serialize)]
pub struct OperationReport {
    /// Which operation ran
    pub operation: Operation,
    /// When the operation started
    pub started_at: DateTime<Utc>,
    /// Total elapsed time in milliseconds
    pub duration_ms: u64,
    /// Steps that completed
    pub completed: Vec<StepOutcome>,
    /// Steps that failed; the operation continued past each of these
    pub failures: Vec<StepFailure>,
}

impl OperationReport {
    /// Creates an empty report stamped with the current time.
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            started_at: Utc::now(),
            duration_ms: 0,
            completed: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Records a completed step.
    pub fn record_success(&mut self, database: impl Into<String>, destination: impl Into<String>) {
        self.completed.push(StepOutcome {
            database: database.into(),
            destination: destination.into(),
        });
    }

    /// Records a failed step and logs it. The operation keeps going.
    pub fn record_failure(
        &mut self,
        database: impl Into<String>,
        context: impl Into<String>,
        source: &DbKeeperError,
    ) {
        let database = database.into();
        let context = context.into();
        error!("{}: {} ({}): {}", self.operation, context, database, source);
        self.failures.push(StepFailure {
            database,
            context,
            error: source.to_string(),
        });
    }

    /// Stamps the elapsed time and returns the finished report.
    pub fn finished(mut self, started: Instant) -> Self {
        self.duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// True when no step failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
