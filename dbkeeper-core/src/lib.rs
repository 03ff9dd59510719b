//! Core library for dbkeeper.
//!
//! dbkeeper backs up, queries, and merges MySQL databases by shelling out
//! to the `mysqldump` and `mysql` binaries named in its configuration. This
//! crate holds everything except the CLI surface:
//!
//! - typed configuration ([`config`])
//! - command construction and synchronous execution ([`invoke`])
//! - in-place rewriting of generated SQL ([`rewrite`])
//! - the dump-all / run-queries / merge operations ([`ops`])
//! - per-step outcome reporting ([`report`])
//!
//! Everything is synchronous and sequential: one subprocess at a time, each
//! blocking until it exits. Credentials travel on subprocess command lines
//! by design; log output masks them, preview output does not.

pub mod config;
pub mod error;
pub mod invoke;
pub mod logging;
pub mod ops;
pub mod report;
pub mod rewrite;

// Re-export commonly used types
pub use config::{Config, Connection, MergeTarget};
pub use error::{DbKeeperError, Result};
pub use invoke::{DumpCommand, ExecCommand, Invocation};
pub use logging::init_logging;
pub use ops::{DumpAllOptions, dump_all, merge, run_queries};
pub use report::{Operation, OperationReport, StepFailure, StepOutcome};
