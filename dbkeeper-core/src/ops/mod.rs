//! The three top-level operations: dump-all, run-queries, and merge.
//!
//! Each operation creates the output directories it needs, walks the
//! selected connections strictly in configuration order, and records
//! per-step outcomes in an [`crate::report::OperationReport`]. A failing
//! step never aborts the iteration; only failing to create an output
//! directory does.

mod dump_all;
mod merge;
mod run_queries;

pub use dump_all::{DumpAllOptions, dump_all};
pub use merge::merge;
pub use run_queries::run_queries;

use std::fs;
use std::path::Path;

use crate::error::{DbKeeperError, Result};

pub(crate) fn create_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .map_err(|e| DbKeeperError::io(format!("failed to create directory {}", dir.display()), e))
}
