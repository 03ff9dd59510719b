//! In-place text rewriting of generated SQL files.
//!
//! Both merge phases edit dump output before feeding it back to the execute
//! binary: the schema file has the template database name renamed to the
//! target, and data files have `USE` statements commented out so the target
//! database comes from the `--database` flag instead.

use std::fs;
use std::path::Path;

use crate::error::{DbKeeperError, Result};

/// Replaces every occurrence of `from` in the file at `path` with `to`.
///
/// Returns the number of occurrences replaced. The file is left untouched
/// when there is nothing to replace.
///
/// # Errors
/// Returns an error when the file cannot be read or written.
pub fn replace_all(path: &Path, from: &str, to: &str) -> Result<usize> {
    let contents = fs::read_to_string(path)
        .map_err(|e| DbKeeperError::io(format!("failed to read {}", path.display()), e))?;

    let count = contents.matches(from).count();
    if count == 0 {
        return Ok(0);
    }

    let rewritten = contents.replace(from, to);
    fs::write(path, rewritten)
        .map_err(|e| DbKeeperError::io(format!("failed to write {}", path.display()), e))?;

    Ok(count)
}
