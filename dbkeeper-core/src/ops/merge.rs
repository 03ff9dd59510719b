//! Merge of every selected database into the configured target.
//!
//! Two best-effort phases. The schema phase replays the template
//! connection's schema into the target under the target's database name.
//! The data phase replays each connection's rows with `USE` statements
//! commented out, so everything lands in the database named by the
//! `--database` flag. A failure in either phase is recorded and the
//! remaining steps still run; the target can end up partially populated.

use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

use super::create_dir;
use crate::config::{Config, Connection, MergeTarget};
use crate::error::{DbKeeperError, Result};
use crate::invoke::{DumpCommand, ExecCommand};
use crate::report::{Operation, OperationReport};
use crate::rewrite;

/// Merges every selected connection's database into the merge target.
///
/// # Errors
/// Returns an error when the merge directory cannot be created. Every other
/// failure is recorded in the report.
pub fn merge(config: &Config, connections: &[Connection], preview: bool) -> Result<OperationReport> {
    let started = Instant::now();
    let mut report = OperationReport::new(Operation::Merge);

    let merge_dir = config.merge_dir();
    create_dir(&merge_dir)?;

    let target = &config.merge_db_connection;

    match config.template_connection() {
        Some(template) => {
            info!(
                "merging databases: template {} -> target {}",
                template.database, target.database
            );
            let schema_file = merge_dir.join("schema.sql");
            match load_schema(config, template, target, &schema_file, preview) {
                Ok(()) => {
                    report.record_success(&template.database, schema_file.display().to_string());
                }
                Err(e) => report.record_failure(&template.database, "schema load failed", &e),
            }
        }
        None => {
            let error = DbKeeperError::configuration(format!(
                "no connection named '{}'",
                target.template_db
            ));
            report.record_failure(&target.template_db, "template lookup failed", &error);
        }
    }

    for connection in connections {
        info!("importing {} into {}", connection.database, target.database);
        let scratch = merge_dir.join(format!("{}.sql", connection.database));
        match import_data(config, connection, target, &scratch, preview) {
            Ok(()) => report.record_success(&connection.database, scratch.display().to_string()),
            Err(e) => report.record_failure(&connection.database, "import failed", &e),
        }
    }

    Ok(report.finished(started))
}

/// Dumps the template schema, renames it to the target database, and
/// replays it against the target server.
///
/// The load runs without `--force` and with foreign-key checks left on: a
/// schema that does not apply cleanly is worth surfacing, and the data
/// phase still runs afterwards.
fn load_schema(
    config: &Config,
    template: &Connection,
    target: &MergeTarget,
    schema_file: &Path,
    preview: bool,
) -> Result<()> {
    DumpCommand::for_connection(template)
        .with_no_data(true)
        .with_no_triggers(true)
        .with_no_routines(true)
        .with_output(schema_file.to_path_buf())
        .into_invocation(config)
        .dispatch(preview)?;

    let renamed = rewrite::replace_all(schema_file, &template.database, &target.database)?;
    debug!(
        "renamed {} occurrences of {} in {}",
        renamed,
        template.database,
        schema_file.display()
    );

    ExecCommand::for_target(target)
        .with_input(schema_file.to_path_buf())
        .into_invocation(config)
        .dispatch(preview)
}

/// Dumps one connection's data, comments out its `USE` statements, and
/// replays it into the target database with `--force` and foreign-key
/// checks disabled for the session.
fn import_data(
    config: &Config,
    connection: &Connection,
    target: &MergeTarget,
    scratch: &Path,
    preview: bool,
) -> Result<()> {
    DumpCommand::for_connection(connection)
        .with_no_create_info(true)
        .with_no_create_db(true)
        .with_no_triggers(true)
        .with_no_routines(true)
        .with_output(scratch.to_path_buf())
        .into_invocation(config)
        .dispatch(preview)?;

    let commented = rewrite::replace_all(scratch, "USE", "-- USE")?;
    debug!(
        "commented out {} USE statements in {}",
        commented,
        scratch.display()
    );

    ExecCommand::for_target(target)
        .with_database(&target.database)
        .with_force(true)
        .with_ignore_foreign_key_checks(true)
        .with_input(scratch.to_path_buf())
        .into_invocation(config)
        .dispatch(preview)
}
