//! Full backup of every selected connection.

use std::time::Instant;
use tracing::info;

use super::create_dir;
use crate::config::{Config, Connection};
use crate::error::Result;
use crate::invoke::DumpCommand;
use crate::report::{Operation, OperationReport};

/// Options for [`dump_all`].
#[derive(Debug, Clone, Default)]
pub struct DumpAllOptions {
    /// Tables to leave out of every dump
    pub ignore_tables: Vec<String>,
    /// Print the constructed commands instead of executing them
    pub preview: bool,
}

/// Dumps every selected connection to `<output>/<dump_subdir>/<database>.sql`.
///
/// # Errors
/// Returns an error when the dump directory cannot be created. Per-connection
/// failures are recorded in the report and the iteration continues.
pub fn dump_all(
    config: &Config,
    connections: &[Connection],
    options: &DumpAllOptions,
) -> Result<OperationReport> {
    let started = Instant::now();
    let mut report = OperationReport::new(Operation::DumpAll);

    let dump_dir = config.dump_dir();
    create_dir(&dump_dir)?;

    for connection in connections {
        let destination = dump_dir.join(format!("{}.sql", connection.database));
        info!("dumping {} to {}", connection, destination.display());

        let result = DumpCommand::for_connection(connection)
            .with_ignore_tables(options.ignore_tables.clone())
            .with_output(destination.clone())
            .into_invocation(config)
            .dispatch(options.preview);

        match result {
            Ok(()) => report.record_success(&connection.database, destination.display().to_string()),
            Err(e) => report.record_failure(&connection.database, "dump failed", &e),
        }
    }

    Ok(report.finished(started))
}
