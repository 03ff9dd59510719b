//! Per-connection query export.

use std::time::Instant;
use tracing::info;

use super::create_dir;
use crate::config::{Config, Connection};
use crate::error::Result;
use crate::invoke::ExecCommand;
use crate::report::{Operation, OperationReport};

/// Runs every query named on each selected connection, exporting the
/// results to `<output>/<results_subdir>/<database>/<query>.<extension>`.
///
/// Query text is read from `<queries_path>/<name>.sql`. A connection with no
/// query names gets its results directory created and nothing else.
///
/// # Errors
/// Returns an error when a results directory cannot be created. Per-query
/// failures are recorded in the report and the iteration continues.
pub fn run_queries(
    config: &Config,
    connections: &[Connection],
    preview: bool,
) -> Result<OperationReport> {
    let started = Instant::now();
    let mut report = OperationReport::new(Operation::RunQueries);

    create_dir(&config.results_dir())?;

    for connection in connections {
        let database_dir = config.results_dir().join(&connection.database);
        create_dir(&database_dir)?;

        for query_name in &connection.sql {
            let input = config.query_file(query_name);
            let destination =
                database_dir.join(format!("{}.{}", query_name, config.result_extension));
            info!(
                "exporting {} for {} to {}",
                query_name,
                connection,
                destination.display()
            );

            let result = ExecCommand::for_connection(connection)
                .with_input(input)
                .with_output(destination.clone())
                .into_invocation(config)
                .dispatch(preview);

            match result {
                Ok(()) => {
                    report.record_success(&connection.database, destination.display().to_string());
                }
                Err(e) => report.record_failure(
                    &connection.database,
                    format!("query {} failed", query_name),
                    &e,
                ),
            }
        }
    }

    Ok(report.finished(started))
}
