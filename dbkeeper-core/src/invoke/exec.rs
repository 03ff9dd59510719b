//! `mysql` command construction.

use std::path::PathBuf;

use super::Invocation;
use crate::config::{Config, Connection, MergeTarget};

/// Every recognized `mysql` option, enumerated and defaulted.
#[derive(Debug, Clone, Default)]
pub struct ExecCommand {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database to execute against; omitted when absent
    pub database: Option<String>,
    /// Username
    pub username: String,
    /// Password
    pub password: String,
    /// Continue past per-statement errors
    pub force: bool,
    /// Disable foreign-key checks for the session
    pub ignore_foreign_key_checks: bool,
    /// Redirect standard input from this file
    pub input: Option<PathBuf>,
    /// Redirect standard output to this file; implies `--batch --raw`
    pub output: Option<PathBuf>,
    /// Override for the execute binary; the global path applies when absent
    pub binary: Option<PathBuf>,
}

impl ExecCommand {
    /// Creates a command for the given server coordinates.
    pub fn new(
        host: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            username: username.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    /// Creates a command targeting a configured connection's database,
    /// carrying its execute binary override when one is set.
    pub fn for_connection(connection: &Connection) -> Self {
        Self::new(
            &connection.host,
            connection.port,
            &connection.username,
            &connection.password,
        )
        .with_database(&connection.database)
        .with_binary(connection.mysql_path.clone())
    }

    /// Creates a command for the merge target server, without a database.
    /// Callers name the database explicitly when the statements need one.
    pub fn for_target(target: &MergeTarget) -> Self {
        Self::new(&target.host, target.port, &target.username, &target.password)
    }

    /// Builder method to set the database.
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Builder method to continue past per-statement errors.
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Builder method to disable foreign-key checks for the session.
    pub fn with_ignore_foreign_key_checks(mut self, ignore: bool) -> Self {
        self.ignore_foreign_key_checks = ignore;
        self
    }

    /// Builder method to redirect input from a file.
    pub fn with_input(mut self, input: PathBuf) -> Self {
        self.input = Some(input);
        self
    }

    /// Builder method to redirect output to a file.
    pub fn with_output(mut self, output: PathBuf) -> Self {
        self.output = Some(output);
        self
    }

    /// Builder method to override the execute binary.
    pub fn with_binary(mut self, binary: Option<PathBuf>) -> Self {
        self.binary = binary;
        self
    }

    /// Builds the invocation, resolving the binary against the configuration.
    pub fn into_invocation(self, config: &Config) -> Invocation {
        let program = self
            .binary
            .clone()
            .unwrap_or_else(|| config.mysql_path.clone());
        let mut invocation = Invocation::new(program);

        if self.force {
            invocation.arg("--force");
        }
        if self.ignore_foreign_key_checks {
            invocation.arg("--init-command=SET SESSION FOREIGN_KEY_CHECKS=0;");
        }

        invocation.arg(format!("--host={}", self.host));
        invocation.arg(format!("--port={}", self.port));
        invocation.arg(format!("--user={}", self.username));
        invocation.arg(format!("--password={}", self.password));

        if let Some(database) = &self.database {
            invocation.arg("--database");
            invocation.arg(database);
        }

        // Results redirected to a file are written as plain tab-delimited text
        if self.output.is_some() {
            invocation.arg("--batch");
            invocation.arg("--raw");
        }

        invocation.redirect_stdin(self.input);
        invocation.redirect_stdout(self.output);
        invocation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, MergeTarget};

    fn config() -> Config {
        Config {
            mysqldump_path: PathBuf::from("/usr/bin/mysqldump"),
            mysql_path: PathBuf::from("/usr/bin/mysql"),
            output_path: PathBuf::from("out"),
            dump_subdir: "dumps".to_string(),
            results_subdir: "results".to_string(),
            merge_subdir: "merge".to_string(),
            queries_path: PathBuf::from("queries"),
            result_extension: "tsv".to_string(),
            merge_db_connection: MergeTarget {
                template_db: "alpha".to_string(),
                host: "merge-host".to_string(),
                port: 3306,
                database: "merged".to_string(),
                username: "merge-user".to_string(),
                password: "merge-pass".to_string(),
            },
            connections: Vec::new(),
        }
    }

    #[test]
    fn test_query_export_command_line() {
        let rendered = ExecCommand::new("db1", 3306, "root", "secret")
            .with_database("a")
            .with_input(PathBuf::from("queries/daily_report.sql"))
            .with_output(PathBuf::from("out/results/a/daily_report.tsv"))
            .into_invocation(&config())
            .render();

        assert!(rendered.starts_with("\"/usr/bin/mysql\""));
        assert!(rendered.contains("--database a"));
        assert!(rendered.contains("--batch --raw"));
        assert!(rendered.contains("< queries/daily_report.sql"));
        assert!(rendered.ends_with("> out/results/a/daily_report.tsv"));
        assert!(!rendered.contains("--force"));
    }

    #[test]
    fn test_batch_raw_only_with_output() {
        let rendered = ExecCommand::new("db1", 3306, "root", "secret")
            .with_database("a")
            .with_input(PathBuf::from("in.sql"))
            .into_invocation(&config())
            .render();

        assert!(!rendered.contains("--batch"));
        assert!(!rendered.contains("--raw"));
    }

    #[test]
    fn test_merge_import_command_line() {
        let target = config().merge_db_connection;
        let rendered = ExecCommand::for_target(&target)
            .with_database(&target.database)
            .with_force(true)
            .with_ignore_foreign_key_checks(true)
            .with_input(PathBuf::from("out/merge/a.sql"))
            .into_invocation(&config())
            .render();

        assert!(rendered.contains("--force"));
        assert!(rendered.contains("\"--init-command=SET SESSION FOREIGN_KEY_CHECKS=0;\""));
        assert!(rendered.contains("--host=merge-host"));
        assert!(rendered.contains("--database merged"));
    }

    #[test]
    fn test_schema_load_omits_database_and_force() {
        let target = config().merge_db_connection;
        let rendered = ExecCommand::for_target(&target)
            .with_input(PathBuf::from("out/merge/schema.sql"))
            .into_invocation(&config())
            .render();

        assert!(!rendered.contains("--database"));
        assert!(!rendered.contains("--force"));
        assert!(!rendered.contains("FOREIGN_KEY_CHECKS"));
    }

    #[test]
    fn test_binary_override() {
        let rendered = ExecCommand::new("db1", 3306, "root", "secret")
            .with_binary(Some(PathBuf::from("/opt/mysql57/bin/mysql")))
            .into_invocation(&config())
            .render();

        assert!(rendered.starts_with("\"/opt/mysql57/bin/mysql\""));
    }
}
