//! `mysqldump` command construction.

use std::path::PathBuf;

use super::Invocation;
use crate::config::{Config, Connection};

/// Every recognized `mysqldump` option, enumerated and defaulted.
///
/// # Example
/// ```rust
/// use dbkeeper_core::invoke::DumpCommand;
///
/// let command = DumpCommand::new("db1", 3306, "root", "secret")
///     .with_database("a")
///     .with_no_data(true);
/// assert!(command.no_data);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DumpCommand {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database to dump; `--all-databases` when absent
    pub database: Option<String>,
    /// Username
    pub username: String,
    /// Password
    pub password: String,
    /// Tables to leave out, one `--ignore-table=<db>.<table>` per entry
    pub ignore_tables: Vec<String>,
    /// Omit CREATE TABLE statements
    pub no_create_info: bool,
    /// Omit row data
    pub no_data: bool,
    /// Omit triggers
    pub no_triggers: bool,
    /// Omit stored routines
    pub no_routines: bool,
    /// Omit the CREATE DATABASE statement
    pub no_create_db: bool,
    /// Redirect standard output to this file
    pub output: Option<PathBuf>,
    /// Redirect standard input from this file (supported, no current call site)
    pub input: Option<PathBuf>,
    /// Override for the dump binary; the global path applies when absent
    pub binary: Option<PathBuf>,
}

impl DumpCommand {
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
    /// carrying its dump binary override when one is set.
    pub fn for_connection(connection: &Connection) -> Self {
        Self::new(
            &connection.host,
            connection.port,
            &connection.username,
            &connection.password,
        )
        .with_database(&connection.database)
        .with_binary(connection.mysqldump_path.clone())
    }

    /// Builder method to set the database.
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Builder method to set the ignore-table list.
    pub fn with_ignore_tables(mut self, tables: Vec<String>) -> Self {
        self.ignore_tables = tables;
        self
    }

    /// Builder method to omit CREATE TABLE statements.
    pub fn with_no_create_info(mut self, no_create_info: bool) -> Self {
        self.no_create_info = no_create_info;
        self
    }

    /// Builder method to omit row data.
    pub fn with_no_data(mut self, no_data: bool) -> Self {
        self.no_data = no_data;
        self
    }

    /// Builder method to omit triggers.
    pub fn with_no_triggers(mut self, no_triggers: bool) -> Self {
        self.no_triggers = no_triggers;
        self
    }

    /// Builder method to omit stored routines.
    pub fn with_no_routines(mut self, no_routines: bool) -> Self {
        self.no_routines = no_routines;
        self
    }

    /// Builder method to omit the CREATE DATABASE statement.
    pub fn with_no_create_db(mut self, no_create_db: bool) -> Self {
        self.no_create_db = no_create_db;
        self
    }

    /// Builder method to redirect output to a file.
    pub fn with_output(mut self, output: PathBuf) -> Self {
        self.output = Some(output);
        self
    }

    /// Builder method to redirect input from a file.
    pub fn with_input(mut self, input: PathBuf) -> Self {
        self.input = Some(input);
        self
    }

    /// Builder method to override the dump binary.
    pub fn with_binary(mut self, binary: Option<PathBuf>) -> Self {
        self.binary = binary;
        self
    }

    /// Builds the invocation, resolving the binary against the configuration.
    pub fn into_invocation(self, config: &Config) -> Invocation {
        let program = self
            .binary
            .clone()
            .unwrap_or_else(|| config.mysqldump_path.clone());
        let mut invocation = Invocation::new(program);

        if let Some(database) = &self.database {
            for table in &self.ignore_tables {
                invocation.arg(format!("--ignore-table={}.{}", database, table));
            }
        }

        invocation.arg(format!("--host={}", self.host));
        invocation.arg(format!("--port={}", self.port));
        invocation.arg(format!("--user={}", self.username));
        invocation.arg(format!("--password={}", self.password));

        match &self.database {
            Some(database) => {
                invocation.arg("--databases");
                invocation.arg(database);
            }
            None => invocation.arg("--all-databases"),
        }

        if self.no_triggers {
            invocation.arg("--skip-triggers");
        }
        if self.no_routines {
            invocation.arg("--skip-routines");
        }
        if self.no_create_info {
            invocation.arg("--no-create-info");
        }
        if self.no_data {
            invocation.arg("--no-data");
        }
        if self.no_create_db {
            invocation.arg("--no-create-db");
        }

        invocation.arg("--insert-ignore");

        invocation.redirect_stdin(self.input);
        invocation.redirect_stdout(self.output);
        invocation
    }
}
