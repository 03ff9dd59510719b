//! Typed configuration for connections, binary paths, and output layout.
//!
//! The configuration is a JSON document loaded once at startup and passed by
//! reference into every operation. The root `mysql` key is kept for
//! compatibility with existing configuration files.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DbKeeperError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigDocument {
    mysql: Config,
}

/// Top-level tool configuration.
///
/// # Example
/// ```rust,no_run
/// use dbkeeper_core::config::Config;
/// use std::path::Path;
///
/// let config = Config::load(Path::new("config.json")).expect("config");
/// println!("{} connections", config.connections.len());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the `mysqldump` binary used when a connection has no override
    pub mysqldump_path: PathBuf,
    /// Path to the `mysql` binary used when a connection has no override
    pub mysql_path: PathBuf,
    /// Root directory for everything this tool writes
    pub output_path: PathBuf,
    /// Subdirectory of `output_path` receiving full dumps
    pub dump_subdir: String,
    /// Subdirectory of `output_path` receiving query results
    pub results_subdir: String,
    /// Subdirectory of `output_path` receiving merge scratch files
    pub merge_subdir: String,
    /// Directory holding the named query files (`<name>.sql`)
    pub queries_path: PathBuf,
    /// File extension for exported query results
    pub result_extension: String,
    /// The merge target server and its schema template
    pub merge_db_connection: MergeTarget,
    /// Every configured connection, in invocation order
    pub connections: Vec<Connection>,
}

/// The server a merge imports into, plus the name of the connection whose
/// schema seeds it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeTarget {
    /// Name of the connection whose schema is replayed into the target
    pub template_db: String,
    /// Target server host
    pub host: String,
    /// Target server port
    pub port: u16,
    /// Database on the target server that receives the merged data
    pub database: String,
    /// Target server username
    pub username: String,
    /// Target server password
    pub password: String,
}

/// One named database connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    /// Unique name used for selection and as the merge template reference
    pub name: String,
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database this connection operates on
    pub database: String,
    /// Username
    pub username: String,
    /// Password (passed to the binaries on their command line)
    pub password: String,
    /// Per-connection override for the execute binary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mysql_path: Option<PathBuf>,
    /// Per-connection override for the dump binary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mysqldump_path: Option<PathBuf>,
    /// Ordered names of the query files to run against this connection
    #[serde(default)]
    pub sql: Vec<String>,
}

impl std::fmt::Display for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Credentials intentionally omitted
        write!(
            f,
            "{} ({}:{}/{})",
            self.name, self.host, self.port, self.database
        )
    }
}

impl Connection {
    /// The dump binary for this connection: its override, or the global path.
    pub fn dump_binary<'a>(&'a self, config: &'a Config) -> &'a Path {
        self.mysqldump_path
            .as_deref()
            .unwrap_or(&config.mysqldump_path)
    }

    /// The execute binary for this connection: its override, or the global path.
    pub fn exec_binary<'a>(&'a self, config: &'a Config) -> &'a Path {
        self.mysql_path.as_deref().unwrap_or(&config.mysql_path)
    }
}

impl Config {
    /// Loads the configuration from a JSON file.
    ///
    /// # Errors
    /// Returns an error when the file cannot be read or does not deserialize
    /// into the expected document shape.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            DbKeeperError::io(
                format!("failed to read configuration from {}", path.display()),
                e,
            )
        })?;
        let document: ConfigDocument = serde_json::from_str(&raw).map_err(|e| {
            DbKeeperError::serialization(
                format!("failed to parse configuration from {}", path.display()),
                e,
            )
        })?;
        Ok(document.mysql)
    }

    /// Directory receiving full dumps.
    pub fn dump_dir(&self) -> PathBuf {
        self.output_path.join(&self.dump_subdir)
    }

    /// Directory receiving query results.
    pub fn results_dir(&self) -> PathBuf {
        self.output_path.join(&self.results_subdir)
    }

    /// Directory receiving merge scratch files.
    pub fn merge_dir(&self) -> PathBuf {
        self.output_path.join(&self.merge_subdir)
    }

    /// Path of the query file for a named query.
    pub fn query_file(&self, name: &str) -> PathBuf {
        self.queries_path.join(format!("{}.sql", name))
    }

    /// The connection whose schema seeds the merge target.
    ///
    /// When several connections share the template name, the last one wins,
    /// matching the historical lookup order.
    pub fn template_connection(&self) -> Option<&Connection> {
        self.connections
            .iter()
            .rev()
            .find(|c| c.name == self.merge_db_connection.template_db)
    }

    /// Returns the connections an invocation operates on.
    ///
    /// The CLI accepts a `--connections` name filter, but the filter has
    /// never been applied: selection always yields every configured
    /// connection, in configuration order. Tests pin this behavior down.
    pub fn selected_connections(&self, _requested: &[String]) -> &[Connection] {
        &self.connections
    }
}
