//! Error types with credential sanitization for logged command lines.
//!
//! Connection passwords travel on subprocess command lines, so every log
//! line that includes a command must go through [`redact_passwords`] first.

use thiserror::Error;

/// Main error type for dbkeeper operations.
#[derive(Debug, Error)]
pub enum DbKeeperError {
    /// I/O operation failed
    #[error("I/O operation failed: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Serialization or deserialization failed
    #[error("Serialization failed: {context}")]
    Serialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Launching an external binary failed
    #[error("Invocation failed: {context}")]
    Invocation {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results with DbKeeperError
pub type Result<T> = std::result::Result<T, DbKeeperError>;

impl DbKeeperError {
    /// Creates an I/O error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Creates a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a serialization error with context
    pub fn serialization(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            context: context.into(),
            source,
        }
    }

    /// Creates an invocation error with context
    pub fn invocation(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Invocation {
            context: context.into(),
            source,
        }
    }
}

/// Masks every `--password=...` value in a rendered command line.
///
/// The replacement covers the token up to the next whitespace, so passwords
/// embedded in command strings never reach the logs.
///
/// # Example
///
/// ```rust
/// use dbkeeper_core::error::redact_passwords;
///
/// let redacted = redact_passwords("mysql --user=root --password=secret --database db");
/// assert_eq!(redacted, "mysql --user=root --password=**** --database db");
/// assert!(!redacted.contains("secret"));
/// ```
pub fn redact_passwords(command: &str) -> String {
    const FLAG: &str = "--password=";

    let mut out = String::with_capacity(command.len());
    let mut rest = command;
    while let Some(idx) = rest.find(FLAG) {
        let value_start = idx + FLAG.len();
        out.push_str(&rest[..value_start]);
        out.push_str("****");
        let tail = &rest[value_start..];
        let value_end = tail.find(char::is_whitespace).unwrap_or(tail.len());
        rest = &tail[value_end..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_password_value() {
        let command = "\"/usr/bin/mysql\" --host=db1 --user=root --password=hunter2 --database a";
        let redacted = redact_passwords(command);

        assert!(!redacted.contains("hunter2"));
        assert!(redacted.contains("--password=****"));
        assert!(redacted.contains("--host=db1"));
    }

    #[test]
    fn test_redact_multiple_passwords() {
        let command = "--password=one --password=two";
        assert_eq!(redact_passwords(command), "--password=**** --password=****");
    }

    #[test]
    fn test_redact_password_at_end_of_line() {
        let redacted = redact_passwords("--user=root --password=trailing");
        assert_eq!(redacted, "--user=root --password=****");
    }

    #[test]
    fn test_redact_no_password_is_identity() {
        let command = "\"/usr/bin/mysqldump\" --host=db1 --databases a";
        assert_eq!(redact_passwords(command), command);
    }

    #[test]
    fn test_error_creation() {
        let error = DbKeeperError::configuration("no connection named 'primary'");
        assert!(error.to_string().contains("no connection named 'primary'"));
    }
}
