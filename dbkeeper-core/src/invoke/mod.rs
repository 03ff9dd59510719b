//! Construction and execution of the external binary invocations.
//!
//! Every operation boils down to running `mysqldump` or `mysql` with a
//! constructed argument list and optional file redirections. [`Invocation`]
//! is the transient value both command builders produce: it can render
//! itself as the exact shell-style command line (what preview mode prints)
//! or execute synchronously, blocking until the subprocess exits.

pub mod dump;
pub mod exec;

pub use dump::DumpCommand;
pub use exec::ExecCommand;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, warn};

use crate::error::{DbKeeperError, Result, redact_passwords};

/// One fully-constructed external command, ready to render or run.
#[derive(Debug, Clone)]
pub struct Invocation {
    program: PathBuf,
    args: Vec<String>,
    stdin: Option<PathBuf>,
    stdout: Option<PathBuf>,
}

impl Invocation {
    pub(crate) fn new(program: PathBuf) -> Self {
        Self {
            program,
            args: Vec::new(),
            stdin: None,
            stdout: None,
        }
    }

    pub(crate) fn arg(&mut self, arg: impl Into<String>) {
        self.args.push(arg.into());
    }

    pub(crate) fn redirect_stdin(&mut self, path: Option<PathBuf>) {
        self.stdin = path;
    }

    pub(crate) fn redirect_stdout(&mut self, path: Option<PathBuf>) {
        self.stdout = path;
    }

    /// Renders the command line exactly as it would be typed in a shell:
    /// quoted program path, arguments (quoted when they contain whitespace),
    /// then `< input` / `> output` redirections.
    pub fn render(&self) -> String {
        let mut parts = Vec::with_capacity(self.args.len() + 3);
        parts.push(format!("\"{}\"", self.program.display()));
        for arg in &self.args {
            parts.push(quote_arg(arg));
        }
        if let Some(input) = &self.stdin {
            parts.push(format!("< {}", input.display()));
        }
        if let Some(output) = &self.stdout {
            parts.push(format!("> {}", output.display()));
        }
        parts.join(" ")
    }

    /// Renders the command line with `--password=` values masked.
    /// This is the only form that may reach the logs.
    pub fn render_redacted(&self) -> String {
        redact_passwords(&self.render())
    }

    /// Runs the command synchronously, blocking until the subprocess exits.
    ///
    /// A spawn failure (missing binary, unreadable input file) is an error.
    /// A non-zero exit status is not: the status is logged at warn level and
    /// otherwise discarded, matching the observed behavior of the tool this
    /// replaces.
    ///
    /// # Errors
    /// Returns an error when the redirection files cannot be opened or the
    /// binary cannot be started.
    pub fn run(&self) -> Result<()> {
        let mut command = Command::new(&self.program);
        command.args(&self.args);

        if let Some(path) = &self.stdin {
            let file = open_input(path)?;
            command.stdin(Stdio::from(file));
        }
        if let Some(path) = &self.stdout {
            let file = create_output(path)?;
            command.stdout(Stdio::from(file));
        }

        debug!("running {}", self.render_redacted());

        let status = command.status().map_err(|e| {
            DbKeeperError::invocation(format!("failed to run {}", self.program.display()), e)
        })?;

        if !status.success() {
            warn!("{} exited with {}", self.program.display(), status);
        }

        Ok(())
    }

    /// Prints the command when previewing, runs it otherwise.
    ///
    /// # Errors
    /// Propagates [`Invocation::run`] errors; previewing never fails.
    pub fn dispatch(&self, preview: bool) -> Result<()> {
        if preview {
            println!("{}", self.render());
            Ok(())
        } else {
            self.run()
        }
    }
}

fn open_input(path: &Path) -> Result<File> {
    File::open(path)
        .map_err(|e| DbKeeperError::invocation(format!("failed to open input {}", path.display()), e))
}

fn create_output(path: &Path) -> Result<File> {
    File::create(path).map_err(|e| {
        DbKeeperError::invocation(format!("failed to create output {}", path.display()), e)
    })
}

fn quote_arg(arg: &str) -> String {
    if arg.contains(char::is_whitespace) {
        format!("\"{}\"", arg)
    } else {
        arg.to_string()
    }
}
