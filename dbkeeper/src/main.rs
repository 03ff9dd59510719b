//! MySQL backup, query export, and merge tool.
//!
//! Wraps the `mysqldump` and `mysql` binaries named in the configuration
//! file: every operation builds a command line, runs it synchronously, and
//! records per-connection outcomes without aborting the rest of the run.

use anyhow::Context;
use clap::{Args, Parser};
use dbkeeper_core::{Config, DumpAllOptions, OperationReport, dump_all, init_logging, merge, run_queries};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "dbkeeper")]
#[command(about = "MySQL backup, query export, and merge tool")]
#[command(version)]
#[command(long_about = "
dbkeeper - back up, query, and merge MySQL databases

Operations run in a fixed order, each gated by its own flag:
  1. --full-dump    dump every configured database to the output folder
  2. --run-queries  export query results; queries are listed per connection
  3. --merge        merge every configured database into the target database

EXAMPLES:
  dbkeeper --full-dump
  dbkeeper --full-dump --ignore audit_log,sessions
  dbkeeper --full-dump --run-queries --merge
  dbkeeper --merge --preview
")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    /// Dump every configured database to the output folder
    #[arg(short = 'd', long)]
    full_dump: bool,

    /// Export query results; queries are listed per connection in the configuration
    #[arg(short = 'q', long)]
    run_queries: bool,

    /// Merge every configured database into the target database
    #[arg(short = 'm', long)]
    merge: bool,

    /// Print the constructed commands instead of executing them
    #[arg(short = 'p', long)]
    preview: bool,

    /// Tables to leave out of full dumps
    #[arg(short = 'i', long, value_delimiter = ',', value_name = "TABLE")]
    ignore: Vec<String>,

    /// Connection names to operate on
    #[arg(short = 'c', long, value_delimiter = ',', value_name = "NAME")]
    connections: Vec<String>,

    /// Configuration file path
    #[arg(long, default_value = "config.json", value_name = "FILE")]
    config: PathBuf,
}

#[derive(Args)]
struct GlobalArgs {
    /// Increase verbosity
    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv)"
    )]
    verbose: u8,

    /// Suppress output
    #[arg(long, help = "Suppress all output except errors")]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.global.verbose, cli.global.quiet)
        .context("failed to initialize logging")?;

    let config = Config::load(&cli.config)
        .with_context(|| format!("failed to load configuration {}", cli.config.display()))?;

    std::fs::create_dir_all(&config.output_path).with_context(|| {
        format!(
            "failed to create output directory {}",
            config.output_path.display()
        )
    })?;

    // Name filtering is accepted but not applied; see Config::selected_connections.
    let connections = config.selected_connections(&cli.connections);
    info!("operating on {} connection(s)", connections.len());

    if cli.full_dump {
        let options = DumpAllOptions {
            ignore_tables: cli.ignore.clone(),
            preview: cli.preview,
        };
        let report = dump_all(&config, connections, &options)?;
        summarize(&report);
    }

    if cli.run_queries {
        let report = run_queries(&config, connections, cli.preview)?;
        summarize(&report);
    }

    if cli.merge {
        let report = merge(&config, connections, cli.preview)?;
        summarize(&report);
    }

    // Per-step failures are reported above but do not change the exit
    // status; only startup failures exit non-zero.
    Ok(())
}

fn summarize(report: &OperationReport) {
    if report.is_clean() {
        info!(
            "{}: {} step(s) completed in {}ms",
            report.operation,
            report.completed.len(),
            report.duration_ms
        );
    } else {
        warn!(
            "{}: {} step(s) completed, {} failed",
            report.operation,
            report.completed.len(),
            report.failures.len()
        );
    }
    println!(
        "{}: {} completed, {} failed",
        report.operation,
        report.completed.len(),
        report.failures.len()
    );
}
