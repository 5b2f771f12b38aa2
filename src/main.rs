mod check;
mod collectors;
mod error;
mod models;
mod util;

use anyhow::Result;
use check::{Evaluation, Severity, Thresholds};
use clap::Parser;
use error::CheckError;
use models::pool::PoolStatus;
use util::table::Table;

#[derive(Parser, Debug)]
#[command(name = "zpcheck", about = "Nagios-compatible ZFS pool health check", version = "0.1")]
struct Cli {
    /// Pool to check (must match a pool shown by `zpool list`)
    #[arg(short, long)]
    pool: String,

    /// Capacity warning threshold in percent (must be given with --crit)
    #[arg(short, long, requires = "crit")]
    warn: Option<i64>,

    /// Capacity critical threshold in percent (must be given with --warn)
    #[arg(short, long, requires = "warn")]
    crit: Option<i64>,

    /// Print a JSON snapshot of the pool status and verdict instead of the
    /// single-line plugin report
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let thresholds = match (cli.warn, cli.crit) {
        (Some(warn), Some(crit)) => Thresholds { warn, crit },
        _                        => Thresholds::default(),
    };

    if cli.json {
        return run_json_snapshot(&cli.pool, thresholds);
    }

    // The plugin protocol: one stdout line, exit code = severity ordinal.
    // Every failure collapses to UNKNOWN; nothing past this point panics.
    match run_check(&cli.pool, thresholds) {
        Ok(eval) => {
            println!("{}", eval.render());
            std::process::exit(eval.severity.code());
        }
        Err(err) => {
            println!("{}: {}", Severity::Unknown.label(), err);
            std::process::exit(Severity::Unknown.code());
        }
    }
}

/// Validate thresholds, confirm the pool exists, fetch its listing and
/// evaluate it. Two zpool invocations, each run to completion before the
/// next step; a hung command is bounded by the supervisor's own timeout.
fn run_check(pool: &str, thresholds: Thresholds) -> Result<Evaluation, CheckError> {
    thresholds.validate()?;

    let listing = Table::parse(&collectors::zpool::list_all()?);
    models::pool::assert_pool_listed(&listing, pool)?;

    let scoped = Table::parse(&collectors::zpool::list_pool(pool)?);
    let status = PoolStatus::from_listing(&scoped, pool)?;

    check::evaluate(&status, thresholds)
}

/// One-shot machine-readable snapshot for ad-hoc diagnosis. The exit code
/// still carries the severity so scripts can use either surface.
fn run_json_snapshot(pool: &str, thresholds: Thresholds) -> Result<()> {
    use serde_json::json;

    thresholds.validate()?;

    let listing = Table::parse(&collectors::zpool::list_all()?);
    models::pool::assert_pool_listed(&listing, pool)?;

    let scoped = Table::parse(&collectors::zpool::list_pool(pool)?);
    let status = PoolStatus::from_listing(&scoped, pool)?;
    let eval = check::evaluate(&status, thresholds)?;

    let snapshot = json!({
        "zpcheck_version": "0.1",
        "timestamp":  chrono::Local::now().to_rfc3339(),
        "pool":       status,
        "severity":   eval.severity.label(),
        "exit_code":  eval.severity.code(),
        "message":    eval.message,
        "perfdata":   eval.perfdata.iter().map(|p| p.to_string()).collect::<Vec<_>>(),
        "thresholds": { "warn": thresholds.warn, "crit": thresholds.crit },
    });

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    std::process::exit(eval.severity.code());
}
