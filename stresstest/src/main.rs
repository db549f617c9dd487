//! This is a stresstest binary which fires concurrent snapshot-creation
//! requests at a running snapshot server and reports latency and throughput
//! statistics.
//!
//! Every request creates a real snapshot on the target volume; the tool does
//! not clean up after a run. Use `--cleanup` to sweep the volume before a
//! run, or `--cleanup-only` to sweep without benchmarking.
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

use std::sync::Arc;

use anyhow::{Context, Result};
use argh::FromArgs;

use crate::http::SnapshotApi;

mod http;
mod report;
mod stresstest;
mod summary;

/// Stresstester for the snapshot API server.
#[derive(Debug, FromArgs)]
pub struct Args {
    /// base URL of the snapshot server
    #[argh(option, default = "String::from(\"http://localhost:8080\")")]
    pub server: String,

    /// number of concurrent requests
    #[argh(option, short = 'c', default = "10")]
    pub concurrency: usize,

    /// total number of snapshots to create
    #[argh(option, short = 'n', default = "100")]
    pub total: usize,

    /// delete all test snapshots before the run
    #[argh(switch)]
    pub cleanup: bool,

    /// print the current snapshot list and exit
    #[argh(switch)]
    pub list: bool,

    /// delete all test snapshots and exit
    #[argh(switch)]
    pub cleanup_only: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Args = argh::from_env();
    let api = Arc::new(SnapshotApi::new(&args.server));

    println!("snapshot stresstest against {}", args.server);

    if args.cleanup_only {
        api.delete_all()
            .await
            .context("failed to clean up snapshots")?;
        println!("all test snapshots deleted");
        return Ok(());
    }

    if args.list {
        let snapshots = api
            .list_snapshots()
            .await
            .context("failed to list snapshots")?;

        println!("{} test snapshots:", snapshots.len());
        for (i, snapshot) in snapshots.iter().enumerate() {
            println!("  {}. {snapshot}", i + 1);
        }
        return Ok(());
    }

    if args.cleanup {
        api.delete_all()
            .await
            .context("failed to clean up snapshots")?;
        println!("all test snapshots deleted");
    }

    println!(
        "running: concurrency={}, total={}",
        args.concurrency, args.total
    );
    let summary = stresstest::run(api.clone(), args.concurrency, args.total).await;
    report::print_summary(&summary);

    // The run leaves its snapshots behind; report how many now exist.
    match api.list_snapshots().await {
        Ok(snapshots) => println!("\n{} test snapshots now on the volume", snapshots.len()),
        Err(err) => eprintln!("failed to list snapshots after the run: {err}"),
    }

    Ok(())
}
