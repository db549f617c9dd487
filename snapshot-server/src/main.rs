//! The snapshot API server binary.

use anyhow::Result;

fn main() -> Result<()> {
    snapshot_server::cli::execute()
}
