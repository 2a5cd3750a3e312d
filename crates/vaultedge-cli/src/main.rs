//! VaultEdge command-line entry point.

use anyhow::Result;
use clap::Parser;
use vaultedge_cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    vaultedge_cli::run(Cli::parse()).await?;
    Ok(())
}
