use anyhow::Result;
use clap::Parser;

use diaria_engine::cli::{self, Cli};
use diaria_engine::logging::init_logger;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    tracing::debug!(?cli, "Starting diaria");
    cli::run(cli).await
}
