//! `iasme-research` binary.

use anyhow::{Context, Result};
use clap::Parser;
use iasme_cli::{init_tracing, run, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    tracing::info!("Starting iasme-research v{}", env!("CARGO_PKG_VERSION"));

    let config = cli.into_config().context("failed to load configuration")?;
    let summary = run(&config).await?;

    if config.output.preview {
        let preview =
            serde_json::to_string_pretty(&summary.records).context("failed to render preview")?;
        println!("{preview}");
    }

    Ok(())
}
