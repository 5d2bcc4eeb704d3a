///
/// This module implements the CLI interface for sheet-snapshot: command parsing,
/// client construction from the environment, and the async entrypoint.
///
/// All pipeline logic (model, renderers, routing, publishing) lives in the
/// [`sheet-snapshot-core`] crate. This module is strictly CLI glue.
///
/// ## How To Use
/// - For command-line users: use the installed `sheet-snapshot` binary with `--help`.
/// - For programmatic/integration use: call [`run`] with a constructed [`Cli`].
///
/// [`sheet-snapshot-core`]: ../../sheet-snapshot-core/
use crate::github::GitHubClient;
use crate::load_config::load_config;
use crate::sheets::GoogleSheetsClient;
use anyhow::Result;
use clap::{Parser, Subcommand};
use sheet_snapshot_core::snapshot::snapshot_all;
use std::path::PathBuf;
use std::sync::Arc;

/// CLI for sheet-snapshot: render spreadsheets and publish the snapshots.
#[derive(Parser)]
#[clap(
    name = "sheet-snapshot",
    version,
    about = "Snapshot Google spreadsheets as Markdown, HTML and JSON into local files or GitHub"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Snapshot every spreadsheet listed in the given config file
    Run {
        /// Path to the YAML or JSON config file
        #[clap(long)]
        config: PathBuf,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Run { config } => {
            let config = load_config(config)?;
            tracing::info!(command = "run", "Starting snapshot run");
            let source = GoogleSheetsClient::new_from_env()
                .map_err(|e| anyhow::anyhow!("Failed to construct spreadsheet client: {e}"))?;
            let store = Arc::new(GitHubClient::new_from_env());

            let report = snapshot_all(&config, &source, store).await;
            let failed = report.failed_destinations();
            if failed == 0 {
                tracing::info!(command = "run", ?report, "Snapshot run complete");
            } else {
                tracing::warn!(command = "run", failed, ?report, "Snapshot run complete with failed destinations");
            }
            println!(
                "Snapshot complete: {} entries, {} destinations, {} failed",
                report.entries.len(),
                report.destinations.len(),
                failed
            );
            Ok(())
        }
    }
}
