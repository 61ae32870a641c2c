//! genenet — command-line client for a gene network analysis server.
//!
//! Run with: cargo run -p genenet-client -- upload hits.xlsx --threshold 0.3 --num 5

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use genenet_client::{client::DEFAULT_SERVER_URL, GeneNetClient, GraphSummary, UploadOptions};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "genenet", version, about = "Gene network analysis client")]
struct Cli {
    /// Base URL of the analysis server
    #[arg(long, global = true, env = "GENENET_SERVER", default_value = DEFAULT_SERVER_URL)]
    server: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show which reference datasets the server has loaded
    Status,
    /// Upload a genes-of-interest sheet and summarise the returned network
    Upload {
        /// Spreadsheet (xlsx/csv/tsv) with a `Gene` column
        file: PathBuf,
        /// Correlation cut-off
        #[arg(long)]
        threshold: Option<f64>,
        /// Correlated partners kept per gene
        #[arg(long)]
        num: Option<usize>,
        /// Write the received graph as JSON
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let client = GeneNetClient::new(&cli.server)?;

    match cli.command {
        Command::Status => {
            let status = client
                .status()
                .await
                .context("Could not connect to server")?;
            println!("Server:        {}", client.base_url());
            println!("Links file:    {} ({} rows)", loaded(status.links_file_loaded), status.links_file_rows);
            println!("BioGRID file:  {} ({} rows)", loaded(status.biogrid_file_loaded), status.biogrid_file_rows);
            if let Some(error) = &status.error {
                println!("Error:         {error}");
            }
        }
        Command::Upload { file, threshold, num, out } => {
            let opts = UploadOptions { threshold, num };
            let graph = client
                .upload(&file, &opts)
                .await
                .context("Error processing file")?;
            println!("{}", GraphSummary::from(&graph));
            if let Some(out) = out {
                tokio::fs::write(&out, graph.to_json_pretty()?)
                    .await
                    .with_context(|| format!("Failed to write {}", out.display()))?;
                println!("Graph written to {}", out.display());
            }
        }
    }
    Ok(())
}

fn loaded(flag: bool) -> &'static str {
    if flag { "loaded" } else { "not loaded" }
}
