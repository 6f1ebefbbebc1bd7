//! CLI binary for concept search.
//!
//! Prints the gateway's response (status line, then body) on stdout.
//! All tracing output goes to stderr.

use clap::{Parser, Subcommand};
use concept_search::{gateway_from_config, AppConfig};
use solr_gateway::{ConceptDbId, GatewayResponse};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Search concept databases indexed in Solr.
#[derive(Parser)]
#[command(name = "concept-search", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long, env = "CONCEPT_SEARCH_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Report which concept databases have a Solr collection.
    ///
    /// With no ids, every configured concept database is checked.
    Available {
        /// Concept database ids.
        ids: Vec<ConceptDbId>,
    },

    /// Search concept databases for free text.
    Search {
        /// Concept database ids to search (repeatable).
        #[arg(short, long = "db", required = true)]
        dbs: Vec<ConceptDbId>,

        /// Query text.
        query: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("concept_search=info,solr_gateway=info")
        }))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;
    let gateway = gateway_from_config(&config)?;

    match cli.command {
        Command::Available { ids } => {
            let ids = if ids.is_empty() {
                gateway.directory().ids()
            } else {
                ids
            };
            let resp = gateway.collections_available(&ids).await?;
            render(&resp)
        }
        Command::Search { dbs, query } => {
            let resp = gateway.search_collection(&dbs, &query).await?;
            render(&resp)
        }
    }
}

fn render<T: serde::Serialize>(resp: &GatewayResponse<T>) -> anyhow::Result<ExitCode> {
    println!("{}", resp.status());
    println!("{}", resp.body()?);
    if resp.is_ok() {
        Ok(ExitCode::SUCCESS)
    } else {
        tracing::error!(status = resp.status(), "request failed");
        Ok(ExitCode::FAILURE)
    }
}
