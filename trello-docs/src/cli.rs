//! # trello-docs CLI Interface
//!
//! Command parsing and orchestration for the `trello-docs` binary. All
//! fetching, formatting and assembly lives in [`trello_docs_core`]; this
//! module only wires arguments, environment credentials and files to it.
//!
//! ## Commands
//! - `boards`: list the boards the credentials can see
//! - `lists --board-id <id>`: list the lists of one board
//! - `generate --config <file> [--preset <name>] [--output <path>]`: write the HTML document
//! - `verify`: check `TRELLO_API_KEY` / `TRELLO_TOKEN` against the API
//!
//! ## Programmatic use
//! Call [`run`] with a constructed [`Cli`]; integration tests do exactly that.

use crate::load_config::{build_config, load_config};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use trello_docs_core::client::TrelloClient;
use trello_docs_core::contract::BoardSource;
use trello_docs_core::generate::generate;

/// Generate searchable, printable HTML documentation from Trello lists.
#[derive(Parser)]
#[clap(
    name = "trello-docs",
    version,
    about = "Generate searchable, printable HTML documentation from Trello boards"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the boards accessible with the configured credentials
    Boards,
    /// List the lists of a board
    Lists {
        /// Board id, as printed by `boards`
        #[clap(long)]
        board_id: String,
    },
    /// Generate the HTML document described by a config file
    Generate {
        /// Path to the YAML or JSON config file
        #[clap(long)]
        config: PathBuf,
        /// Preset applied before the file's fields (simple, detailed, printReady, onePerPage)
        #[clap(long)]
        preset: Option<String>,
        /// Output path; defaults to the config's outputFileName
        #[clap(long)]
        output: Option<PathBuf>,
    },
    /// Check that the Trello credentials in the environment are accepted
    Verify,
}

/// Async CLI entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Boards => {
            let client = TrelloClient::new_from_env()?;
            let boards = client.fetch_user_boards().await?;
            tracing::info!(command = "boards", count = boards.len(), "Fetched boards");
            for board in boards.iter().filter(|b| !b.closed) {
                println!("{}\t{}", board.id, board.name);
            }
            Ok(())
        }
        Commands::Lists { board_id } => {
            let client = TrelloClient::new_from_env()?;
            let board = client.fetch_board(&board_id).await?;
            let lists = client.fetch_lists_by_board_id(&board_id).await?;
            tracing::info!(command = "lists", board_id = %board_id, board = %board.name, count = lists.len(), "Fetched lists");
            println!("{} ({})", board.name, board.id);
            for list in lists.iter().filter(|l| !l.closed) {
                println!("{}\t{}", list.id, list.name);
            }
            Ok(())
        }
        Commands::Generate {
            config,
            preset,
            output,
        } => {
            let file = load_config(&config)?;
            let generator_config = build_config(&file, preset.as_deref())?;
            // Rejected configurations never need credentials.
            generator_config.validate()?;

            tracing::info!(command = "generate", "Starting document generation");
            let client = TrelloClient::new_from_env()?;
            let report = match generate(&generator_config, &client).await {
                Ok(report) => report,
                Err(e) => {
                    tracing::error!(command = "generate", error = %e, "Generation failed");
                    return Err(e.into());
                }
            };

            let output_path =
                output.unwrap_or_else(|| PathBuf::from(&generator_config.output_file_name));
            fs::write(&output_path, &report.html)
                .with_context(|| format!("Failed to write document to {:?}", output_path))?;
            tracing::info!(
                command = "generate",
                output = ?output_path,
                cards = report.card_count,
                "Document written"
            );
            println!(
                "Wrote {} ({} cards in {} sections, {} comments)",
                output_path.display(),
                report.card_count,
                report.section_count,
                report.comment_count
            );
            Ok(())
        }
        Commands::Verify => {
            let client = TrelloClient::new_from_env()?;
            if client.verify_credentials().await? {
                println!("Trello credentials are valid");
                Ok(())
            } else {
                anyhow::bail!("Trello rejected the configured credentials")
            }
        }
    }
}
