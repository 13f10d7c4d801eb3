//! Command-line interface wiring for wardair.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Settings;

pub mod migrate;
pub mod predict;
pub mod seed;
pub mod serve;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Ward air quality monitoring service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Migrate => migrate::run(settings).await,
            Commands::Seed => seed::run(settings).await,
            Commands::Serve(args) => serve::run(args, settings).await,
            Commands::Predict(args) => predict::run(args, settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Apply the embedded database schema.
    Migrate,
    /// Migrate and load the demo wards with generated history.
    Seed,
    /// Serve the JSON API.
    Serve(serve::Args),
    /// Run the trend predictor for a ward and print the verdict.
    Predict(predict::Args),
}
