//! Command-line interface for the treasure hunt service.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Treasure Hunt - proximity search over a catalog of treasures and prize boxes
#[derive(Parser)]
#[command(name = "treasure-hunt")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Load configuration from this file instead of the default locations
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API (default)
    Serve,

    /// Insert the demo treasure catalog if the store is empty
    Seed,

    /// Run a treasure search against the configured store and print the result
    #[command(alias = "s")]
    Search {
        #[arg(long, allow_hyphen_values = true)]
        latitude: String,
        #[arg(long, allow_hyphen_values = true)]
        longitude: String,
        /// Search radius in km: 1 or 10
        #[arg(long)]
        distance: String,
        /// Only report boxes worth at least this much (10 to 30)
        #[arg(long)]
        prize_value: Option<String>,
    },

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub use commands::*;
