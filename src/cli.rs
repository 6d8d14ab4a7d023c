use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "Swiss pairing engine and standings calculator")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Generate the next round's pairings from a tournament snapshot
    Pair {
        /// Path to the tournament snapshot JSON
        snapshot: PathBuf,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Compute ranked standings with the configured tiebreaks
    Standings {
        /// Path to the tournament snapshot JSON
        snapshot: PathBuf,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}
