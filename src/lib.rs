pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod pairing;
pub mod report;
pub mod standings;

use std::fs;
use std::path::Path;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

use crate::cli::Command;
use crate::config::SwissConfig;
use crate::domain::models::TournamentSnapshot;

pub use errors::SwissError;
pub use pairing::{RoundPairing, generate_round};
pub use standings::{StandingsEntry, compute_standings};

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_pair(path: &Path, json: bool) -> Result<()> {
    let snapshot = load_snapshot(path)?;
    let config = effective_config(&snapshot);
    let pairing = pairing::generate_round(&snapshot, &config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&pairing)?);
    } else {
        print!("{}", report::render_pairings(&snapshot, &pairing));
    }
    Ok(())
}

pub fn handle_standings(path: &Path, json: bool) -> Result<()> {
    let snapshot = load_snapshot(path)?;
    let config = effective_config(&snapshot);
    let entries = standings::compute_standings(&snapshot, &config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        print!("{}", report::render_standings(&snapshot, &entries));
    }
    Ok(())
}

/// A snapshot may embed its own configuration; the default applies otherwise
fn effective_config(snapshot: &TournamentSnapshot) -> SwissConfig {
    snapshot.config.clone().unwrap_or_default()
}

fn load_snapshot(path: &Path) -> Result<TournamentSnapshot> {
    let contents = errors::with_snapshot_context(fs::read_to_string(path), path)?;
    errors::with_parse_context(serde_json::from_str(&contents), "tournament snapshot")
}
