use std::path::Path;

use anyhow::Context as _;
use thiserror::Error;

use crate::domain::models::PlayerId;

/// Errors surfaced by the pairing engine and standings calculator.
///
/// None of these are retried internally: pairing and standings are pure
/// deterministic computations with no transient failure modes.
#[derive(Debug, Error)]
pub enum SwissError {
    /// Fewer than 2 eligible players remain; fatal for the round
    #[error("fewer than 2 eligible players remain for pairing")]
    InsufficientPlayers,

    /// Safety net for the relaxation cascade; must never occur for
    /// well-formed input
    #[error("no valid pairing exists after exhausting every relaxation")]
    ConstraintUnsatisfiable,

    /// Structurally impossible result record, rejected at the boundary
    #[error("invalid result in round {round}: {detail}")]
    InvalidResult { round: u32, detail: String },

    /// Result record referencing a player missing from the snapshot
    #[error("round {round} references unknown player {player}")]
    UnknownPlayer { round: u32, player: PlayerId },

    /// Two seeded players share an id
    #[error("duplicate player id {0} in snapshot")]
    DuplicatePlayer(PlayerId),
}

/// Add context to snapshot loading errors
pub fn snapshot_context(path: &Path) -> String {
    format!("Failed to load snapshot from: {}", path.display())
}

/// Add context to parse errors
pub fn parse_context(data_type: &str) -> String {
    format!("Failed to parse {}", data_type)
}

/// Wrap result with snapshot loading context
pub fn with_snapshot_context<T, E>(result: Result<T, E>, path: &Path) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.context(snapshot_context(path))
}

/// Wrap result with parse context
pub fn with_parse_context<T, E>(result: Result<T, E>, data_type: &str) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.context(parse_context(data_type))
}
