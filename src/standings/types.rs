use serde::Serialize;

use crate::config::TiebreakKind;
use crate::domain::models::PlayerId;

/// One numeric tiebreak score, in game points
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TiebreakValue {
    pub kind: TiebreakKind,
    pub value: f64,
}

/// One row of the ranked standings table.
///
/// Head-to-head carries no numeric value; it shows up in the ordering only,
/// so `tiebreaks` lists the numeric kinds of the configured chain.
#[derive(Debug, Clone, Serialize)]
pub struct StandingsEntry {
    pub rank: u32,
    pub player_id: PlayerId,
    pub name: String,
    pub rating: u32,
    pub score: f64,
    pub tiebreaks: Vec<TiebreakValue>,
}
