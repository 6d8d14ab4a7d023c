use serde::Serialize;

use crate::domain::models::PlayerId;

/// One board of a generated round; `black = None` marks the bye
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    pub board: u32,
    pub white: PlayerId,
    pub black: Option<PlayerId>,
}

/// Constraint relaxations applied while pairing, kept for audit only.
///
/// The cascade order is fixed: same-bracket rematch avoidance, then
/// cross-bracket floats, then a repeat opponent as last resort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Relaxation {
    /// A pair was matched across score brackets
    Float { player: PlayerId, opponent: PlayerId },
    /// Two players met in an earlier round and had to be re-paired
    RepeatPairing { white: PlayerId, black: PlayerId },
    /// Every remaining player had already received a bye
    RepeatBye { player: PlayerId },
    /// Both players were due the same color
    ColorConflict { white: PlayerId, black: PlayerId },
}

/// Pairing list for one round
#[derive(Debug, Clone, Serialize)]
pub struct RoundPairing {
    pub round: u32,
    pub boards: Vec<Board>,
    pub relaxations: Vec<Relaxation>,
}

impl RoundPairing {
    pub fn bye(&self) -> Option<PlayerId> {
        self.boards
            .iter()
            .find(|b| b.black.is_none())
            .map(|b| b.white)
    }
}
