use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::SwissConfig;

pub type PlayerId = i64;

/// Scores are held in half-points so every comparison is exact
pub type HalfPoints = i64;

pub const WIN: HalfPoints = 2;
pub const DRAW_HALF: HalfPoints = 1;
pub const LOSS: HalfPoints = 0;

/// Convert half-points to game points for display
pub fn points(half_points: HalfPoints) -> f64 {
    half_points as f64 / 2.0
}

/// Tournament participant, immutable once seeded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// 0 means unrated
    #[serde(default)]
    pub rating: u32,
}

/// Piece color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn other(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

/// Closed set of recognized game results.
///
/// `ForfeitWhite` means white won by forfeit, `ForfeitBlack` the reverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResultCode {
    WhiteWins,
    BlackWins,
    Draw,
    Bye,
    ForfeitWhite,
    ForfeitBlack,
}

impl ResultCode {
    pub fn is_bye(self) -> bool {
        matches!(self, ResultCode::Bye)
    }

    /// Point deltas as (white, black) in half-points
    pub fn deltas(self, bye_half_points: HalfPoints) -> (HalfPoints, HalfPoints) {
        match self {
            ResultCode::WhiteWins | ResultCode::ForfeitWhite => (WIN, LOSS),
            ResultCode::BlackWins | ResultCode::ForfeitBlack => (LOSS, WIN),
            ResultCode::Draw => (DRAW_HALF, DRAW_HALF),
            ResultCode::Bye => (bye_half_points, 0),
        }
    }

    pub fn winner(self) -> Option<Color> {
        match self {
            ResultCode::WhiteWins | ResultCode::ForfeitWhite => Some(Color::White),
            ResultCode::BlackWins | ResultCode::ForfeitBlack => Some(Color::Black),
            ResultCode::Draw | ResultCode::Bye => None,
        }
    }
}

/// One completed game; `black_id = None` marks a bye
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    pub white_id: PlayerId,
    pub black_id: Option<PlayerId>,
    pub result: ResultCode,
    #[serde(default)]
    pub board: u32,
}

/// One completed round of results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Round {
    pub number: u32,
    pub games: Vec<GameRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

/// Immutable snapshot of a tournament: players plus the full result history.
///
/// Standings and pairings are pure functions of this snapshot; nothing here
/// is mutated by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentSnapshot {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    pub players: Vec<Player>,
    #[serde(default)]
    pub rounds: Vec<Round>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<SwissConfig>,
}

impl TournamentSnapshot {
    /// Number of the round the pairing engine would generate next
    pub fn next_round_number(&self) -> u32 {
        self.rounds.len() as u32 + 1
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }
}
