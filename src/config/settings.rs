use serde::{Deserialize, Serialize};

use crate::domain::models::HalfPoints;

/// Points awarded for a bye
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByePoints {
    #[default]
    Full,
    Half,
}

impl ByePoints {
    pub fn half_points(self) -> HalfPoints {
        match self {
            ByePoints::Full => 2,
            ByePoints::Half => 1,
        }
    }
}

/// How a bye contributes to the Buchholz sum.
///
/// `Zero` is the default; `OwnScoreAtTime` credits the player's own score
/// at the moment the bye was received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ByeBuchholz {
    #[default]
    Zero,
    OwnScoreAtTime,
}

/// Secondary tiebreak scores, evaluated in configured priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TiebreakKind {
    Buchholz,
    MedianBuchholz,
    SonnebornBerger,
    HeadToHead,
    MostWins,
}

impl TiebreakKind {
    pub fn label(self) -> &'static str {
        match self {
            TiebreakKind::Buchholz => "Buchholz",
            TiebreakKind::MedianBuchholz => "Median",
            TiebreakKind::SonnebornBerger => "S-B",
            TiebreakKind::HeadToHead => "H2H",
            TiebreakKind::MostWins => "Wins",
        }
    }
}

/// Tournament-level knobs for the pairing engine and standings calculator.
///
/// Passed explicitly to every computation rather than held in a global;
/// a snapshot may embed one, otherwise the default applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwissConfig {
    pub bye_points: ByePoints,
    pub bye_buchholz: ByeBuchholz,
    pub tiebreaks: Vec<TiebreakKind>,
}

impl Default for SwissConfig {
    fn default() -> Self {
        Self {
            bye_points: ByePoints::default(),
            bye_buchholz: ByeBuchholz::default(),
            tiebreaks: default_tiebreaks(),
        }
    }
}

/// Default tiebreak priority chain
pub fn default_tiebreaks() -> Vec<TiebreakKind> {
    vec![
        TiebreakKind::Buchholz,
        TiebreakKind::MedianBuchholz,
        TiebreakKind::SonnebornBerger,
        TiebreakKind::HeadToHead,
        TiebreakKind::MostWins,
    ]
}
