use std::collections::{HashMap, HashSet};

use crate::config::SwissConfig;
use crate::errors::SwissError;

use super::models::{
    Color, DRAW_HALF, GameRecord, HalfPoints, Player, PlayerId, Round, TournamentSnapshot, WIN,
};

/// One row of a player's tournament card
#[derive(Debug, Clone)]
pub struct CardEntry {
    pub round: u32,
    /// None for a bye
    pub opponent: Option<PlayerId>,
    /// None for a bye
    pub color: Option<Color>,
    /// Half-points earned in this round
    pub earned: HalfPoints,
}

impl CardEntry {
    pub fn is_bye(&self) -> bool {
        self.opponent.is_none()
    }

    /// Decisive win over a real opponent (forfeit wins included)
    pub fn is_win(&self) -> bool {
        self.opponent.is_some() && self.earned == WIN
    }

    pub fn is_draw(&self) -> bool {
        self.opponent.is_some() && self.earned == DRAW_HALF
    }
}

/// Derived per-player view of the result history.
///
/// Cards are recomputed from the snapshot on every call; they are views,
/// never independently mutated state.
#[derive(Debug, Clone)]
pub struct PlayerCard {
    pub player: Player,
    pub score: HalfPoints,
    pub entries: Vec<CardEntry>,
    pub byes: u32,
    pub whites: u32,
    pub blacks: u32,
}

impl PlayerCard {
    fn new(player: Player) -> Self {
        Self {
            player,
            score: 0,
            entries: Vec::new(),
            byes: 0,
            whites: 0,
            blacks: 0,
        }
    }

    fn record(&mut self, entry: CardEntry) {
        self.score += entry.earned;
        if entry.is_bye() {
            self.byes += 1;
        }
        match entry.color {
            Some(Color::White) => self.whites += 1,
            Some(Color::Black) => self.blacks += 1,
            None => {}
        }
        self.entries.push(entry);
    }

    pub fn has_played(&self, other: PlayerId) -> bool {
        self.entries.iter().any(|e| e.opponent == Some(other))
    }

    pub fn opponents(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.entries.iter().filter_map(|e| e.opponent)
    }

    /// Lifetime whites minus blacks
    pub fn color_imbalance(&self) -> i32 {
        self.whites as i32 - self.blacks as i32
    }

    /// Trailing run of identical colors, byes skipped
    pub fn color_streak(&self) -> Option<(Color, u32)> {
        let mut colors = self.entries.iter().rev().filter_map(|e| e.color);
        let last = colors.next()?;
        let mut run = 1;
        for color in colors {
            if color != last {
                break;
            }
            run += 1;
        }
        Some((last, run))
    }

    /// Most recent round played with the given color
    pub fn last_round_with(&self, color: Color) -> Option<u32> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.color == Some(color))
            .map(|e| e.round)
    }

    /// Cumulative score before the given round was played
    pub fn score_before_round(&self, round: u32) -> HalfPoints {
        self.entries
            .iter()
            .filter(|e| e.round < round)
            .map(|e| e.earned)
            .sum()
    }
}

/// Replay the result history into per-player cards.
///
/// This is the validation boundary for the whole core: unknown ids,
/// structurally impossible records, and double-booked players are rejected
/// here before any algorithm runs.
pub fn build_cards(
    snapshot: &TournamentSnapshot,
    config: &SwissConfig,
) -> Result<HashMap<PlayerId, PlayerCard>, SwissError> {
    let mut cards = seed_cards(&snapshot.players)?;
    let bye_half_points = config.bye_points.half_points();

    for round in &snapshot.rounds {
        replay_round(&mut cards, round, bye_half_points)?;
    }

    Ok(cards)
}

fn seed_cards(players: &[Player]) -> Result<HashMap<PlayerId, PlayerCard>, SwissError> {
    let mut cards = HashMap::with_capacity(players.len());

    for player in players {
        if cards
            .insert(player.id, PlayerCard::new(player.clone()))
            .is_some()
        {
            return Err(SwissError::DuplicatePlayer(player.id));
        }
    }

    Ok(cards)
}

fn replay_round(
    cards: &mut HashMap<PlayerId, PlayerCard>,
    round: &Round,
    bye_half_points: HalfPoints,
) -> Result<(), SwissError> {
    let mut booked = HashSet::new();
    let mut byes_seen = 0;

    for game in &round.games {
        validate_game(cards, round.number, game)?;
        book_player(&mut booked, round.number, game.white_id)?;

        let (white_earned, black_earned) = game.result.deltas(bye_half_points);

        match game.black_id {
            Some(black_id) => {
                book_player(&mut booked, round.number, black_id)?;
                record_entry(cards, game.white_id, round.number, Some(black_id),
                    Some(Color::White), white_earned);
                record_entry(cards, black_id, round.number, Some(game.white_id),
                    Some(Color::Black), black_earned);
            }
            None => {
                byes_seen += 1;
                if byes_seen > 1 {
                    return Err(SwissError::InvalidResult {
                        round: round.number,
                        detail: "more than one bye assigned in the round".to_string(),
                    });
                }
                record_entry(cards, game.white_id, round.number, None, None, white_earned);
            }
        }
    }

    Ok(())
}

fn validate_game(
    cards: &HashMap<PlayerId, PlayerCard>,
    round: u32,
    game: &GameRecord,
) -> Result<(), SwissError> {
    check_known(cards, round, game.white_id)?;
    if let Some(black_id) = game.black_id {
        check_known(cards, round, black_id)?;
    }

    match (game.black_id, game.result.is_bye()) {
        (Some(black_id), true) => Err(SwissError::InvalidResult {
            round,
            detail: format!("bye recorded against opponent {black_id}"),
        }),
        (None, false) => Err(SwissError::InvalidResult {
            round,
            detail: format!("game for player {} has no opponent", game.white_id),
        }),
        (Some(black_id), false) if black_id == game.white_id => {
            Err(SwissError::InvalidResult {
                round,
                detail: format!("player {} paired against themselves", game.white_id),
            })
        }
        _ => Ok(()),
    }
}

fn check_known(
    cards: &HashMap<PlayerId, PlayerCard>,
    round: u32,
    player: PlayerId,
) -> Result<(), SwissError> {
    if cards.contains_key(&player) {
        Ok(())
    } else {
        Err(SwissError::UnknownPlayer { round, player })
    }
}

fn book_player(
    booked: &mut HashSet<PlayerId>,
    round: u32,
    player: PlayerId,
) -> Result<(), SwissError> {
    if booked.insert(player) {
        Ok(())
    } else {
        Err(SwissError::InvalidResult {
            round,
            detail: format!("player {player} appears twice in the round"),
        })
    }
}

fn record_entry(
    cards: &mut HashMap<PlayerId, PlayerCard>,
    player: PlayerId,
    round: u32,
    opponent: Option<PlayerId>,
    color: Option<Color>,
    earned: HalfPoints,
) {
    // Ids were validated against the card map before this point
    if let Some(card) = cards.get_mut(&player) {
        card.record(CardEntry {
            round,
            opponent,
            color,
            earned,
        });
    }
}
