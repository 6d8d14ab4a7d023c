pub mod brackets;
mod bye;
mod colors;
mod matching;
pub mod types;

pub use types::{Board, Relaxation, RoundPairing};

use std::collections::HashMap;

use log::{info, warn};

use crate::config::SwissConfig;
use crate::domain::models::{Color, PlayerId, TournamentSnapshot};
use crate::domain::{PlayerCard, build_cards};
use crate::errors::SwissError;

use matching::MatchSeed;

/// Generate the pairing list for the next round.
///
/// Pure function of the snapshot: replays the history, assigns the bye if
/// the pool is odd, finds the minimum-cost matching, and settles colors
/// per pair. Every relaxation that was needed is returned for audit and
/// logged; the engine never drops a player from the round.
pub fn generate_round(
    snapshot: &TournamentSnapshot,
    config: &SwissConfig,
) -> Result<RoundPairing, SwissError> {
    let cards = build_cards(snapshot, config)?;
    if cards.len() < 2 {
        return Err(SwissError::InsufficientPlayers);
    }

    let round = snapshot.next_round_number();
    let mut relaxations = Vec::new();
    let mut ranked = brackets::ranked_cards(&cards);

    let bye_player = assign_bye(&mut ranked, &mut relaxations);

    let seeds: Vec<MatchSeed> = ranked
        .iter()
        .map(|card| MatchSeed {
            id: card.player.id,
            score: card.score,
        })
        .collect();
    let played = played_matrix(&ranked);

    let matching =
        matching::find_matching(&seeds, &played).ok_or(SwissError::ConstraintUnsatisfiable)?;

    let mut boards = build_boards(&ranked, &matching.pairs, &mut relaxations);
    if let Some(player) = bye_player {
        boards.push(Board {
            board: boards.len() as u32 + 1,
            white: player,
            black: None,
        });
    }

    info!(
        "round {}: {} boards, {} relaxation(s) applied",
        round,
        boards.len(),
        relaxations.len()
    );

    Ok(RoundPairing {
        round,
        boards,
        relaxations,
    })
}

/// Remove the bye recipient from an odd pool; even pools are untouched
fn assign_bye(
    ranked: &mut Vec<&PlayerCard>,
    relaxations: &mut Vec<Relaxation>,
) -> Option<PlayerId> {
    if ranked.len() % 2 == 0 {
        return None;
    }

    let player = bye::select_bye(ranked, relaxations);
    ranked.retain(|card| card.player.id != player);
    Some(player)
}

fn played_matrix(ranked: &[&PlayerCard]) -> Vec<Vec<bool>> {
    let index: HashMap<PlayerId, usize> = ranked
        .iter()
        .enumerate()
        .map(|(idx, card)| (card.player.id, idx))
        .collect();

    let mut played = vec![vec![false; ranked.len()]; ranked.len()];
    for (i, card) in ranked.iter().enumerate() {
        for opponent in card.opponents() {
            if let Some(&j) = index.get(&opponent) {
                played[i][j] = true;
            }
        }
    }
    played
}

/// Settle colors and board numbers; pairs arrive strongest-first
fn build_boards(
    ranked: &[&PlayerCard],
    pairs: &[(usize, usize)],
    relaxations: &mut Vec<Relaxation>,
) -> Vec<Board> {
    let mut boards = Vec::with_capacity(pairs.len() + 1);

    for (idx, &(i, j)) in pairs.iter().enumerate() {
        let higher = ranked[i];
        let lower = ranked[j];
        let board = idx as u32 + 1;

        let (higher_color, conflict) = colors::assign_colors(higher, lower);
        let (white, black) = match higher_color {
            Color::White => (higher.player.id, lower.player.id),
            Color::Black => (lower.player.id, higher.player.id),
        };

        if higher.score != lower.score {
            warn!(
                "board {board}: {} floats to meet {} across brackets",
                higher.player.name, lower.player.name
            );
            relaxations.push(Relaxation::Float {
                player: higher.player.id,
                opponent: lower.player.id,
            });
        }
        if higher.has_played(lower.player.id) {
            warn!(
                "board {board}: repeat pairing of {} and {}, no alternative remained",
                higher.player.name, lower.player.name
            );
            relaxations.push(Relaxation::RepeatPairing { white, black });
        }
        if conflict {
            warn!("board {board}: both players due the same color, {black} concedes");
            relaxations.push(Relaxation::ColorConflict { white, black });
        }

        boards.push(Board {
            board,
            white,
            black: Some(black),
        });
    }

    boards
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{GameRecord, Player, ResultCode, Round};

    fn player(id: PlayerId, name: &str, rating: u32) -> Player {
        Player {
            id,
            name: name.to_string(),
            rating,
        }
    }

    fn snapshot(players: Vec<Player>, rounds: Vec<Round>) -> TournamentSnapshot {
        TournamentSnapshot {
            name: "test".to_string(),
            start_date: None,
            end_date: None,
            players,
            rounds,
            config: None,
        }
    }

    #[test]
    fn first_round_folds_by_rating_and_gives_white_to_the_higher_seed() {
        let snap = snapshot(
            vec![
                player(1, "Anna", 2000),
                player(2, "Boris", 1900),
                player(3, "Cleo", 1800),
                player(4, "Dima", 1700),
            ],
            vec![],
        );

        let pairing = generate_round(&snap, &SwissConfig::default()).unwrap();
        assert_eq!(pairing.round, 1);
        assert_eq!(pairing.boards.len(), 2);
        assert_eq!(pairing.boards[0], Board { board: 1, white: 1, black: Some(3) });
        assert_eq!(pairing.boards[1], Board { board: 2, white: 2, black: Some(4) });
        assert!(pairing.relaxations.is_empty());
    }

    #[test]
    fn odd_pool_sends_the_bye_to_the_bottom() {
        let snap = snapshot(
            vec![
                player(1, "Anna", 2000),
                player(2, "Boris", 1900),
                player(3, "Cleo", 1800),
                player(4, "Dima", 1700),
                player(5, "Edgar", 1600),
            ],
            vec![],
        );

        let pairing = generate_round(&snap, &SwissConfig::default()).unwrap();
        assert_eq!(pairing.bye(), Some(5));

        let bye_board = pairing.boards.last().unwrap();
        assert_eq!(bye_board.board, 3);
        assert_eq!(bye_board.black, None);
    }

    #[test]
    fn one_player_is_not_enough() {
        let snap = snapshot(vec![player(1, "Anna", 2000)], vec![]);
        let err = generate_round(&snap, &SwissConfig::default()).unwrap_err();
        assert!(matches!(err, SwissError::InsufficientPlayers));
    }

    #[test]
    fn no_player_is_ever_dropped_from_the_round() {
        let snap = snapshot(
            (1..=7)
                .map(|id| player(id, &format!("p{id}"), 1500 + id as u32))
                .collect(),
            vec![],
        );

        let pairing = generate_round(&snap, &SwissConfig::default()).unwrap();
        let mut seen: Vec<PlayerId> = pairing
            .boards
            .iter()
            .flat_map(|b| [Some(b.white), b.black])
            .flatten()
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, (1..=7).collect::<Vec<_>>());
    }

    #[test]
    fn second_round_pairs_winners_and_losers_within_brackets() {
        // Round 1: 1 beats 3, 2 beats 4. Round 2 keeps both brackets intact.
        let snap = snapshot(
            vec![
                player(1, "Anna", 2000),
                player(2, "Boris", 1900),
                player(3, "Cleo", 1800),
                player(4, "Dima", 1700),
            ],
            vec![Round {
                number: 1,
                games: vec![
                    GameRecord { white_id: 1, black_id: Some(3), result: ResultCode::WhiteWins, board: 1 },
                    GameRecord { white_id: 2, black_id: Some(4), result: ResultCode::WhiteWins, board: 2 },
                ],
                finished_at: None,
            }],
        );

        let pairing = generate_round(&snap, &SwissConfig::default()).unwrap();
        // Winners 1 and 2 meet, losers 3 and 4 meet; no floats needed
        assert!(pairing.relaxations.is_empty());

        let opponents: Vec<(PlayerId, Option<PlayerId>)> = pairing
            .boards
            .iter()
            .map(|b| (b.white.min(b.black.unwrap()), Some(b.white.max(b.black.unwrap()))))
            .collect();
        assert!(opponents.contains(&(1, Some(2))));
        assert!(opponents.contains(&(3, Some(4))));
    }
}
