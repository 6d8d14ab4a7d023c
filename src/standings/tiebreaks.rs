use std::collections::HashMap;

use crate::config::ByeBuchholz;
use crate::domain::models::{HalfPoints, PlayerId};
use crate::domain::PlayerCard;

/// Buchholz in half-points: the final scores of all opponents faced,
/// plus the configured bye contribution
pub fn buchholz(
    card: &PlayerCard,
    final_scores: &HashMap<PlayerId, HalfPoints>,
    bye_mode: ByeBuchholz,
) -> i64 {
    opponent_scores(card, final_scores).sum::<i64>() + bye_contribution(card, bye_mode)
}

/// Median Buchholz in half-points: plain Buchholz with the single highest
/// and single lowest opponent score dropped; fewer than 3 opponents falls
/// back to plain Buchholz
pub fn median_buchholz(
    card: &PlayerCard,
    final_scores: &HashMap<PlayerId, HalfPoints>,
    bye_mode: ByeBuchholz,
) -> i64 {
    let mut scores: Vec<HalfPoints> = opponent_scores(card, final_scores).collect();
    if scores.len() < 3 {
        return buchholz(card, final_scores, bye_mode);
    }

    scores.sort_unstable();
    scores[1..scores.len() - 1].iter().sum::<i64>() + bye_contribution(card, bye_mode)
}

/// Sonneborn-Berger in quarter-points: the full final score of every
/// defeated opponent plus half the final score of every drawn opponent.
/// Byes contribute nothing; forfeit wins count as wins.
pub fn sonneborn_berger(
    card: &PlayerCard,
    final_scores: &HashMap<PlayerId, HalfPoints>,
) -> i64 {
    card.entries
        .iter()
        .filter_map(|entry| {
            let opponent = entry.opponent?;
            let opponent_score = final_scores.get(&opponent).copied().unwrap_or(0);
            if entry.is_win() {
                Some(2 * opponent_score)
            } else if entry.is_draw() {
                Some(opponent_score)
            } else {
                None
            }
        })
        .sum()
}

/// Count of decisive non-bye wins, forfeit wins included
pub fn most_wins(card: &PlayerCard) -> i64 {
    card.entries.iter().filter(|e| e.is_win()).count() as i64
}

/// Winner of the most recent decisive game between two players, if any
pub fn head_to_head(a: &PlayerCard, b: &PlayerCard) -> Option<PlayerId> {
    a.entries
        .iter()
        .rev()
        .filter(|e| e.opponent == Some(b.player.id))
        .find_map(|e| {
            if e.is_win() {
                Some(a.player.id)
            } else if e.earned == 0 {
                Some(b.player.id)
            } else {
                None
            }
        })
}

fn opponent_scores<'a>(
    card: &'a PlayerCard,
    final_scores: &'a HashMap<PlayerId, HalfPoints>,
) -> impl Iterator<Item = HalfPoints> + 'a {
    card.opponents()
        .map(|id| final_scores.get(&id).copied().unwrap_or(0))
}

fn bye_contribution(card: &PlayerCard, mode: ByeBuchholz) -> HalfPoints {
    match mode {
        ByeBuchholz::Zero => 0,
        ByeBuchholz::OwnScoreAtTime => card
            .entries
            .iter()
            .filter(|e| e.is_bye())
            .map(|e| card.score_before_round(e.round))
            .sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SwissConfig;
    use crate::domain::build_cards;
    use crate::domain::models::{
        GameRecord, Player, ResultCode, Round, TournamentSnapshot,
    };

    fn player(id: PlayerId, name: &str) -> Player {
        Player {
            id,
            name: name.to_string(),
            rating: 0,
        }
    }

    fn game(white: PlayerId, black: Option<PlayerId>, result: ResultCode) -> GameRecord {
        GameRecord {
            white_id: white,
            black_id: black,
            result,
            board: 0,
        }
    }

    fn round(number: u32, games: Vec<GameRecord>) -> Round {
        Round {
            number,
            games,
            finished_at: None,
        }
    }

    /// 4 players, 3 rounds: 1 beats everyone, 2 beats 3 and 4, 3 beats 4.
    /// Final scores 6, 4, 2, 0 half-points.
    fn sample() -> TournamentSnapshot {
        TournamentSnapshot {
            name: "sample".to_string(),
            start_date: None,
            end_date: None,
            players: vec![
                player(1, "Anna"),
                player(2, "Boris"),
                player(3, "Cleo"),
                player(4, "Dima"),
            ],
            rounds: vec![
                round(1, vec![
                    game(1, Some(2), ResultCode::WhiteWins),
                    game(3, Some(4), ResultCode::WhiteWins),
                ]),
                round(2, vec![
                    game(1, Some(3), ResultCode::WhiteWins),
                    game(2, Some(4), ResultCode::WhiteWins),
                ]),
                round(3, vec![
                    game(1, Some(4), ResultCode::WhiteWins),
                    game(2, Some(3), ResultCode::WhiteWins),
                ]),
            ],
            config: None,
        }
    }

    fn scores(
        cards: &HashMap<PlayerId, crate::domain::PlayerCard>,
    ) -> HashMap<PlayerId, HalfPoints> {
        cards.iter().map(|(&id, c)| (id, c.score)).collect()
    }

    #[test]
    fn buchholz_with_no_games_is_zero() {
        let snap = TournamentSnapshot {
            name: "empty".to_string(),
            start_date: None,
            end_date: None,
            players: vec![player(1, "Anna")],
            rounds: vec![],
            config: None,
        };
        let cards = build_cards(&snap, &SwissConfig::default()).unwrap();
        let finals = scores(&cards);

        assert_eq!(buchholz(&cards[&1], &finals, ByeBuchholz::Zero), 0);
        assert_eq!(sonneborn_berger(&cards[&1], &finals), 0);
        assert_eq!(most_wins(&cards[&1]), 0);
    }

    #[test]
    fn buchholz_sums_final_opponent_scores() {
        let cards = build_cards(&sample(), &SwissConfig::default()).unwrap();
        let finals = scores(&cards);
        // Final scores: 1 -> 6hp, 2 -> 4hp, 3 -> 2hp, 4 -> 0hp
        assert_eq!(buchholz(&cards[&1], &finals, ByeBuchholz::Zero), 4 + 2 + 0);
        assert_eq!(buchholz(&cards[&4], &finals, ByeBuchholz::Zero), 2 + 4 + 6);
    }

    #[test]
    fn median_drops_the_extremes() {
        let cards = build_cards(&sample(), &SwissConfig::default()).unwrap();
        let finals = scores(&cards);
        // Player 4 faced 3 (2hp), 2 (4hp), 1 (6hp); median keeps only 4hp
        assert_eq!(median_buchholz(&cards[&4], &finals, ByeBuchholz::Zero), 4);
    }

    #[test]
    fn median_falls_back_under_three_opponents() {
        let snap = TournamentSnapshot {
            name: "short".to_string(),
            start_date: None,
            end_date: None,
            players: vec![player(1, "Anna"), player(2, "Boris"), player(3, "Cleo")],
            rounds: vec![
                round(1, vec![game(1, Some(2), ResultCode::WhiteWins), game(3, None, ResultCode::Bye)]),
                round(2, vec![game(1, Some(3), ResultCode::WhiteWins), game(2, None, ResultCode::Bye)]),
            ],
        config: None,
        };
        let cards = build_cards(&snap, &SwissConfig::default()).unwrap();
        let finals = scores(&cards);

        let plain = buchholz(&cards[&1], &finals, ByeBuchholz::Zero);
        assert_eq!(median_buchholz(&cards[&1], &finals, ByeBuchholz::Zero), plain);
    }

    #[test]
    fn sonneborn_berger_weights_wins_and_draws() {
        let snap = TournamentSnapshot {
            name: "sb".to_string(),
            start_date: None,
            end_date: None,
            players: vec![player(1, "Anna"), player(2, "Boris"), player(3, "Cleo"), player(4, "Dima")],
            rounds: vec![
                round(1, vec![
                    game(1, Some(2), ResultCode::WhiteWins),
                    game(3, Some(4), ResultCode::Draw),
                ]),
                round(2, vec![
                    game(1, Some(3), ResultCode::Draw),
                    game(2, Some(4), ResultCode::WhiteWins),
                ]),
            ],
            config: None,
        };
        let cards = build_cards(&snap, &SwissConfig::default()).unwrap();
        let finals = scores(&cards);

        // Player 1: beat 2 (final 2hp) and drew 3 (final 2hp)
        // SB = 1.0 + 0.5 = 1.5 points = 6 quarter-points
        assert_eq!(sonneborn_berger(&cards[&1], &finals), 6);
    }

    #[test]
    fn forfeit_wins_count_as_wins() {
        let snap = TournamentSnapshot {
            name: "forfeit".to_string(),
            start_date: None,
            end_date: None,
            players: vec![player(1, "Anna"), player(2, "Boris"), player(3, "Cleo")],
            rounds: vec![round(1, vec![
                game(1, Some(2), ResultCode::ForfeitWhite),
                game(3, None, ResultCode::Bye),
            ])],
            config: None,
        };
        let cards = build_cards(&snap, &SwissConfig::default()).unwrap();

        assert_eq!(most_wins(&cards[&1]), 1);
        assert_eq!(most_wins(&cards[&3]), 0); // bye is not a win
    }

    #[test]
    fn bye_credits_own_score_at_the_time_when_configured() {
        let snap = TournamentSnapshot {
            name: "bye".to_string(),
            start_date: None,
            end_date: None,
            players: vec![player(1, "Anna"), player(2, "Boris"), player(3, "Cleo")],
            rounds: vec![
                round(1, vec![game(1, Some(2), ResultCode::WhiteWins), game(3, None, ResultCode::Bye)]),
                round(2, vec![game(3, Some(2), ResultCode::WhiteWins), game(1, None, ResultCode::Bye)]),
            ],
            config: None,
        };
        let cards = build_cards(&snap, &SwissConfig::default()).unwrap();
        let finals = scores(&cards);

        // Player 1 had 2hp when the round-2 bye arrived
        let own = buchholz(&cards[&1], &finals, ByeBuchholz::OwnScoreAtTime);
        let zero = buchholz(&cards[&1], &finals, ByeBuchholz::Zero);
        assert_eq!(own - zero, 2);

        // Player 3 took the bye in round 1 with nothing on the card yet
        let own3 = buchholz(&cards[&3], &finals, ByeBuchholz::OwnScoreAtTime);
        let zero3 = buchholz(&cards[&3], &finals, ByeBuchholz::Zero);
        assert_eq!(own3, zero3);
    }

    #[test]
    fn head_to_head_finds_the_decisive_game() {
        let cards = build_cards(&sample(), &SwissConfig::default()).unwrap();

        assert_eq!(head_to_head(&cards[&1], &cards[&2]), Some(1));
        assert_eq!(head_to_head(&cards[&2], &cards[&1]), Some(1));
        // 2 beat 3 in round 3
        assert_eq!(head_to_head(&cards[&2], &cards[&3]), Some(2));
    }

    #[test]
    fn drawn_meeting_yields_no_head_to_head() {
        let snap = TournamentSnapshot {
            name: "draw".to_string(),
            start_date: None,
            end_date: None,
            players: vec![player(1, "Anna"), player(2, "Boris")],
            rounds: vec![round(1, vec![game(1, Some(2), ResultCode::Draw)])],
            config: None,
        };
        let cards = build_cards(&snap, &SwissConfig::default()).unwrap();
        assert_eq!(head_to_head(&cards[&1], &cards[&2]), None);
    }
}
