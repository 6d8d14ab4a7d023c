pub mod tiebreaks;
mod types;

pub use types::{StandingsEntry, TiebreakValue};

use std::collections::HashMap;

use log::info;

use crate::config::{SwissConfig, TiebreakKind};
use crate::domain::models::{HalfPoints, PlayerId, TournamentSnapshot, points};
use crate::domain::{PlayerCard, build_cards};
use crate::errors::SwissError;
use crate::pairing::brackets;

/// Compute the ranked standings table with the configured tiebreak chain.
///
/// Deterministic and idempotent: recomputing from the same snapshot yields
/// identical output. Primary key is cumulative score; remaining ties break
/// by rating descending, then name, then id, so the order is always total.
pub fn compute_standings(
    snapshot: &TournamentSnapshot,
    config: &SwissConfig,
) -> Result<Vec<StandingsEntry>, SwissError> {
    let cards = build_cards(snapshot, config)?;
    let final_scores: HashMap<PlayerId, HalfPoints> =
        cards.iter().map(|(&id, card)| (id, card.score)).collect();

    let mut rows: Vec<Row> = cards
        .values()
        .map(|card| Row {
            keys: tiebreak_keys(card, &final_scores, config),
            card,
        })
        .collect();

    rows.sort_by(|a, b| {
        b.card
            .score
            .cmp(&a.card.score)
            .then_with(|| b.keys.cmp(&a.keys))
            .then_with(|| brackets::bracket_order(a.card, b.card))
    });

    apply_head_to_head(&mut rows, &config.tiebreaks);

    info!(
        "standings over {} players after {} round(s)",
        rows.len(),
        snapshot.rounds.len()
    );

    Ok(build_entries(&rows, &final_scores, config))
}

struct Row<'a> {
    card: &'a PlayerCard,
    /// Scaled integer key per configured tiebreak; head-to-head slots are
    /// neutral here and resolved in a separate pass
    keys: Vec<i64>,
}

fn tiebreak_keys(
    card: &PlayerCard,
    final_scores: &HashMap<PlayerId, HalfPoints>,
    config: &SwissConfig,
) -> Vec<i64> {
    config
        .tiebreaks
        .iter()
        .map(|kind| match kind {
            TiebreakKind::Buchholz => {
                tiebreaks::buchholz(card, final_scores, config.bye_buchholz)
            }
            TiebreakKind::MedianBuchholz => {
                tiebreaks::median_buchholz(card, final_scores, config.bye_buchholz)
            }
            TiebreakKind::SonnebornBerger => tiebreaks::sonneborn_berger(card, final_scores),
            TiebreakKind::HeadToHead => 0,
            TiebreakKind::MostWins => tiebreaks::most_wins(card),
        })
        .collect()
}

/// Apply the head-to-head tiebreak at its position in the chain.
///
/// Only groups of exactly two players still tied on the score and every
/// earlier tiebreak are touched; pairwise results give no total order
/// among three or more.
fn apply_head_to_head(rows: &mut [Row], chain: &[TiebreakKind]) {
    for (position, kind) in chain.iter().enumerate() {
        if *kind != TiebreakKind::HeadToHead {
            continue;
        }

        let mut start = 0;
        while start < rows.len() {
            let size = rows[start..]
                .iter()
                .take_while(|row| tied_through(row, &rows[start], position))
                .count();

            if size == 2 {
                order_pair_by_meeting(rows, start);
            }
            start += size;
        }
    }
}

fn tied_through(a: &Row, b: &Row, position: usize) -> bool {
    a.card.score == b.card.score && a.keys[..position] == b.keys[..position]
}

fn order_pair_by_meeting(rows: &mut [Row], start: usize) {
    let winner = tiebreaks::head_to_head(rows[start].card, rows[start + 1].card);
    if winner == Some(rows[start + 1].card.player.id) {
        rows.swap(start, start + 1);
    }
}

fn build_entries(
    rows: &[Row],
    final_scores: &HashMap<PlayerId, HalfPoints>,
    config: &SwissConfig,
) -> Vec<StandingsEntry> {
    rows.iter()
        .enumerate()
        .map(|(idx, row)| StandingsEntry {
            rank: idx as u32 + 1,
            player_id: row.card.player.id,
            name: row.card.player.name.clone(),
            rating: row.card.player.rating,
            score: points(row.card.score),
            tiebreaks: display_values(row, final_scores, config),
        })
        .collect()
}

/// Numeric tiebreaks in chain order; head-to-head is positional and
/// carries no value
fn display_values(
    row: &Row,
    final_scores: &HashMap<PlayerId, HalfPoints>,
    config: &SwissConfig,
) -> Vec<TiebreakValue> {
    config
        .tiebreaks
        .iter()
        .zip(&row.keys)
        .filter_map(|(kind, &key)| {
            let value = match kind {
                TiebreakKind::Buchholz | TiebreakKind::MedianBuchholz => points(key),
                TiebreakKind::SonnebornBerger => key as f64 / 4.0,
                TiebreakKind::MostWins => key as f64,
                TiebreakKind::HeadToHead => return None,
            };
            Some(TiebreakValue { kind: *kind, value })
        })
        .collect()
}
