use std::cmp::Ordering;
use std::collections::HashMap;

use crate::domain::models::PlayerId;
use crate::domain::PlayerCard;

/// Total intra-bracket order: rating descending, then name ascending,
/// then id ascending.
///
/// Every sort step in the engine goes through this or through
/// [`ranking_order`]; nothing may depend on hash-map iteration order.
pub fn bracket_order(a: &PlayerCard, b: &PlayerCard) -> Ordering {
    b.player
        .rating
        .cmp(&a.player.rating)
        .then_with(|| a.player.name.cmp(&b.player.name))
        .then_with(|| a.player.id.cmp(&b.player.id))
}

/// Global order: score descending, then the intra-bracket order
pub fn ranking_order(a: &PlayerCard, b: &PlayerCard) -> Ordering {
    b.score.cmp(&a.score).then_with(|| bracket_order(a, b))
}

/// All players in global rank order, best first.
///
/// Score brackets are the contiguous equal-score runs of this ordering;
/// the matching search reads them off directly.
pub fn ranked_cards(cards: &HashMap<PlayerId, PlayerCard>) -> Vec<&PlayerCard> {
    let mut ranked: Vec<&PlayerCard> = cards.values().collect();
    ranked.sort_by(|a, b| ranking_order(a, b));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{HalfPoints, Player};

    fn card(id: PlayerId, name: &str, rating: u32, score: HalfPoints) -> PlayerCard {
        let mut card = PlayerCard {
            player: Player {
                id,
                name: name.to_string(),
                rating,
            },
            score: 0,
            entries: Vec::new(),
            byes: 0,
            whites: 0,
            blacks: 0,
        };
        card.score = score;
        card
    }

    #[test]
    fn ranking_is_score_then_rating_then_name_then_id() {
        let cards: HashMap<PlayerId, PlayerCard> = [
            card(1, "Boris", 1700, 2),
            card(2, "Anna", 1700, 2),
            card(3, "Cleo", 1900, 2),
            card(4, "Dima", 1200, 4),
        ]
        .into_iter()
        .map(|c| (c.player.id, c))
        .collect();

        let ranked = ranked_cards(&cards);
        let ids: Vec<PlayerId> = ranked.iter().map(|c| c.player.id).collect();
        assert_eq!(ids, vec![4, 3, 2, 1]);
    }

    #[test]
    fn equal_players_order_by_id() {
        let cards: HashMap<PlayerId, PlayerCard> = [
            card(7, "Same", 1500, 2),
            card(3, "Same", 1500, 2),
        ]
        .into_iter()
        .map(|c| (c.player.id, c))
        .collect();

        let ranked = ranked_cards(&cards);
        assert_eq!(ranked[0].player.id, 3);
    }
}
