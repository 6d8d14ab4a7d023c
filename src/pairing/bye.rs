use log::warn;

use crate::domain::models::PlayerId;
use crate::domain::PlayerCard;

use super::types::Relaxation;

/// Pick the bye recipient from an odd pool.
///
/// Walks the ranking from the bottom (lowest bracket, lowest rank first)
/// and takes the first player without a prior bye. A repeat bye is handed
/// out only when every remaining player has already had one; that case is
/// recorded as a relaxation.
pub fn select_bye(ranked: &[&PlayerCard], relaxations: &mut Vec<Relaxation>) -> PlayerId {
    debug_assert!(ranked.len() % 2 == 1);

    if let Some(card) = ranked.iter().rev().find(|c| c.byes == 0) {
        return card.player.id;
    }

    let last = ranked[ranked.len() - 1];
    warn!(
        "every player already received a bye; assigning a repeat bye to {} ({})",
        last.player.name, last.player.id
    );
    relaxations.push(Relaxation::RepeatBye {
        player: last.player.id,
    });
    last.player.id
}
