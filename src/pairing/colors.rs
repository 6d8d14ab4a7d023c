use crate::domain::models::Color;
use crate::domain::PlayerCard;

/// Decide colors for a confirmed pair; `higher` outranks `lower`.
///
/// Returns the color for `higher` plus a flag set when both players were
/// due the same color and one had to concede. Rule chain: a two-game
/// same-color streak forces the other color; otherwise lifetime white/black
/// counts are equalized; on identical state, white goes to the player who
/// had black more recently; the final fallback gives white to `higher`.
pub fn assign_colors(higher: &PlayerCard, lower: &PlayerCard) -> (Color, bool) {
    match (demanded(higher), demanded(lower)) {
        (Some(a), Some(b)) if a != b => (a, false),
        (Some(color), Some(_)) => (resolve_same_demand(higher, lower, color), true),
        (Some(a), None) => (a, false),
        (None, Some(b)) => (b.other(), false),
        (None, None) => (balance(higher, lower), false),
    }
}

/// Color a player must receive to avoid a third consecutive identical color
fn demanded(card: &PlayerCard) -> Option<Color> {
    match card.color_streak() {
        Some((color, run)) if run >= 2 => Some(color.other()),
        _ => None,
    }
}

/// Both players demand `color`: the more overdue one gets it
fn resolve_same_demand(higher: &PlayerCard, lower: &PlayerCard, color: Color) -> Color {
    let higher_need = need(higher, color);
    let lower_need = need(lower, color);

    if higher_need > lower_need {
        color
    } else if lower_need > higher_need {
        color.other()
    } else {
        white_to_most_recent_black(higher, lower)
    }
}

/// How overdue a player is for `color`, from the lifetime imbalance
fn need(card: &PlayerCard, color: Color) -> i32 {
    match color {
        Color::Black => card.color_imbalance(),
        Color::White => -card.color_imbalance(),
    }
}

/// Neither player is forced: equalize lifetime counts
fn balance(higher: &PlayerCard, lower: &PlayerCard) -> Color {
    let higher_imbalance = higher.color_imbalance();
    let lower_imbalance = lower.color_imbalance();

    if higher_imbalance > lower_imbalance {
        Color::Black
    } else if lower_imbalance > higher_imbalance {
        Color::White
    } else {
        white_to_most_recent_black(higher, lower)
    }
}

/// Identical imbalance and streak state: white goes to whoever had black
/// more recently; `higher` takes white when even that ties
fn white_to_most_recent_black(higher: &PlayerCard, lower: &PlayerCard) -> Color {
    let higher_black = last_black(higher);
    let lower_black = last_black(lower);

    if lower_black > higher_black {
        Color::Black
    } else {
        Color::White
    }
}

fn last_black(card: &PlayerCard) -> i64 {
    card.last_round_with(Color::Black)
        .map(i64::from)
        .unwrap_or(-1)
}
