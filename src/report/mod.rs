use colored::Colorize;

use crate::domain::models::{PlayerId, TournamentSnapshot};
use crate::pairing::RoundPairing;
use crate::standings::StandingsEntry;

/// Render a round's pairing list as a text table
pub fn render_pairings(snapshot: &TournamentSnapshot, pairing: &RoundPairing) -> String {
    let mut out = String::new();

    let title = format!("=== {} — Round {} ===", snapshot.name, pairing.round);
    out.push_str(&format!("{}\n\n", title.bold()));
    out.push_str(&format!("{:<6} {:<24} {:<24}\n", "Board", "White", "Black"));
    out.push_str(&"-".repeat(56));
    out.push('\n');

    for board in &pairing.boards {
        let white = display_name(snapshot, board.white);
        let black = match board.black {
            Some(id) => display_name(snapshot, id),
            None => "BYE".yellow().to_string(),
        };
        out.push_str(&format!("{:<6} {:<24} {:<24}\n", board.board, white, black));
    }

    if !pairing.relaxations.is_empty() {
        out.push_str(&format!(
            "\n{} relaxation(s) applied: {:?}\n",
            pairing.relaxations.len(),
            pairing.relaxations
        ));
    }

    out
}

/// Render the standings table with its tiebreak columns
pub fn render_standings(snapshot: &TournamentSnapshot, entries: &[StandingsEntry]) -> String {
    let mut out = String::new();

    let title = format!("=== {} — Standings ===", snapshot.name);
    out.push_str(&format!("{}\n\n", title.bold()));

    out.push_str(&format!("{:<5} {:<24} {:>7} {:>6}", "Rank", "Name", "Rating", "Pts"));
    if let Some(first) = entries.first() {
        for tiebreak in &first.tiebreaks {
            out.push_str(&format!(" {:>8}", tiebreak.kind.label()));
        }
    }
    out.push('\n');
    out.push_str(&"-".repeat(60));
    out.push('\n');

    for entry in entries {
        out.push_str(&format!(
            "{:<5} {:<24} {:>7} {:>6.1}",
            entry.rank, entry.name, entry.rating, entry.score
        ));
        for tiebreak in &entry.tiebreaks {
            out.push_str(&format!(" {:>8.2}", tiebreak.value));
        }
        out.push('\n');
    }

    out
}

fn display_name(snapshot: &TournamentSnapshot, id: PlayerId) -> String {
    snapshot
        .player(id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| format!("#{id}"))
}
