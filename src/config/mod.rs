mod settings;

pub use settings::{ByeBuchholz, ByePoints, SwissConfig, TiebreakKind, default_tiebreaks};
