pub mod card;
pub mod models;

pub use card::{CardEntry, PlayerCard, build_cards};
pub use models::*;
