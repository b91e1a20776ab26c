pub mod models;

pub use models::{Match, MatchDuration, MatchWithPlayers, NewMatch, Side};
