//! Statistics derived from the roster and match history.
//!
//! Everything here is a pure fold over borrowed slices: no caching, no I/O and
//! no error paths. Callers recompute on demand.

pub mod aggregator;
pub mod calendar;
pub mod leaderboard;
pub mod models;

pub use aggregator::{stats_for_all_players, stats_for_player};
pub use leaderboard::{leaders, most_active, standings, top_player, top_scorer};
pub use models::{LeagueLeaders, PlayerStats};
