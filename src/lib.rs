// Library crate for the league tracker
// This file exposes the public API for the binary and integration tests

pub mod config;
pub mod league;
pub mod matches;
pub mod player;
pub mod shared;
pub mod stats;
pub mod store;
pub mod timer;

// Re-export commonly used types for easier access in tests
pub use config::TrackerConfig;
pub use league::{LeagueService, MatchSession, Notification, Notifier, RecordingMode};
pub use matches::{Match, MatchDuration, NewMatch, Side};
pub use player::Player;
pub use shared::AppError;
pub use stats::{LeagueLeaders, PlayerStats};
pub use store::{FileBackend, InMemoryBackend, LocalRecordStore, RecordStore};
pub use timer::{MatchTimer, TimerObserver, TimerState};
