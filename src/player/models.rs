use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Id used when a match references a player that is no longer on the roster
pub const UNKNOWN_PLAYER_ID: &str = "unknown";
pub const UNKNOWN_PLAYER_NAME: &str = "Unknown Player";

/// Persisted roster entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String, // UUID v4 as string, never changes once assigned
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Player {
    /// Creates a player with the given id, stamped with the current time
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            created_at: Utc::now(),
        }
    }

    /// Stand-in for a player id that no longer resolves
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_PLAYER_ID.to_string(), UNKNOWN_PLAYER_NAME.to_string())
    }

    /// Case-insensitive substring match on the player's name
    pub fn name_matches(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(&term.to_lowercase())
    }
}
