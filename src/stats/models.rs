use serde::{Deserialize, Serialize};

/// Per-player summary of completed matches
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub player_id: String,
    pub player_name: String,
    pub matches_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub goals_scored: u32,
    pub goals_conceded: u32,
    pub win_percentage: f64,
}

impl PlayerStats {
    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_scored) - i64::from(self.goals_conceded)
    }
}

/// League-wide leaders, each `None` when the roster is empty
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeagueLeaders {
    pub top_player: Option<PlayerStats>,
    pub top_scorer: Option<PlayerStats>,
    pub most_active: Option<PlayerStats>,
}
