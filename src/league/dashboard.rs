use crate::matches::{Match, MatchWithPlayers};
use crate::player::Player;

/// Number of entries in each "recent"/"highest scoring" list
const HIGHLIGHT_COUNT: usize = 3;

/// Headline numbers and highlights for the league overview
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub total_players: usize,
    pub total_matches: usize,
    pub completed_matches: usize,
    pub latest_match: Option<MatchWithPlayers>,
    pub recent_results: Vec<MatchWithPlayers>,
    pub highest_scoring: Vec<MatchWithPlayers>,
}

impl DashboardSummary {
    pub fn build(players: &[Player], matches: &[Match]) -> Self {
        let mut by_date: Vec<MatchWithPlayers> = matches
            .iter()
            .cloned()
            .map(|m| MatchWithPlayers::resolve(m, players))
            .collect();
        by_date.sort_by(|a, b| b.record.date.cmp(&a.record.date));

        let completed: Vec<&MatchWithPlayers> =
            by_date.iter().filter(|m| m.record.complete).collect();

        let recent_results = completed
            .iter()
            .take(HIGHLIGHT_COUNT)
            .map(|m| (*m).clone())
            .collect();

        let mut highest_scoring: Vec<MatchWithPlayers> =
            completed.iter().map(|m| (*m).clone()).collect();
        highest_scoring.sort_by(|a, b| b.record.total_goals().cmp(&a.record.total_goals()));
        highest_scoring.truncate(HIGHLIGHT_COUNT);

        Self {
            total_players: players.len(),
            total_matches: matches.len(),
            completed_matches: completed.len(),
            latest_match: by_date.first().cloned(),
            recent_results,
            highest_scoring,
        }
    }
}
