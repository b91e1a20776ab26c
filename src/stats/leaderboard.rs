use super::{LeagueLeaders, PlayerStats};

/// First entry holding the strictly greatest key; earlier entries win ties
fn first_max_by<K: PartialOrd>(
    stats: &[PlayerStats],
    key: impl Fn(&PlayerStats) -> K,
) -> Option<PlayerStats> {
    stats
        .iter()
        .reduce(|best, candidate| {
            if key(candidate) > key(best) {
                candidate
            } else {
                best
            }
        })
        .cloned()
}

/// Highest win percentage
pub fn top_player(stats: &[PlayerStats]) -> Option<PlayerStats> {
    first_max_by(stats, |s| s.win_percentage)
}

/// Most goals scored
pub fn top_scorer(stats: &[PlayerStats]) -> Option<PlayerStats> {
    first_max_by(stats, |s| s.goals_scored)
}

/// Most completed matches
pub fn most_active(stats: &[PlayerStats]) -> Option<PlayerStats> {
    first_max_by(stats, |s| s.matches_played)
}

pub fn leaders(stats: &[PlayerStats]) -> LeagueLeaders {
    LeagueLeaders {
        top_player: top_player(stats),
        top_scorer: top_scorer(stats),
        most_active: most_active(stats),
    }
}

/// League table ordered by win percentage, descending; ties keep input order
pub fn standings(stats: &[PlayerStats]) -> Vec<PlayerStats> {
    let mut table = stats.to_vec();
    table.sort_by(|a, b| b.win_percentage.total_cmp(&a.win_percentage));
    table
}
