use std::cmp::Ordering;

use super::PlayerStats;
use crate::matches::Match;
use crate::player::Player;

/// Summarises every completed match the player took part in.
///
/// Returns `None` when `player_id` is not on the roster.
pub fn stats_for_player(
    player_id: &str,
    matches: &[Match],
    players: &[Player],
) -> Option<PlayerStats> {
    let player = players.iter().find(|p| p.id == player_id)?;

    let mut stats = PlayerStats {
        player_id: player.id.clone(),
        player_name: player.name.clone(),
        ..PlayerStats::default()
    };

    for record in matches.iter().filter(|m| m.complete) {
        let Some(side) = record.side_of(player_id) else {
            continue;
        };
        let (own, opponent) = record.scores_for(side);

        stats.matches_played += 1;
        stats.goals_scored = stats.goals_scored.saturating_add(own);
        stats.goals_conceded = stats.goals_conceded.saturating_add(opponent);

        match own.cmp(&opponent) {
            Ordering::Greater => stats.wins += 1,
            Ordering::Less => stats.losses += 1,
            Ordering::Equal => stats.draws += 1,
        }
    }

    stats.win_percentage = if stats.matches_played > 0 {
        f64::from(stats.wins) / f64::from(stats.matches_played) * 100.0
    } else {
        0.0
    };

    Some(stats)
}

/// One entry per roster player, in roster order
pub fn stats_for_all_players(matches: &[Match], players: &[Player]) -> Vec<PlayerStats> {
    players
        .iter()
        .filter_map(|p| stats_for_player(&p.id, matches, players))
        .collect()
}
