use league_tracker::{
    league::TracingNotifier, timer::format_remaining, AppError, FileBackend, LeagueService,
    LocalRecordStore, TrackerConfig,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AppError> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "league_tracker=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = TrackerConfig::from_env()?;
    info!(
        data_dir = %config.data_dir.display(),
        tick_ms = config.tick_interval.as_millis() as u64,
        recording_mode = ?config.recording_mode,
        "Starting league tracker"
    );

    let store = Arc::new(LocalRecordStore::new(FileBackend::new(&config.data_dir)));
    let service = LeagueService::load(store, Arc::new(TracingNotifier))?;

    let dashboard = service.dashboard();
    info!(
        players = dashboard.total_players,
        matches = dashboard.total_matches,
        completed = dashboard.completed_matches,
        "League overview"
    );

    if let Some(latest) = &dashboard.latest_match {
        info!(
            player_one = %latest.player_one.name,
            player_two = %latest.player_two.name,
            score = %format!("{}-{}", latest.record.player_one_score, latest.record.player_two_score),
            result = %latest.result_label(),
            length = %format_remaining(latest.record.duration.as_duration()),
            "Latest match"
        );
    }

    let leaders = service.leaders();
    match (&leaders.top_player, &leaders.top_scorer, &leaders.most_active) {
        (Some(top), Some(scorer), Some(active)) => info!(
            top_player = %top.player_name,
            win_rate = %format!("{:.1}%", top.win_percentage),
            top_scorer = %scorer.player_name,
            goals = scorer.goals_scored,
            most_active = %active.player_name,
            played = active.matches_played,
            "League leaders"
        ),
        _ => warn!("No players on the roster yet"),
    }

    for (rank, stats) in service.standings().iter().enumerate() {
        info!(
            rank = rank + 1,
            player = %stats.player_name,
            played = stats.matches_played,
            wins = stats.wins,
            draws = stats.draws,
            losses = stats.losses,
            goals_for = stats.goals_scored,
            goals_against = stats.goals_conceded,
            goal_difference = stats.goal_difference(),
            win_rate = %format!("{:.1}%", stats.win_percentage),
            "Standing"
        );
    }

    Ok(())
}
