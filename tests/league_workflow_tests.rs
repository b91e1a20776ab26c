mod utils;

use std::sync::Arc;
use std::time::Duration;

use league_tracker::store::{MATCHES_KEY, PLAYERS_KEY};
use league_tracker::timer::{ChannelObserver, TimerEvent};
use league_tracker::{
    AppError, FileBackend, InMemoryBackend, LeagueService, LocalRecordStore, MatchDuration,
    MatchSession, NewMatch, RecordStore, RecordingMode, Side, TimerState,
};
use utils::{RecordingNotifier, TestSetupBuilder};

fn finished(one: &str, two: &str, scores: (u32, u32)) -> NewMatch {
    NewMatch {
        player_one_score: scores.0,
        player_two_score: scores.1,
        complete: true,
        ..NewMatch::in_progress(one.to_string(), two.to_string(), MatchDuration::Ten)
    }
}

#[test]
fn two_player_league_produces_expected_stats() {
    let setup = TestSetupBuilder::new().with_two_players().build();
    let alice = setup.player("Alice").id.clone();
    let bob = setup.player("Bob").id.clone();

    setup.service.add_match(finished(&alice, &bob, (3, 1))).unwrap();
    setup.service.add_match(finished(&alice, &bob, (0, 0))).unwrap();

    let all = setup.service.all_player_stats();
    assert_eq!(all.len(), 2);

    let a = &all[0];
    assert_eq!(a.player_id, alice);
    assert_eq!((a.wins, a.losses, a.draws), (1, 0, 1));
    assert_eq!((a.goals_scored, a.goals_conceded), (3, 1));
    assert_eq!(a.win_percentage, 50.0);

    let b = &all[1];
    assert_eq!((b.wins, b.losses, b.draws), (0, 1, 1));
    assert_eq!((b.goals_scored, b.goals_conceded), (1, 3));
    assert_eq!(b.win_percentage, 0.0);

    assert_eq!(setup.service.all_player_stats(), all);
    assert!(setup.service.player_stats("nonexistent-id").is_none());
}

#[test]
fn quota_failure_is_reported_and_state_kept() {
    let setup = TestSetupBuilder::new().with_two_players().build();
    let alice = setup.player("Alice").id.clone();
    let bob = setup.player("Bob").id.clone();

    setup.store.backend().set_full(true);
    let result = setup.service.add_match(finished(&alice, &bob, (2, 0)));

    assert!(matches!(result, Err(AppError::Storage(_))));
    assert!(setup.service.matches().is_empty());
    assert!(setup.store.list_matches().unwrap().is_empty());

    let errors = setup.notifier.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].description, "Failed to add match.");

    setup.store.backend().set_full(false);
    setup.service.add_match(finished(&alice, &bob, (2, 0))).unwrap();
    assert_eq!(setup.service.matches().len(), 1);
}

#[test]
fn corrupt_storage_loads_as_empty_league() {
    let backend = InMemoryBackend::new()
        .with_entry(PLAYERS_KEY, "not json at all")
        .with_entry(MATCHES_KEY, "[{\"broken\": true}]");
    let store = Arc::new(LocalRecordStore::new(backend));
    let service = LeagueService::load(store, Arc::new(RecordingNotifier::new())).unwrap();

    assert!(service.players().is_empty());
    assert!(service.matches().is_empty());
    assert!(service.all_player_stats().is_empty());
    assert_eq!(service.leaders().top_player, None);
}

#[test]
fn league_survives_restart_on_disk() {
    let dir = std::env::temp_dir().join(format!("league-it-{}", uuid::Uuid::new_v4()));

    let (alice_id, match_count) = {
        let store = Arc::new(LocalRecordStore::new(FileBackend::new(&dir)));
        let service = LeagueService::load(store, Arc::new(RecordingNotifier::new())).unwrap();
        let alice = service.add_player("Alice").unwrap();
        let bob = service.add_player("Bob").unwrap();
        service.add_match(finished(&alice.id, &bob.id, (4, 2))).unwrap();
        (alice.id, service.matches().len())
    };

    let store = Arc::new(LocalRecordStore::new(FileBackend::new(&dir)));
    let reopened = LeagueService::load(store, Arc::new(RecordingNotifier::new())).unwrap();

    assert_eq!(reopened.players().len(), 2);
    assert_eq!(reopened.matches().len(), match_count);
    let alice = reopened.player_stats(&alice_id).unwrap();
    assert_eq!(alice.wins, 1);
    assert_eq!(alice.goals_scored, 4);

    std::fs::remove_dir_all(dir).unwrap();
}

#[tokio::test(start_paused = true)]
async fn timed_match_is_saved_once_when_clock_runs_out() {
    let setup = TestSetupBuilder::new().with_two_players().build();
    let alice = setup.player("Alice").id.clone();
    let bob = setup.player("Bob").id.clone();

    let (observer, mut events) = ChannelObserver::new();
    let mut session = MatchSession::new(
        setup.service.clone(),
        RecordingMode::AppendFinal,
        Duration::from_millis(100),
        Arc::new(observer),
    )
    .unwrap();

    session.select_players(&alice, &bob).unwrap();
    session.set_duration(MatchDuration::Six).unwrap();
    session.start().unwrap();

    session.increment(Side::PlayerTwo).unwrap();
    session.increment(Side::PlayerTwo).unwrap();
    session.increment(Side::PlayerOne).unwrap();

    let mut saved = Vec::new();
    let mut last_remaining = None;
    while let Some(event) = events.recv().await {
        match event {
            TimerEvent::Tick { remaining } => last_remaining = Some(remaining),
            TimerEvent::Completed => {
                assert_eq!(session.timer().state(), TimerState::Completed);
                saved.push(session.complete_on_timeout().unwrap());
                break;
            }
        }
    }

    // Let any further scheduled ticks come due; none may arrive
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert!(events.try_recv().is_err());

    assert_eq!(last_remaining, Some(Duration::ZERO));
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].duration, MatchDuration::Six);
    assert_eq!((saved[0].player_one_score, saved[0].player_two_score), (1, 2));

    let history = setup.service.matches();
    assert_eq!(history.len(), 2, "in-progress and final records are both kept");
    assert_eq!(history.iter().filter(|m| m.complete).count(), 1);

    let bob_stats = setup.service.player_stats(&bob).unwrap();
    assert_eq!(bob_stats.matches_played, 1);
    assert_eq!(bob_stats.wins, 1);
    assert_eq!(bob_stats.win_percentage, 100.0);

    assert!(setup
        .notifier
        .titles()
        .contains(&"Match Time Complete!".to_string()));
}

#[tokio::test(start_paused = true)]
async fn paused_match_resumes_with_remaining_time() {
    let setup = TestSetupBuilder::new().with_two_players().build();
    let alice = setup.player("Alice").id.clone();
    let bob = setup.player("Bob").id.clone();

    let (observer, _events) = ChannelObserver::new();
    let mut session = MatchSession::new(
        setup.service.clone(),
        RecordingMode::ReplaceInProgress,
        Duration::from_millis(100),
        Arc::new(observer),
    )
    .unwrap();
    session.select_players(&alice, &bob).unwrap();
    session.set_duration(MatchDuration::Six).unwrap();
    session.start().unwrap();

    tokio::time::sleep(Duration::from_secs(90)).await;
    session.timer().pause();
    tokio::time::sleep(Duration::from_secs(300)).await;
    session.timer().start();

    assert_eq!(session.timer().remaining(), Duration::from_millis(270_000));
    assert_eq!(session.timer().state(), TimerState::Running);

    let saved = session.finish().unwrap();
    assert_eq!(setup.service.matches(), vec![saved]);
}
