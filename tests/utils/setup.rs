use std::sync::Arc;

use league_tracker::{LeagueService, LocalRecordStore, Player};

use super::mocks::{QuotaBackend, RecordingNotifier};

// ============================================================================
// Test Setup
// ============================================================================

pub struct TestSetup {
    pub service: Arc<LeagueService>,
    pub store: Arc<LocalRecordStore<QuotaBackend>>,
    pub notifier: Arc<RecordingNotifier>,
    pub players: Vec<Player>,
}

impl TestSetup {
    pub fn player(&self, name: &str) -> &Player {
        self.players
            .iter()
            .find(|p| p.name == name)
            .unwrap_or_else(|| panic!("no player named {name} in setup"))
    }
}

pub struct TestSetupBuilder {
    player_names: Vec<String>,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            player_names: Vec::new(),
        }
    }

    pub fn with_player(mut self, name: &str) -> Self {
        self.player_names.push(name.to_string());
        self
    }

    pub fn with_two_players(self) -> Self {
        self.with_player("Alice").with_player("Bob")
    }

    pub fn build(self) -> TestSetup {
        let store = Arc::new(LocalRecordStore::new(QuotaBackend::new()));
        let notifier = Arc::new(RecordingNotifier::new());
        let service = Arc::new(
            LeagueService::load(store.clone(), notifier.clone()).expect("empty store should load"),
        );

        let players = self
            .player_names
            .iter()
            .map(|name| service.add_player(name).expect("player should be added"))
            .collect();

        TestSetup {
            service,
            store,
            notifier,
            players,
        }
    }
}

impl Default for TestSetupBuilder {
    fn default() -> Self {
        Self::new()
    }
}
