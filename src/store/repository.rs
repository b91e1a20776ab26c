use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::{IdGenerator, KeyValueBackend, StoreError, UuidIdGenerator};
use crate::matches::{Match, NewMatch};
use crate::player::Player;

/// Collection key holding the roster
pub const PLAYERS_KEY: &str = "efootball-tracker-players";
/// Collection key holding the match history
pub const MATCHES_KEY: &str = "efootball-tracker-matches";

/// Trait for player and match persistence
///
/// Every operation is synchronous and rewrites the whole collection it touches.
pub trait RecordStore: Send + Sync {
    fn list_players(&self) -> Result<Vec<Player>, StoreError>;
    fn list_matches(&self) -> Result<Vec<Match>, StoreError>;

    /// Creates a player with a fresh id and appends it to the roster
    fn add_player(&self, name: &str) -> Result<Player, StoreError>;
    /// Replaces the player with the same id, or appends it if absent
    fn save_player(&self, player: &Player) -> Result<(), StoreError>;
    fn remove_player(&self, player_id: &str) -> Result<(), StoreError>;

    /// Assigns a fresh id and appends the match to the history
    fn add_match(&self, new_match: NewMatch) -> Result<Match, StoreError>;
    /// Replaces the match with the same id, or appends it if absent
    fn save_match(&self, record: &Match) -> Result<(), StoreError>;
    fn remove_match(&self, match_id: &str) -> Result<(), StoreError>;
}

/// Record store over a local key-value backend, one JSON array per collection
pub struct LocalRecordStore<B> {
    backend: B,
    id_generator: Arc<dyn IdGenerator>,
}

impl<B: KeyValueBackend> LocalRecordStore<B> {
    pub fn new(backend: B) -> Self {
        Self::with_id_generator(backend, Arc::new(UuidIdGenerator::new()))
    }

    pub fn with_id_generator(backend: B, id_generator: Arc<dyn IdGenerator>) -> Self {
        Self {
            backend,
            id_generator,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Loads a collection; a missing key is empty and a corrupt payload degrades to empty
    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, StoreError> {
        let Some(raw) = self.backend.read(key)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(records) => {
                debug!(key = %key, count = records.len(), "Loaded collection");
                Ok(records)
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Stored collection is malformed, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    fn persist<T: Serialize>(&self, key: &str, records: &[T]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(records)?;
        self.backend.write(key, &raw)
    }
}

fn upsert<T: Clone>(records: &mut Vec<T>, record: &T, same_id: impl Fn(&T) -> bool) {
    match records.iter().position(same_id) {
        Some(index) => records[index] = record.clone(),
        None => records.push(record.clone()),
    }
}

impl<B: KeyValueBackend> RecordStore for LocalRecordStore<B> {
    fn list_players(&self) -> Result<Vec<Player>, StoreError> {
        self.load(PLAYERS_KEY)
    }

    fn list_matches(&self) -> Result<Vec<Match>, StoreError> {
        self.load(MATCHES_KEY)
    }

    #[instrument(skip(self))]
    fn add_player(&self, name: &str) -> Result<Player, StoreError> {
        let mut players = self.list_players()?;
        let player = Player::new(self.id_generator.generate(), name.to_string());
        players.push(player.clone());
        self.persist(PLAYERS_KEY, &players)?;

        info!(player_id = %player.id, name = %player.name, "Player stored");
        Ok(player)
    }

    #[instrument(skip(self, player), fields(player_id = %player.id))]
    fn save_player(&self, player: &Player) -> Result<(), StoreError> {
        let mut players = self.list_players()?;
        upsert(&mut players, player, |p| p.id == player.id);
        self.persist(PLAYERS_KEY, &players)
    }

    #[instrument(skip(self))]
    fn remove_player(&self, player_id: &str) -> Result<(), StoreError> {
        let mut players = self.list_players()?;
        players.retain(|p| p.id != player_id);
        self.persist(PLAYERS_KEY, &players)
    }

    #[instrument(skip(self, new_match))]
    fn add_match(&self, new_match: NewMatch) -> Result<Match, StoreError> {
        let mut matches = self.list_matches()?;
        let record = new_match.with_id(self.id_generator.generate());
        matches.push(record.clone());
        self.persist(MATCHES_KEY, &matches)?;

        info!(
            match_id = %record.id,
            complete = record.complete,
            "Match stored"
        );
        Ok(record)
    }

    #[instrument(skip(self, record), fields(match_id = %record.id))]
    fn save_match(&self, record: &Match) -> Result<(), StoreError> {
        let mut matches = self.list_matches()?;
        upsert(&mut matches, record, |m| m.id == record.id);
        self.persist(MATCHES_KEY, &matches)
    }

    #[instrument(skip(self))]
    fn remove_match(&self, match_id: &str) -> Result<(), StoreError> {
        let mut matches = self.list_matches()?;
        matches.retain(|m| m.id != match_id);
        self.persist(MATCHES_KEY, &matches)
    }
}
