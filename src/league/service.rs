use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};
use tracing::{debug, info, instrument, warn};

use super::{DashboardSummary, Notification, Notifier};
use crate::matches::{Match, MatchWithPlayers, NewMatch};
use crate::player::Player;
use crate::shared::AppError;
use crate::stats::{self, calendar, LeagueLeaders, PlayerStats};
use crate::store::{RecordStore, StoreError};

#[derive(Debug, Default)]
struct Snapshot {
    players: Vec<Player>,
    matches: Vec<Match>,
}

/// Service for roster and match management plus derived league views.
///
/// Holds the last successfully loaded copy of both collections. Writes go to
/// the store first; the copy is only replaced after the write and a reload both
/// succeed, so a storage failure leaves it untouched.
pub struct LeagueService {
    store: Arc<dyn RecordStore>,
    notifier: Arc<dyn Notifier>,
    snapshot: RwLock<Snapshot>,
}

impl LeagueService {
    /// Creates the service and loads the current collections
    pub fn load(
        store: Arc<dyn RecordStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, AppError> {
        let service = Self {
            store,
            notifier,
            snapshot: RwLock::new(Snapshot::default()),
        };
        service.refresh()?;
        Ok(service)
    }

    fn snapshot(&self) -> RwLockReadGuard<'_, Snapshot> {
        self.snapshot.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_store(&self) -> Result<Snapshot, StoreError> {
        Ok(Snapshot {
            players: self.store.list_players()?,
            matches: self.store.list_matches()?,
        })
    }

    /// Reloads both collections from the store
    #[instrument(skip(self))]
    pub fn refresh(&self) -> Result<(), AppError> {
        match self.read_store() {
            Ok(loaded) => {
                debug!(
                    players = loaded.players.len(),
                    matches = loaded.matches.len(),
                    "League data loaded"
                );
                *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = loaded;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to load league data");
                self.notifier
                    .notify(Notification::error("Failed to load league data."));
                Err(e.into())
            }
        }
    }

    /// Runs a store write, reloads, and reports the outcome
    fn commit<T>(
        &self,
        write: impl FnOnce(&dyn RecordStore) -> Result<T, StoreError>,
        on_success: impl FnOnce(&T) -> Notification,
        failure: &str,
    ) -> Result<T, AppError> {
        match write(self.store.as_ref()) {
            Ok(value) => {
                // The write is durable; a failed reload only leaves the snapshot stale
                match self.read_store() {
                    Ok(loaded) => {
                        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = loaded
                    }
                    Err(e) => warn!(error = %e, "Saved, but reloading league data failed"),
                }
                self.notifier.notify(on_success(&value));
                Ok(value)
            }
            Err(e) => {
                warn!(error = %e, "{failure}");
                self.notifier.notify(Notification::error(failure));
                Err(e.into())
            }
        }
    }

    pub(crate) fn notify(&self, notification: Notification) {
        self.notifier.notify(notification);
    }

    pub fn players(&self) -> Vec<Player> {
        self.snapshot().players.clone()
    }

    pub fn matches(&self) -> Vec<Match> {
        self.snapshot().matches.clone()
    }

    pub fn player_by_id(&self, player_id: &str) -> Option<Player> {
        self.snapshot()
            .players
            .iter()
            .find(|p| p.id == player_id)
            .cloned()
    }

    #[instrument(skip(self))]
    pub fn add_player(&self, name: &str) -> Result<Player, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Player name cannot be empty".to_string()));
        }

        let player = self.commit(
            |store| store.add_player(name),
            |player| {
                Notification::success(
                    "Player Added",
                    format!("{} has been added successfully.", player.name),
                )
            },
            "Failed to add player.",
        )?;

        info!(player_id = %player.id, "Player added to roster");
        Ok(player)
    }

    #[instrument(skip(self, player), fields(player_id = %player.id))]
    pub fn update_player(&self, player: Player) -> Result<(), AppError> {
        let name = player.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::Validation("Player name cannot be empty".to_string()));
        }
        if self.player_by_id(&player.id).is_none() {
            return Err(AppError::NotFound(format!("Player {}", player.id)));
        }

        let player = Player { name, ..player };
        self.commit(
            |store| store.save_player(&player),
            |_| Notification::success("Player Updated", format!("{} has been updated.", player.name)),
            "Failed to update player.",
        )
    }

    /// Removes a player; returns `false` without touching the store if the id is unknown
    #[instrument(skip(self))]
    pub fn remove_player(&self, player_id: &str) -> Result<bool, AppError> {
        let Some(player) = self.player_by_id(player_id) else {
            debug!(player_id = %player_id, "Player not on roster, nothing to remove");
            return Ok(false);
        };

        self.commit(
            |store| store.remove_player(player_id),
            |_| Notification::success("Player Deleted", format!("{} has been removed.", player.name)),
            "Failed to delete player.",
        )?;
        Ok(true)
    }

    /// Records a match. Both players must be on the roster and distinct.
    #[instrument(skip(self, new_match))]
    pub fn add_match(&self, new_match: NewMatch) -> Result<Match, AppError> {
        self.validate_pairing(&new_match.player_one_id, &new_match.player_two_id)?;

        self.commit(
            |store| store.add_match(new_match),
            |_| Notification::success("Match Added", "Match has been recorded successfully."),
            "Failed to add match.",
        )
    }

    #[instrument(skip(self, record), fields(match_id = %record.id))]
    pub fn update_match(&self, record: Match) -> Result<(), AppError> {
        if !self.snapshot().matches.iter().any(|m| m.id == record.id) {
            return Err(AppError::NotFound(format!("Match {}", record.id)));
        }

        self.commit(
            |store| store.save_match(&record),
            |_| Notification::success("Match Updated", "Match has been updated successfully."),
            "Failed to update match.",
        )
    }

    #[instrument(skip(self))]
    pub fn remove_match(&self, match_id: &str) -> Result<(), AppError> {
        self.commit(
            |store| store.remove_match(match_id),
            |_| Notification::success("Match Deleted", "Match has been removed successfully."),
            "Failed to delete match.",
        )
    }

    pub(crate) fn validate_pairing(
        &self,
        player_one_id: &str,
        player_two_id: &str,
    ) -> Result<(), AppError> {
        if player_one_id == player_two_id {
            return Err(AppError::Validation(
                "A match needs two different players".to_string(),
            ));
        }
        for id in [player_one_id, player_two_id] {
            if self.player_by_id(id).is_none() {
                return Err(AppError::NotFound(format!("Player {id}")));
            }
        }
        Ok(())
    }

    pub fn player_stats(&self, player_id: &str) -> Option<PlayerStats> {
        let snapshot = self.snapshot();
        stats::stats_for_player(player_id, &snapshot.matches, &snapshot.players)
    }

    pub fn all_player_stats(&self) -> Vec<PlayerStats> {
        let snapshot = self.snapshot();
        stats::stats_for_all_players(&snapshot.matches, &snapshot.players)
    }

    pub fn leaders(&self) -> LeagueLeaders {
        stats::leaders(&self.all_player_stats())
    }

    pub fn standings(&self) -> Vec<PlayerStats> {
        stats::standings(&self.all_player_stats())
    }

    /// Every match joined with its players, newest first
    pub fn matches_with_players(&self) -> Vec<MatchWithPlayers> {
        let snapshot = self.snapshot();
        let mut joined: Vec<MatchWithPlayers> = snapshot
            .matches
            .iter()
            .cloned()
            .map(|m| MatchWithPlayers::resolve(m, &snapshot.players))
            .collect();
        joined.sort_by(|a, b| b.record.date.cmp(&a.record.date));
        joined
    }

    pub fn monthly_matches(&self) -> Vec<Match> {
        calendar::matches_in_month(&self.snapshot().matches, Utc::now())
    }

    pub fn yearly_matches(&self) -> Vec<Match> {
        calendar::matches_in_year(&self.snapshot().matches, Utc::now())
    }

    pub fn matches_by_month(&self, year: i32) -> BTreeMap<u32, Vec<Match>> {
        calendar::matches_by_month(&self.snapshot().matches, year)
    }

    pub fn dashboard(&self) -> DashboardSummary {
        let snapshot = self.snapshot();
        DashboardSummary::build(&snapshot.players, &snapshot.matches)
    }

    pub fn search_players(&self, term: &str) -> Vec<Player> {
        self.snapshot()
            .players
            .iter()
            .filter(|p| p.name_matches(term))
            .cloned()
            .collect()
    }

    /// Matches where either player's name contains `term`, newest first
    pub fn search_matches(&self, term: &str) -> Vec<MatchWithPlayers> {
        self.matches_with_players()
            .into_iter()
            .filter(|m| m.player_one.name_matches(term) || m.player_two.name_matches(term))
            .collect()
    }
}
