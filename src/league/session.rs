use chrono::Utc;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

use super::{LeagueService, Notification};
use crate::matches::{Match, MatchDuration, NewMatch, Side};
use crate::shared::AppError;
use crate::timer::{MatchTimer, TimerObserver, TimerState};

/// How a finished match is written relative to its in-progress record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordingMode {
    /// Leave the in-progress record and append a separate complete one
    #[default]
    AppendFinal,
    /// Overwrite the in-progress record with the final result
    ReplaceInProgress,
}

impl FromStr for RecordingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "append" => Ok(RecordingMode::AppendFinal),
            "replace" => Ok(RecordingMode::ReplaceInProgress),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionPhase {
    /// Choosing players and duration
    Setup,
    /// Match under way; holds the in-progress record
    Tracking { in_progress: Match },
}

/// Live match entry: pick two players, start, keep score, save.
///
/// Starting stores an in-progress record and starts the timer. Finishing
/// stores the result according to the [`RecordingMode`] and returns the
/// session to setup with default settings.
pub struct MatchSession {
    service: Arc<LeagueService>,
    timer: MatchTimer,
    mode: RecordingMode,
    phase: SessionPhase,
    player_one_id: Option<String>,
    player_two_id: Option<String>,
    duration: MatchDuration,
    scores: (u32, u32),
}

impl MatchSession {
    pub fn new(
        service: Arc<LeagueService>,
        mode: RecordingMode,
        tick_interval: Duration,
        observer: Arc<dyn TimerObserver>,
    ) -> Result<Self, AppError> {
        let duration = MatchDuration::default();
        Ok(Self {
            service,
            timer: MatchTimer::new(duration, tick_interval, observer)?,
            mode,
            phase: SessionPhase::Setup,
            player_one_id: None,
            player_two_id: None,
            duration,
            scores: (0, 0),
        })
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn timer(&self) -> &MatchTimer {
        &self.timer
    }

    pub fn duration(&self) -> MatchDuration {
        self.duration
    }

    pub fn scores(&self) -> (u32, u32) {
        self.scores
    }

    fn ensure_setup(&self) -> Result<(), AppError> {
        match self.phase {
            SessionPhase::Setup => Ok(()),
            SessionPhase::Tracking { .. } => Err(AppError::Validation(
                "Match settings are locked while a match is in progress".to_string(),
            )),
        }
    }

    fn in_progress(&self) -> Result<&Match, AppError> {
        match &self.phase {
            SessionPhase::Tracking { in_progress } => Ok(in_progress),
            SessionPhase::Setup => Err(AppError::Validation("No match in progress".to_string())),
        }
    }

    pub fn select_players(
        &mut self,
        player_one_id: &str,
        player_two_id: &str,
    ) -> Result<(), AppError> {
        self.ensure_setup()?;
        self.service.validate_pairing(player_one_id, player_two_id)?;

        self.player_one_id = Some(player_one_id.to_string());
        self.player_two_id = Some(player_two_id.to_string());
        Ok(())
    }

    pub fn set_duration(&mut self, duration: MatchDuration) -> Result<(), AppError> {
        self.ensure_setup()?;
        self.timer.set_duration(duration)?;
        self.duration = duration;
        Ok(())
    }

    /// Stores the in-progress record and starts the clock
    #[instrument(skip(self))]
    pub fn start(&mut self) -> Result<Match, AppError> {
        self.ensure_setup()?;
        let (Some(one), Some(two)) = (self.player_one_id.clone(), self.player_two_id.clone()) else {
            return Err(AppError::Validation("Select both players before starting".to_string()));
        };

        let record = self
            .service
            .add_match(NewMatch::in_progress(one, two, self.duration))?;

        info!(match_id = %record.id, duration = %self.duration, "Match started");
        self.scores = (0, 0);
        self.phase = SessionPhase::Tracking {
            in_progress: record.clone(),
        };
        self.timer.start();
        Ok(record)
    }

    pub fn increment(&mut self, side: Side) -> Result<u32, AppError> {
        self.in_progress()?;
        let score = self.score_mut(side);
        *score += 1;
        Ok(*score)
    }

    /// Lowers a score, never below zero
    pub fn decrement(&mut self, side: Side) -> Result<u32, AppError> {
        self.in_progress()?;
        let score = self.score_mut(side);
        *score = score.saturating_sub(1);
        Ok(*score)
    }

    fn score_mut(&mut self, side: Side) -> &mut u32 {
        match side {
            Side::PlayerOne => &mut self.scores.0,
            Side::PlayerTwo => &mut self.scores.1,
        }
    }

    /// Saves the final result. On failure the session stays in tracking so it can be retried.
    #[instrument(skip(self))]
    pub fn finish(&mut self) -> Result<Match, AppError> {
        let in_progress = self.in_progress()?.clone();
        let (player_one_score, player_two_score) = self.scores;

        let final_record = match self.mode {
            RecordingMode::AppendFinal => self.service.add_match(NewMatch {
                player_one_id: in_progress.player_one_id,
                player_two_id: in_progress.player_two_id,
                player_one_score,
                player_two_score,
                duration: in_progress.duration,
                date: Utc::now(),
                complete: true,
            })?,
            RecordingMode::ReplaceInProgress => {
                let record = Match {
                    player_one_score,
                    player_two_score,
                    date: Utc::now(),
                    complete: true,
                    ..in_progress
                };
                self.service.update_match(record.clone())?;
                record
            }
        };

        info!(
            match_id = %final_record.id,
            player_one_score,
            player_two_score,
            "Match result saved"
        );
        self.reset_form();
        Ok(final_record)
    }

    /// Called when the clock runs out: announces it and saves the result
    pub fn complete_on_timeout(&mut self) -> Result<Match, AppError> {
        self.in_progress()?;
        let state = self.timer.state();
        if state != TimerState::Completed {
            return Err(AppError::Validation(format!(
                "Match time has not run out (timer is {state:?})"
            )));
        }
        self.service.notify(Notification::success(
            "Match Time Complete!",
            format!("The {}-minute match time has ended.", self.duration.minutes()),
        ));
        self.finish()
    }

    /// Abandons the current setup or match without saving a result
    #[instrument(skip(self))]
    pub fn cancel(&mut self) {
        if let SessionPhase::Tracking { in_progress } = &self.phase {
            warn!(match_id = %in_progress.id, "Match cancelled, in-progress record kept");
        }
        self.reset_form();
    }

    fn reset_form(&mut self) {
        self.timer.reset();
        self.phase = SessionPhase::Setup;
        self.player_one_id = None;
        self.player_two_id = None;
        self.scores = (0, 0);
        self.duration = MatchDuration::default();
        // The timer was just reset, so it is idle and accepts the new duration
        if let Err(e) = self.timer.set_duration(self.duration) {
            warn!(error = %e, "Could not restore default timer duration");
        }
    }
}
