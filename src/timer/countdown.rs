use std::time::Duration;
use tokio::time::Instant;

use super::TimerError;
use crate::matches::MatchDuration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// Not started, full duration remaining
    Idle,
    Running,
    Paused,
    Completed,
}

/// Result of advancing a countdown to a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The countdown is not running; nothing changed
    Inactive,
    Running { remaining: Duration },
    /// This tick moved the countdown into `Completed`
    Completed,
}

/// Wall-clock anchored countdown.
///
/// While running, remaining time is `remaining_at_anchor - (now - anchor)`,
/// saturating at zero, so late or missed ticks never accumulate drift. Every
/// transition that leaves `Running` bumps `run_id`, which lets a scheduler
/// recognise ticks that belong to an earlier run.
#[derive(Debug, Clone)]
pub struct Countdown {
    duration: MatchDuration,
    state: TimerState,
    remaining_at_anchor: Duration,
    anchor: Option<Instant>,
    run_id: u64,
}

impl Countdown {
    pub fn new(duration: MatchDuration) -> Self {
        Self {
            duration,
            state: TimerState::Idle,
            remaining_at_anchor: duration.as_duration(),
            anchor: None,
            run_id: 0,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn duration(&self) -> MatchDuration {
        self.duration
    }

    pub fn total(&self) -> Duration {
        self.duration.as_duration()
    }

    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        match (self.state, self.anchor) {
            (TimerState::Running, Some(anchor)) => self
                .remaining_at_anchor
                .saturating_sub(now.saturating_duration_since(anchor)),
            _ => self.remaining_at_anchor,
        }
    }

    /// Elapsed share of the full duration, in percent
    pub fn progress(&self, now: Instant) -> f64 {
        let total = self.total().as_secs_f64();
        let elapsed = total - self.remaining(now).as_secs_f64();
        (elapsed / total * 100.0).clamp(0.0, 100.0)
    }

    /// Starts from idle or resumes from pause. Returns whether the state changed.
    pub fn start(&mut self, now: Instant) -> bool {
        match self.state {
            TimerState::Idle | TimerState::Paused => {
                self.state = TimerState::Running;
                self.anchor = Some(now);
                self.run_id += 1;
                true
            }
            TimerState::Running | TimerState::Completed => false,
        }
    }

    /// Freezes the remaining time. Returns whether the state changed.
    pub fn pause(&mut self, now: Instant) -> bool {
        if self.state != TimerState::Running {
            return false;
        }

        self.remaining_at_anchor = self.remaining(now);
        self.anchor = None;
        self.state = TimerState::Paused;
        self.run_id += 1;
        true
    }

    /// Back to idle with the full duration, from any state
    pub fn reset(&mut self) {
        self.state = TimerState::Idle;
        self.remaining_at_anchor = self.total();
        self.anchor = None;
        self.run_id += 1;
    }

    pub fn set_duration(&mut self, duration: MatchDuration) -> Result<(), TimerError> {
        if self.state == TimerState::Running {
            return Err(TimerError::Running);
        }

        self.duration = duration;
        self.reset();
        Ok(())
    }

    /// Single-button control: restart after completion, otherwise pause or start
    pub fn toggle(&mut self, now: Instant) -> TimerState {
        match self.state {
            TimerState::Completed => self.reset(),
            TimerState::Running => {
                self.pause(now);
            }
            TimerState::Idle | TimerState::Paused => {
                self.start(now);
            }
        }
        self.state
    }

    /// Advances to `now`; completes exactly once when the remaining time hits zero
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        if self.state != TimerState::Running {
            return TickOutcome::Inactive;
        }

        let remaining = self.remaining(now);
        if !remaining.is_zero() {
            return TickOutcome::Running { remaining };
        }

        self.state = TimerState::Completed;
        self.remaining_at_anchor = Duration::ZERO;
        self.anchor = None;
        self.run_id += 1;
        TickOutcome::Completed
    }
}

/// `mm:ss`, rounding partial seconds down
pub fn format_remaining(remaining: Duration) -> String {
    let secs = remaining.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
