use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{debug, info, instrument};

use super::{format_remaining, Countdown, TickOutcome, TimerError, TimerState};
use crate::matches::MatchDuration;

/// Receives updates from a running [`MatchTimer`]
///
/// Callbacks run on the ticker task, outside the countdown lock, so they may
/// read the timer. They must not pause, reset or reconfigure it.
pub trait TimerObserver: Send + Sync {
    fn on_time_update(&self, _remaining: Duration) {}
    fn on_complete(&self) {}
}

/// Observer that ignores every update
pub struct NoopObserver;

impl TimerObserver for NoopObserver {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Tick { remaining: Duration },
    Completed,
}

/// Forwards timer callbacks into an unbounded channel
pub struct ChannelObserver {
    sender: mpsc::UnboundedSender<TimerEvent>,
}

impl ChannelObserver {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl TimerObserver for ChannelObserver {
    fn on_time_update(&self, remaining: Duration) {
        // A dropped receiver just means nobody is watching any more
        let _ = self.sender.send(TimerEvent::Tick { remaining });
    }

    fn on_complete(&self) {
        let _ = self.sender.send(TimerEvent::Completed);
    }
}

/// Countdown driven by a periodic tokio task while running.
///
/// The ticker task only exists in the `Running` state. Pausing, resetting,
/// changing the duration or dropping the timer aborts it and advances the
/// countdown's run id. Both the ticker and those transitions hold the
/// delivery lock for their whole critical section, so once a transition
/// returns no tick from the earlier run can touch the countdown or reach the
/// observer.
pub struct MatchTimer {
    countdown: Arc<Mutex<Countdown>>,
    delivery: Arc<Mutex<()>>,
    observer: Arc<dyn TimerObserver>,
    tick_interval: Duration,
    ticker: Mutex<Option<JoinHandle<()>>>,
}

impl MatchTimer {
    pub fn new(
        duration: MatchDuration,
        tick_interval: Duration,
        observer: Arc<dyn TimerObserver>,
    ) -> Result<Self, TimerError> {
        if tick_interval.is_zero() {
            return Err(TimerError::ZeroTickInterval);
        }

        Ok(Self {
            countdown: Arc::new(Mutex::new(Countdown::new(duration))),
            delivery: Arc::new(Mutex::new(())),
            observer,
            tick_interval,
            ticker: Mutex::new(None),
        })
    }

    fn countdown(&self) -> MutexGuard<'_, Countdown> {
        self.countdown.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn delivery(&self) -> MutexGuard<'_, ()> {
        self.delivery.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> TimerState {
        self.countdown().state()
    }

    pub fn duration(&self) -> MatchDuration {
        self.countdown().duration()
    }

    pub fn remaining(&self) -> Duration {
        self.countdown().remaining(Instant::now())
    }

    pub fn progress(&self) -> f64 {
        self.countdown().progress(Instant::now())
    }

    /// Remaining time as `mm:ss`
    pub fn display(&self) -> String {
        format_remaining(self.remaining())
    }

    /// Starts or resumes the countdown. Must be called within a tokio runtime.
    #[instrument(skip(self))]
    pub fn start(&self) {
        let run_id = {
            let mut countdown = self.countdown();
            if !countdown.start(Instant::now()) {
                debug!(state = ?countdown.state(), "Start ignored");
                return;
            }
            countdown.run_id()
        };

        info!(run_id, "Match timer running");
        self.spawn_ticker(run_id);
    }

    #[instrument(skip(self))]
    pub fn pause(&self) {
        let paused = {
            let _delivery = self.delivery();
            let paused = self.countdown().pause(Instant::now());
            self.cancel_ticker();
            paused
        };

        if paused {
            info!(remaining = %self.display(), "Match timer paused");
        }
    }

    #[instrument(skip(self))]
    pub fn reset(&self) {
        let _delivery = self.delivery();
        self.countdown().reset();
        self.cancel_ticker();
        debug!("Match timer reset");
    }

    /// Reconfigures the duration; only allowed while not running
    #[instrument(skip(self))]
    pub fn set_duration(&self, duration: MatchDuration) -> Result<(), TimerError> {
        let _delivery = self.delivery();
        self.countdown().set_duration(duration)?;
        self.cancel_ticker();
        Ok(())
    }

    /// Single-button control, see [`Countdown::toggle`]
    pub fn toggle(&self) -> TimerState {
        match self.state() {
            TimerState::Completed => self.reset(),
            TimerState::Running => self.pause(),
            TimerState::Idle | TimerState::Paused => self.start(),
        }
        self.state()
    }

    fn spawn_ticker(&self, run_id: u64) {
        let handle = tokio::spawn(run_ticker(
            self.countdown.clone(),
            self.delivery.clone(),
            self.observer.clone(),
            run_id,
            self.tick_interval,
        ));

        let previous = self
            .ticker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(handle);
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    fn cancel_ticker(&self) {
        let handle = self
            .ticker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            handle.abort();
        }
    }
}

impl Drop for MatchTimer {
    fn drop(&mut self) {
        let _delivery = self.delivery();
        self.countdown().reset();
        self.cancel_ticker();
    }
}

async fn run_ticker(
    countdown: Arc<Mutex<Countdown>>,
    delivery: Arc<Mutex<()>>,
    observer: Arc<dyn TimerObserver>,
    run_id: u64,
    tick_interval: Duration,
) {
    let mut ticks = interval(tick_interval);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately
    ticks.tick().await;

    loop {
        ticks.tick().await;

        // Held until the observer has been told, never across an await
        let _delivery = delivery.lock().unwrap_or_else(PoisonError::into_inner);
        let outcome = {
            let mut countdown = countdown.lock().unwrap_or_else(PoisonError::into_inner);
            if countdown.run_id() != run_id {
                debug!(run_id, "Stale ticker stopping");
                return;
            }
            countdown.tick(Instant::now())
        };

        match outcome {
            TickOutcome::Running { remaining } => observer.on_time_update(remaining),
            TickOutcome::Completed => {
                info!(run_id, "Match time complete");
                observer.on_time_update(Duration::ZERO);
                observer.on_complete();
                return;
            }
            TickOutcome::Inactive => return,
        }
    }
}
