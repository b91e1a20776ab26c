//! Single-match countdown.
//!
//! [`Countdown`] is the pure state machine, fed explicit instants. [`MatchTimer`]
//! drives it from a periodic tokio task and reports to a [`TimerObserver`].

pub mod countdown;
pub mod driver;

mod errors;

pub use countdown::{format_remaining, Countdown, TickOutcome, TimerState};
pub use driver::{ChannelObserver, MatchTimer, NoopObserver, TimerEvent, TimerObserver};
pub use errors::TimerError;

use std::time::Duration;

/// Default period between display ticks
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(100);
