use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimerError {
    #[error("Timer is running; pause or reset it before changing the duration")]
    Running,

    #[error("Tick interval must be greater than zero")]
    ZeroTickInterval,
}
