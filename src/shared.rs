use thiserror::Error;

use crate::config::ConfigError;
use crate::store::StoreError;
use crate::timer::TimerError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("Timer error: {0}")]
    Timer(#[from] TimerError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
