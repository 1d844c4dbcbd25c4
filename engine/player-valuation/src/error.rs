//! Error types for player valuation

use thiserror::Error;

/// Result type for valuation operations
pub type Result<T> = std::result::Result<T, ValuationError>;

/// Errors that can occur while scoring the player universe
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValuationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("Player {0} has no recognised role")]
    UnknownRole(String),
}
