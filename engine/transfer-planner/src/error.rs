//! Error types for the transfer planner

use player_valuation::ValuationError;
use thiserror::Error;

/// Result type for planner operations
pub type Result<T> = std::result::Result<T, PlannerError>;

/// Errors that reject a planning request outright.
///
/// Finding no legal plan is not an error; see `PlanningOutcome::notes`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlannerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid input: unknown market window '{0}'")]
    UnknownMarketWindow(String),

    #[error("Invalid input: team '{0}' not present in roster source")]
    TeamNotFound(String),

    #[error("Valuation error: {0}")]
    Valuation(#[from] ValuationError),
}
