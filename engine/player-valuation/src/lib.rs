//! Player Valuation
//!
//! Scores a fantasy-football player universe from season and recent-window
//! statistics. Raw stats are turned into per-match features, shrunk toward the
//! role mean for small samples, ranked as role-relative percentiles and blended
//! into Real, Potential, Credit-Efficiency and Final Market scores. A tier
//! classifier then maps every player onto an ordinal tier.

pub mod config;
pub mod engine;
pub mod error;
pub mod features;
pub mod legacy;
pub mod models;
pub mod normalizer;
pub mod percentile;
pub mod rankings;
pub mod strategy;
pub mod tiering;

pub use config::{RoleTable, ScoringStrategyKind, TierConfig, ValuationConfig};
pub use engine::{EvaluationSummary, ValuationEngine};
pub use error::{Result, ValuationError};
pub use features::FeatureExtractor;
pub use legacy::LegacyScoring;
pub use models::*;
pub use normalizer::MarketScoring;
pub use rankings::{RankingRow, RoleRankings, ScoreCard};
pub use strategy::ScoringStrategy;
pub use tiering::TierClassifier;
