use serde::{Deserialize, Serialize};

use crate::models::{Feature, MacroRole};

/// One value per macro-role bucket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoleTable<T> {
    pub goalkeeper: T,
    pub defender: T,
    pub midfielder: T,
    pub attacker: T,
}

impl<T: Copy> RoleTable<T> {
    pub const fn new(goalkeeper: T, defender: T, midfielder: T, attacker: T) -> Self {
        Self { goalkeeper, defender, midfielder, attacker }
    }

    pub fn get(&self, role: MacroRole) -> T {
        match role {
            MacroRole::Goalkeeper => self.goalkeeper,
            MacroRole::Defender => self.defender,
            MacroRole::Midfielder => self.midfielder,
            MacroRole::Attacker => self.attacker,
        }
    }
}

/// Which scoring model fills the composite scores
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringStrategyKind {
    /// Role-relative percentiles with shrinkage
    #[default]
    Market,
    /// Titolarity / discipline penalty / team-context model
    Legacy,
}

/// Configuration for the valuation pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuationConfig {
    /// Appearances at which availability saturates at 1
    pub min_games: f64,

    /// Shrinkage constant k per bucket (larger pulls harder toward the mean)
    pub shrinkage_k: RoleTable<f64>,

    /// Tier classification parameters
    pub tiers: TierConfig,

    /// Attacker recent-form bonus parameters
    pub hot_streak: HotStreakConfig,

    /// Scoring model
    pub strategy: ScoringStrategyKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TierConfig {
    /// Final-score percentile cutoffs for top / semi-top / starter / speculative
    pub cutoffs: RoleTable<[f64; 4]>,

    /// Price at or below which a player is always tier Low
    pub low_price_threshold: f64,

    /// Minutes ratio below which a player is capped at Speculative
    pub min_minutes_ratio: f64,

    /// Price at or above which a low-minutes player keeps at least Starter
    pub high_price: RoleTable<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HotStreakConfig {
    pub goals_weight: f64,
    pub decisive_weight: f64,
    /// Recent appearances at which the reliability factor saturates
    pub full_sample: f64,
    pub max_bonus: f64,
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            min_games: 10.0,
            shrinkage_k: RoleTable::new(10.0, 10.0, 6.0, 6.0),
            tiers: TierConfig::default(),
            hot_streak: HotStreakConfig::default(),
            strategy: ScoringStrategyKind::Market,
        }
    }
}

impl Default for TierConfig {
    fn default() -> Self {
        Self {
            cutoffs: RoleTable::new(
                [92.0, 80.0, 55.0, 30.0],
                [90.0, 75.0, 50.0, 25.0],
                [90.0, 75.0, 50.0, 25.0],
                [88.0, 72.0, 48.0, 25.0],
            ),
            low_price_threshold: 1.0,
            min_minutes_ratio: 0.35,
            high_price: RoleTable::new(18.0, 18.0, 22.0, 28.0),
        }
    }
}

impl Default for HotStreakConfig {
    fn default() -> Self {
        Self { goals_weight: 10.0, decisive_weight: 6.0, full_sample: 5.0, max_bonus: 6.0 }
    }
}

/// Blend weights for the composite scores
pub const FINAL_REAL_WEIGHT: f64 = 0.5;
pub const FINAL_POTENTIAL_WEIGHT: f64 = 0.3;
pub const FINAL_CREDIT_WEIGHT: f64 = 0.2;

/// Real/Potential mix used for the value-per-credit ratio
pub const CREDIT_REAL_WEIGHT: f64 = 0.6;
pub const CREDIT_POTENTIAL_WEIGHT: f64 = 0.4;

/// Real Score weights per macro-role
pub fn real_weights(role: MacroRole) -> &'static [(Feature, f64)] {
    match role {
        MacroRole::Goalkeeper => &[
            (Feature::CleanSheetsPerMatch, 0.30),
            (Feature::ConcededPerMatch, 0.25),
            (Feature::PenaltySavesPerMatch, 0.10),
            (Feature::FantasyAverage, 0.20),
            (Feature::DisciplinePerMatch, 0.05),
            (Feature::Availability, 0.10),
        ],
        MacroRole::Defender => &[
            (Feature::CleanSheetsPerMatch, 0.20),
            (Feature::GoalsPerMatch, 0.10),
            (Feature::AssistsPerMatch, 0.10),
            (Feature::FantasyAverage, 0.30),
            (Feature::DisciplinePerMatch, 0.10),
            (Feature::Availability, 0.15),
            (Feature::TeamContext, 0.05),
        ],
        MacroRole::Midfielder => &[
            (Feature::GoalsPerMatch, 0.20),
            (Feature::AssistsPerMatch, 0.20),
            (Feature::DecisivePerMatch, 0.10),
            (Feature::FantasyAverage, 0.25),
            (Feature::DisciplinePerMatch, 0.05),
            (Feature::Availability, 0.15),
            (Feature::TeamContext, 0.05),
        ],
        MacroRole::Attacker => &[
            (Feature::GoalsPerMatch, 0.35),
            (Feature::AssistsPerMatch, 0.10),
            (Feature::DecisivePerMatch, 0.15),
            (Feature::FantasyAverage, 0.20),
            (Feature::DisciplinePerMatch, 0.05),
            (Feature::Availability, 0.10),
            (Feature::TeamContext, 0.05),
        ],
    }
}

/// Potential Score weights per macro-role
pub fn potential_weights(role: MacroRole) -> &'static [(Feature, f64)] {
    match role {
        MacroRole::Goalkeeper => &[
            (Feature::Upside, 0.30),
            (Feature::TeamContext, 0.35),
            (Feature::CleanSheetsPerMatch, 0.15),
            (Feature::Availability, 0.20),
        ],
        MacroRole::Defender => &[
            (Feature::Upside, 0.35),
            (Feature::TeamContext, 0.25),
            (Feature::GoalsPerMatch, 0.10),
            (Feature::AssistsPerMatch, 0.10),
            (Feature::Availability, 0.20),
        ],
        MacroRole::Midfielder => &[
            (Feature::Upside, 0.35),
            (Feature::TeamContext, 0.20),
            (Feature::GoalsPerMatch, 0.15),
            (Feature::AssistsPerMatch, 0.15),
            (Feature::Availability, 0.15),
        ],
        MacroRole::Attacker => &[
            (Feature::Upside, 0.35),
            (Feature::TeamContext, 0.20),
            (Feature::GoalsPerMatch, 0.20),
            (Feature::DecisivePerMatch, 0.10),
            (Feature::Availability, 0.15),
        ],
    }
}
