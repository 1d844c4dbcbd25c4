//! Per-call configuration for the transfer planner

use player_valuation::{MacroRole, RoleTable, ValuationConfig};
use serde::{Deserialize, Serialize};

/// Price used as the acquisition cost of incoming players
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuyPriceSource {
    #[default]
    Current,
    Initial,
}

/// Price credited when a roster player is sold
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SellPriceSource {
    /// Current roster valuation (current market price when the roster has none)
    #[default]
    Current,
    /// What the team originally paid
    Paid,
}

/// Required number of players per macro-role
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoleQuotas(pub RoleTable<usize>);

impl RoleQuotas {
    pub fn get(&self, role: MacroRole) -> usize {
        self.0.get(role)
    }

    pub fn total(&self) -> usize {
        MacroRole::ALL.iter().map(|r| self.get(*r)).sum()
    }
}

impl Default for RoleQuotas {
    fn default() -> Self {
        Self(RoleTable::new(3, 7, 8, 5))
    }
}

/// Initial-price bands: at most `max` players per role priced at or above `threshold`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandTable {
    pub threshold: RoleTable<f64>,
    pub max: RoleTable<usize>,
}

impl Default for BandTable {
    fn default() -> Self {
        Self {
            threshold: RoleTable::new(12.0, 14.0, 18.0, 25.0),
            max: RoleTable::new(1, 3, 3, 2),
        }
    }
}

/// Configuration for a planning run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Valuation pipeline configuration (min games, shrinkage, tiers, strategy)
    pub valuation: ValuationConfig,

    /// Rows per role in the rankings report
    pub top_rows: usize,

    pub buy_price_source: BuyPriceSource,
    pub sell_price_source: SellPriceSource,

    /// Minimum package gain for single-swap plans
    pub min_delta_single: f64,

    /// Minimum package gain for multi-swap plans
    pub min_delta_multi: f64,

    /// Live frontier size kept after every beam round
    pub beam_width: usize,

    /// Maximum simultaneous changes (further capped by the market window)
    pub max_changes: usize,

    pub sell_pool_limit: usize,
    pub buy_pool_limit: usize,

    /// Appearances that qualify a player for the buy pool
    pub min_buy_appearances: f64,

    /// Potential score that qualifies a player for the buy pool regardless of appearances
    pub min_buy_potential: f64,

    /// Number of plans returned
    pub top_plans: usize,

    /// Swap pairs two returned plans must not share
    pub min_plan_difference: usize,

    /// Per-club player cap
    pub club_cap: usize,

    pub quotas: RoleQuotas,
    pub bands: BandTable,
    pub enforce_initial_bands: bool,

    /// Allow packages that spend more than residual budget plus proceeds
    pub allow_over_budget: bool,

    /// Seed for the tie-breaking generator
    pub seed: u64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            valuation: ValuationConfig::default(),
            top_rows: 10,
            buy_price_source: BuyPriceSource::Current,
            sell_price_source: SellPriceSource::Current,
            min_delta_single: 4.0,
            min_delta_multi: 8.0,
            beam_width: 40,
            max_changes: 3,
            sell_pool_limit: 12,
            buy_pool_limit: 40,
            min_buy_appearances: 5.0,
            min_buy_potential: 68.0,
            top_plans: 5,
            min_plan_difference: 3,
            club_cap: 3,
            quotas: RoleQuotas::default(),
            bands: BandTable::default(),
            enforce_initial_bands: false,
            allow_over_budget: false,
            seed: 42,
        }
    }
}

/// Budget and composition constraints of one planning call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintContext {
    pub residual_budget: f64,
    pub club_cap: usize,
    pub quotas: RoleQuotas,
    pub enforce_initial_bands: bool,
    pub bands: BandTable,
    pub allow_over_budget: bool,
}

impl ConstraintContext {
    pub fn from_config(config: &PlannerConfig, residual_budget: f64) -> Self {
        Self {
            residual_budget,
            club_cap: config.club_cap,
            quotas: config.quotas,
            enforce_initial_bands: config.enforce_initial_bands,
            bands: config.bands,
            allow_over_budget: config.allow_over_budget,
        }
    }
}

impl Default for ConstraintContext {
    fn default() -> Self {
        Self::from_config(&PlannerConfig::default(), 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_quotas_make_a_23_man_squad() {
        let quotas = RoleQuotas::default();
        assert_eq!(quotas.total(), 23);
        assert_eq!(quotas.get(MacroRole::Defender), 7);
    }

    #[test]
    fn test_partial_config_deserializes_with_defaults() {
        let config: PlannerConfig =
            serde_json::from_str(r#"{ "beam_width": 8, "buy_price_source": "initial" }"#).unwrap();
        assert_eq!(config.beam_width, 8);
        assert_eq!(config.buy_price_source, BuyPriceSource::Initial);
        assert_eq!(config.top_plans, 5);
        assert_eq!(config.club_cap, 3);
    }
}
