use crate::config::{ScoringStrategyKind, ValuationConfig};
use crate::legacy::LegacyScoring;
use crate::models::{MacroRole, PlayerRecord};
use crate::normalizer::MarketScoring;

/// Fills the composite scores of an already feature-extracted universe.
///
/// Implementations only touch players that carry a macro role; tiering runs
/// afterwards on whatever final score the strategy produced.
pub trait ScoringStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn score(&self, players: &mut [PlayerRecord]);
}

/// Build the strategy selected in the configuration
pub fn strategy_for(config: &ValuationConfig) -> Box<dyn ScoringStrategy> {
    match config.strategy {
        ScoringStrategyKind::Market => Box::new(MarketScoring::new(config.clone())),
        ScoringStrategyKind::Legacy => Box::new(LegacyScoring::new()),
    }
}

/// Indices of the players in each macro-role bucket, in input order
pub(crate) fn role_buckets(players: &[PlayerRecord]) -> [Vec<usize>; 4] {
    let mut buckets: [Vec<usize>; 4] = Default::default();
    for (idx, player) in players.iter().enumerate() {
        if let Some(role) = player.macro_role() {
            buckets[role.index()].push(idx);
        }
    }
    buckets
}

pub(crate) fn bucket_role(bucket: usize) -> MacroRole {
    MacroRole::ALL[bucket]
}
