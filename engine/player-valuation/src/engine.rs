use tracing::{debug, info};

use crate::config::ValuationConfig;
use crate::error::{Result, ValuationError};
use crate::features::FeatureExtractor;
use crate::models::{name_key, PlayerRecord};
use crate::rankings::{RoleRankings, ScoreCard};
use crate::strategy::{strategy_for, ScoringStrategy};
use crate::tiering::TierClassifier;

/// Outcome counters of one evaluation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvaluationSummary {
    pub scored: usize,
    pub without_role: usize,
}

/// Runs feature extraction, scoring and tiering over a player universe
pub struct ValuationEngine {
    extractor: FeatureExtractor,
    strategy: Box<dyn ScoringStrategy>,
    classifier: TierClassifier,
}

impl ValuationEngine {
    /// Create an engine using the strategy named in the configuration
    pub fn new(config: ValuationConfig) -> Self {
        let strategy = strategy_for(&config);
        Self::with_strategy(config, strategy)
    }

    /// Create an engine with an explicit scoring strategy
    pub fn with_strategy(
        config: ValuationConfig,
        strategy: Box<dyn ScoringStrategy>,
    ) -> Self {
        Self {
            extractor: FeatureExtractor::new(config.min_games),
            classifier: TierClassifier::new(config.tiers.clone()),
            strategy,
        }
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Score every player in place: features, composite scores, tier
    pub fn evaluate(&self, players: &mut [PlayerRecord]) -> EvaluationSummary {
        for player in players.iter_mut() {
            player.ensure_name_key();
            self.extractor.apply(player);
        }
        self.strategy.score(players);
        self.classifier.classify_all(players);

        let without_role = players.iter().filter(|p| p.macro_role().is_none()).count();
        let summary = EvaluationSummary { scored: players.len() - without_role, without_role };

        info!(
            "Evaluated {} players with {} scoring ({} without a recognised role)",
            summary.scored,
            self.strategy.name(),
            summary.without_role
        );
        summary
    }

    /// Score one player against the whole universe without mutating the caller's data
    pub fn score_player(&self, universe: &[PlayerRecord], name: &str) -> Result<ScoreCard> {
        let key = name_key(name);
        if key.is_empty() {
            return Err(ValuationError::InvalidInput("player name is empty".to_string()));
        }

        let mut pool = universe.to_vec();
        self.evaluate(&mut pool);

        let player = pool
            .iter()
            .find(|p| p.name_key == key)
            .ok_or_else(|| ValuationError::PlayerNotFound(name.to_string()))?;
        let role = player
            .macro_role()
            .ok_or_else(|| ValuationError::UnknownRole(player.name.clone()))?;

        debug!("Score lookup for {}: final {:.2}", player.name, player.scores.final_score);
        Ok(ScoreCard::from_record(player, role))
    }

    /// Per-role rankings of an already evaluated universe
    pub fn rankings(&self, players: &[PlayerRecord], top_rows: usize) -> RoleRankings {
        RoleRankings::build(players, top_rows)
    }
}

impl Default for ValuationEngine {
    fn default() -> Self {
        Self::new(ValuationConfig::default())
    }
}
