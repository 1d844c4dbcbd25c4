use tracing::debug;

use crate::config::{
    potential_weights, real_weights, HotStreakConfig, ValuationConfig, CREDIT_POTENTIAL_WEIGHT,
    CREDIT_REAL_WEIGHT, FINAL_CREDIT_WEIGHT, FINAL_POTENTIAL_WEIGHT, FINAL_REAL_WEIGHT,
};
use crate::models::{Feature, MacroRole, PlayerRecord, RawStats};
use crate::percentile::{mean, percentile_ranks, shrink_toward_mean};
use crate::strategy::{bucket_role, role_buckets, ScoringStrategy};

/// Role-relative percentiles of every feature for one player, already
/// inverted for negative features
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeaturePercentiles([f64; Feature::ALL.len()]);

impl FeaturePercentiles {
    pub fn get(&self, feature: Feature) -> f64 {
        self.0[feature.index()]
    }

    /// Weighted average of the percentiles, clamped to [0, 100]
    pub fn blend(&self, weights: &[(Feature, f64)]) -> f64 {
        let total: f64 = weights.iter().map(|(_, w)| w).sum();
        if total <= 0.0 {
            return 0.0;
        }
        let weighted: f64 = weights.iter().map(|(f, w)| self.get(*f) * w).sum();
        (weighted / total).clamp(0.0, 100.0)
    }
}

/// Canonical scoring model: shrinkage toward the role mean, role-bucket
/// percentiles, weighted Real/Potential composites, credit efficiency and the
/// attacker hot-streak bonus.
pub struct MarketScoring {
    config: ValuationConfig,
}

impl MarketScoring {
    pub fn new(config: ValuationConfig) -> Self {
        Self { config }
    }

    /// Shrunk and percentiled features for every player; `None` for players without a role
    pub fn feature_percentiles(&self, players: &[PlayerRecord]) -> Vec<Option<FeaturePercentiles>> {
        let mut result = vec![None; players.len()];

        for (bucket, members) in role_buckets(players).iter().enumerate() {
            if members.is_empty() {
                continue;
            }
            let k = self.config.shrinkage_k.get(bucket_role(bucket));
            let mut table = vec![[0.0; Feature::ALL.len()]; members.len()];

            for feature in Feature::ALL {
                let raw: Vec<f64> =
                    members.iter().map(|&i| players[i].features.get(feature)).collect();

                let blended = if feature.is_shrinkable() {
                    let bucket_mean = mean(&raw);
                    members
                        .iter()
                        .zip(&raw)
                        .map(|(&i, &value)| {
                            shrink_toward_mean(value, bucket_mean, players[i].stats.appearances, k)
                        })
                        .collect()
                } else {
                    raw
                };

                for (row, rank) in percentile_ranks(&blended).into_iter().enumerate() {
                    table[row][feature.index()] =
                        if feature.is_negative() { 100.0 - rank } else { rank };
                }
            }

            for (row, &idx) in members.iter().enumerate() {
                result[idx] = Some(FeaturePercentiles(table[row]));
            }
        }

        result
    }
}

impl ScoringStrategy for MarketScoring {
    fn name(&self) -> &'static str {
        "market"
    }

    fn score(&self, players: &mut [PlayerRecord]) {
        let percentiles = self.feature_percentiles(players);

        for (player, pct) in players.iter_mut().zip(&percentiles) {
            let (Some(role), Some(pct)) = (player.macro_role(), pct) else {
                continue;
            };
            player.scores.real = pct.blend(real_weights(role));
            player.scores.potential = pct.blend(potential_weights(role));
        }

        for members in role_buckets(players).iter() {
            let ratios: Vec<f64> = members
                .iter()
                .map(|&i| {
                    let p = &players[i];
                    (CREDIT_REAL_WEIGHT * p.scores.real
                        + CREDIT_POTENTIAL_WEIGHT * p.scores.potential)
                        / p.price.max(1.0)
                })
                .collect();
            for (&idx, rank) in members.iter().zip(percentile_ranks(&ratios)) {
                players[idx].scores.credit_efficiency = rank;
            }
        }

        for player in players.iter_mut() {
            let Some(role) = player.macro_role() else { continue };
            let scores = &mut player.scores;
            let mut final_score = FINAL_REAL_WEIGHT * scores.real
                + FINAL_POTENTIAL_WEIGHT * scores.potential
                + FINAL_CREDIT_WEIGHT * scores.credit_efficiency;
            if role == MacroRole::Attacker {
                final_score += hot_streak_bonus(
                    &self.config.hot_streak,
                    &player.stats,
                    player.features.team_context,
                );
            }
            scores.final_score = final_score.clamp(0.0, 100.0);
        }

        debug!("Market scoring completed for {} players", players.len());
    }
}

/// Small-sample recent-form bonus for attackers
pub fn hot_streak_bonus(config: &HotStreakConfig, stats: &RawStats, team_context: f64) -> f64 {
    let recent_apps = if stats.recent_appearances.is_finite() {
        stats.recent_appearances.max(0.0)
    } else {
        0.0
    };
    if recent_apps <= 0.0 {
        return 0.0;
    }

    let goals_pm = stats.recent_goals.max(0.0) / recent_apps.max(1.0);
    let decisive_pm = stats.recent_decisive_goals.max(0.0) / recent_apps.max(1.0);
    let reliability = (recent_apps / config.full_sample.max(1.0)).min(1.0);
    let team_factor = 0.5 + 0.5 * team_context.clamp(0.0, 100.0) / 100.0;

    let raw = config.goals_weight * goals_pm + config.decisive_weight * decisive_pm;
    let bonus = raw * reliability * team_factor;
    if bonus.is_finite() {
        bonus.clamp(0.0, config.max_bonus)
    } else {
        0.0
    }
}
