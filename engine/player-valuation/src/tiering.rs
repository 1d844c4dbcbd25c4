use crate::config::TierConfig;
use crate::models::{MacroRole, PlayerRecord, Tier};
use crate::percentile::percentile_ranks;
use crate::strategy::{bucket_role, role_buckets};

/// Maps final score, role and price to an ordinal tier
#[derive(Debug, Clone)]
pub struct TierClassifier {
    config: TierConfig,
}

impl TierClassifier {
    pub fn new(config: TierConfig) -> Self {
        Self { config }
    }

    /// Tier from the final-score percentile alone
    pub fn tier_for_percentile(&self, role: MacroRole, percentile: f64) -> Tier {
        let [top, semi_top, starter, speculative] = self.config.cutoffs.get(role);
        if percentile >= top {
            Tier::Top
        } else if percentile >= semi_top {
            Tier::SemiTop
        } else if percentile >= starter {
            Tier::Starter
        } else if percentile >= speculative {
            Tier::Speculative
        } else {
            Tier::Low
        }
    }

    /// Full classification including the price and playing-time overrides
    pub fn classify(
        &self,
        role: MacroRole,
        percentile: f64,
        price: f64,
        minutes_ratio: f64,
    ) -> Tier {
        if price <= self.config.low_price_threshold {
            return Tier::Low;
        }

        let tier = self.tier_for_percentile(role, percentile);
        if minutes_ratio >= self.config.min_minutes_ratio {
            return tier;
        }

        if price >= self.config.high_price.get(role) {
            tier.max(Tier::Starter)
        } else {
            tier.min(Tier::Speculative)
        }
    }

    /// Classify every player with a role against its bucket's final-score distribution
    pub fn classify_all(&self, players: &mut [PlayerRecord]) {
        for (bucket, members) in role_buckets(players).iter().enumerate() {
            let role = bucket_role(bucket);
            let finals: Vec<f64> = members.iter().map(|&i| players[i].scores.final_score).collect();
            for (&idx, pct) in members.iter().zip(percentile_ranks(&finals)) {
                let player = &mut players[idx];
                player.scores.tier =
                    self.classify(role, pct, player.price, player.features.minutes_ratio);
            }
        }
    }
}

impl Default for TierClassifier {
    fn default() -> Self {
        Self::new(TierConfig::default())
    }
}
