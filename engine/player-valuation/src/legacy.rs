//! Legacy recommendation model.
//!
//! Scores players on titolarity (how much they actually play), a discipline
//! penalty and the team context, with fantasy average percentiles as the
//! performance signal. No shrinkage and no hot-streak bonus. Kept as an
//! alternative strategy behind the same planner.

use crate::models::PlayerRecord;
use crate::percentile::percentile_ranks;
use crate::strategy::{role_buckets, ScoringStrategy};

const PERFORMANCE_WEIGHT: f64 = 0.45;
const TITOLARITY_WEIGHT: f64 = 0.35;
const TEAM_WEIGHT: f64 = 0.20;
const DISCIPLINE_PENALTY_PER_CARD: f64 = 25.0;
const MAX_DISCIPLINE_PENALTY: f64 = 15.0;

#[derive(Debug, Default, Clone)]
pub struct LegacyScoring;

impl LegacyScoring {
    pub fn new() -> Self {
        Self
    }
}

/// 0-100 measure of how nailed-on a starter the player is
pub fn titolarity(player: &PlayerRecord) -> f64 {
    let f = &player.features;
    (100.0 * (0.6 * f.minutes_ratio.clamp(0.0, 1.0) + 0.4 * f.availability.clamp(0.0, 1.0)))
        .clamp(0.0, 100.0)
}

pub fn discipline_penalty(player: &PlayerRecord) -> f64 {
    (player.features.discipline_pm * DISCIPLINE_PENALTY_PER_CARD).clamp(0.0, MAX_DISCIPLINE_PENALTY)
}

impl ScoringStrategy for LegacyScoring {
    fn name(&self) -> &'static str {
        "legacy"
    }

    fn score(&self, players: &mut [PlayerRecord]) {
        for members in role_buckets(players).iter() {
            let averages: Vec<f64> =
                members.iter().map(|&i| players[i].features.fantasy_average).collect();
            let performance = percentile_ranks(&averages);

            for (&idx, perf) in members.iter().zip(&performance) {
                let player = &mut players[idx];
                let team = player.features.team_context;
                let final_score = PERFORMANCE_WEIGHT * perf
                    + TITOLARITY_WEIGHT * titolarity(player)
                    + TEAM_WEIGHT * team
                    - discipline_penalty(player);

                player.scores.real = *perf;
                player.scores.potential = (0.5 * perf + 0.5 * team).clamp(0.0, 100.0);
                player.scores.final_score = final_score.clamp(0.0, 100.0);
            }

            let ratios: Vec<f64> = members
                .iter()
                .map(|&i| players[i].scores.final_score / players[i].price.max(1.0))
                .collect();
            for (&idx, rank) in members.iter().zip(percentile_ranks(&ratios)) {
                players[idx].scores.credit_efficiency = rank;
            }
        }
    }
}
