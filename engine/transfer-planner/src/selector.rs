use std::collections::HashSet;

use player_valuation::Tier;

use crate::config::PlannerConfig;
use crate::models::{Plan, Swap};

/// Package gain bonus per tier step gained
pub const TIER_GAIN_WEIGHT: f64 = 2.0;

/// Package gain penalty per unit of added discipline rate
pub const DISCIPLINE_PENALTY_WEIGHT: f64 = 8.0;

/// Incoming players less available than this are flagged
const UNCERTAIN_AVAILABILITY: f64 = 0.5;

/// Value of a swap package:
/// `Σin.final − Σout.final + 2·Δtier − 8·max(0, Δdiscipline)`
pub fn package_gain(swaps: &[Swap]) -> f64 {
    let (mut score, mut tier, mut discipline) = (0.0, 0.0, 0.0);
    for swap in swaps {
        let out = &swap.outgoing.player;
        let inc = &swap.incoming;
        score += inc.scores.final_score - out.scores.final_score;
        tier += f64::from(inc.scores.tier.value()) - f64::from(out.scores.tier.value());
        discipline += inc.features.discipline_pm - out.features.discipline_pm;
    }
    score + TIER_GAIN_WEIGHT * tier - DISCIPLINE_PENALTY_WEIGHT * discipline.max(0.0)
}

/// Human-readable caveats attached to a plan
pub fn plan_warnings(swaps: &[Swap], budget_after: f64) -> Vec<String> {
    let mut warnings: Vec<String> = swaps
        .iter()
        .filter(|s| {
            s.incoming.scores.tier == Tier::Speculative
                || s.incoming.features.availability < UNCERTAIN_AVAILABILITY
        })
        .map(|s| format!("uncertain starter: {}", s.incoming.name))
        .collect();

    if swaps.iter().any(|s| s.gain < 0.0) {
        warnings.push("contains a negative-gain swap".to_string());
    }
    if budget_after < 0.0 {
        warnings.push(format!("over budget by {:.2}", -budget_after));
    }
    warnings
}

/// Swap pairs of `a` absent from `b` and of `b` absent from `a`, whichever is fewer
pub fn pair_difference(a: &Plan, b: &Plan) -> usize {
    let left: HashSet<(String, String)> = a.swaps.iter().map(Swap::pair_key).collect();
    let right: HashSet<(String, String)> = b.swaps.iter().map(Swap::pair_key).collect();
    left.difference(&right).count().min(right.difference(&left).count())
}

/// Thresholds, deduplicates, ranks and diversifies candidate plans
#[derive(Debug, Clone, PartialEq)]
pub struct PlanSelector {
    pub min_delta_single: f64,
    pub min_delta_multi: f64,
    pub top_plans: usize,
    pub min_plan_difference: usize,
}

impl PlanSelector {
    pub fn from_config(config: &PlannerConfig) -> Self {
        Self {
            min_delta_single: config.min_delta_single,
            min_delta_multi: config.min_delta_multi,
            top_plans: config.top_plans,
            min_plan_difference: config.min_plan_difference,
        }
    }

    /// Minimum gain for a package of `swaps` swaps
    pub fn threshold(&self, swaps: usize) -> f64 {
        if swaps <= 1 {
            self.min_delta_single
        } else {
            self.min_delta_multi
        }
    }

    pub fn meets_threshold(&self, plan: &Plan) -> bool {
        !plan.swaps.is_empty() && plan.package_gain >= self.threshold(plan.swaps.len())
    }

    /// Pick up to `top_plans` plans, best gain first, each differing from every
    /// earlier pick by at least `min_plan_difference` swap pairs
    pub fn select(&self, candidates: Vec<Plan>) -> Vec<Plan> {
        let mut seen = HashSet::new();
        let mut ranked: Vec<Plan> = candidates
            .into_iter()
            .filter(|p| self.meets_threshold(p))
            .filter(|p| seen.insert(p.signature()))
            .collect();

        ranked.sort_by(|a, b| {
            b.package_gain
                .total_cmp(&a.package_gain)
                .then_with(|| a.net_spend().total_cmp(&b.net_spend()))
                .then_with(|| a.signature().cmp(&b.signature()))
        });

        let mut picked: Vec<Plan> = Vec::new();
        for plan in ranked {
            if picked.len() >= self.top_plans {
                break;
            }
            if picked.iter().all(|p| pair_difference(p, &plan) >= self.min_plan_difference) {
                picked.push(plan);
            }
        }
        picked
    }
}
