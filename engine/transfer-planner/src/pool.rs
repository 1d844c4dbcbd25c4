use std::collections::HashSet;

use player_valuation::{MacroRole, PlayerRecord};
use tracing::debug;

use crate::config::{BuyPriceSource, PlannerConfig};
use crate::models::{club_key, RosterEntry};

/// A roster player considered for sale
#[derive(Debug, Clone, PartialEq)]
pub struct SellCandidate {
    /// Index into the roster slice the pool was built from
    pub roster_index: usize,
    pub role: MacroRole,
    pub worthiness: f64,
}

/// A market player considered for purchase
#[derive(Debug, Clone, PartialEq)]
pub struct BuyCandidate {
    pub player: PlayerRecord,
    pub role: MacroRole,
    pub cost: f64,
}

/// Bounded sell and buy candidate lists of one planning run
#[derive(Debug, Clone, Default)]
pub struct CandidatePools {
    pub sell: Vec<SellCandidate>,
    pub buy: Vec<BuyCandidate>,
}

impl CandidatePools {
    pub fn build(
        roster: &[RosterEntry],
        universe: &[PlayerRecord],
        config: &PlannerConfig,
    ) -> Self {
        let pools = Self {
            sell: build_sell_pool(roster, config.sell_pool_limit),
            buy: build_buy_pool(universe, roster, config),
        };
        debug!("Candidate pools built: {} sell, {} buy", pools.sell.len(), pools.buy.len());
        pools
    }
}

/// Higher for weak, undisciplined or rarely available players
pub fn sell_worthiness(player: &PlayerRecord) -> f64 {
    let f = &player.features;
    (100.0 - player.scores.final_score)
        + 20.0 * f.discipline_pm.max(0.0)
        + 25.0 * (1.0 - f.availability.clamp(0.0, 1.0))
}

fn identity(player: &PlayerRecord) -> (String, String) {
    (player.name_key.clone(), club_key(&player.club))
}

/// Roster entries ranked by sell-worthiness, deduplicated, truncated to `limit`
pub fn build_sell_pool(roster: &[RosterEntry], limit: usize) -> Vec<SellCandidate> {
    let mut seen = HashSet::new();
    let mut pool: Vec<SellCandidate> = roster
        .iter()
        .enumerate()
        .filter_map(|(idx, entry)| {
            let role = entry.macro_role()?;
            seen.insert(identity(&entry.player)).then(|| SellCandidate {
                roster_index: idx,
                role,
                worthiness: sell_worthiness(&entry.player),
            })
        })
        .collect();

    pool.sort_by(|a, b| {
        b.worthiness.total_cmp(&a.worthiness).then_with(|| {
            roster[a.roster_index].player.name_key.cmp(&roster[b.roster_index].player.name_key)
        })
    });
    pool.truncate(limit);
    pool
}

/// Acquisition cost of a player under the configured price source
pub fn buy_cost(player: &PlayerRecord, source: BuyPriceSource) -> f64 {
    match source {
        BuyPriceSource::Current => player.price,
        BuyPriceSource::Initial => player.initial_or_current_price(),
    }
}

/// Non-roster players with a role and enough evidence, best final score first
pub fn build_buy_pool(
    universe: &[PlayerRecord],
    roster: &[RosterEntry],
    config: &PlannerConfig,
) -> Vec<BuyCandidate> {
    let owned: HashSet<(String, String)> = roster.iter().map(|e| identity(&e.player)).collect();
    let mut seen = HashSet::new();

    let mut pool: Vec<BuyCandidate> = universe
        .iter()
        .filter(|p| {
            p.stats.appearances >= config.min_buy_appearances
                || p.scores.potential >= config.min_buy_potential
        })
        .filter_map(|p| {
            let role = p.macro_role()?;
            let id = identity(p);
            if owned.contains(&id) || !seen.insert(id) {
                return None;
            }
            let cost = buy_cost(p, config.buy_price_source);
            Some(BuyCandidate { player: p.clone(), role, cost })
        })
        .collect();

    pool.sort_by(|a, b| {
        b.player
            .scores
            .final_score
            .total_cmp(&a.player.scores.final_score)
            .then_with(|| a.player.name_key.cmp(&b.player.name_key))
    });
    pool.truncate(config.buy_pool_limit);
    pool
}
