use player_valuation::{PlayerRecord, RoleRankings, ValuationEngine};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug, info};

use crate::buy_search::{buy_beam, BuyContext, BuyState};
use crate::config::{ConstraintContext, PlannerConfig};
use crate::error::{PlannerError, Result};
use crate::models::{squad_audit, Plan, PlanRequest, PlanningOutcome, RosterEntry, RosterRow, Swap};
use crate::pool::{BuyCandidate, CandidatePools};
use crate::roster::resolve_roster;
use crate::selector::{package_gain, plan_warnings, PlanSelector};
use crate::sell_search::sell_beam;
use crate::validator::{validate_players, validate_roster};
use crate::window::{MarketWindow, MarketWindowCatalog};

pub const NO_PLAN_NOTE: &str = "no valid plan found under current constraints";

/// Proposes diversified, legal transfer packages for one team
pub struct TransferPlanner {
    config: PlannerConfig,
    valuation: ValuationEngine,
    selector: PlanSelector,
}

impl TransferPlanner {
    pub fn new(config: PlannerConfig) -> Self {
        info!(
            "🔧 Creating transfer planner (beam width {}, up to {} changes)",
            config.beam_width, config.max_changes
        );
        Self {
            valuation: ValuationEngine::new(config.valuation.clone()),
            selector: PlanSelector::from_config(&config),
            config,
        }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn valuation(&self) -> &ValuationEngine {
        &self.valuation
    }

    /// Score the universe and plan with the configured seed
    pub fn plan_seeded(
        &self,
        request: &PlanRequest,
        universe: &[PlayerRecord],
        roster_rows: &[RosterRow],
        catalog: &MarketWindowCatalog,
    ) -> Result<PlanningOutcome> {
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        self.plan(request, universe, roster_rows, catalog, &mut rng)
    }

    /// Score a fresh copy of the universe, then plan against it
    pub fn plan(
        &self,
        request: &PlanRequest,
        universe: &[PlayerRecord],
        roster_rows: &[RosterRow],
        catalog: &MarketWindowCatalog,
        rng: &mut dyn RngCore,
    ) -> Result<PlanningOutcome> {
        let mut scored = universe.to_vec();
        self.valuation.evaluate(&mut scored);
        self.plan_evaluated(request, &scored, roster_rows, catalog, rng)
    }

    /// Plan against a universe whose scores and tiers are already computed
    pub fn plan_evaluated(
        &self,
        request: &PlanRequest,
        universe: &[PlayerRecord],
        roster_rows: &[RosterRow],
        catalog: &MarketWindowCatalog,
        rng: &mut dyn RngCore,
    ) -> Result<PlanningOutcome> {
        let budget = request.residual_budget;
        if !budget.is_finite() || budget < 0.0 {
            return Err(PlannerError::InvalidInput(format!(
                "residual budget must be a non-negative number, got {budget}"
            )));
        }

        let window = match request.window.as_deref() {
            Some(key) => Some(catalog.resolve(key)?.clone()),
            None => None,
        };

        let resolved =
            resolve_roster(&request.team, roster_rows, universe, self.config.sell_price_source)?;
        let roster = resolved.entries;
        let mut notes = resolved.notes;

        let constraints = ConstraintContext::from_config(&self.config, budget);
        let current = validate_roster(&roster, &constraints);
        notes.extend(current.reasons.iter().map(|r| format!("current roster: {r}")));

        let max_changes = self.max_changes(window.as_ref(), roster.len());
        info!(
            "🚀 Planning transfers for {} ({} players, budget {:.2}, up to {} changes)",
            request.team.trim(),
            roster.len(),
            budget,
            max_changes
        );

        let pools = CandidatePools::build(&roster, universe, &self.config);
        let mut candidates = Vec::new();
        for k in 1..=max_changes {
            let found = self.candidates_for(k, &roster, &pools, &constraints, rng);
            debug!("{} legal packages with {} swaps", found.len(), k);
            candidates.extend(found);
        }

        let plans = self.selector.select(candidates);
        if plans.is_empty() {
            notes.push(NO_PLAN_NOTE.to_string());
        }
        info!("✅ Planning complete: {} plans for {}", plans.len(), request.team.trim());

        Ok(PlanningOutcome {
            plans,
            notes,
            max_changes,
            window,
            rankings: RoleRankings::build(universe, self.config.top_rows),
            audit: squad_audit(&roster),
        })
    }

    /// Changes allowed by configuration, window and roster size, whichever is smallest
    fn max_changes(&self, window: Option<&MarketWindow>, roster_len: usize) -> usize {
        let mut limit = self.config.max_changes.min(roster_len);
        if let Some(window) = window {
            limit = limit.min(window.max_changes);
        }
        limit
    }

    /// Every legal `k`-swap package found by the two beam searches
    fn candidates_for(
        &self,
        k: usize,
        roster: &[RosterEntry],
        pools: &CandidatePools,
        constraints: &ConstraintContext,
        rng: &mut dyn RngCore,
    ) -> Vec<Plan> {
        let width = self.config.beam_width;
        let mut plans = Vec::new();

        for sell in sell_beam(&pools.sell, k, width, rng) {
            let outgoing: Vec<usize> =
                sell.picks.iter().map(|&i| pools.sell[i].roster_index).collect();
            let ctx = BuyContext::new(roster, &outgoing, constraints);

            for buy in buy_beam(&pools.buy, &ctx, k, width, rng) {
                let plan = build_plan(roster, &outgoing, &pools.buy, &buy, &ctx, constraints);
                plans.extend(plan);
            }
        }
        plans
    }
}

impl Default for TransferPlanner {
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}

/// Pair each outgoing player with an incoming player of the same role where possible
fn pair_swaps(roster: &[RosterEntry], outgoing: &[usize], incoming: &[&BuyCandidate]) -> Vec<Swap> {
    let mut used = vec![false; incoming.len()];
    let mut partner: Vec<Option<usize>> = vec![None; outgoing.len()];

    for (slot, &out) in outgoing.iter().enumerate() {
        let role = roster[out].macro_role();
        if let Some(j) = (0..incoming.len()).find(|&j| !used[j] && Some(incoming[j].role) == role) {
            used[j] = true;
            partner[slot] = Some(j);
        }
    }
    for slot in partner.iter_mut().filter(|p| p.is_none()) {
        if let Some(j) = used.iter().position(|u| !u) {
            used[j] = true;
            *slot = Some(j);
        }
    }

    outgoing
        .iter()
        .zip(partner)
        .filter_map(|(&out, j)| {
            let candidate = incoming[j?];
            Some(Swap::new(roster[out].clone(), candidate.player.clone(), candidate.cost))
        })
        .collect()
}

/// Turn a sell/buy combination into a plan when the resulting roster is legal
fn build_plan(
    roster: &[RosterEntry],
    outgoing: &[usize],
    buy_pool: &[BuyCandidate],
    buy: &BuyState,
    ctx: &BuyContext,
    constraints: &ConstraintContext,
) -> Option<Plan> {
    let incoming: Vec<&BuyCandidate> = buy.picks.iter().map(|&i| &buy_pool[i]).collect();

    let after = roster
        .iter()
        .enumerate()
        .filter(|(idx, _)| !outgoing.contains(idx))
        .map(|(_, e)| &e.player)
        .chain(incoming.iter().map(|c| &c.player));
    if !validate_players(after, constraints).passed {
        return None;
    }

    let swaps = pair_swaps(roster, outgoing, &incoming);
    let spent = buy.spend;
    let budget_after = constraints.residual_budget + ctx.proceeds - spent;

    Some(Plan {
        package_gain: package_gain(&swaps),
        warnings: plan_warnings(&swaps, budget_after),
        swaps,
        spent,
        proceeds: ctx.proceeds,
        budget_before: constraints.residual_budget,
        budget_after,
    })
}
