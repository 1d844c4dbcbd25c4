use std::collections::HashMap;

use player_valuation::MacroRole;
use rand::RngCore;

use crate::beam::{keep_top, next_start, BeamState};
use crate::config::ConstraintContext;
use crate::models::{club_key, RosterEntry};
use crate::pool::BuyCandidate;

/// Per-credit penalty preferring cheaper packages at equal score
pub const COST_REGULARIZER: f64 = 0.02;

const BUDGET_EPSILON: f64 = 1e-9;

/// Situation left behind by a fixed outgoing package
#[derive(Debug, Clone, PartialEq)]
pub struct BuyContext {
    /// Quota minus remaining players, floored at zero, per role index
    pub deficits: [usize; 4],
    /// Sale proceeds of the outgoing package
    pub proceeds: f64,
    /// Remaining players per lowercase club name
    pub club_counts: HashMap<String, usize>,
    /// Deficits add up to exactly the number of incoming players
    pub exact_fill: bool,
    /// Maximum total spend; `None` in over-budget mode
    pub spend_cap: Option<f64>,
    pub club_cap: usize,
}

impl BuyContext {
    /// Build the context for selling the roster entries at `outgoing` (roster indices)
    pub fn new(
        roster: &[RosterEntry],
        outgoing: &[usize],
        constraints: &ConstraintContext,
    ) -> Self {
        let mut role_counts = [0usize; 4];
        let mut club_counts: HashMap<String, usize> = HashMap::new();
        let mut proceeds = 0.0;

        for (idx, entry) in roster.iter().enumerate() {
            if outgoing.contains(&idx) {
                proceeds += entry.sell_value;
                continue;
            }
            if let Some(role) = entry.macro_role() {
                role_counts[role.index()] += 1;
            }
            let club = club_key(&entry.player.club);
            if !club.is_empty() {
                *club_counts.entry(club).or_default() += 1;
            }
        }

        let mut deficits = [0usize; 4];
        for role in MacroRole::ALL {
            deficits[role.index()] =
                constraints.quotas.get(role).saturating_sub(role_counts[role.index()]);
        }

        let spend_cap = if constraints.allow_over_budget {
            None
        } else {
            Some(constraints.residual_budget + proceeds)
        };

        Self {
            exact_fill: deficits.iter().sum::<usize>() == outgoing.len(),
            deficits,
            proceeds,
            club_counts,
            spend_cap,
            club_cap: constraints.club_cap,
        }
    }
}

/// A partial selection of incoming buy-pool candidates
#[derive(Debug, Clone, PartialEq)]
pub struct BuyState {
    /// Indices into the buy pool, strictly increasing
    pub picks: Vec<usize>,
    pub spend: f64,
    pub score: f64,
    pub deficits: [usize; 4],
    tiebreak: u64,
}

impl BeamState for BuyState {
    fn score(&self) -> f64 {
        self.score
    }

    fn tiebreak(&self) -> u64 {
        self.tiebreak
    }

    fn picks(&self) -> &[usize] {
        &self.picks
    }
}

impl BuyState {
    /// Club count after this state's purchases, for a lowercase club name
    fn club_count(&self, pool: &[BuyCandidate], ctx: &BuyContext, club: &str) -> usize {
        let bought = self
            .picks
            .iter()
            .filter(|&&i| club_key(&pool[i].player.club) == club)
            .count();
        ctx.club_counts.get(club).copied().unwrap_or(0) + bought
    }

    fn try_extend(
        &self,
        pool: &[BuyCandidate],
        ctx: &BuyContext,
        idx: usize,
        rng: &mut dyn RngCore,
    ) -> Option<BuyState> {
        let candidate = &pool[idx];
        let role = candidate.role.index();

        if ctx.exact_fill && self.deficits[role] == 0 {
            return None;
        }

        let spend = self.spend + candidate.cost;
        if let Some(cap) = ctx.spend_cap {
            if spend > cap + BUDGET_EPSILON {
                return None;
            }
        }

        let club = club_key(&candidate.player.club);
        if !club.is_empty() && self.club_count(pool, ctx, &club) + 1 > ctx.club_cap {
            return None;
        }

        let mut deficits = self.deficits;
        deficits[role] = deficits[role].saturating_sub(1);

        let mut picks = self.picks.clone();
        picks.push(idx);

        Some(BuyState {
            picks,
            spend,
            score: self.score + candidate.player.scores.final_score
                - candidate.cost * COST_REGULARIZER,
            deficits,
            tiebreak: rng.next_u64(),
        })
    }
}

/// Enumerate the best legal `k`-player purchase packages for one outgoing package
pub fn buy_beam(
    pool: &[BuyCandidate],
    ctx: &BuyContext,
    k: usize,
    beam_width: usize,
    rng: &mut dyn RngCore,
) -> Vec<BuyState> {
    if k == 0 || k > pool.len() || beam_width == 0 {
        return Vec::new();
    }

    let mut frontier = vec![BuyState {
        picks: Vec::new(),
        spend: 0.0,
        score: 0.0,
        deficits: ctx.deficits,
        tiebreak: 0,
    }];

    for _ in 0..k {
        let mut next = Vec::new();
        for state in &frontier {
            for idx in next_start(&state.picks)..pool.len() {
                if let Some(extended) = state.try_extend(pool, ctx, idx, rng) {
                    next.push(extended);
                }
            }
        }
        keep_top(&mut next, beam_width);
        if next.is_empty() {
            return next;
        }
        frontier = next;
    }

    frontier.retain(|s| {
        s.picks.len() == k && (!ctx.exact_fill || s.deficits.iter().all(|&d| d == 0))
    });
    frontier
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{scored_player, squad, SquadSpec};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn candidate(name: &str, role: &str, club: &str, cost: f64, score: f64) -> BuyCandidate {
        let player = scored_player(name, role, club, cost, score);
        let role = player.macro_role().unwrap();
        BuyCandidate { player, role, cost }
    }

    fn defender_index(roster: &[RosterEntry]) -> usize {
        roster.iter().position(|e| e.macro_role() == Some(MacroRole::Defender)).unwrap()
    }

    #[test]
    fn test_context_after_selling_a_defender() {
        let roster = squad(&SquadSpec::default());
        let out = defender_index(&roster);
        let ctx = BuyContext::new(&roster, &[out], &ConstraintContext::default());
        assert_eq!(ctx.deficits, [0, 1, 0, 0]);
        assert!(ctx.exact_fill);
        assert_eq!(ctx.proceeds, 6.0);
        assert_eq!(ctx.spend_cap, Some(6.0));
    }

    #[test]
    fn test_exact_fill_only_accepts_missing_roles() {
        let roster = squad(&SquadSpec::default());
        let ctx =
            BuyContext::new(&roster, &[defender_index(&roster)], &ConstraintContext::default());
        let pool = vec![
            candidate("Star striker", "A", "X", 5.0, 95.0),
            candidate("Solid defender", "D", "Y", 5.0, 70.0),
        ];
        let states = buy_beam(&pool, &ctx, 1, 10, &mut StdRng::seed_from_u64(1));
        assert_eq!(states.len(), 1);
        assert_eq!(pool[states[0].picks[0]].player.name, "Solid defender");
    }

    #[test]
    fn test_budget_is_never_exceeded() {
        let roster = squad(&SquadSpec::default());
        let constraints = ConstraintContext { residual_budget: 0.0, ..Default::default() };
        let ctx = BuyContext::new(&roster, &[defender_index(&roster)], &constraints);
        let pool = vec![
            candidate("Pricey", "D", "X", 6.5, 90.0),
            candidate("Affordable", "D", "Y", 6.0, 60.0),
        ];
        let states = buy_beam(&pool, &ctx, 1, 10, &mut StdRng::seed_from_u64(1));
        assert_eq!(states.len(), 1);
        assert_eq!(pool[states[0].picks[0]].player.name, "Affordable");

        let over = ConstraintContext { allow_over_budget: true, ..Default::default() };
        let ctx = BuyContext::new(&roster, &[defender_index(&roster)], &over);
        let states = buy_beam(&pool, &ctx, 1, 10, &mut StdRng::seed_from_u64(1));
        assert_eq!(states.len(), 2);
        assert_eq!(pool[states[0].picks[0]].player.name, "Pricey");
    }

    #[test]
    fn test_club_cap_counts_remaining_and_bought_players() {
        let roster = squad(&SquadSpec::default());
        // Club 1 stays full; selling the Club 3 defender frees one Club 3 slot
        let out = roster.iter().position(|e| e.player.club == "Club 3").unwrap();
        let constraints = ConstraintContext { residual_budget: 100.0, ..Default::default() };
        let ctx = BuyContext::new(&roster, &[out], &constraints);
        let pool = vec![
            candidate("Club one target", "D", "club 1", 5.0, 99.0),
            candidate("Club three target", "D", "Club 3", 5.0, 50.0),
        ];
        let states = buy_beam(&pool, &ctx, 1, 10, &mut StdRng::seed_from_u64(1));
        assert_eq!(states.len(), 1);
        assert_eq!(pool[states[0].picks[0]].player.name, "Club three target");
    }

    #[test]
    fn test_cost_regularizer_breaks_score_ties() {
        let roster = squad(&SquadSpec::default());
        let constraints = ConstraintContext { residual_budget: 100.0, ..Default::default() };
        let ctx = BuyContext::new(&roster, &[defender_index(&roster)], &constraints);
        let pool = vec![
            candidate("Expensive", "D", "X", 20.0, 70.0),
            candidate("Cheap", "D", "Y", 4.0, 70.0),
        ];
        let states = buy_beam(&pool, &ctx, 1, 10, &mut StdRng::seed_from_u64(1));
        assert_eq!(pool[states[0].picks[0]].player.name, "Cheap");
        assert!((states[0].score - (70.0 - 4.0 * COST_REGULARIZER)).abs() < 1e-12);
    }

    #[test]
    fn test_two_role_package_fills_both_deficits() {
        let roster = squad(&SquadSpec::default());
        let def = defender_index(&roster);
        let att = roster.iter().position(|e| e.macro_role() == Some(MacroRole::Attacker)).unwrap();
        let constraints = ConstraintContext { residual_budget: 100.0, ..Default::default() };
        let ctx = BuyContext::new(&roster, &[def, att], &constraints);
        let pool = vec![
            candidate("Att A", "A", "X", 5.0, 90.0),
            candidate("Att B", "A", "Y", 5.0, 85.0),
            candidate("Def A", "D", "Z", 5.0, 60.0),
        ];
        let states = buy_beam(&pool, &ctx, 2, 10, &mut StdRng::seed_from_u64(1));
        assert!(!states.is_empty());
        for state in &states {
            let roles: Vec<MacroRole> = state.picks.iter().map(|&i| pool[i].role).collect();
            assert!(roles.contains(&MacroRole::Attacker) && roles.contains(&MacroRole::Defender));
            assert_eq!(state.deficits, [0, 0, 0, 0]);
        }
        assert_eq!(pool[states[0].picks[0]].player.name, "Att A");
    }
}
