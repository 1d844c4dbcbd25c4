use player_valuation::{MacroRole, PlayerRecord, RoleRankings, Tier};
use serde::{Deserialize, Serialize};

use crate::config::SellPriceSource;
use crate::window::MarketWindow;

/// Case- and whitespace-insensitive club identity used by every club cap check
pub fn club_key(club: &str) -> String {
    club.trim().to_lowercase()
}

/// One roster line as delivered by the roster source (many teams per source)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterRow {
    pub team: String,
    pub player_name: String,
    /// Optional club hint used to disambiguate homonyms
    pub club: Option<String>,
    pub acquisition_price: f64,
    pub roster_value: f64,
}

/// A scored player owned by the team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub player: PlayerRecord,
    pub acquisition_price: f64,
    /// Current roster valuation; 0 when the source does not track it
    pub roster_value: f64,
    pub sell_value: f64,
}

impl RosterEntry {
    pub fn new(player: PlayerRecord, acquisition_price: f64, roster_value: f64) -> Self {
        let mut entry = Self { player, acquisition_price, roster_value, sell_value: 0.0 };
        entry.sell_value = entry.compute_sell_value(SellPriceSource::Current);
        entry
    }

    /// Proceeds credited when this player is sold under the given source
    pub fn compute_sell_value(&self, source: SellPriceSource) -> f64 {
        match source {
            SellPriceSource::Current if self.roster_value > 0.0 => self.roster_value,
            SellPriceSource::Current => self.player.price,
            SellPriceSource::Paid => self.acquisition_price,
        }
    }

    pub fn with_sell_source(mut self, source: SellPriceSource) -> Self {
        self.sell_value = self.compute_sell_value(source);
        self
    }

    pub fn macro_role(&self) -> Option<MacroRole> {
        self.player.macro_role()
    }
}

/// One outgoing/incoming pair of a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Swap {
    pub outgoing: RosterEntry,
    pub incoming: PlayerRecord,
    /// Incoming final score minus outgoing final score
    pub gain: f64,
    pub sell_value: f64,
    pub buy_cost: f64,
}

impl Swap {
    pub fn new(outgoing: RosterEntry, incoming: PlayerRecord, buy_cost: f64) -> Self {
        let gain = incoming.scores.final_score - outgoing.player.scores.final_score;
        let sell_value = outgoing.sell_value;
        Self { outgoing, incoming, gain, sell_value, buy_cost }
    }

    /// Identity of the pair used for deduplication and diversity checks
    pub fn pair_key(&self) -> (String, String) {
        (self.outgoing.player.name_key.clone(), self.incoming.name_key.clone())
    }
}

/// A package of simultaneous swaps; immutable once returned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub swaps: Vec<Swap>,
    pub spent: f64,
    pub proceeds: f64,
    pub budget_before: f64,
    pub budget_after: f64,
    pub package_gain: f64,
    pub warnings: Vec<String>,
}

impl Plan {
    pub fn outgoing_names(&self) -> Vec<&str> {
        self.swaps.iter().map(|s| s.outgoing.player.name.as_str()).collect()
    }

    pub fn incoming_names(&self) -> Vec<&str> {
        self.swaps.iter().map(|s| s.incoming.name.as_str()).collect()
    }

    /// Sorted swap pairs: equal signatures mean the same package
    pub fn signature(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<_> = self.swaps.iter().map(Swap::pair_key).collect();
        pairs.sort();
        pairs
    }

    /// Net spend after sale proceeds
    pub fn net_spend(&self) -> f64 {
        self.spent - self.proceeds
    }
}

/// Per-player view of the current squad
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquadAuditRow {
    pub name: String,
    pub club: String,
    pub role: String,
    pub reparto: Option<MacroRole>,
    pub real: f64,
    pub potential: f64,
    pub credit_efficiency: f64,
    pub final_score: f64,
    pub tier: Tier,
    pub price: f64,
    pub initial_price: f64,
    pub acquisition_price: f64,
    pub sell_value: f64,
}

impl From<&RosterEntry> for SquadAuditRow {
    fn from(entry: &RosterEntry) -> Self {
        let p = &entry.player;
        Self {
            name: p.name.clone(),
            club: p.club.clone(),
            role: p.role.primitive.clone(),
            reparto: p.macro_role(),
            real: p.scores.real,
            potential: p.scores.potential,
            credit_efficiency: p.scores.credit_efficiency,
            final_score: p.scores.final_score,
            tier: p.scores.tier,
            price: p.price,
            initial_price: p.initial_price,
            acquisition_price: entry.acquisition_price,
            sell_value: entry.sell_value,
        }
    }
}

/// Audit rows for a roster, grouped by reparto and best first within it
pub fn squad_audit(roster: &[RosterEntry]) -> Vec<SquadAuditRow> {
    let mut rows: Vec<SquadAuditRow> = roster.iter().map(SquadAuditRow::from).collect();
    rows.sort_by(|a, b| {
        a.reparto
            .cmp(&b.reparto)
            .then_with(|| b.final_score.total_cmp(&a.final_score))
            .then_with(|| a.name.cmp(&b.name))
    });
    rows
}

/// A planning request for one team
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub team: String,
    pub residual_budget: f64,
    /// Market window key capping the number of changes
    pub window: Option<String>,
}

/// Everything one planning call returns
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanningOutcome {
    pub plans: Vec<Plan>,
    /// Diagnostics such as skipped roster rows or the empty-result note
    pub notes: Vec<String>,
    pub max_changes: usize,
    pub window: Option<MarketWindow>,
    pub rankings: RoleRankings,
    pub audit: Vec<SquadAuditRow>,
}
