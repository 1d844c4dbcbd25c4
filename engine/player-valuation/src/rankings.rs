use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{FeatureMap, MacroRole, PlayerRecord, Tier};

/// One line of a per-role ranking report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingRow {
    pub rank: usize,
    pub name: String,
    pub club: String,
    pub role: String,
    pub real: f64,
    pub potential: f64,
    pub credit_efficiency: f64,
    pub final_score: f64,
    pub tier: Tier,
    pub price: f64,
}

/// Top players of every macro-role bucket, best first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleRankings {
    pub by_role: BTreeMap<MacroRole, Vec<RankingRow>>,
}

impl RoleRankings {
    /// Rank scored players within their bucket and keep the first `top_rows`
    pub fn build(players: &[PlayerRecord], top_rows: usize) -> Self {
        let mut by_role: BTreeMap<MacroRole, Vec<&PlayerRecord>> = BTreeMap::new();
        for player in players {
            if let Some(role) = player.macro_role() {
                by_role.entry(role).or_default().push(player);
            }
        }

        let by_role = by_role
            .into_iter()
            .map(|(role, mut members)| {
                members.sort_by(|a, b| {
                    b.scores
                        .final_score
                        .total_cmp(&a.scores.final_score)
                        .then_with(|| a.name_key.cmp(&b.name_key))
                });
                let rows = members
                    .into_iter()
                    .take(top_rows)
                    .enumerate()
                    .map(|(idx, p)| RankingRow {
                        rank: idx + 1,
                        name: p.name.clone(),
                        club: p.club.clone(),
                        role: p.role.primitive.clone(),
                        real: p.scores.real,
                        potential: p.scores.potential,
                        credit_efficiency: p.scores.credit_efficiency,
                        final_score: p.scores.final_score,
                        tier: p.scores.tier,
                        price: p.price,
                    })
                    .collect();
                (role, rows)
            })
            .collect();

        Self { by_role }
    }

    pub fn role(&self, role: MacroRole) -> &[RankingRow] {
        self.by_role.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Scores of a single player computed against the full pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub name: String,
    pub club: String,
    pub macro_role: MacroRole,
    pub real: f64,
    pub potential: f64,
    pub credit_efficiency: f64,
    pub final_score: f64,
    pub tier: Tier,
    pub price: f64,
    pub features: FeatureMap,
}

impl ScoreCard {
    pub fn from_record(player: &PlayerRecord, macro_role: MacroRole) -> Self {
        Self {
            name: player.name.clone(),
            club: player.club.clone(),
            macro_role,
            real: player.scores.real,
            potential: player.scores.potential,
            credit_efficiency: player.scores.credit_efficiency,
            final_score: player.scores.final_score,
            tier: player.scores.tier,
            price: player.price,
            features: player.features.clone(),
        }
    }
}
