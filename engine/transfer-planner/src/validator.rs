use std::collections::BTreeMap;

use player_valuation::{MacroRole, PlayerRecord};
use serde::{Deserialize, Serialize};

use crate::config::ConstraintContext;
use crate::models::{club_key, RosterEntry};

/// Pass/fail verdict with one readable reason per violation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub passed: bool,
    pub reasons: Vec<String>,
}

impl ValidationReport {
    fn from_reasons(reasons: Vec<String>) -> Self {
        Self { passed: reasons.is_empty(), reasons }
    }
}

/// Validate the current roster
pub fn validate_roster(
    roster: &[RosterEntry],
    constraints: &ConstraintContext,
) -> ValidationReport {
    validate_players(roster.iter().map(|e| &e.player), constraints)
}

/// Validate any squad of scored players, e.g. a hypothetical post-swap roster
pub fn validate_players<'a, I>(players: I, constraints: &ConstraintContext) -> ValidationReport
where
    I: IntoIterator<Item = &'a PlayerRecord>,
{
    let players: Vec<&PlayerRecord> = players.into_iter().collect();
    let mut reasons = Vec::new();

    let expected = constraints.quotas.total();
    if players.len() != expected {
        reasons.push(format!("roster has {} players, expected {}", players.len(), expected));
    }

    let mut role_counts = [0usize; 4];
    let mut band_counts = [0usize; 4];
    // club key -> (first-seen spelling, count)
    let mut club_counts: BTreeMap<String, (&str, usize)> = BTreeMap::new();

    for player in &players {
        match player.macro_role() {
            Some(role) => {
                role_counts[role.index()] += 1;
                if player.initial_or_current_price() >= constraints.bands.threshold.get(role) {
                    band_counts[role.index()] += 1;
                }
            }
            None => reasons.push(format!(
                "{} has no recognised role ({})",
                player.name, player.role.primitive
            )),
        }
        let key = club_key(&player.club);
        if !key.is_empty() {
            club_counts.entry(key).or_insert((player.club.trim(), 0)).1 += 1;
        }
    }

    for role in MacroRole::ALL {
        let count = role_counts[role.index()];
        let quota = constraints.quotas.get(role);
        if count != quota {
            reasons.push(format!("{}: {} players, expected {}", role.code(), count, quota));
        }
    }

    for (club, count) in club_counts.values() {
        if *count > constraints.club_cap {
            reasons.push(format!(
                "{club}: {count} players exceeds club cap {}",
                constraints.club_cap
            ));
        }
    }

    if constraints.enforce_initial_bands {
        for role in MacroRole::ALL {
            let count = band_counts[role.index()];
            let max = constraints.bands.max.get(role);
            if count > max {
                reasons.push(format!(
                    "{}: {} players with initial price >= {} (max {})",
                    role.code(),
                    count,
                    constraints.bands.threshold.get(role),
                    max
                ));
            }
        }
    }

    ValidationReport::from_reasons(reasons)
}
