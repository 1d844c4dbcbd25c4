use std::collections::{HashMap, HashSet};

use player_valuation::{name_key, PlayerRecord};
use tracing::warn;

use crate::config::SellPriceSource;
use crate::error::{PlannerError, Result};
use crate::models::{club_key, RosterEntry, RosterRow};

/// A team's roster joined against the scored player universe
#[derive(Debug, Clone, Default)]
pub struct ResolvedRoster {
    pub entries: Vec<RosterEntry>,
    /// Rows that could not be joined, one message each
    pub notes: Vec<String>,
}

/// Select the team's rows from the roster source and attach scored player records.
///
/// Rows naming players absent from the universe are skipped with a note.
pub fn resolve_roster(
    team: &str,
    rows: &[RosterRow],
    universe: &[PlayerRecord],
    sell_source: SellPriceSource,
) -> Result<ResolvedRoster> {
    let team = team.trim();
    if team.is_empty() {
        return Err(PlannerError::InvalidInput("team name is required".to_string()));
    }

    let team_rows: Vec<&RosterRow> =
        rows.iter().filter(|r| r.team.trim().eq_ignore_ascii_case(team)).collect();
    if team_rows.is_empty() {
        return Err(PlannerError::TeamNotFound(team.to_string()));
    }

    let mut by_key: HashMap<&str, Vec<&PlayerRecord>> = HashMap::new();
    for player in universe {
        by_key.entry(player.name_key.as_str()).or_default().push(player);
    }

    let mut resolved = ResolvedRoster::default();
    let mut seen: HashSet<(String, String)> = HashSet::new();

    for row in team_rows {
        let key = name_key(&row.player_name);
        let candidates = by_key.get(key.as_str()).map(Vec::as_slice).unwrap_or(&[]);
        let hint = row.club.as_deref().map(str::trim).filter(|c| !c.is_empty());
        let player = match hint {
            Some(hint) => {
                let wanted = club_key(hint);
                let matched = candidates.iter().find(|p| club_key(&p.club) == wanted);
                if matched.is_none() {
                    if let Some(fallback) = candidates.first() {
                        resolved.notes.push(format!(
                            "club hint {} for {} matched no player, using {} ({})",
                            hint,
                            row.player_name,
                            fallback.name,
                            fallback.club
                        ));
                    }
                }
                matched.or_else(|| candidates.first())
            }
            None => candidates.first(),
        };

        let Some(player) = player else {
            warn!(
                "Roster player {} of team {} not found in player universe",
                row.player_name, team
            );
            resolved
                .notes
                .push(format!("roster player {} not found in player universe", row.player_name));
            continue;
        };

        if !seen.insert((player.name_key.clone(), club_key(&player.club))) {
            resolved.notes.push(format!("duplicate roster row for {} ignored", row.player_name));
            continue;
        }

        resolved.entries.push(
            RosterEntry::new((*player).clone(), row.acquisition_price, row.roster_value)
                .with_sell_source(sell_source),
        );
    }

    Ok(resolved)
}
