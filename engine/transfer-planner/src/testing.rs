//! Fixtures shared by the planner's unit and integration tests

use player_valuation::{MacroRole, PlayerRecord, RawStats, Tier};

use crate::models::RosterEntry;

/// Shape of a generated 23-player squad
#[derive(Debug, Clone)]
pub struct SquadSpec {
    pub base_score: f64,
    pub price: f64,
}

impl Default for SquadSpec {
    fn default() -> Self {
        Self { base_score: 40.0, price: 6.0 }
    }
}

/// Role tokens of a 3/7/8/5 squad in reparto order
pub fn squad_roles() -> Vec<&'static str> {
    let mut roles = Vec::new();
    roles.extend(std::iter::repeat("P").take(3));
    roles.extend(std::iter::repeat("D").take(7));
    roles.extend(std::iter::repeat("C").take(8));
    roles.extend(std::iter::repeat("A").take(5));
    roles
}

/// A pre-scored player; bypasses the valuation pipeline
pub fn scored_player(
    name: &str,
    role: &str,
    club: &str,
    price: f64,
    final_score: f64,
) -> PlayerRecord {
    let stats = RawStats {
        appearances: 15.0,
        minutes: 1200.0,
        team_matches: 15.0,
        ..Default::default()
    };
    let mut player = PlayerRecord::new(name, role, club, stats, price, price);
    player.features.availability = 1.0;
    player.features.minutes_ratio = 0.9;
    player.scores.real = final_score;
    player.scores.potential = final_score;
    player.scores.credit_efficiency = 50.0;
    player.scores.final_score = final_score;
    player.scores.tier = Tier::Starter;
    player
}

/// A legal 23-player roster spread over eight clubs (at most three per club)
pub fn squad(spec: &SquadSpec) -> Vec<RosterEntry> {
    squad_roles()
        .into_iter()
        .enumerate()
        .map(|(i, role)| {
            let player = scored_player(
                &format!("Owned {role} {i}"),
                role,
                &format!("Club {}", i % 8),
                spec.price,
                spec.base_score + i as f64 * 0.5,
            );
            RosterEntry::new(player, spec.price, 0.0)
        })
        .collect()
}

/// Free agents: `per_role` players for every reparto, one club each
pub fn market(per_role: usize, base_score: f64, price: f64) -> Vec<PlayerRecord> {
    let mut players = Vec::new();
    for role in MacroRole::ALL {
        let token = match role {
            MacroRole::Goalkeeper => "P",
            MacroRole::Defender => "D",
            MacroRole::Midfielder => "C",
            MacroRole::Attacker => "A",
        };
        for i in 0..per_role {
            players.push(scored_player(
                &format!("Target {token} {i}"),
                token,
                &format!("Market Club {token}{i}"),
                price,
                base_score + i as f64 * 3.0,
            ));
        }
    }
    players
}
