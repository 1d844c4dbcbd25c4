//! End-to-end planning scenarios over generated squads and markets

use std::collections::HashSet;

use chrono::NaiveDate;
use player_valuation::{MacroRole, PlayerRecord, RawStats, ScoringStrategyKind};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{ConstraintContext, PlannerConfig};
use crate::error::PlannerError;
use crate::models::{Plan, PlanRequest, PlanningOutcome, RosterEntry, RosterRow};
use crate::planner::{TransferPlanner, NO_PLAN_NOTE};
use crate::selector::pair_difference;
use crate::testing::{market, scored_player, squad, squad_roles, SquadSpec};
use crate::validator::validate_players;
use crate::window::{MarketWindow, MarketWindowCatalog};

const TEAM: &str = "FC Test";

fn rows_for(roster: &[RosterEntry]) -> Vec<RosterRow> {
    roster
        .iter()
        .map(|e| RosterRow {
            team: TEAM.to_string(),
            player_name: e.player.name.clone(),
            club: Some(e.player.club.clone()),
            acquisition_price: e.acquisition_price,
            roster_value: e.roster_value,
        })
        .collect()
}

fn universe_with(roster: &[RosterEntry], market: Vec<PlayerRecord>) -> Vec<PlayerRecord> {
    roster.iter().map(|e| e.player.clone()).chain(market).collect()
}

fn catalog() -> MarketWindowCatalog {
    MarketWindowCatalog::new(vec![MarketWindow {
        key: "january".to_string(),
        name: "January window".to_string(),
        start: NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
        end: NaiveDate::from_ymd_opt(2025, 2, 3).unwrap(),
        max_changes: 1,
    }])
}

fn request(budget: f64) -> PlanRequest {
    PlanRequest { team: TEAM.to_string(), residual_budget: budget, window: None }
}

fn plan_scored(
    config: PlannerConfig,
    request: &PlanRequest,
    universe: &[PlayerRecord],
    rows: &[RosterRow],
    seed: u64,
) -> PlanningOutcome {
    let planner = TransferPlanner::new(config);
    let mut rng = StdRng::seed_from_u64(seed);
    planner.plan_evaluated(request, universe, rows, &catalog(), &mut rng).unwrap()
}

/// Squad with one clearly weak attacker, a market of upgrades and one expensive star
fn standard_outcome(budget: f64) -> (Vec<RosterEntry>, PlanningOutcome) {
    let mut roster = squad(&SquadSpec::default());
    roster[20].player.scores.final_score = 5.0;
    let mut targets = market(4, 60.0, 6.0);
    targets.push(scored_player("Superstar", "A", "Rich Club", 50.0, 99.0));
    let universe = universe_with(&roster, targets);
    let outcome =
        plan_scored(PlannerConfig::default(), &request(budget), &universe, &rows_for(&roster), 42);
    (roster, outcome)
}

fn roster_after<'a>(roster: &'a [RosterEntry], plan: &'a Plan) -> Vec<&'a PlayerRecord> {
    let outgoing: HashSet<&str> =
        plan.swaps.iter().map(|s| s.outgoing.player.name_key.as_str()).collect();
    roster
        .iter()
        .map(|e| &e.player)
        .filter(|p| !outgoing.contains(p.name_key.as_str()))
        .chain(plan.swaps.iter().map(|s| &s.incoming))
        .collect()
}

#[test]
fn test_plans_are_found_and_ranked() {
    let (roster, outcome) = standard_outcome(0.0);
    assert!(!outcome.plans.is_empty(), "notes: {:?}", outcome.notes);
    assert!(outcome.notes.is_empty(), "notes: {:?}", outcome.notes);
    assert_eq!(outcome.max_changes, 3);
    assert_eq!(outcome.audit.len(), roster.len());
    assert!(!outcome.rankings.role(MacroRole::Attacker).is_empty());
    assert!(outcome.plans.windows(2).all(|w| w[0].package_gain >= w[1].package_gain));
}

#[test]
fn test_budget_law_with_zero_residual_budget() {
    let (_, outcome) = standard_outcome(0.0);
    for plan in &outcome.plans {
        assert!(plan.spent <= plan.proceeds + 1e-9, "{plan:?}");
        assert!(plan.budget_after >= -1e-9);
        assert!(plan.warnings.iter().all(|w| !w.starts_with("over budget")));
        assert!(plan.incoming_names().iter().all(|n| *n != "Superstar"));
    }
}

#[test]
fn test_generous_budget_unlocks_expensive_targets() {
    let (_, outcome) = standard_outcome(100.0);
    assert!(outcome
        .plans
        .iter()
        .any(|p| p.incoming_names().contains(&"Superstar")));
    for plan in &outcome.plans {
        assert!(plan.spent <= plan.budget_before + plan.proceeds + 1e-9);
    }
}

#[test]
fn test_every_plan_keeps_quotas_and_club_cap() {
    let mut roster = squad(&SquadSpec::default());
    roster[0].player.club = "Juventus".to_string();
    roster[10].player.club = "Juventus".to_string();
    let mut targets = market(4, 60.0, 6.0);
    for target in targets.iter_mut() {
        target.club = "Juventus".to_string();
    }
    let universe = universe_with(&roster, targets);
    let config = PlannerConfig { min_plan_difference: 1, ..Default::default() };
    let outcome = plan_scored(config, &request(10.0), &universe, &rows_for(&roster), 42);

    assert!(!outcome.plans.is_empty());
    let constraints = ConstraintContext::from_config(&PlannerConfig::default(), 10.0);
    for plan in &outcome.plans {
        let after = roster_after(&roster, plan);
        let report = validate_players(after.iter().copied(), &constraints);
        assert!(report.passed, "{:?}", report.reasons);
        let juventus = after.iter().filter(|p| p.club == "Juventus").count();
        assert!(juventus <= 3);
    }
}

#[test]
fn test_signatures_are_unique() {
    let (_, outcome) = standard_outcome(20.0);
    let signatures: HashSet<_> = outcome.plans.iter().map(Plan::signature).collect();
    assert_eq!(signatures.len(), outcome.plans.len());
}

#[test]
fn test_returned_plans_are_mutually_diverse() {
    let (_, outcome) = standard_outcome(20.0);
    for (i, a) in outcome.plans.iter().enumerate() {
        for b in &outcome.plans[i + 1..] {
            assert!(pair_difference(a, b) >= 3);
        }
    }
}

#[test]
fn test_same_seed_same_plans() {
    let roster = squad(&SquadSpec::default());
    // equal scores everywhere force the tie-breaker to decide
    let mut targets = market(6, 70.0, 6.0);
    for target in targets.iter_mut() {
        target.scores.final_score = 70.0;
    }
    let universe = universe_with(&roster, targets);
    let rows = rows_for(&roster);

    let first = plan_scored(PlannerConfig::default(), &request(5.0), &universe, &rows, 7);
    let second = plan_scored(PlannerConfig::default(), &request(5.0), &universe, &rows, 7);
    assert!(!first.plans.is_empty());
    assert_eq!(first.plans, second.plans);
}

#[test]
fn test_window_limits_package_size() {
    let roster = squad(&SquadSpec::default());
    let universe = universe_with(&roster, market(4, 60.0, 6.0));
    let req = PlanRequest { window: Some("JANUARY".to_string()), ..request(0.0) };
    let outcome = plan_scored(PlannerConfig::default(), &req, &universe, &rows_for(&roster), 42);

    assert_eq!(outcome.max_changes, 1);
    assert_eq!(outcome.window.as_ref().map(|w| w.key.as_str()), Some("january"));
    assert!(!outcome.plans.is_empty());
    assert!(outcome.plans.iter().all(|p| p.swaps.len() == 1));
}

#[test]
fn test_no_improvement_is_not_an_error() {
    let roster = squad(&SquadSpec::default());
    let universe = universe_with(&roster, market(3, 10.0, 6.0));
    let outcome =
        plan_scored(PlannerConfig::default(), &request(50.0), &universe, &rows_for(&roster), 42);
    assert!(outcome.plans.is_empty());
    assert_eq!(outcome.notes, vec![NO_PLAN_NOTE.to_string()]);
}

#[test]
fn test_incomplete_roster_is_reported() {
    let mut roster = squad(&SquadSpec::default());
    roster.pop();
    let universe = universe_with(&roster, market(4, 60.0, 6.0));
    let outcome =
        plan_scored(PlannerConfig::default(), &request(50.0), &universe, &rows_for(&roster), 42);
    assert!(outcome.plans.is_empty());
    let incomplete = "current roster: roster has 22 players, expected 23".to_string();
    assert!(outcome.notes.contains(&incomplete));
    assert!(outcome.notes.contains(&NO_PLAN_NOTE.to_string()));
}

#[test]
fn test_invalid_requests_are_rejected() {
    let roster = squad(&SquadSpec::default());
    let universe = universe_with(&roster, market(2, 60.0, 6.0));
    let rows = rows_for(&roster);
    let planner = TransferPlanner::default();
    let mut rng = StdRng::seed_from_u64(1);

    let empty_team = PlanRequest { team: " ".to_string(), ..request(0.0) };
    let err = planner
        .plan_evaluated(&empty_team, &universe, &rows, &catalog(), &mut rng)
        .unwrap_err();
    assert!(matches!(err, PlannerError::InvalidInput(_)));

    let unknown_window = PlanRequest { window: Some("summer".to_string()), ..request(0.0) };
    let err = planner
        .plan_evaluated(&unknown_window, &universe, &rows, &catalog(), &mut rng)
        .unwrap_err();
    assert_eq!(err, PlannerError::UnknownMarketWindow("summer".to_string()));
    assert!(err.to_string().starts_with("Invalid input"));

    let unknown_team = PlanRequest { team: "Nobody FC".to_string(), ..request(0.0) };
    let err = planner
        .plan_evaluated(&unknown_team, &universe, &rows, &catalog(), &mut rng)
        .unwrap_err();
    assert_eq!(err, PlannerError::TeamNotFound("Nobody FC".to_string()));

    let err = planner
        .plan_evaluated(&request(-1.0), &universe, &rows, &catalog(), &mut rng)
        .unwrap_err();
    assert!(matches!(err, PlannerError::InvalidInput(_)));
}

/// A raw-stats universe: weak owned squad, stronger free agents
fn raw_universe() -> (Vec<PlayerRecord>, Vec<RosterRow>) {
    let stats = |apps: f64, goals: f64, fa: f64| RawStats {
        appearances: apps,
        minutes: apps * 80.0,
        team_matches: 20.0,
        goals,
        assists: goals / 2.0,
        clean_sheets: apps / 4.0,
        goals_conceded: apps,
        fantasy_average: fa,
        raw_average: fa - 0.3,
        team_context: 50.0,
        ..Default::default()
    };

    let mut universe = Vec::new();
    let mut rows = Vec::new();
    for (i, role) in squad_roles().into_iter().enumerate() {
        let name = format!("Owned {role} {i}");
        universe.push(PlayerRecord::new(
            name.clone(),
            role,
            format!("Club {}", i % 8),
            stats(14.0, 1.0, 5.6),
            8.0,
            8.0,
        ));
        rows.push(RosterRow {
            team: TEAM.to_string(),
            player_name: name,
            club: None,
            acquisition_price: 8.0,
            roster_value: 0.0,
        });
    }
    for role in ["P", "D", "C", "A"] {
        for i in 0..4 {
            let goals = 6.0 + i as f64;
            universe.push(PlayerRecord::new(
                format!("Free {role} {i}"),
                role,
                format!("Free Club {role}{i}"),
                stats(20.0, goals, 7.0 + i as f64 * 0.2),
                7.0,
                7.0,
            ));
        }
    }
    (universe, rows)
}

#[test]
fn test_raw_universe_planning_is_seeded_and_legal() {
    let (universe, rows) = raw_universe();
    let planner = TransferPlanner::default();
    let first = planner.plan_seeded(&request(0.0), &universe, &rows, &catalog()).unwrap();
    let second = planner.plan_seeded(&request(0.0), &universe, &rows, &catalog()).unwrap();

    assert_eq!(first.plans, second.plans);
    assert!(!first.plans.is_empty(), "notes: {:?}", first.notes);
    assert_eq!(first.audit.len(), 23);
    for plan in &first.plans {
        assert!(plan.spent <= plan.proceeds + 1e-9);
        assert!(plan.incoming_names().iter().all(|n| n.starts_with("Free")));
    }
}

#[test]
fn test_legacy_strategy_plans_through_the_same_pipeline() {
    let (universe, rows) = raw_universe();
    let mut config = PlannerConfig::default();
    config.valuation.strategy = ScoringStrategyKind::Legacy;
    let planner = TransferPlanner::new(config);
    assert_eq!(planner.valuation().strategy_name(), "legacy");

    let outcome = planner.plan_seeded(&request(0.0), &universe, &rows, &catalog()).unwrap();
    assert_eq!(outcome.audit.len(), 23);
    for plan in &outcome.plans {
        assert!(plan.spent <= plan.proceeds + 1e-9);
        assert!(plan.swaps.len() <= 3);
        for swap in &plan.swaps {
            assert_eq!(swap.outgoing.macro_role(), swap.incoming.macro_role());
        }
    }
}
