//! Text rendering of planner results

use colored::*;
use player_valuation::{MacroRole, RankingRow, RoleRankings, ScoreCard};
use transfer_planner::{MarketWindow, Plan, PlanningOutcome, SquadAuditRow, ValidationReport};

pub fn render_plan(index: usize, plan: &Plan) -> String {
    let mut out = format!(
        "{} gain {:+.2} | spent {:.2} | proceeds {:.2} | budget {:.2} -> {:.2}\n",
        format!("Plan #{index}").bold(),
        plan.package_gain,
        plan.spent,
        plan.proceeds,
        plan.budget_before,
        plan.budget_after
    );
    out.push_str(&format!(
        "  sell: {}\n  buy:  {}\n",
        plan.outgoing_names().join(", "),
        plan.incoming_names().join(", ")
    ));
    for swap in &plan.swaps {
        out.push_str(&format!(
            "  OUT {:<24} ({:.2})  ->  IN {:<24} ({:.2})  [{:+.2}]\n",
            swap.outgoing.player.name, swap.sell_value, swap.incoming.name, swap.buy_cost, swap.gain
        ));
    }
    for warning in &plan.warnings {
        out.push_str(&format!("  {} {}\n", "⚠".yellow(), warning.yellow()));
    }
    out
}

pub fn render_outcome(team: &str, outcome: &PlanningOutcome) -> String {
    let mut out = format!("{} {}\n", "Transfer plans for".bold(), team.bold());
    if let Some(window) = &outcome.window {
        out.push_str(&format!("Market window: {}\n", render_window(window)));
    }
    out.push_str(&format!("Max changes: {}\n\n", outcome.max_changes));

    for (i, plan) in outcome.plans.iter().enumerate() {
        out.push_str(&render_plan(i + 1, plan));
        out.push('\n');
    }
    for note in &outcome.notes {
        out.push_str(&format!("{} {}\n", "note:".cyan(), note));
    }
    out
}

fn ranking_line(row: &RankingRow) -> String {
    format!(
        "{:>3}. {:<24} {:<14} {:<8} real {:>5.1} pot {:>5.1} cred {:>5.1} \
         final {:>5.1} {:<11} {:>6.2}",
        row.rank,
        row.name,
        row.club,
        row.role,
        row.real,
        row.potential,
        row.credit_efficiency,
        row.final_score,
        row.tier.label(),
        row.price
    )
}

pub fn render_rankings(rankings: &RoleRankings, only: Option<MacroRole>) -> String {
    let mut out = String::new();
    for role in MacroRole::ALL {
        if only.is_some_and(|r| r != role) {
            continue;
        }
        out.push_str(&format!("{}\n", role.code().bold()));
        for row in rankings.role(role) {
            out.push_str(&ranking_line(row));
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

pub fn render_audit(rows: &[SquadAuditRow]) -> String {
    let mut out = String::new();
    for row in rows {
        let reparto = row.reparto.map_or("?", |r| r.code());
        out.push_str(&format!(
            "{:<4} {:<24} {:<14} final {:>5.1} (real {:>5.1} pot {:>5.1} cred {:>5.1}) \
             {:<11} price {:>6.2} paid {:>6.2} sell {:>6.2}\n",
            reparto,
            row.name,
            row.club,
            row.final_score,
            row.real,
            row.potential,
            row.credit_efficiency,
            row.tier.label(),
            row.price,
            row.acquisition_price,
            row.sell_value
        ));
    }
    out
}

pub fn render_validation(report: &ValidationReport) -> String {
    if report.passed {
        return format!("{}\n", "✅ roster is valid".green());
    }
    let mut out = format!("{}\n", "❌ roster is invalid".red());
    for reason in &report.reasons {
        out.push_str(&format!("  - {reason}\n"));
    }
    out
}

pub fn render_score(card: &ScoreCard) -> String {
    format!(
        "{} ({}, {})\n  real {:.1}  potential {:.1}  credit {:.1}\n  \
         final {:.1}  tier {}  price {:.2}\n",
        card.name.bold(),
        card.club,
        card.macro_role,
        card.real,
        card.potential,
        card.credit_efficiency,
        card.final_score,
        card.tier,
        card.price
    )
}

pub fn render_window(window: &MarketWindow) -> String {
    format!(
        "{} ({}) {} .. {}, up to {} changes",
        window.key, window.name, window.start, window.end, window.max_changes
    )
}
