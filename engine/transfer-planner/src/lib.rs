//! Transfer Planner
//!
//! Proposes roster transfer packages for a fantasy-football team. The team's
//! roster is joined against a scored player universe, sell and buy candidate
//! pools are derived, and two beam searches (outgoing combinations, then
//! incoming purchases under budget, quota and club constraints) produce legal
//! packages of up to `max_changes` swaps. The best packages are thresholded,
//! deduplicated and diversified before they are returned.
//!
//! The planner is synchronous and performs no I/O. Tie-breaking draws from an
//! injected `rand::RngCore`, so a fixed seed yields identical plan lists.

mod beam;
pub mod buy_search;
pub mod config;
pub mod error;
pub mod models;
pub mod planner;
pub mod pool;
pub mod roster;
pub mod selector;
pub mod sell_search;
pub mod validator;
pub mod window;

#[cfg(test)]
mod testing;

#[cfg(test)]
mod integration_tests;

pub use buy_search::{buy_beam, BuyContext, BuyState};
pub use config::{
    BandTable, BuyPriceSource, ConstraintContext, PlannerConfig, RoleQuotas, SellPriceSource,
};
pub use error::{PlannerError, Result};
pub use models::{
    club_key, squad_audit, Plan, PlanRequest, PlanningOutcome, RosterEntry, RosterRow,
    SquadAuditRow, Swap,
};
pub use planner::{TransferPlanner, NO_PLAN_NOTE};
pub use pool::{BuyCandidate, CandidatePools, SellCandidate};
pub use roster::{resolve_roster, ResolvedRoster};
pub use selector::{package_gain, PlanSelector};
pub use sell_search::{sell_beam, SellState};
pub use validator::{validate_players, validate_roster, ValidationReport};
pub use window::{MarketWindow, MarketWindowCatalog};
