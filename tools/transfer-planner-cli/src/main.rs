//! Fantasy Transfer Planner CLI
//!
//! Loads the player universe, roster rows and market windows from JSON, scores
//! the universe and answers planning queries:
//! - plan / watch: ranked, diversified transfer packages for one team
//! - rankings, audit, validate, score, window: read-only queries

mod cache;
mod config;
mod loader;
mod logging;
mod report;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use player_valuation::{MacroRole, PlayerRecord};
use serde::Serialize;
use tracing::{info, warn};
use transfer_planner::{
    resolve_roster, squad_audit, validate_roster, ConstraintContext, MarketWindowCatalog,
    PlanRequest, PlanningOutcome, ResolvedRoster, RosterRow, TransferPlanner,
};

use crate::cache::SourceCache;
use crate::config::CliConfig;

#[derive(Parser)]
#[command(name = "fanta-planner")]
#[command(about = "Fantasy-football player valuation and transfer planning")]
#[command(version)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Player universe JSON (overrides configuration)
    #[arg(long, global = true)]
    players: Option<PathBuf>,

    /// Roster rows JSON (overrides configuration)
    #[arg(long, global = true)]
    rosters: Option<PathBuf>,

    /// Market windows JSON (overrides configuration)
    #[arg(long, global = true)]
    windows: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Propose transfer packages for a team
    Plan {
        #[arg(short, long)]
        team: String,

        /// Credits left after the current roster
        #[arg(short, long, default_value = "0")]
        budget: f64,

        /// Market window key capping the number of changes
        #[arg(short, long)]
        window: Option<String>,
    },

    /// Re-plan periodically, re-reading only sources that changed on disk
    Watch {
        #[arg(short, long)]
        team: String,

        #[arg(short, long, default_value = "0")]
        budget: f64,

        #[arg(short, long)]
        window: Option<String>,

        /// Seconds between runs
        #[arg(long, default_value = "30")]
        interval_secs: u64,

        /// Stop after this many runs (0 runs forever)
        #[arg(long, default_value = "0")]
        runs: usize,
    },

    /// Per-role rankings of the scored universe
    Rankings {
        /// Restrict to one reparto (P/D/C/A, Por/Dif/Cen/Att)
        #[arg(short, long)]
        role: Option<String>,

        /// Rows per role (defaults to the configured value)
        #[arg(long)]
        top: Option<usize>,
    },

    /// Scores, tiers and prices of a team's current squad
    Audit {
        #[arg(short, long)]
        team: String,
    },

    /// Check a team's current roster against quotas, club cap and price bands
    Validate {
        #[arg(short, long)]
        team: String,

        /// Enforce initial-price bands regardless of configuration
        #[arg(long)]
        enforce_bands: bool,
    },

    /// Score a single player against the full universe
    Score { name: String },

    /// Resolve a market window by key, find the one open on a date, or list them all
    Window {
        key: Option<String>,

        /// Date (YYYY-MM-DD) to look up the open window for
        #[arg(long)]
        date: Option<NaiveDate>,

        /// List every window in the catalog
        #[arg(long, conflicts_with_all = ["key", "date"])]
        all: bool,
    },
}

/// Loaded sources and the planner built from configuration
struct Session {
    config: CliConfig,
    planner: TransferPlanner,
    players: SourceCache<Vec<PlayerRecord>>,
    rosters: SourceCache<Vec<RosterRow>>,
    windows: SourceCache<MarketWindowCatalog>,
}

impl Session {
    fn new(config: CliConfig) -> Self {
        Self {
            planner: TransferPlanner::new(config.planner.clone()),
            config,
            players: SourceCache::new(),
            rosters: SourceCache::new(),
            windows: SourceCache::new(),
        }
    }

    async fn universe(&mut self) -> Result<Arc<Vec<PlayerRecord>>> {
        self.players.load(&self.config.data.players, loader::parse_players).await
    }

    async fn roster_rows(&mut self) -> Result<Arc<Vec<RosterRow>>> {
        self.rosters.load(&self.config.data.rosters, loader::parse_rosters).await
    }

    async fn catalog(&mut self) -> Result<Arc<MarketWindowCatalog>> {
        match &self.config.data.windows {
            Some(path) => self.windows.load(path, loader::parse_windows).await,
            None => Ok(Arc::new(MarketWindowCatalog::default())),
        }
    }

    /// A freshly scored copy of the universe
    async fn scored_universe(&mut self) -> Result<Vec<PlayerRecord>> {
        let universe = self.universe().await?;
        let mut players = universe.to_vec();
        self.planner.valuation().evaluate(&mut players);
        Ok(players)
    }

    async fn resolved_roster(&mut self, team: &str) -> Result<ResolvedRoster> {
        let universe = self.scored_universe().await?;
        let rows = self.roster_rows().await?;
        let roster = resolve_roster(team, &rows, &universe, self.config.planner.sell_price_source)?;
        for note in &roster.notes {
            warn!("{}", note);
        }
        Ok(roster)
    }

    async fn plan(&mut self, request: &PlanRequest) -> Result<PlanningOutcome> {
        let universe = self.universe().await?;
        let rows = self.roster_rows().await?;
        let catalog = self.catalog().await?;
        let outcome = self.planner.plan_seeded(request, &universe, &rows, &catalog)?;
        Ok(outcome)
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config =
        CliConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(players) = cli.players {
        config.data.players = players;
    }
    if let Some(rosters) = cli.rosters {
        config.data.rosters = rosters;
    }
    if let Some(windows) = cli.windows {
        config.data.windows = Some(windows);
    }

    logging::initialize_logging(&config.logging)?;
    info!("Starting fanta-planner v{}", env!("CARGO_PKG_VERSION"));

    let json = cli.json;
    let mut session = Session::new(config);

    match cli.command {
        Commands::Plan { team, budget, window } => {
            let request = PlanRequest { team, residual_budget: budget, window };
            let outcome = session.plan(&request).await?;
            if json {
                print_json(&outcome)?;
            } else {
                print!("{}", report::render_outcome(&request.team, &outcome));
            }
        }

        Commands::Watch { team, budget, window, interval_secs, runs } => {
            let request = PlanRequest { team, residual_budget: budget, window };
            let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
            let mut completed = 0;
            loop {
                ticker.tick().await;
                match session.plan(&request).await {
                    Ok(outcome) if json => print_json(&outcome)?,
                    Ok(outcome) => print!("{}", report::render_outcome(&request.team, &outcome)),
                    Err(e) => warn!("Planning run failed: {:#}", e),
                }
                completed += 1;
                info!(
                    "🔄 Run {} done ({} player loads, {} roster loads)",
                    completed,
                    session.players.loads(),
                    session.rosters.loads()
                );
                if runs > 0 && completed >= runs {
                    break;
                }
            }
        }

        Commands::Rankings { role, top } => {
            let only = role
                .map(|token| {
                    MacroRole::from_token(&token).ok_or_else(|| anyhow!("Unknown role: {}", token))
                })
                .transpose()?;
            let top = top.unwrap_or(session.config.planner.top_rows);
            let universe = session.scored_universe().await?;
            let rankings = session.planner.valuation().rankings(&universe, top);
            if json {
                print_json(&rankings)?;
            } else {
                print!("{}", report::render_rankings(&rankings, only));
            }
        }

        Commands::Audit { team } => {
            let roster = session.resolved_roster(&team).await?;
            let audit = squad_audit(&roster.entries);
            if json {
                print_json(&audit)?;
            } else {
                print!("{}", report::render_audit(&audit));
            }
        }

        Commands::Validate { team, enforce_bands } => {
            let roster = session.resolved_roster(&team).await?;
            let mut constraints = ConstraintContext::from_config(&session.config.planner, 0.0);
            constraints.enforce_initial_bands |= enforce_bands;
            let report = validate_roster(&roster.entries, &constraints);
            if json {
                print_json(&report)?;
            } else {
                print!("{}", report::render_validation(&report));
            }
        }

        Commands::Score { name } => {
            let universe = session.universe().await?;
            let card = session.planner.valuation().score_player(&universe, &name)?;
            if json {
                print_json(&card)?;
            } else {
                print!("{}", report::render_score(&card));
            }
        }

        Commands::Window { all: true, .. } => {
            let catalog = session.catalog().await?;
            if json {
                print_json(&catalog.windows())?;
            } else if catalog.is_empty() {
                println!("No market windows configured");
            } else {
                for window in catalog.windows() {
                    println!("{}", report::render_window(window));
                }
            }
        }

        Commands::Window { key, date, .. } => {
            let catalog = session.catalog().await?;
            let window = match (key, date) {
                (Some(key), _) => Some(catalog.resolve(&key)?.clone()),
                (None, Some(date)) => catalog.active_on(date).cloned(),
                (None, None) => catalog.active_on(chrono::Local::now().date_naive()).cloned(),
            };
            match (window, json) {
                (Some(window), true) => print_json(&window)?,
                (Some(window), false) => println!("{}", report::render_window(&window)),
                (None, true) => println!("null"),
                (None, false) => println!("No market window is open"),
            }
        }
    }

    Ok(())
}
