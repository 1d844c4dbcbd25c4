//! JSON ingestion of the player universe, roster rows and market windows

use anyhow::{Context, Result};
use player_valuation::{lenient, PlayerRecord, RawStats};
use serde::Deserialize;
use tracing::{info, warn};
use transfer_planner::{MarketWindow, MarketWindowCatalog, RosterRow};

/// One player as exported by the data source.
///
/// Exports disagree on the name column: the display name wins and the
/// fallback name is used only when the display name is blank.
#[derive(Debug, Deserialize)]
struct PlayerInput {
    #[serde(default, alias = "Name", alias = "player", alias = "nome")]
    name: Option<String>,
    #[serde(default, alias = "full_name", alias = "Nome_completo", alias = "name_fallback")]
    fallback_name: Option<String>,
    #[serde(alias = "position", alias = "ruolo", alias = "R")]
    role: String,
    #[serde(default, alias = "team", alias = "squadra", alias = "Squadra")]
    club: String,
    #[serde(default)]
    stats: RawStats,
    #[serde(default, alias = "quotazione", alias = "Qt.A", deserialize_with = "lenient::f64")]
    price: f64,
    #[serde(
        default,
        alias = "quotazione_iniziale",
        alias = "Qt.I",
        deserialize_with = "lenient::f64"
    )]
    initial_price: f64,
}

impl PlayerInput {
    fn display_name(&self) -> Option<String> {
        [&self.name, &self.fallback_name]
            .into_iter()
            .flatten()
            .map(|n| n.trim())
            .find(|n| !n.is_empty())
            .map(str::to_string)
    }

    fn into_record(self) -> Option<PlayerRecord> {
        let name = self.display_name()?;
        Some(PlayerRecord::new(
            name,
            &self.role,
            self.club.trim(),
            self.stats,
            self.price,
            self.initial_price,
        ))
    }
}

/// Parse the player universe; nameless entries are skipped
pub fn parse_players(raw: &str) -> Result<Vec<PlayerRecord>> {
    let inputs: Vec<PlayerInput> =
        serde_json::from_str(raw).context("player universe is not a JSON array of players")?;
    let total = inputs.len();

    let players: Vec<PlayerRecord> =
        inputs.into_iter().filter_map(PlayerInput::into_record).collect();
    if players.len() < total {
        warn!("Skipped {} player entries without a name", total - players.len());
    }
    info!("📊 Loaded {} players", players.len());
    Ok(players)
}

/// Parse roster rows of every team
pub fn parse_rosters(raw: &str) -> Result<Vec<RosterRow>> {
    let rows: Vec<RosterRow> =
        serde_json::from_str(raw).context("roster source is not a JSON array of rows")?;
    info!("📋 Loaded {} roster rows", rows.len());
    Ok(rows)
}

/// Parse the market window catalog
pub fn parse_windows(raw: &str) -> Result<MarketWindowCatalog> {
    let windows: Vec<MarketWindow> =
        serde_json::from_str(raw).context("market windows are not a JSON array of windows")?;
    info!("📅 Loaded {} market windows", windows.len());
    Ok(MarketWindowCatalog::new(windows))
}
