//! CLI configuration: optional TOML file, then `FANTA_*` environment overrides

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use player_valuation::ScoringStrategyKind;
use serde::{Deserialize, Serialize};
use tracing::debug;
use transfer_planner::PlannerConfig;

/// Complete CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub data: DataConfig,
    pub logging: LoggingConfig,
    pub planner: PlannerConfig,
}

/// Locations of the JSON sources
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Player universe
    pub players: PathBuf,
    /// Roster rows of every team
    pub rosters: PathBuf,
    /// Market window catalog (optional)
    pub windows: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty, compact)
    pub format: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            players: PathBuf::from("./data/players.json"),
            rosters: PathBuf::from("./data/rosters.json"),
            windows: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: "compact".to_string() }
    }
}

impl CliConfig {
    /// Load from an optional file, apply process environment overrides, validate
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Read a configuration file; the format follows the file extension
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        config::Config::builder()
            .add_source(config::File::from(path))
            .build()
            .and_then(|c| c.try_deserialize())
            .with_context(|| format!("Failed to load configuration from {}", path.display()))
    }

    /// Apply `FANTA_*` overrides read through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("FANTA_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Some(format) = lookup("FANTA_LOG_FORMAT") {
            self.logging.format = format;
        }

        if let Some(players) = lookup("FANTA_PLAYERS_FILE") {
            self.data.players = PathBuf::from(players);
        }

        if let Some(rosters) = lookup("FANTA_ROSTERS_FILE") {
            self.data.rosters = PathBuf::from(rosters);
        }

        if let Some(windows) = lookup("FANTA_WINDOWS_FILE") {
            self.data.windows = Some(PathBuf::from(windows));
        }

        let planner = &mut self.planner;
        if let Some(width) = lookup("FANTA_BEAM_WIDTH") {
            planner.beam_width = width.parse().unwrap_or(planner.beam_width);
        }

        if let Some(changes) = lookup("FANTA_MAX_CHANGES") {
            planner.max_changes = changes.parse().unwrap_or(planner.max_changes);
        }

        if let Some(top) = lookup("FANTA_TOP_PLANS") {
            planner.top_plans = top.parse().unwrap_or(planner.top_plans);
        }

        if let Some(seed) = lookup("FANTA_SEED") {
            planner.seed = seed.parse().unwrap_or(planner.seed);
        }

        if let Some(min_games) = lookup("FANTA_MIN_GAMES") {
            planner.valuation.min_games = min_games.parse().unwrap_or(planner.valuation.min_games);
        }

        if let Some(strategy) = lookup("FANTA_SCORING") {
            match strategy.to_lowercase().as_str() {
                "legacy" => planner.valuation.strategy = ScoringStrategyKind::Legacy,
                "market" => planner.valuation.strategy = ScoringStrategyKind::Market,
                _ => {}
            }
        }

        if let Some(flag) = lookup("FANTA_ENFORCE_BANDS") {
            planner.enforce_initial_bands = flag.parse().unwrap_or(planner.enforce_initial_bands);
        }

        if let Some(flag) = lookup("FANTA_ALLOW_OVER_BUDGET") {
            planner.allow_over_budget = flag.parse().unwrap_or(planner.allow_over_budget);
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => return Err(anyhow!("Invalid log level: {}", self.logging.level)),
        }

        match self.logging.format.as_str() {
            "json" | "pretty" | "compact" => {}
            _ => return Err(anyhow!("Invalid log format: {}", self.logging.format)),
        }

        let planner = &self.planner;
        if planner.beam_width == 0 {
            return Err(anyhow!("Invalid beam width: 0"));
        }
        if planner.top_plans == 0 {
            return Err(anyhow!("Invalid top_plans: 0"));
        }
        if planner.club_cap == 0 {
            return Err(anyhow!("Invalid club cap: 0"));
        }
        if planner.valuation.min_games <= 0.0 {
            return Err(anyhow!("Invalid min_games: {}", planner.valuation.min_games));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = CliConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.planner.beam_width, 40);
        assert!(config.data.windows.is_none());
    }

    #[test]
    fn test_toml_file_is_merged_over_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[data]
players = "season/players.json"

[logging]
level = "debug"

[planner]
beam_width = 8
min_delta_single = 3.5

[planner.valuation]
strategy = "legacy"
"#
        )
        .unwrap();

        let config = CliConfig::from_file(file.path()).unwrap();
        assert_eq!(config.data.players, PathBuf::from("season/players.json"));
        assert_eq!(config.data.rosters, PathBuf::from("./data/rosters.json"));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.planner.beam_width, 8);
        assert_eq!(config.planner.min_delta_single, 3.5);
        assert_eq!(config.planner.top_plans, 5);
        assert_eq!(config.planner.valuation.strategy, ScoringStrategyKind::Legacy);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(CliConfig::from_file(Path::new("/definitely/not/here.toml")).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("FANTA_LOG_FORMAT", "json"),
            ("FANTA_WINDOWS_FILE", "windows.json"),
            ("FANTA_BEAM_WIDTH", "12"),
            ("FANTA_SEED", "not-a-number"),
            ("FANTA_SCORING", "Legacy"),
            ("FANTA_ALLOW_OVER_BUDGET", "true"),
        ]
        .into_iter()
        .collect();

        let mut config = CliConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.logging.format, "json");
        assert_eq!(config.data.windows, Some(PathBuf::from("windows.json")));
        assert_eq!(config.planner.beam_width, 12);
        assert_eq!(config.planner.seed, 42);
        assert_eq!(config.planner.valuation.strategy, ScoringStrategyKind::Legacy);
        assert!(config.planner.allow_over_budget);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = CliConfig::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());

        let mut config = CliConfig::default();
        config.planner.beam_width = 0;
        assert!(config.validate().is_err());
    }
}
