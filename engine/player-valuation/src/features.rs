use crate::models::{FeatureMap, PlayerRecord, RawStats};

/// Turns raw season statistics into per-match normalized signals
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    min_games: f64,
}

impl FeatureExtractor {
    /// Create an extractor; availability saturates once appearances reach `min_games`
    pub fn new(min_games: f64) -> Self {
        Self { min_games: finite(min_games).max(1.0) }
    }

    pub fn extract(&self, stats: &RawStats, price: f64) -> FeatureMap {
        let apps = count(stats.appearances);
        let games = apps.max(1.0);
        let price = finite(price);

        let fair_value_premium = if stats.fair_value > 0.0 {
            (finite(stats.fair_value) - price) / price.max(1.0)
        } else {
            0.0
        };

        let available_minutes = 90.0 * count(stats.team_matches).max(apps).max(1.0);

        FeatureMap {
            goals_pm: count(stats.goals) / games,
            assists_pm: count(stats.assists) / games,
            decisive_pm: count(stats.decisive_goals) / games,
            discipline_pm: (count(stats.yellow_cards) + 2.0 * count(stats.red_cards)) / games,
            clean_sheets_pm: count(stats.clean_sheets) / games,
            conceded_pm: count(stats.goals_conceded) / games,
            penalty_saves_pm: count(stats.penalties_saved) / games,
            fantasy_average: finite(stats.fantasy_average),
            upside: finite(stats.fantasy_average) - finite(stats.raw_average) + fair_value_premium,
            availability: (apps / self.min_games).min(1.0),
            team_context: finite(stats.team_context).clamp(0.0, 100.0),
            minutes_ratio: (count(stats.minutes) / available_minutes).min(1.0),
        }
    }

    /// Recompute the feature map of a record in place
    pub fn apply(&self, player: &mut PlayerRecord) {
        player.features = self.extract(&player.stats, player.price);
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new(10.0)
    }
}

fn finite(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn count(value: f64) -> f64 {
    finite(value).max(0.0)
}
