use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// A dated transfer period with its own change limit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketWindow {
    pub key: String,
    #[serde(default)]
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub max_changes: usize,
}

impl MarketWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Read-only catalog of market windows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketWindowCatalog {
    windows: Vec<MarketWindow>,
}

impl MarketWindowCatalog {
    pub fn new(windows: Vec<MarketWindow>) -> Self {
        Self { windows }
    }

    /// Resolve a window by key (case-insensitive)
    pub fn resolve(&self, key: &str) -> Result<&MarketWindow> {
        let key = key.trim();
        if key.is_empty() {
            return Err(PlannerError::InvalidInput("market window key is empty".to_string()));
        }
        self.windows
            .iter()
            .find(|w| w.key.eq_ignore_ascii_case(key))
            .ok_or_else(|| PlannerError::UnknownMarketWindow(key.to_string()))
    }

    /// The window open on `date`, if any; the earliest-starting one wins on overlap
    pub fn active_on(&self, date: NaiveDate) -> Option<&MarketWindow> {
        self.windows.iter().filter(|w| w.contains(date)).min_by_key(|w| w.start)
    }

    pub fn windows(&self) -> &[MarketWindow] {
        &self.windows
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn catalog() -> MarketWindowCatalog {
        MarketWindowCatalog::new(vec![
            MarketWindow {
                key: "summer".to_string(),
                name: "Summer repair window".to_string(),
                start: date(2025, 9, 1),
                end: date(2025, 9, 14),
                max_changes: 6,
            },
            MarketWindow {
                key: "winter".to_string(),
                name: "January window".to_string(),
                start: date(2026, 1, 5),
                end: date(2026, 2, 2),
                max_changes: 3,
            },
        ])
    }

    #[test]
    fn test_resolve_known_window() {
        let catalog = catalog();
        assert_eq!(catalog.resolve("WINTER").unwrap().max_changes, 3);
        assert_eq!(catalog.windows().len(), 2);
        assert!(!catalog.is_empty());
        assert!(MarketWindowCatalog::default().is_empty());
    }

    #[test]
    fn test_unknown_window_is_invalid_input() {
        assert_eq!(
            catalog().resolve("spring"),
            Err(PlannerError::UnknownMarketWindow("spring".to_string()))
        );
        assert!(matches!(catalog().resolve(" "), Err(PlannerError::InvalidInput(_))));
    }

    #[test]
    fn test_active_window_by_date() {
        let catalog = catalog();
        let key_on = |d: NaiveDate| catalog.active_on(d).map(|w| w.key.as_str());
        assert_eq!(key_on(date(2026, 1, 20)), Some("winter"));
        assert_eq!(key_on(date(2025, 9, 14)), Some("summer"));
        assert!(catalog.active_on(date(2025, 11, 1)).is_none());
    }

    #[test]
    fn test_window_deserializes_from_iso_dates() {
        let window: MarketWindow = serde_json::from_str(
            r#"{ "key": "w", "start": "2026-01-05", "end": "2026-02-02", "max_changes": 4 }"#,
        )
        .unwrap();
        assert!(window.contains(date(2026, 1, 31)));
        assert_eq!(window.name, "");
    }
}
