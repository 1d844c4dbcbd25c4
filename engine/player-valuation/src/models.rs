use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro-role bucket every primitive role token collapses into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MacroRole {
    Goalkeeper,
    Defender,
    Midfielder,
    Attacker,
}

impl MacroRole {
    /// All buckets in reparto order (Por, Dif, Cen, Att)
    pub const ALL: [MacroRole; 4] =
        [MacroRole::Goalkeeper, MacroRole::Defender, MacroRole::Midfielder, MacroRole::Attacker];

    /// Short reparto code used in reports and validation reasons
    pub fn code(&self) -> &'static str {
        match self {
            MacroRole::Goalkeeper => "Por",
            MacroRole::Defender => "Dif",
            MacroRole::Midfielder => "Cen",
            MacroRole::Attacker => "Att",
        }
    }

    /// Dense index into per-role arrays
    pub fn index(&self) -> usize {
        match self {
            MacroRole::Goalkeeper => 0,
            MacroRole::Defender => 1,
            MacroRole::Midfielder => 2,
            MacroRole::Attacker => 3,
        }
    }

    /// Map a single primitive role token (classic or Mantra notation) to its bucket
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim().to_lowercase();
        match token.as_str() {
            "p" | "por" | "gk" | "goalkeeper" | "portiere" => Some(MacroRole::Goalkeeper),
            "d" | "dif" | "dc" | "dd" | "ds" | "b" | "def" | "defender" | "difensore" => {
                Some(MacroRole::Defender)
            }
            "c" | "cen" | "e" | "m" | "mid" | "midfielder" | "centrocampista" => {
                Some(MacroRole::Midfielder)
            }
            "a" | "att" | "t" | "w" | "pc" | "fw" | "attacker" | "forward" | "attaccante" => {
                Some(MacroRole::Attacker)
            }
            _ => None,
        }
    }
}

impl fmt::Display for MacroRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Primitive role token as delivered by the data source, plus its resolved bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct RoleInfo {
    pub primitive: String,
    pub macro_role: Option<MacroRole>,
}

impl RoleInfo {
    /// Parse a role string. Multi-role strings ("Dc;Dd", "W/A") resolve on their first token.
    pub fn parse(raw: &str) -> Self {
        let primitive = raw.trim().to_string();
        let first = primitive.split([';', '/', ',', ' ']).find(|t| !t.is_empty()).unwrap_or("");
        Self { macro_role: MacroRole::from_token(first), primitive }
    }
}

impl From<String> for RoleInfo {
    fn from(raw: String) -> Self {
        RoleInfo::parse(&raw)
    }
}

impl From<RoleInfo> for String {
    fn from(role: RoleInfo) -> Self {
        role.primitive
    }
}

/// Raw season and recent-window statistics for one player.
///
/// Every field tolerates missing or malformed input and falls back to 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawStats {
    #[serde(deserialize_with = "lenient::f64")]
    pub appearances: f64,
    #[serde(deserialize_with = "lenient::f64")]
    pub minutes: f64,
    /// Matches the player's club has played so far
    #[serde(deserialize_with = "lenient::f64")]
    pub team_matches: f64,
    #[serde(deserialize_with = "lenient::f64")]
    pub goals: f64,
    #[serde(deserialize_with = "lenient::f64")]
    pub assists: f64,
    #[serde(deserialize_with = "lenient::f64")]
    pub decisive_goals: f64,
    #[serde(deserialize_with = "lenient::f64")]
    pub yellow_cards: f64,
    #[serde(deserialize_with = "lenient::f64")]
    pub red_cards: f64,
    #[serde(deserialize_with = "lenient::f64")]
    pub clean_sheets: f64,
    #[serde(deserialize_with = "lenient::f64")]
    pub goals_conceded: f64,
    #[serde(deserialize_with = "lenient::f64")]
    pub penalties_saved: f64,
    #[serde(deserialize_with = "lenient::f64")]
    pub fantasy_average: f64,
    #[serde(deserialize_with = "lenient::f64")]
    pub raw_average: f64,
    /// Team-context score in [0, 100]
    #[serde(deserialize_with = "lenient::f64")]
    pub team_context: f64,
    #[serde(deserialize_with = "lenient::f64")]
    pub fair_value: f64,
    #[serde(deserialize_with = "lenient::f64")]
    pub recent_appearances: f64,
    #[serde(deserialize_with = "lenient::f64")]
    pub recent_goals: f64,
    #[serde(deserialize_with = "lenient::f64")]
    pub recent_decisive_goals: f64,
}

/// Normalized per-player signals produced by the feature extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    GoalsPerMatch,
    AssistsPerMatch,
    DecisivePerMatch,
    DisciplinePerMatch,
    CleanSheetsPerMatch,
    ConcededPerMatch,
    PenaltySavesPerMatch,
    FantasyAverage,
    Upside,
    Availability,
    TeamContext,
}

impl Feature {
    pub const ALL: [Feature; 11] = [
        Feature::GoalsPerMatch,
        Feature::AssistsPerMatch,
        Feature::DecisivePerMatch,
        Feature::DisciplinePerMatch,
        Feature::CleanSheetsPerMatch,
        Feature::ConcededPerMatch,
        Feature::PenaltySavesPerMatch,
        Feature::FantasyAverage,
        Feature::Upside,
        Feature::Availability,
        Feature::TeamContext,
    ];

    /// Position inside [`Feature::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Lower is better: percentile is inverted before blending
    pub fn is_negative(&self) -> bool {
        matches!(self, Feature::DisciplinePerMatch | Feature::ConcededPerMatch)
    }

    /// Signals that already encode sample size and skip shrinkage
    pub fn is_shrinkable(&self) -> bool {
        !matches!(self, Feature::Availability | Feature::Upside | Feature::TeamContext)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureMap {
    pub goals_pm: f64,
    pub assists_pm: f64,
    pub decisive_pm: f64,
    pub discipline_pm: f64,
    pub clean_sheets_pm: f64,
    pub conceded_pm: f64,
    pub penalty_saves_pm: f64,
    pub fantasy_average: f64,
    pub upside: f64,
    pub availability: f64,
    pub team_context: f64,
    /// Share of available minutes actually played, capped at 1
    pub minutes_ratio: f64,
}

impl FeatureMap {
    pub fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::GoalsPerMatch => self.goals_pm,
            Feature::AssistsPerMatch => self.assists_pm,
            Feature::DecisivePerMatch => self.decisive_pm,
            Feature::DisciplinePerMatch => self.discipline_pm,
            Feature::CleanSheetsPerMatch => self.clean_sheets_pm,
            Feature::ConcededPerMatch => self.conceded_pm,
            Feature::PenaltySavesPerMatch => self.penalty_saves_pm,
            Feature::FantasyAverage => self.fantasy_average,
            Feature::Upside => self.upside,
            Feature::Availability => self.availability,
            Feature::TeamContext => self.team_context,
        }
    }
}

/// Ordinal tier; the numeric value feeds the package-gain formula
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Tier {
    #[default]
    Low,
    Speculative,
    Starter,
    SemiTop,
    Top,
}

impl Tier {
    pub fn value(&self) -> i32 {
        match self {
            Tier::Low => 0,
            Tier::Speculative => 1,
            Tier::Starter => 2,
            Tier::SemiTop => 3,
            Tier::Top => 4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tier::Low => "low",
            Tier::Speculative => "speculative",
            Tier::Starter => "starter",
            Tier::SemiTop => "semi-top",
            Tier::Top => "top",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Derived scores, all in [0, 100]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerScores {
    pub real: f64,
    pub potential: f64,
    pub credit_efficiency: f64,
    pub final_score: f64,
    pub tier: Tier,
}

/// One player of the universe, scored in place during a planning run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    #[serde(default)]
    pub name_key: String,
    pub role: RoleInfo,
    #[serde(default)]
    pub club: String,
    #[serde(default)]
    pub stats: RawStats,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub price: f64,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub initial_price: f64,
    #[serde(default)]
    pub features: FeatureMap,
    #[serde(default)]
    pub scores: PlayerScores,
}

impl PlayerRecord {
    pub fn new(
        name: impl Into<String>,
        role: &str,
        club: impl Into<String>,
        stats: RawStats,
        price: f64,
        initial_price: f64,
    ) -> Self {
        let name = name.into();
        Self {
            name_key: name_key(&name),
            name,
            role: RoleInfo::parse(role),
            club: club.into(),
            stats,
            price,
            initial_price,
            features: FeatureMap::default(),
            scores: PlayerScores::default(),
        }
    }

    pub fn macro_role(&self) -> Option<MacroRole> {
        self.role.macro_role
    }

    /// Fill the canonical key when the record came straight from deserialization
    pub fn ensure_name_key(&mut self) {
        if self.name_key.is_empty() {
            self.name_key = name_key(&self.name);
        }
    }

    /// Initial price, falling back to the current price when the source left it empty
    pub fn initial_or_current_price(&self) -> f64 {
        if self.initial_price > 0.0 {
            self.initial_price
        } else {
            self.price
        }
    }
}

/// Canonical name key: lowercase alphanumeric words joined by single spaces
pub fn name_key(name: &str) -> String {
    name.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Deserializers that never fail on malformed numbers
pub mod lenient {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Number(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    pub fn f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        let value = match Option::<Loose>::deserialize(deserializer)? {
            Some(Loose::Number(n)) => n,
            Some(Loose::Text(s)) => parse_number(&s),
            Some(Loose::Other(_)) | None => 0.0,
        };
        Ok(if value.is_finite() { value } else { 0.0 })
    }

    /// Accepts "6,5" as well as "6.5"; anything unparseable is 0
    pub fn parse_number(raw: &str) -> f64 {
        raw.trim().replace(',', ".").parse::<f64>().unwrap_or(0.0)
    }
}
