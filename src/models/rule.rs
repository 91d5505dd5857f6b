use super::{Category, TimeOfDay};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleTier {
    Basic,
    Advanced,
}

impl RuleTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleTier::Basic => "basic",
            RuleTier::Advanced => "advanced",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "basic" => Some(RuleTier::Basic),
            "advanced" => Some(RuleTier::Advanced),
            _ => None,
        }
    }
}

impl std::fmt::Display for RuleTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Condition -> action record.
///
/// `temperature_level` and `time_of_day` are wildcards when unset. Basic
/// rules are matched on plant type and humidity only; their other
/// attributes are never consulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub tier: RuleTier,
    pub plant_type: String,
    pub humidity_level: Category,
    #[serde(default)]
    pub temperature_level: Option<Category>,
    #[serde(default)]
    pub time_of_day: Option<TimeOfDay>,
    pub action: String,
}

impl Rule {
    pub fn basic(
        id: impl Into<String>,
        plant_type: impl Into<String>,
        humidity_level: Category,
        action: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            tier: RuleTier::Basic,
            plant_type: plant_type.into(),
            humidity_level,
            temperature_level: None,
            time_of_day: None,
            action: action.into(),
        }
    }

    pub fn advanced(
        id: impl Into<String>,
        plant_type: impl Into<String>,
        humidity_level: Category,
        temperature_level: Category,
        time_of_day: TimeOfDay,
        action: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            tier: RuleTier::Advanced,
            plant_type: plant_type.into(),
            humidity_level,
            temperature_level: Some(temperature_level),
            time_of_day: Some(time_of_day),
            action: action.into(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    pub fn matches_basic(&self, plant_type: &str, humidity_level: Category) -> bool {
        self.tier == RuleTier::Basic
            && self.plant_type == plant_type
            && self.humidity_level == humidity_level
    }

    pub fn matches_advanced(
        &self,
        plant_type: &str,
        humidity_level: Category,
        temperature_level: Category,
        time_of_day: TimeOfDay,
    ) -> bool {
        self.tier == RuleTier::Advanced
            && self.plant_type == plant_type
            && self.humidity_level == humidity_level
            && self.temperature_level.map_or(true, |t| t == temperature_level)
            && self.time_of_day.map_or(true, |t| t == time_of_day)
    }
}
