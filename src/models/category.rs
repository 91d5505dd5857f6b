use serde::{Deserialize, Serialize};

/// Linguistic label shared by every measured quantity.
///
/// Declaration order is the classification tie-break order: when two
/// categories reach the same membership degree the earlier one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Low,
    Medium,
    High,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Low, Category::Medium, Category::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Low => "Low",
            Category::Medium => "Medium",
            Category::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(Category::Low),
            "medium" | "med" => Some(Category::Medium),
            "high" => Some(Category::High),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinguisticVariable {
    Temperature,
    Humidity,
}

impl LinguisticVariable {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinguisticVariable::Temperature => "Temperature",
            LinguisticVariable::Humidity => "Humidity",
        }
    }
}

impl std::fmt::Display for LinguisticVariable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeOfDay {
    Night,
    Morning,
    Day,
    Evening,
}

impl TimeOfDay {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Night => "Night",
            TimeOfDay::Morning => "Morning",
            TimeOfDay::Day => "Day",
            TimeOfDay::Evening => "Evening",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "night" => Some(TimeOfDay::Night),
            "morning" => Some(TimeOfDay::Morning),
            "day" | "afternoon" => Some(TimeOfDay::Day),
            "evening" => Some(TimeOfDay::Evening),
            _ => None,
        }
    }

    /// Next phase of the Night -> Morning -> Day -> Evening cycle.
    pub fn next(&self) -> Self {
        match self {
            TimeOfDay::Night => TimeOfDay::Morning,
            TimeOfDay::Morning => TimeOfDay::Day,
            TimeOfDay::Day => TimeOfDay::Evening,
            TimeOfDay::Evening => TimeOfDay::Night,
        }
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
