use serde::{Deserialize, Serialize};

/// Catalog entry grouping plants that share watering needs and growth time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantCategory {
    pub name: String,
    pub growth_days: u32,
    #[serde(default)]
    pub plants: Vec<String>,
}

impl PlantCategory {
    pub fn new(name: impl Into<String>, growth_days: u32, plants: &[&str]) -> Self {
        Self {
            name: name.into(),
            growth_days,
            plants: plants.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Result of a catalog lookup for a single plant name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantInfo {
    pub name: String,
    pub plant_type: String,
    pub growth_days: u32,
}

/// A plant growing in the simulated greenhouse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plant {
    pub name: String,
    pub plant_type: String,
    pub growth_days: u32,
    pub current_days: u32,
    pub humidity: f64,
}

impl Plant {
    pub const MAX_HUMIDITY: f64 = 100.0;

    pub fn new(info: PlantInfo, initial_humidity: f64) -> Self {
        Self {
            name: info.name,
            plant_type: info.plant_type,
            growth_days: info.growth_days,
            current_days: 0,
            humidity: initial_humidity.clamp(0.0, Self::MAX_HUMIDITY),
        }
    }

    /// Advance one day. Returns true once the plant is fully grown.
    pub fn grow(&mut self) -> bool {
        self.current_days += 1;
        self.is_grown()
    }

    pub fn is_grown(&self) -> bool {
        self.current_days >= self.growth_days
    }

    pub fn dry_out(&mut self, decrease: f64) {
        self.humidity = (self.humidity - decrease).max(0.0);
    }

    pub fn water(&mut self, amount: f64) {
        self.humidity = (self.humidity + amount).min(Self::MAX_HUMIDITY);
    }
}
