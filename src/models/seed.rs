use super::{PlantCategory, Rule};
use crate::error::{GreenhouseError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Static rule table and plant catalog loaded into a repository at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub rules: Vec<Rule>,
    #[serde(default)]
    pub plant_categories: Vec<PlantCategory>,
}

pub const DROUGHT_TOLERANT: &str = "Drought-tolerant plants";
pub const MOISTURE_LOVING: &str = "Moisture-loving plants";
pub const DEEP_ROOTED: &str = "Deep-rooted plants";
pub const FRUITING: &str = "Fruiting plants";
pub const FLOWERING: &str = "Flowering plants";
pub const TROPICAL: &str = "Tropical plants";
pub const DECORATIVE_FOLIAGE: &str = "Decorative foliage plants";
pub const OTHER_PLANTS: &str = "Other plants";

impl SeedData {
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            GreenhouseError::Config(format!("Failed to read seed file {:?}: {}", path, e))
        })?;
        let seed: SeedData = serde_yaml::from_str(&content)?;
        seed.validate()?;
        Ok(seed)
    }

    /// Reject batches a repository could not load unambiguously.
    pub fn validate(&self) -> Result<()> {
        let mut rule_ids = HashSet::new();
        for rule in &self.rules {
            if rule.id.trim().is_empty() {
                return Err(GreenhouseError::InvalidData("Rule with empty id".into()));
            }
            if rule.plant_type.trim().is_empty() || rule.action.trim().is_empty() {
                return Err(GreenhouseError::InvalidData(format!(
                    "Rule '{}' needs a plant type and an action",
                    rule.id
                )));
            }
            if !rule_ids.insert(rule.id.as_str()) {
                return Err(GreenhouseError::DuplicateSeed(format!("rule '{}'", rule.id)));
            }
        }

        let mut category_names = HashSet::new();
        let mut plant_names = HashSet::new();
        for category in &self.plant_categories {
            if !category_names.insert(category.name.as_str()) {
                return Err(GreenhouseError::DuplicateSeed(format!(
                    "plant category '{}'",
                    category.name
                )));
            }
            for plant in &category.plants {
                if !plant_names.insert(plant.as_str()) {
                    return Err(GreenhouseError::DuplicateSeed(format!("plant '{}'", plant)));
                }
            }
        }

        Ok(())
    }

    /// The greenhouse's shipped rule table and plant catalog.
    ///
    /// "Light" and "Very heavy" are referenced by advanced rules but have
    /// no magnitude in the default watering table, so they resolve to 0.
    pub fn builtin() -> Self {
        use crate::models::Category::{High, Low, Medium};
        use crate::models::TimeOfDay::{Day, Evening, Morning};

        let rules = vec![
            Rule::basic("basic-moisture-loving-medium", MOISTURE_LOVING, Medium, "Moderate")
                .with_name("Water moisture-loving plants at medium humidity"),
            Rule::basic("basic-drought-tolerant-low", DROUGHT_TOLERANT, Low, "Minimal")
                .with_name("Water drought-tolerant plants at low humidity"),
            Rule::basic("basic-tropical-medium", TROPICAL, Medium, "Heavy")
                .with_name("Water tropical plants at medium humidity"),
            Rule::basic("basic-flowering-low", FLOWERING, Low, "Moderate")
                .with_name("Water flowering plants at low humidity"),
            Rule::basic("basic-fruiting-low", FRUITING, Low, "Heavy")
                .with_name("Water fruiting plants at low humidity"),
            Rule::basic("basic-decorative-low", DECORATIVE_FOLIAGE, Low, "Minimal")
                .with_name("Water decorative foliage plants at low humidity"),
            Rule::basic("basic-deep-rooted-medium", DEEP_ROOTED, Medium, "Moderate")
                .with_name("Water deep-rooted plants at medium humidity"),
            Rule::advanced(
                "adv-drought-tolerant-heat",
                DROUGHT_TOLERANT,
                Low,
                High,
                Morning,
                "Light",
            )
            .with_name("Water drought-tolerant plants in the heat"),
            Rule::advanced(
                "adv-drought-tolerant-mild",
                DROUGHT_TOLERANT,
                Low,
                Medium,
                Evening,
                "Minimal",
            )
            .with_name("Water drought-tolerant plants at normal temperature"),
            Rule::advanced("adv-moisture-loving-heat", MOISTURE_LOVING, Medium, High, Day, "Heavy")
                .with_name("Water moisture-loving plants in the heat"),
            Rule::advanced(
                "adv-moisture-loving-mild",
                MOISTURE_LOVING,
                Medium,
                Medium,
                Evening,
                "Moderate",
            )
            .with_name("Water moisture-loving plants at normal temperature"),
            Rule::advanced("adv-flowering-morning", FLOWERING, Low, Medium, Morning, "Moderate")
                .with_name("Water flowering plants in the morning at low humidity"),
            Rule::advanced("adv-fruiting-heat", FRUITING, Low, High, Morning, "Heavy")
                .with_name("Water fruiting plants at high temperature"),
            Rule::advanced("adv-tropical-heat", TROPICAL, Medium, High, Day, "Very heavy")
                .with_name("Water tropical plants in the afternoon heat"),
            Rule::advanced("adv-tropical-evening", TROPICAL, Medium, Medium, Evening, "Heavy")
                .with_name("Water tropical plants in the evening at medium temperature"),
            Rule::advanced(
                "adv-deep-rooted-morning",
                DEEP_ROOTED,
                Medium,
                Medium,
                Morning,
                "Moderate",
            )
            .with_name("Water deep-rooted plants in the morning"),
            Rule::advanced(
                "adv-decorative-evening",
                DECORATIVE_FOLIAGE,
                Low,
                Low,
                Evening,
                "Minimal",
            )
            .with_name("Water decorative foliage plants in the evening at low humidity"),
        ];

        let plant_categories = vec![
            PlantCategory::new(DROUGHT_TOLERANT, 15, &["Cactus", "Aloe", "Agave"]),
            PlantCategory::new(MOISTURE_LOVING, 13, &["Fern", "Calathea", "Maranta"]),
            PlantCategory::new(DEEP_ROOTED, 20, &["Oak", "Walnut", "Chestnut"]),
            PlantCategory::new(FRUITING, 11, &["Tomato", "Cucumber", "Pepper"]),
            PlantCategory::new(FLOWERING, 7, &["Rose", "Orchid", "Lily"]),
            PlantCategory::new(TROPICAL, 25, &["Banana", "Mango", "Pineapple"]),
            PlantCategory::new(DECORATIVE_FOLIAGE, 18, &["Ficus", "Dracaena", "Monstera"]),
            PlantCategory::new(OTHER_PLANTS, 5, &[]),
        ];

        Self {
            rules,
            plant_categories,
        }
    }
}
