use crate::db::DEFAULT_BUSY_TIMEOUT;
use crate::error::{GreenhouseError, Result};
use crate::logic::resolver::default_watering_actions;
use crate::logic::{
    ActionResolver, CategorySets, HumidityDecrease, LinguisticClassifier, TriangularRange,
};
use crate::models::{SeedData, OTHER_PLANTS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub fuzzy: FuzzyConfig,
    pub repository: RepositoryConfig,
    pub simulation: SimulationConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FuzzyConfig {
    pub temperature: CategorySets,
    pub humidity: CategorySets,
    /// Watering action label -> magnitude triangle
    pub watering: BTreeMap<String, TriangularRange>,
    pub humidity_decrease: HumidityDecrease,
}

impl Default for FuzzyConfig {
    fn default() -> Self {
        Self {
            temperature: CategorySets::temperature(),
            humidity: CategorySets::humidity(),
            watering: default_watering_actions(),
            humidity_decrease: HumidityDecrease::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RepositoryBackend {
    #[default]
    Sqlite,
    Memory,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RepositoryConfig {
    pub backend: RepositoryBackend,
    pub busy_timeout_ms: u64,
    pub seed_file: Option<PathBuf>,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            backend: RepositoryBackend::Sqlite,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT.as_millis() as u64,
            seed_file: None,
        }
    }
}

impl RepositoryConfig {
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub seed: Option<u64>,
    pub min_temperature: i32,
    pub max_temperature: i32,
    pub initial_humidity: f64,
    pub default_growth_days: u32,
    pub fallback_plant_type: String,
    pub max_ticks: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            min_temperature: 5,
            max_temperature: 35,
            initial_humidity: 100.0,
            default_growth_days: 5,
            fallback_plant_type: OTHER_PLANTS.to_string(),
            max_ticks: 1000,
        }
    }
}

impl Config {
    pub fn load(config_override: Option<&PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) if p.exists() => p.clone(),
            Some(p) => {
                return Err(GreenhouseError::Config(format!(
                    "Config file not found at {:?}",
                    p
                )))
            }
            None => match Self::find_config_path() {
                Some(p) => p,
                None => {
                    tracing::debug!("No config file found, using built-in defaults");
                    return Ok(Self::default());
                }
            },
        };

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| GreenhouseError::Config(format!("Failed to read config: {}", e)))?;

        let config = Self::from_yaml(&config_str)?;
        tracing::debug!(path = ?config_path, "Loaded configuration");
        Ok(config)
    }

    /// Parse and validate YAML, substituting `${VAR}` references first.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content);

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| GreenhouseError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Search for config.yaml in standard locations.
    fn find_config_path() -> Option<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        dirs::config_dir()
            .map(|dir| dir.join("greenhouse").join("config.yaml"))
            .filter(|p| p.exists())
    }

    /// Fail fast on membership tables and simulation bounds that could
    /// never evaluate correctly.
    pub fn validate(&self) -> Result<()> {
        self.classifier()?;
        self.resolver()?;

        let sim = &self.simulation;
        if sim.min_temperature > sim.max_temperature {
            return Err(GreenhouseError::Config(format!(
                "simulation.min_temperature ({}) exceeds max_temperature ({})",
                sim.min_temperature, sim.max_temperature
            )));
        }
        if !(0.0..=100.0).contains(&sim.initial_humidity) {
            return Err(GreenhouseError::Config(format!(
                "simulation.initial_humidity must be within 0-100, got {}",
                sim.initial_humidity
            )));
        }
        if sim.fallback_plant_type.trim().is_empty() {
            return Err(GreenhouseError::Config(
                "simulation.fallback_plant_type cannot be empty".into(),
            ));
        }
        Ok(())
    }

    pub fn classifier(&self) -> Result<LinguisticClassifier> {
        LinguisticClassifier::new(
            self.fuzzy.temperature,
            self.fuzzy.humidity,
            self.fuzzy.humidity_decrease,
        )
    }

    pub fn resolver(&self) -> Result<ActionResolver> {
        ActionResolver::new(self.fuzzy.watering.clone())
    }

    pub fn seed_data(&self) -> Result<SeedData> {
        match &self.repository.seed_file {
            Some(path) => SeedData::from_yaml_file(path),
            None => Ok(SeedData::builtin()),
        }
    }

    fn substitute_env_vars(content: &str) -> String {
        let Ok(re) = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}") else {
            return content.to_string();
        };

        let mut result = content.to_string();
        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }

    pub fn data_dir(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        // CLI override takes priority
        if let Some(dir) = data_dir_override {
            std::fs::create_dir_all(dir)?;
            return Ok(dir.clone());
        }

        if let Ok(dir) = std::env::var("GREENHOUSE_DATA_DIR") {
            let p = PathBuf::from(dir);
            std::fs::create_dir_all(&p)?;
            return Ok(p);
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| GreenhouseError::Config("Cannot determine data directory".into()))?
            .join("greenhouse");

        std::fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    pub fn db_path(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        Ok(Self::data_dir(data_dir_override)?.join("greenhouse.db"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.repository.backend, RepositoryBackend::Sqlite);
        assert_eq!(config.repository.busy_timeout(), Duration::from_millis(2000));
        assert_eq!(config.simulation.fallback_plant_type, OTHER_PLANTS);
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let config = Config::from_yaml(
            r#"
repository:
  backend: memory
simulation:
  seed: 7
"#,
        )
        .unwrap();
        assert_eq!(config.repository.backend, RepositoryBackend::Memory);
        assert_eq!(config.simulation.seed, Some(7));
        assert_eq!(config.simulation.max_temperature, 35);
        assert_eq!(config.fuzzy.temperature, CategorySets::temperature());
    }

    #[test]
    fn custom_watering_table_is_used() {
        let config = Config::from_yaml(
            r#"
fuzzy:
  watering:
    Moderate: [10, 15, 20]
    Drench: [30, 40, 50]
"#,
        )
        .unwrap();
        let resolver = config.resolver().unwrap();
        assert_eq!(resolver.resolve("Moderate"), 15.0);
        assert_eq!(resolver.resolve("Drench"), 40.0);
        assert_eq!(resolver.resolve("Minimal"), 0.0);
    }

    #[test]
    fn invalid_membership_range_fails_at_load() {
        let result = Config::from_yaml(
            r#"
fuzzy:
  humidity:
    low: [0, 30, 40]
    medium: [40, 75, 70]
    high: [70, 85, 100]
"#,
        );
        match result {
            Err(GreenhouseError::InvalidMembershipRange { name, .. }) => {
                assert_eq!(name, "humidity.medium")
            }
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn invalid_action_range_fails_at_load() {
        let result = Config::from_yaml(
            r#"
fuzzy:
  watering:
    Heavy: [30, 25, 20]
"#,
        );
        assert!(matches!(
            result,
            Err(GreenhouseError::InvalidMembershipRange { .. })
        ));
    }

    #[test]
    fn negative_humidity_decrease_fails_at_load() {
        let result = Config::from_yaml(
            r#"
fuzzy:
  humidity_decrease:
    low: 5
    medium: -10
    high: 15
"#,
        );
        match result {
            Err(GreenhouseError::Config(msg)) => assert!(msg.contains("humidity_decrease.medium")),
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn inverted_temperature_bounds_are_rejected() {
        let result = Config::from_yaml(
            r#"
simulation:
  min_temperature: 40
  max_temperature: 10
"#,
        );
        assert!(matches!(result, Err(GreenhouseError::Config(_))));
    }

    #[test]
    fn env_vars_are_substituted() {
        std::env::set_var("GREENHOUSE_TEST_BUSY_TIMEOUT", "750");
        let config = Config::from_yaml(
            r#"
repository:
  busy_timeout_ms: ${GREENHOUSE_TEST_BUSY_TIMEOUT}
"#,
        )
        .unwrap();
        assert_eq!(config.repository.busy_timeout_ms, 750);
    }

    #[test]
    fn missing_override_path_is_an_error() {
        let path = PathBuf::from("/nonexistent/greenhouse/config.yaml");
        assert!(matches!(
            Config::load(Some(&path)),
            Err(GreenhouseError::Config(_))
        ));
    }

    #[test]
    fn builtin_seed_without_seed_file() {
        let seed = Config::default().seed_data().unwrap();
        assert_eq!(seed.rules.len(), SeedData::builtin().rules.len());
    }
}
