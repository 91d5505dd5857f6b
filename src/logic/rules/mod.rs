pub mod engine;
pub mod memory;
pub mod observer;

pub use engine::{Decision, DecisionEngine, MatchedRule};
pub use memory::InMemoryRuleRepository;
pub use observer::{DecisionObserver, NoopObserver, TracingObserver};

use crate::error::Result;
use crate::models::{Category, PlantInfo, Rule, SeedData, TimeOfDay};

/// Storage of watering rules and the plant catalog.
///
/// Lookups return the first matching rule in insertion order. A backend that
/// cannot reach its store must return `RepositoryUnavailable` rather than
/// `Ok(None)`, and must bound any blocking wait.
pub trait RuleRepository: Send + Sync {
    /// First basic rule for this plant type and humidity level.
    fn find_basic(&self, plant_type: &str, humidity_level: Category) -> Result<Option<Rule>>;

    /// First advanced rule matching all four attributes.
    fn find_advanced(
        &self,
        plant_type: &str,
        humidity_level: Category,
        temperature_level: Category,
        time_of_day: TimeOfDay,
    ) -> Result<Option<Rule>>;

    /// Replace all rules and catalog entries with `seed`.
    fn seed(&self, seed: &SeedData) -> Result<()>;

    /// Every rule, basic tier first, each tier in insertion order.
    fn rules(&self) -> Result<Vec<Rule>>;

    fn plant_info(&self, plant_name: &str) -> Result<Option<PlantInfo>>;
}
