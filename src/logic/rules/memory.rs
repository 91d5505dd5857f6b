use super::RuleRepository;
use crate::error::{GreenhouseError, Result};
use crate::models::{Category, PlantCategory, PlantInfo, Rule, RuleTier, SeedData, TimeOfDay};
use std::sync::{RwLock, RwLockReadGuard};

#[derive(Debug, Default)]
struct Contents {
    rules: Vec<Rule>,
    plant_categories: Vec<PlantCategory>,
}

/// Repository held entirely in process memory.
#[derive(Debug, Default)]
pub struct InMemoryRuleRepository {
    contents: RwLock<Contents>,
}

impl InMemoryRuleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(seed: &SeedData) -> Result<Self> {
        let repo = Self::new();
        repo.seed(seed)?;
        Ok(repo)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Contents>> {
        self.contents.read().map_err(|_| {
            GreenhouseError::RepositoryUnavailable("in-memory rule store lock poisoned".into())
        })
    }
}

impl RuleRepository for InMemoryRuleRepository {
    fn find_basic(&self, plant_type: &str, humidity_level: Category) -> Result<Option<Rule>> {
        Ok(self
            .read()?
            .rules
            .iter()
            .find(|r| r.matches_basic(plant_type, humidity_level))
            .cloned())
    }

    fn find_advanced(
        &self,
        plant_type: &str,
        humidity_level: Category,
        temperature_level: Category,
        time_of_day: TimeOfDay,
    ) -> Result<Option<Rule>> {
        Ok(self
            .read()?
            .rules
            .iter()
            .find(|r| {
                r.matches_advanced(plant_type, humidity_level, temperature_level, time_of_day)
            })
            .cloned())
    }

    fn seed(&self, seed: &SeedData) -> Result<()> {
        seed.validate()?;
        let mut contents = self.contents.write().map_err(|_| {
            GreenhouseError::RepositoryUnavailable("in-memory rule store lock poisoned".into())
        })?;
        contents.rules = seed.rules.clone();
        contents.plant_categories = seed.plant_categories.clone();
        tracing::debug!(
            rules = contents.rules.len(),
            categories = contents.plant_categories.len(),
            "Seeded in-memory rule repository"
        );
        Ok(())
    }

    fn rules(&self) -> Result<Vec<Rule>> {
        let contents = self.read()?;
        let (mut basic, advanced): (Vec<Rule>, Vec<Rule>) = contents
            .rules
            .iter()
            .cloned()
            .partition(|r| r.tier == RuleTier::Basic);
        basic.extend(advanced);
        Ok(basic)
    }

    fn plant_info(&self, plant_name: &str) -> Result<Option<PlantInfo>> {
        Ok(self
            .read()?
            .plant_categories
            .iter()
            .find(|c| c.plants.iter().any(|p| p == plant_name))
            .map(|c| PlantInfo {
                name: plant_name.to_string(),
                plant_type: c.name.clone(),
                growth_days: c.growth_days,
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FLOWERING, MOISTURE_LOVING};

    #[test]
    fn finds_seeded_basic_rule() {
        let repo = InMemoryRuleRepository::with_seed(&SeedData::builtin()).unwrap();
        let rule = repo
            .find_basic(MOISTURE_LOVING, Category::Medium)
            .unwrap()
            .unwrap();
        assert_eq!(rule.action, "Moderate");
        assert!(repo.find_basic(MOISTURE_LOVING, Category::High).unwrap().is_none());
    }

    #[test]
    fn finds_seeded_advanced_rule() {
        let repo = InMemoryRuleRepository::with_seed(&SeedData::builtin()).unwrap();
        let rule = repo
            .find_advanced(FLOWERING, Category::Low, Category::Medium, TimeOfDay::Morning)
            .unwrap()
            .unwrap();
        assert_eq!(rule.id, "adv-flowering-morning");
        assert!(repo
            .find_advanced(FLOWERING, Category::Low, Category::Medium, TimeOfDay::Night)
            .unwrap()
            .is_none());
    }

    #[test]
    fn duplicates_return_first_inserted() {
        let seed = SeedData {
            rules: vec![
                Rule::basic("first", "Ferns", Category::Low, "Minimal"),
                Rule::basic("second", "Ferns", Category::Low, "Heavy"),
            ],
            plant_categories: Vec::new(),
        };
        let repo = InMemoryRuleRepository::with_seed(&seed).unwrap();
        for _ in 0..5 {
            let rule = repo.find_basic("Ferns", Category::Low).unwrap().unwrap();
            assert_eq!(rule.id, "first");
        }
    }

    #[test]
    fn reseeding_replaces_contents() {
        let repo = InMemoryRuleRepository::with_seed(&SeedData::builtin()).unwrap();
        let seed = SeedData {
            rules: vec![Rule::basic("only", "Ferns", Category::Low, "Minimal")],
            plant_categories: Vec::new(),
        };
        repo.seed(&seed).unwrap();
        repo.seed(&seed).unwrap();

        assert_eq!(repo.rules().unwrap().len(), 1);
        assert!(repo.plant_info("Fern").unwrap().is_none());
    }

    #[test]
    fn invalid_seed_leaves_contents_untouched() {
        let repo = InMemoryRuleRepository::with_seed(&SeedData::builtin()).unwrap();
        let seed = SeedData {
            rules: vec![
                Rule::basic("dup", "Ferns", Category::Low, "Minimal"),
                Rule::basic("dup", "Ferns", Category::High, "Heavy"),
            ],
            plant_categories: Vec::new(),
        };
        assert!(matches!(
            repo.seed(&seed),
            Err(GreenhouseError::DuplicateSeed(_))
        ));
        assert_eq!(repo.rules().unwrap().len(), 17);
    }

    #[test]
    fn rules_list_basic_tier_first() {
        let seed = SeedData {
            rules: vec![
                Rule::advanced(
                    "a1",
                    "Ferns",
                    Category::Low,
                    Category::High,
                    TimeOfDay::Day,
                    "Heavy",
                ),
                Rule::basic("b1", "Ferns", Category::Low, "Minimal"),
            ],
            plant_categories: Vec::new(),
        };
        let repo = InMemoryRuleRepository::with_seed(&seed).unwrap();
        let ids: Vec<_> = repo.rules().unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["b1", "a1"]);
    }

    #[test]
    fn plant_info_looks_up_catalog() {
        let repo = InMemoryRuleRepository::with_seed(&SeedData::builtin()).unwrap();
        let info = repo.plant_info("Rose").unwrap().unwrap();
        assert_eq!(info.plant_type, FLOWERING);
        assert_eq!(info.growth_days, 7);
        assert!(repo.plant_info("Baobab").unwrap().is_none());
    }
}
