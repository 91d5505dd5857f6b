use super::{DecisionObserver, NoopObserver, RuleRepository};
use crate::error::Result;
use crate::logic::{ActionResolver, LinguisticClassifier};
use crate::models::{Category, LinguisticVariable, Rule, RuleTier, TimeOfDay};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedRule {
    pub id: String,
    pub name: String,
    pub tier: RuleTier,
    pub action: String,
}

impl From<Rule> for MatchedRule {
    fn from(rule: Rule) -> Self {
        Self {
            name: rule.display_name().to_string(),
            id: rule.id,
            tier: rule.tier,
            action: rule.action,
        }
    }
}

/// Full outcome of one watering decision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decision {
    pub plant_type: String,
    pub temperature: f64,
    pub humidity: f64,
    pub time_of_day: TimeOfDay,
    pub temperature_level: Category,
    pub humidity_level: Category,
    pub matched: Option<MatchedRule>,
    pub amount: f64,
}

impl Decision {
    pub fn action(&self) -> Option<&str> {
        self.matched.as_ref().map(|m| m.action.as_str())
    }
}

/// Chooses a watering action from sensor readings.
///
/// Basic rules always win over advanced ones: the advanced tier is only
/// consulted when no basic rule exists for the plant type and humidity
/// level, however specific the advanced rule would be.
pub struct DecisionEngine {
    classifier: LinguisticClassifier,
    resolver: ActionResolver,
    repository: Arc<dyn RuleRepository>,
    observer: Box<dyn DecisionObserver>,
}

impl DecisionEngine {
    pub fn new(
        classifier: LinguisticClassifier,
        resolver: ActionResolver,
        repository: Arc<dyn RuleRepository>,
    ) -> Self {
        Self {
            classifier,
            resolver,
            repository,
            observer: Box::new(NoopObserver),
        }
    }

    pub fn with_observer(mut self, observer: impl DecisionObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    pub fn classifier(&self) -> &LinguisticClassifier {
        &self.classifier
    }

    pub fn resolver(&self) -> &ActionResolver {
        &self.resolver
    }

    pub fn repository(&self) -> &Arc<dyn RuleRepository> {
        &self.repository
    }

    pub fn evaluate(
        &self,
        plant_type: &str,
        temperature: f64,
        humidity: f64,
        time_of_day: TimeOfDay,
    ) -> Result<Decision> {
        let temperature_level = self
            .classifier
            .classify(temperature, LinguisticVariable::Temperature);
        let humidity_level = self
            .classifier
            .classify(humidity, LinguisticVariable::Humidity);
        self.observer
            .on_classified(plant_type, temperature_level, humidity_level);

        let rule = match self.repository.find_basic(plant_type, humidity_level)? {
            Some(rule) => Some(rule),
            None => self.repository.find_advanced(
                plant_type,
                humidity_level,
                temperature_level,
                time_of_day,
            )?,
        };

        match &rule {
            Some(rule) => self.observer.on_rule_matched(plant_type, rule),
            None => self.observer.on_no_match(
                plant_type,
                temperature_level,
                humidity_level,
                time_of_day,
            ),
        }

        let matched = rule.map(MatchedRule::from);
        let amount = matched
            .as_ref()
            .map(|m| self.resolver.resolve(&m.action))
            .unwrap_or(0.0);

        Ok(Decision {
            plant_type: plant_type.to_string(),
            temperature,
            humidity,
            time_of_day,
            temperature_level,
            humidity_level,
            matched,
            amount,
        })
    }

    /// Action label of the applicable rule, or `None` when no rule applies.
    pub fn decide(
        &self,
        plant_type: &str,
        temperature: f64,
        humidity: f64,
        time_of_day: TimeOfDay,
    ) -> Result<Option<String>> {
        let decision = self.evaluate(plant_type, temperature, humidity, time_of_day)?;
        Ok(decision.matched.map(|m| m.action))
    }

    /// Humidity to add for the current conditions; 0 when no rule applies.
    pub fn watering_amount(
        &self,
        plant_type: &str,
        temperature: f64,
        humidity: f64,
        time_of_day: TimeOfDay,
    ) -> Result<f64> {
        Ok(self
            .evaluate(plant_type, temperature, humidity, time_of_day)?
            .amount)
    }

    pub fn humidity_decrease(&self, temperature: f64) -> f64 {
        self.classifier.humidity_decrease(temperature)
    }
}
