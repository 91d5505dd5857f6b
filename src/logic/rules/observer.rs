use crate::models::{Category, Rule, TimeOfDay};
use tracing::{debug, info};

/// Hook invoked at each decision point. Implementations must not affect
/// the decision itself.
pub trait DecisionObserver: Send + Sync {
    fn on_classified(&self, _plant_type: &str, _temperature: Category, _humidity: Category) {}

    fn on_rule_matched(&self, _plant_type: &str, _rule: &Rule) {}

    fn on_no_match(
        &self,
        _plant_type: &str,
        _temperature: Category,
        _humidity: Category,
        _time_of_day: TimeOfDay,
    ) {
    }
}

pub struct NoopObserver;

impl DecisionObserver for NoopObserver {}

/// Emits decision events as structured `tracing` records.
pub struct TracingObserver;

impl DecisionObserver for TracingObserver {
    fn on_classified(&self, plant_type: &str, temperature: Category, humidity: Category) {
        debug!(
            plant_type,
            temperature = %temperature,
            humidity = %humidity,
            "Classified sensor readings"
        );
    }

    fn on_rule_matched(&self, plant_type: &str, rule: &Rule) {
        info!(
            plant_type,
            rule = %rule.display_name(),
            tier = %rule.tier,
            action = %rule.action,
            "Watering rule applied"
        );
    }

    fn on_no_match(
        &self,
        plant_type: &str,
        temperature: Category,
        humidity: Category,
        time_of_day: TimeOfDay,
    ) {
        info!(
            plant_type,
            temperature = %temperature,
            humidity = %humidity,
            time_of_day = %time_of_day,
            "No applicable watering rule"
        );
    }
}
