use super::membership::TriangularRange;
use crate::error::{GreenhouseError, Result};
use std::collections::BTreeMap;
use tracing::warn;

pub fn default_watering_actions() -> BTreeMap<String, TriangularRange> {
    BTreeMap::from([
        ("Minimal".to_string(), TriangularRange::new(0.0, 5.0, 10.0)),
        ("Moderate".to_string(), TriangularRange::new(10.0, 15.0, 20.0)),
        ("Heavy".to_string(), TriangularRange::new(20.0, 25.0, 30.0)),
    ])
}

/// Turns an action label back into a crisp watering amount.
///
/// The magnitude is the label's triangle evaluated at its own peak and
/// scaled by the peak, which is always exactly the peak value. Combining
/// several fired actions into a weighted centroid is not done here.
#[derive(Debug, Clone)]
pub struct ActionResolver {
    actions: BTreeMap<String, TriangularRange>,
}

impl ActionResolver {
    pub fn new(actions: BTreeMap<String, TriangularRange>) -> Result<Self> {
        for (label, range) in &actions {
            if label.trim().is_empty() {
                return Err(GreenhouseError::Config("Action label cannot be empty".into()));
            }
            range.validate(&format!("action '{}'", label))?;
        }
        Ok(Self { actions })
    }

    pub fn try_resolve(&self, label: &str) -> Result<f64> {
        let range = self
            .actions
            .get(label)
            .ok_or_else(|| GreenhouseError::UnknownActionLabel(label.to_string()))?;
        Ok(range.degree(range.peak) * range.peak)
    }

    /// Like [`try_resolve`](Self::try_resolve), but an unknown label yields 0.
    pub fn resolve(&self, label: &str) -> f64 {
        match self.try_resolve(label) {
            Ok(amount) => amount,
            Err(e) => {
                warn!(action = %label, "{}; treating as no watering", e);
                0.0
            }
        }
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }
}

impl Default for ActionResolver {
    fn default() -> Self {
        Self {
            actions: default_watering_actions(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_to_peak_value() {
        let resolver = ActionResolver::default();
        assert_eq!(resolver.resolve("Minimal"), 5.0);
        assert_eq!(resolver.resolve("Moderate"), 15.0);
        assert_eq!(resolver.resolve("Heavy"), 25.0);
    }

    #[test]
    fn unknown_label_resolves_to_zero() {
        let resolver = ActionResolver::default();
        assert_eq!(resolver.resolve("UnknownLabel"), 0.0);
        assert_eq!(resolver.resolve("Very heavy"), 0.0);
        assert_eq!(resolver.resolve(""), 0.0);
    }

    #[test]
    fn try_resolve_reports_unknown_label() {
        let resolver = ActionResolver::default();
        match resolver.try_resolve("Light") {
            Err(GreenhouseError::UnknownActionLabel(label)) => assert_eq!(label, "Light"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn degenerate_triangle_still_resolves_to_peak() {
        let resolver = ActionResolver::new(BTreeMap::from([(
            "Flood".to_string(),
            TriangularRange::new(40.0, 40.0, 40.0),
        )]))
        .unwrap();
        assert_eq!(resolver.resolve("Flood"), 40.0);
    }

    #[test]
    fn invalid_action_range_is_rejected() {
        let result = ActionResolver::new(BTreeMap::from([(
            "Backwards".to_string(),
            TriangularRange::new(30.0, 20.0, 10.0),
        )]));
        assert!(matches!(
            result,
            Err(GreenhouseError::InvalidMembershipRange { .. })
        ));
    }

    #[test]
    fn labels_are_sorted() {
        let resolver = ActionResolver::default();
        let labels: Vec<_> = resolver.labels().collect();
        assert_eq!(labels, vec!["Heavy", "Minimal", "Moderate"]);
    }
}
