use super::membership::TriangularRange;
use crate::error::{GreenhouseError, Result};
use crate::models::{Category, LinguisticVariable};
use serde::{Deserialize, Serialize};

/// One triangle per category of a linguistic variable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategorySets {
    pub low: TriangularRange,
    pub medium: TriangularRange,
    pub high: TriangularRange,
}

impl CategorySets {
    pub fn temperature() -> Self {
        Self {
            low: TriangularRange::new(0.0, 10.0, 15.0),
            medium: TriangularRange::new(15.0, 20.0, 25.0),
            high: TriangularRange::new(25.0, 30.0, 40.0),
        }
    }

    pub fn humidity() -> Self {
        Self {
            low: TriangularRange::new(0.0, 30.0, 40.0),
            medium: TriangularRange::new(40.0, 55.0, 70.0),
            high: TriangularRange::new(70.0, 85.0, 100.0),
        }
    }

    pub fn get(&self, category: Category) -> &TriangularRange {
        match category {
            Category::Low => &self.low,
            Category::Medium => &self.medium,
            Category::High => &self.high,
        }
    }

    pub fn validate(&self, prefix: &str) -> Result<()> {
        for category in Category::ALL {
            let name = format!("{}.{}", prefix, category.as_str().to_lowercase());
            self.get(category).validate(&name)?;
        }
        Ok(())
    }
}

/// Humidity lost per tick for each temperature category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HumidityDecrease {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl HumidityDecrease {
    /// Every magnitude must be a finite, non-negative amount of humidity.
    pub fn validate(&self) -> Result<()> {
        for (category, value) in [
            (Category::Low, self.low),
            (Category::Medium, self.medium),
            (Category::High, self.high),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(GreenhouseError::Config(format!(
                    "humidity_decrease.{} must be a finite non-negative number, got {}",
                    category.as_str().to_lowercase(),
                    value
                )));
            }
        }
        Ok(())
    }
}

impl Default for HumidityDecrease {
    fn default() -> Self {
        Self {
            low: 5.0,
            medium: 10.0,
            high: 15.0,
        }
    }
}

/// Fuzzifies crisp readings into categories.
///
/// Categories are scanned in `Category::ALL` order (Low, Medium, High) and
/// the first one reaching the maximum degree wins. Crossover points
/// therefore resolve to the lower category, and a reading outside every
/// triangle (all degrees 0) classifies as Low.
#[derive(Debug, Clone)]
pub struct LinguisticClassifier {
    temperature: CategorySets,
    humidity: CategorySets,
    decrease: HumidityDecrease,
}

impl LinguisticClassifier {
    pub fn new(
        temperature: CategorySets,
        humidity: CategorySets,
        decrease: HumidityDecrease,
    ) -> Result<Self> {
        temperature.validate("temperature")?;
        humidity.validate("humidity")?;
        decrease.validate()?;
        Ok(Self {
            temperature,
            humidity,
            decrease,
        })
    }

    fn sets(&self, variable: LinguisticVariable) -> &CategorySets {
        match variable {
            LinguisticVariable::Temperature => &self.temperature,
            LinguisticVariable::Humidity => &self.humidity,
        }
    }

    /// Degree of `value` in every category, in tie-break order.
    pub fn memberships(&self, value: f64, variable: LinguisticVariable) -> [(Category, f64); 3] {
        let sets = self.sets(variable);
        Category::ALL.map(|category| (category, sets.get(category).degree(value)))
    }

    pub fn classify(&self, value: f64, variable: LinguisticVariable) -> Category {
        let mut best = (Category::Low, f64::NEG_INFINITY);
        for (category, degree) in self.memberships(value, variable) {
            if degree > best.1 {
                best = (category, degree);
            }
        }
        best.0
    }

    /// Crisp humidity loss for the current temperature.
    pub fn humidity_decrease(&self, temperature: f64) -> f64 {
        match self.classify(temperature, LinguisticVariable::Temperature) {
            Category::Low => self.decrease.low,
            Category::Medium => self.decrease.medium,
            Category::High => self.decrease.high,
        }
    }
}

impl Default for LinguisticClassifier {
    fn default() -> Self {
        Self {
            temperature: CategorySets::temperature(),
            humidity: CategorySets::humidity(),
            decrease: HumidityDecrease::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GreenhouseError;
    use crate::models::LinguisticVariable::{Humidity, Temperature};

    #[test]
    fn classifies_temperature() {
        let classifier = LinguisticClassifier::default();
        assert_eq!(classifier.classify(12.0, Temperature), Category::Low);
        assert_eq!(classifier.classify(20.0, Temperature), Category::Medium);
        assert_eq!(classifier.classify(30.0, Temperature), Category::High);
        assert_eq!(classifier.classify(38.0, Temperature), Category::High);
    }

    #[test]
    fn classifies_humidity() {
        let classifier = LinguisticClassifier::default();
        assert_eq!(classifier.classify(35.0, Humidity), Category::Low);
        assert_eq!(classifier.classify(60.0, Humidity), Category::Medium);
        assert_eq!(classifier.classify(90.0, Humidity), Category::High);
    }

    #[test]
    fn crossover_ties_resolve_to_first_category() {
        let classifier = LinguisticClassifier::default();
        // Every degree is 0 at the shared edges of the default triangles
        assert_eq!(classifier.classify(15.0, Temperature), Category::Low);
        assert_eq!(classifier.classify(25.0, Temperature), Category::Low);
        assert_eq!(classifier.classify(40.0, Humidity), Category::Low);
        assert_eq!(classifier.classify(70.0, Humidity), Category::Low);
    }

    #[test]
    fn overlapping_tie_prefers_lower_category() {
        let overlapping = CategorySets {
            low: TriangularRange::new(0.0, 10.0, 20.0),
            medium: TriangularRange::new(10.0, 20.0, 30.0),
            high: TriangularRange::new(20.0, 30.0, 40.0),
        };
        let classifier = LinguisticClassifier::new(
            overlapping,
            CategorySets::humidity(),
            HumidityDecrease::default(),
        )
        .unwrap();

        // 15 sits at 0.5 in both Low and Medium
        assert_eq!(classifier.classify(15.0, Temperature), Category::Low);
        assert_eq!(classifier.classify(25.0, Temperature), Category::Medium);
    }

    #[test]
    fn out_of_range_readings_classify_as_low() {
        let classifier = LinguisticClassifier::default();
        assert_eq!(classifier.classify(-5.0, Temperature), Category::Low);
        assert_eq!(classifier.classify(45.0, Temperature), Category::Low);
        assert_eq!(classifier.classify(120.0, Humidity), Category::Low);
    }

    #[test]
    fn memberships_report_every_category() {
        let classifier = LinguisticClassifier::default();
        let degrees = classifier.memberships(12.0, Temperature);
        assert_eq!(degrees[0].0, Category::Low);
        assert!((degrees[0].1 - 0.6).abs() < 1e-12);
        assert_eq!(degrees[1], (Category::Medium, 0.0));
        assert_eq!(degrees[2], (Category::High, 0.0));
    }

    #[test]
    fn humidity_decrease_follows_temperature_category() {
        let classifier = LinguisticClassifier::default();
        assert_eq!(classifier.humidity_decrease(8.0), 5.0);
        assert_eq!(classifier.humidity_decrease(20.0), 10.0);
        assert_eq!(classifier.humidity_decrease(32.0), 15.0);
        // Boundary tie resolves to Low
        assert_eq!(classifier.humidity_decrease(15.0), 5.0);
    }

    #[test]
    fn negative_or_non_finite_decrease_is_rejected() {
        for decrease in [
            HumidityDecrease {
                medium: -10.0,
                ..HumidityDecrease::default()
            },
            HumidityDecrease {
                high: f64::NAN,
                ..HumidityDecrease::default()
            },
            HumidityDecrease {
                low: f64::INFINITY,
                ..HumidityDecrease::default()
            },
        ] {
            let result = LinguisticClassifier::new(
                CategorySets::temperature(),
                CategorySets::humidity(),
                decrease,
            );
            assert!(matches!(result, Err(GreenhouseError::Config(_))));
        }

        let zero = HumidityDecrease {
            low: 0.0,
            medium: 0.0,
            high: 0.0,
        };
        assert!(zero.validate().is_ok());
    }

    #[test]
    fn invalid_triangle_is_rejected_at_construction() {
        let mut sets = CategorySets::temperature();
        sets.medium = TriangularRange::new(25.0, 20.0, 15.0);
        let err =
            LinguisticClassifier::new(sets, CategorySets::humidity(), HumidityDecrease::default())
                .unwrap_err();
        match err {
            GreenhouseError::InvalidMembershipRange { name, .. } => {
                assert_eq!(name, "temperature.medium")
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
