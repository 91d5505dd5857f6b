pub mod classifier;
pub mod membership;
pub mod resolver;
pub mod rules;

pub use classifier::{CategorySets, HumidityDecrease, LinguisticClassifier};
pub use membership::{degree, TriangularRange};
pub use resolver::ActionResolver;
pub use rules::{Decision, DecisionEngine, RuleRepository};
