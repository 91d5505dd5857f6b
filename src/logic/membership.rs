use crate::error::{GreenhouseError, Result};
use serde::{Deserialize, Serialize};

/// Triangular membership degree of `value` in the set `(left, peak, right)`.
///
/// Rises linearly on `[left, peak]`, falls on `(peak, right]` and is 0
/// elsewhere. A zero-width edge behaves as a step at that boundary, so
/// `peak` always maps to exactly 1 and no division by zero occurs.
pub fn degree(value: f64, left: f64, peak: f64, right: f64) -> f64 {
    if value.is_nan() || value < left || value > right {
        return 0.0;
    }
    if value == peak {
        return 1.0;
    }
    if value < peak {
        // left <= value < peak, so peak - left > 0
        (value - left) / (peak - left)
    } else {
        // peak < value <= right, so right - peak > 0
        (right - value) / (right - peak)
    }
}

/// A `(left, peak, right)` triangle, written as a three-element list in
/// configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct TriangularRange {
    pub left: f64,
    pub peak: f64,
    pub right: f64,
}

impl TriangularRange {
    pub const fn new(left: f64, peak: f64, right: f64) -> Self {
        Self { left, peak, right }
    }

    /// Fails fast on a malformed triangle; `name` identifies it in the error.
    pub fn validate(&self, name: &str) -> Result<()> {
        let finite = self.left.is_finite() && self.peak.is_finite() && self.right.is_finite();
        if !finite || self.left > self.peak || self.peak > self.right {
            return Err(GreenhouseError::InvalidMembershipRange {
                name: name.to_string(),
                left: self.left,
                peak: self.peak,
                right: self.right,
            });
        }
        Ok(())
    }

    pub fn degree(&self, value: f64) -> f64 {
        degree(value, self.left, self.peak, self.right)
    }
}

impl From<[f64; 3]> for TriangularRange {
    fn from([left, peak, right]: [f64; 3]) -> Self {
        Self::new(left, peak, right)
    }
}

impl From<TriangularRange> for [f64; 3] {
    fn from(range: TriangularRange) -> Self {
        [range.left, range.peak, range.right]
    }
}
