use std::fmt;

use super::model::FilterRange;
use crate::error::{EditorError, Result};

/// One reason a low/high corner pair was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RangeViolation {
    LowMissing,
    LowNotNumeric,
    HighMissing,
    HighNotNumeric,
    LowOutOfBounds,
    HighOutOfBounds,
    LowGreaterThanHigh,
}

impl fmt::Display for RangeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RangeViolation::LowMissing => "low missing",
            RangeViolation::LowNotNumeric => "low not numeric",
            RangeViolation::HighMissing => "high missing",
            RangeViolation::HighNotNumeric => "high not numeric",
            RangeViolation::LowOutOfBounds => "low out of bounds",
            RangeViolation::HighOutOfBounds => "high out of bounds",
            RangeViolation::LowGreaterThanHigh => "low greater than high",
        };
        f.write_str(text)
    }
}

/// Outcome of checking a corner pair: every violated condition, in a stable
/// order, with no duplicates.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeCheck {
    low: Option<f64>,
    high: Option<f64>,
    violations: Vec<RangeViolation>,
}

impl RangeCheck {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[RangeViolation] {
        &self.violations
    }

    pub fn has(&self, violation: RangeViolation) -> bool {
        self.violations.contains(&violation)
    }

    /// Human-readable reasons, for showing all errors at once.
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(|v| v.to_string()).collect()
    }

    pub fn into_range(self) -> Result<FilterRange> {
        match (self.low, self.high) {
            (Some(low), Some(high)) if self.violations.is_empty() => Ok(FilterRange { low, high }),
            _ => Err(EditorError::Validation(self.violations)),
        }
    }
}

/// Parsed state of one text field.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Bound {
    Missing,
    NotNumeric,
    Value(f64),
}

impl Bound {
    fn parse(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() {
            return Bound::Missing;
        }
        match text.parse::<f64>() {
            Ok(v) if v.is_finite() => Bound::Value(v),
            _ => Bound::NotNumeric,
        }
    }

    fn from_value(v: f64) -> Self {
        if v.is_finite() {
            Bound::Value(v)
        } else {
            Bound::NotNumeric
        }
    }

    fn value(self) -> Option<f64> {
        match self {
            Bound::Value(v) => Some(v),
            _ => None,
        }
    }
}

fn check(low: Bound, high: Bound, x_max: f64) -> RangeCheck {
    let mut violations = Vec::new();
    match low {
        Bound::Missing => violations.push(RangeViolation::LowMissing),
        Bound::NotNumeric => violations.push(RangeViolation::LowNotNumeric),
        Bound::Value(_) => {}
    }
    match high {
        Bound::Missing => violations.push(RangeViolation::HighMissing),
        Bound::NotNumeric => violations.push(RangeViolation::HighNotNumeric),
        Bound::Value(_) => {}
    }
    let in_bounds = |v: f64| (0.0..=x_max).contains(&v);
    if let Some(lo) = low.value() {
        if !in_bounds(lo) {
            violations.push(RangeViolation::LowOutOfBounds);
        }
    }
    if let Some(hi) = high.value() {
        if !in_bounds(hi) {
            violations.push(RangeViolation::HighOutOfBounds);
        }
    }
    if let (Some(lo), Some(hi)) = (low.value(), high.value()) {
        if lo > hi {
            violations.push(RangeViolation::LowGreaterThanHigh);
        }
    }
    RangeCheck {
        low: low.value(),
        high: high.value(),
        violations,
    }
}

/// Check numeric corners against `0 <= low <= high <= x_max`.
pub fn validate_range(low: f64, high: f64, x_max: f64) -> RangeCheck {
    check(Bound::from_value(low), Bound::from_value(high), x_max)
}

/// Check corners as typed into text fields; blank means missing.
pub fn validate_range_text(low: &str, high: &str, x_max: f64) -> RangeCheck {
    check(Bound::parse(low), Bound::parse(high), x_max)
}

impl FilterRange {
    /// Accept both corners together or neither.
    pub fn new(low: f64, high: f64, x_max: f64) -> Result<Self> {
        validate_range(low, high, x_max).into_range()
    }
}
