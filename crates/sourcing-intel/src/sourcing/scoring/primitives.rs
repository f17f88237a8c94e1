//! Numeric building blocks shared by every assessor.
//!
//! Each score ladder is declared as a [`ThresholdTable`] constant next to the assessor that
//! uses it and resolved through [`threshold_score`], so the tables double as documentation and
//! can be unit tested on their own.

/// Comparison applied between an input value and a step boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// `value >= boundary`; steps listed from the highest boundary down.
    AtLeast,
    /// `value <= boundary`; steps listed from the lowest boundary up.
    AtMost,
    /// `value < boundary`; steps listed from the lowest boundary up.
    Below,
    /// `value > boundary`; steps listed from the highest boundary down.
    Above,
}

impl Bound {
    fn admits(self, value: f64, boundary: f64) -> bool {
        match self {
            Bound::AtLeast => value >= boundary,
            Bound::AtMost => value <= boundary,
            Bound::Below => value < boundary,
            Bound::Above => value > boundary,
        }
    }
}

/// Ordered `(boundary, score)` steps; the first admitted step wins, else `baseline`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdTable {
    pub bound: Bound,
    pub steps: &'static [(f64, f64)],
    pub baseline: f64,
}

impl ThresholdTable {
    pub const fn at_least(steps: &'static [(f64, f64)], baseline: f64) -> Self {
        Self {
            bound: Bound::AtLeast,
            steps,
            baseline,
        }
    }

    pub const fn at_most(steps: &'static [(f64, f64)], baseline: f64) -> Self {
        Self {
            bound: Bound::AtMost,
            steps,
            baseline,
        }
    }

    pub const fn below(steps: &'static [(f64, f64)], baseline: f64) -> Self {
        Self {
            bound: Bound::Below,
            steps,
            baseline,
        }
    }

    pub const fn above(steps: &'static [(f64, f64)], baseline: f64) -> Self {
        Self {
            bound: Bound::Above,
            steps,
            baseline,
        }
    }

    /// Largest score the table can produce.
    pub fn max_score(&self) -> f64 {
        self.steps
            .iter()
            .map(|(_, score)| *score)
            .fold(self.baseline, f64::max)
    }
}

/// Inclusive `(low, high, score)` bands; the first band containing the value wins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandTable {
    pub bands: &'static [(f64, f64, f64)],
    pub outside: f64,
}

impl BandTable {
    pub const fn new(bands: &'static [(f64, f64, f64)], outside: f64) -> Self {
        Self { bands, outside }
    }
}

pub fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    if value < lo {
        lo
    } else if value > hi {
        hi
    } else {
        value
    }
}

/// Index of the step the value lands on, or `None` when it falls through to the baseline.
pub fn threshold_step(value: f64, table: &ThresholdTable) -> Option<usize> {
    table
        .steps
        .iter()
        .position(|(boundary, _)| table.bound.admits(value, *boundary))
}

pub fn threshold_score(value: f64, table: &ThresholdTable) -> f64 {
    threshold_step(value, table)
        .map(|index| table.steps[index].1)
        .unwrap_or(table.baseline)
}

pub fn band_score(value: f64, table: &BandTable) -> f64 {
    table
        .bands
        .iter()
        .find(|(low, high, _)| value >= *low && value <= *high)
        .map(|(_, _, score)| *score)
        .unwrap_or(table.outside)
}

/// Sum of `value * weight` pairs.
pub fn weighted_sum(parts: &[(f64, f64)]) -> f64 {
    parts.iter().map(|(value, weight)| value * weight).sum()
}
