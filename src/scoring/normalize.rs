//! Step-function normalization of raw metric values.
//!
//! A raw value is bucketed against its benchmark thresholds into one of five
//! tiers and each tier maps to a fixed sub-score. There is no interpolation
//! between tiers and no input validation: negative counts or ratings above 5
//! are scored like any other number.

use serde::{Deserialize, Serialize};

use super::benchmarks::{BenchmarkThresholds, Direction};

/// Bucket a raw value falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Critical,
    Poor,
    Average,
    Good,
    Excellent,
}

impl Tier {
    /// Sub-score awarded for this tier
    #[must_use]
    pub const fn score(self) -> u8 {
        match self {
            Self::Excellent => 100,
            Self::Good => 85,
            Self::Average => 60,
            Self::Poor => 30,
            Self::Critical => 10,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Average => "Average",
            Self::Poor => "Poor",
            Self::Critical => "Critical",
        }
    }
}

/// Classify `value` against `thresholds`.
///
/// NaN fails every comparison and lands in [`Tier::Critical`].
#[must_use]
pub fn tier(value: f64, thresholds: &BenchmarkThresholds, direction: Direction) -> Tier {
    let reaches = |threshold: f64| match direction {
        Direction::LowerIsBetter => value <= threshold,
        Direction::HigherIsBetter => value >= threshold,
    };

    if reaches(thresholds.excellent) {
        Tier::Excellent
    } else if reaches(thresholds.good) {
        Tier::Good
    } else if reaches(thresholds.average) {
        Tier::Average
    } else if reaches(thresholds.poor) {
        Tier::Poor
    } else {
        Tier::Critical
    }
}

/// Normalize a raw value to a sub-score in `{100, 85, 60, 30, 10}`.
#[must_use]
pub fn normalize(value: f64, thresholds: &BenchmarkThresholds, direction: Direction) -> u8 {
    tier(value, thresholds, direction).score()
}

/// Coarse three-way status shown next to each metric in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricStatus {
    Good,
    Average,
    Poor,
}

impl MetricStatus {
    /// Classify against the `good`/`average` thresholds only.
    #[must_use]
    pub fn classify(value: f64, thresholds: &BenchmarkThresholds, direction: Direction) -> Self {
        let within = |threshold: f64| match direction {
            Direction::LowerIsBetter => value <= threshold,
            Direction::HigherIsBetter => value >= threshold,
        };
        if within(thresholds.good) {
            Self::Good
        } else if within(thresholds.average) {
            Self::Average
        } else {
            Self::Poor
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Average => "average",
            Self::Poor => "poor",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::benchmarks::BENCHMARKS;

    #[test]
    fn test_lower_is_better_boundaries() {
        let t = &BENCHMARKS.response_time; // 12/24/48/72
        let d = Direction::LowerIsBetter;
        assert_eq!(normalize(12.0, t, d), 100);
        assert_eq!(normalize(24.0, t, d), 85);
        assert_eq!(normalize(24.5, t, d), 60);
        assert_eq!(normalize(48.0, t, d), 60);
        assert_eq!(normalize(72.0, t, d), 30);
        assert_eq!(normalize(72.1, t, d), 10);
    }

    #[test]
    fn test_higher_is_better_boundaries() {
        let t = &BENCHMARKS.photo_count; // 20/15/10/5
        let d = Direction::HigherIsBetter;
        assert_eq!(normalize(20.0, t, d), 100);
        assert_eq!(normalize(19.0, t, d), 85);
        assert_eq!(normalize(15.0, t, d), 85);
        assert_eq!(normalize(10.0, t, d), 60);
        assert_eq!(normalize(5.0, t, d), 30);
        assert_eq!(normalize(4.0, t, d), 10);
    }

    #[test]
    fn test_out_of_range_values_are_accepted() {
        let d = Direction::HigherIsBetter;
        assert_eq!(normalize(-50.0, &BENCHMARKS.photo_count, d), 10);
        assert_eq!(normalize(1e9, &BENCHMARKS.photo_count, d), 100);
        // review velocity poor tier is zero, so zero still reaches Poor
        assert_eq!(normalize(0.0, &BENCHMARKS.review_velocity, d), 30);
        assert_eq!(normalize(-1.0, &BENCHMARKS.review_velocity, d), 10);
    }

    #[test]
    fn test_nan_is_critical() {
        assert_eq!(
            tier(f64::NAN, &BENCHMARKS.seo_score, Direction::HigherIsBetter),
            Tier::Critical
        );
        assert_eq!(
            normalize(f64::NAN, &BENCHMARKS.search_rank, Direction::LowerIsBetter),
            10
        );
    }

    #[test]
    fn test_tier_ordering() {
        assert!(Tier::Excellent > Tier::Good);
        assert!(Tier::Poor > Tier::Critical);
    }

    #[test]
    fn test_metric_status() {
        let t = &BENCHMARKS.search_rank;
        let d = Direction::LowerIsBetter;
        assert_eq!(MetricStatus::classify(5.0, t, d), MetricStatus::Good);
        assert_eq!(MetricStatus::classify(7.5, t, d), MetricStatus::Average);
        assert_eq!(MetricStatus::classify(11.0, t, d), MetricStatus::Poor);

        let t = &BENCHMARKS.seo_score;
        let d = Direction::HigherIsBetter;
        assert_eq!(MetricStatus::classify(88.0, t, d), MetricStatus::Good);
        assert_eq!(MetricStatus::classify(50.0, t, d), MetricStatus::Average);
        assert_eq!(MetricStatus::classify(49.0, t, d), MetricStatus::Poor);
    }
}
