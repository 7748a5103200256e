//! Industry benchmark thresholds for Business Profile metrics.
//!
//! Each tracked metric has four ordered thresholds. For higher-is-better
//! metrics `excellent >= good >= average >= poor`; for lower-is-better metrics
//! (response time, search rank) the order is inverted but the same four names
//! are used.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Whether a larger raw value is a better or worse result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

impl Direction {
    #[must_use]
    pub const fn is_lower_better(self) -> bool {
        matches!(self, Self::LowerIsBetter)
    }
}

/// Four-tier thresholds for a single metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BenchmarkThresholds {
    pub excellent: f64,
    pub good: f64,
    pub average: f64,
    pub poor: f64,
}

impl BenchmarkThresholds {
    #[must_use]
    pub const fn new(excellent: f64, good: f64, average: f64, poor: f64) -> Self {
        Self {
            excellent,
            good,
            average,
            poor,
        }
    }

    /// Check that the tiers are ordered consistently with `direction`.
    #[must_use]
    pub fn is_ordered(&self, direction: Direction) -> bool {
        match direction {
            Direction::HigherIsBetter => {
                self.excellent >= self.good && self.good >= self.average && self.average >= self.poor
            }
            Direction::LowerIsBetter => {
                self.excellent <= self.good && self.good <= self.average && self.average <= self.poor
            }
        }
    }
}

/// The ten metrics that feed the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    SearchRank,
    ProfileCompletion,
    SeoScore,
    ReviewReplyRate,
    ReviewVelocity,
    ResponseTime,
    PhotoCount,
    PhotoQuality,
    PositiveSentiment,
    LocalPackVisibility,
}

impl Metric {
    /// All tracked metrics, in composite-weight order.
    pub const ALL: [Self; 10] = [
        Self::SearchRank,
        Self::ProfileCompletion,
        Self::SeoScore,
        Self::ReviewReplyRate,
        Self::ReviewVelocity,
        Self::ResponseTime,
        Self::PhotoCount,
        Self::PhotoQuality,
        Self::PositiveSentiment,
        Self::LocalPackVisibility,
    ];

    #[must_use]
    pub const fn direction(self) -> Direction {
        match self {
            Self::SearchRank | Self::ResponseTime => Direction::LowerIsBetter,
            _ => Direction::HigherIsBetter,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SearchRank => "Search Rank",
            Self::ProfileCompletion => "Profile Completion",
            Self::SeoScore => "SEO Score",
            Self::ReviewReplyRate => "Review Reply Rate",
            Self::ReviewVelocity => "Review Velocity",
            Self::ResponseTime => "Response Time",
            Self::PhotoCount => "Photo Count",
            Self::PhotoQuality => "Photo Quality",
            Self::PositiveSentiment => "Positive Sentiment",
            Self::LocalPackVisibility => "Local Pack Visibility",
        }
    }
}

/// Benchmark table covering every tracked metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Benchmarks {
    pub response_time: BenchmarkThresholds,
    pub photo_count: BenchmarkThresholds,
    pub photo_quality: BenchmarkThresholds,
    pub review_reply_rate: BenchmarkThresholds,
    pub profile_completion: BenchmarkThresholds,
    pub search_rank: BenchmarkThresholds,
    pub seo_score: BenchmarkThresholds,
    pub review_velocity: BenchmarkThresholds,
    pub positive_sentiment: BenchmarkThresholds,
    pub local_pack_visibility: BenchmarkThresholds,
}

/// Default industry benchmarks.
pub const BENCHMARKS: Benchmarks = Benchmarks {
    // hours
    response_time: BenchmarkThresholds::new(12.0, 24.0, 48.0, 72.0),
    photo_count: BenchmarkThresholds::new(20.0, 15.0, 10.0, 5.0),
    photo_quality: BenchmarkThresholds::new(90.0, 75.0, 60.0, 40.0),
    review_reply_rate: BenchmarkThresholds::new(90.0, 80.0, 60.0, 40.0),
    profile_completion: BenchmarkThresholds::new(95.0, 85.0, 70.0, 50.0),
    // average position in local results
    search_rank: BenchmarkThresholds::new(3.0, 5.0, 10.0, 15.0),
    seo_score: BenchmarkThresholds::new(85.0, 70.0, 50.0, 30.0),
    // reviews per week
    review_velocity: BenchmarkThresholds::new(3.0, 2.0, 1.0, 0.0),
    positive_sentiment: BenchmarkThresholds::new(85.0, 75.0, 65.0, 50.0),
    local_pack_visibility: BenchmarkThresholds::new(60.0, 45.0, 30.0, 15.0),
};

impl Benchmarks {
    /// Thresholds for a given metric
    #[must_use]
    pub const fn get(&self, metric: Metric) -> &BenchmarkThresholds {
        match metric {
            Metric::SearchRank => &self.search_rank,
            Metric::ProfileCompletion => &self.profile_completion,
            Metric::SeoScore => &self.seo_score,
            Metric::ReviewReplyRate => &self.review_reply_rate,
            Metric::ReviewVelocity => &self.review_velocity,
            Metric::ResponseTime => &self.response_time,
            Metric::PhotoCount => &self.photo_count,
            Metric::PhotoQuality => &self.photo_quality,
            Metric::PositiveSentiment => &self.positive_sentiment,
            Metric::LocalPackVisibility => &self.local_pack_visibility,
        }
    }
}

impl Default for Benchmarks {
    fn default() -> Self {
        BENCHMARKS
    }
}
