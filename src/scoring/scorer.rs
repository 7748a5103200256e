//! Composite GBP scorer.
//!
//! Combines the ten normalized sub-scores into a single 0-100 score using
//! fixed weights.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::benchmarks::{Benchmarks, Metric};
use super::metrics::MetricsBundle;
use super::normalize::normalize;

/// Precision the weighted sum is snapped to before rounding
const SNAP_SCALE: f64 = 1e6;

/// Weights for overall score calculation (sum to 1.0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoringWeights {
    pub search_rank: f64,
    pub profile_completion: f64,
    pub seo_score: f64,
    pub review_reply_rate: f64,
    pub review_velocity: f64,
    pub response_time: f64,
    pub photo_count: f64,
    pub photo_quality: f64,
    pub positive_sentiment: f64,
    pub local_pack_visibility: f64,
}

impl ScoringWeights {
    /// Default weighting. Search rank and profile completion dominate.
    pub const DEFAULT: Self = Self {
        search_rank: 0.20,
        profile_completion: 0.15,
        seo_score: 0.12,
        review_reply_rate: 0.12,
        review_velocity: 0.10,
        response_time: 0.10,
        photo_count: 0.08,
        photo_quality: 0.05,
        positive_sentiment: 0.05,
        local_pack_visibility: 0.03,
    };

    /// Return weights as an array in [`Metric::ALL`] order
    #[must_use]
    pub const fn as_array(&self) -> [f64; 10] {
        [
            self.search_rank,
            self.profile_completion,
            self.seo_score,
            self.review_reply_rate,
            self.review_velocity,
            self.response_time,
            self.photo_count,
            self.photo_quality,
            self.positive_sentiment,
            self.local_pack_visibility,
        ]
    }

    #[must_use]
    pub fn sum(&self) -> f64 {
        self.as_array().iter().sum()
    }

    /// Whether the weights sum to 1.0 within tolerance
    #[must_use]
    pub fn is_normalized(&self) -> bool {
        (self.sum() - 1.0).abs() < 0.01
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Per-metric sub-scores, each in `{100, 85, 60, 30, 10}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubScores {
    pub search_rank: u8,
    pub profile_completion: u8,
    pub seo_score: u8,
    pub review_reply_rate: u8,
    pub review_velocity: u8,
    pub response_time: u8,
    pub photo_count: u8,
    pub photo_quality: u8,
    pub positive_sentiment: u8,
    pub local_pack_visibility: u8,
}

impl SubScores {
    #[must_use]
    pub const fn get(&self, metric: Metric) -> u8 {
        match metric {
            Metric::SearchRank => self.search_rank,
            Metric::ProfileCompletion => self.profile_completion,
            Metric::SeoScore => self.seo_score,
            Metric::ReviewReplyRate => self.review_reply_rate,
            Metric::ReviewVelocity => self.review_velocity,
            Metric::ResponseTime => self.response_time,
            Metric::PhotoCount => self.photo_count,
            Metric::PhotoQuality => self.photo_quality,
            Metric::PositiveSentiment => self.positive_sentiment,
            Metric::LocalPackVisibility => self.local_pack_visibility,
        }
    }

    /// Sub-scores in [`Metric::ALL`] order
    #[must_use]
    pub const fn as_array(&self) -> [u8; 10] {
        [
            self.search_rank,
            self.profile_completion,
            self.seo_score,
            self.review_reply_rate,
            self.review_velocity,
            self.response_time,
            self.photo_count,
            self.photo_quality,
            self.positive_sentiment,
            self.local_pack_visibility,
        ]
    }
}

/// Composite scorer over a benchmark table and weight set
#[derive(Debug, Clone, Default)]
pub struct CompositeScorer {
    benchmarks: Benchmarks,
    weights: ScoringWeights,
}

impl CompositeScorer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    #[must_use]
    pub fn with_benchmarks(mut self, benchmarks: Benchmarks) -> Self {
        self.benchmarks = benchmarks;
        self
    }

    #[must_use]
    pub const fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    #[must_use]
    pub const fn benchmarks(&self) -> &Benchmarks {
        &self.benchmarks
    }

    /// Normalize every tracked metric against the benchmark table
    #[must_use]
    pub fn sub_scores(&self, metrics: &MetricsBundle) -> SubScores {
        let score = |metric: Metric| {
            normalize(
                metrics.value(metric),
                self.benchmarks.get(metric),
                metric.direction(),
            )
        };

        SubScores {
            search_rank: score(Metric::SearchRank),
            profile_completion: score(Metric::ProfileCompletion),
            seo_score: score(Metric::SeoScore),
            review_reply_rate: score(Metric::ReviewReplyRate),
            review_velocity: score(Metric::ReviewVelocity),
            response_time: score(Metric::ResponseTime),
            photo_count: score(Metric::PhotoCount),
            photo_quality: score(Metric::PhotoQuality),
            positive_sentiment: score(Metric::PositiveSentiment),
            local_pack_visibility: score(Metric::LocalPackVisibility),
        }
    }

    /// Weighted overall score, rounded half away from zero and clamped to 0-100.
    #[must_use]
    pub fn overall_score(&self, metrics: &MetricsBundle) -> u8 {
        self.combine(&self.sub_scores(metrics))
    }

    /// Combine precomputed sub-scores into the overall score
    #[must_use]
    pub fn combine(&self, sub_scores: &SubScores) -> u8 {
        let weighted: f64 = sub_scores
            .as_array()
            .iter()
            .zip(self.weights.as_array())
            .map(|(&s, w)| f64::from(s) * w)
            .sum();

        if !weighted.is_finite() {
            return 0;
        }
        // snap away float noise first so exact .5 totals round up
        let snapped = (weighted * SNAP_SCALE).round() / SNAP_SCALE;
        // clamp happens before the cast, so the conversion is lossless
        snapped.round().clamp(0.0, 100.0) as u8
    }
}
