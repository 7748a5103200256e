//! GBP scoring.
//!
//! Pure, synchronous functions over a [`MetricsBundle`]:
//!
//! - [`benchmarks`]: industry threshold table
//! - [`normalize`]: raw value to sub-score step function
//! - [`scorer`]: weighted composite score
//! - [`recommendations`]: rule battery, ranking and capping
//!
//! Nothing in this module performs I/O or returns an error.

pub mod benchmarks;
pub mod metrics;
pub mod normalize;
pub mod recommendations;
pub mod scorer;

pub use benchmarks::{BenchmarkThresholds, Benchmarks, Direction, Metric, BENCHMARKS};
pub use metrics::MetricsBundle;
pub use normalize::{normalize, tier, MetricStatus, Tier};
pub use recommendations::{
    rank_recommendations, ActionItem, Priority, Recommendation, RecommendationEngine, Rule,
    MAX_RECOMMENDATIONS, RULES,
};
pub use scorer::{CompositeScorer, ScoringWeights, SubScores};
