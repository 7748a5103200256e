//! Raw business-health measurements for one business at one point in time.

use serde::{Deserialize, Serialize};

use super::benchmarks::Metric;

/// Flat bundle of raw metrics.
///
/// Produced fresh per analysis and never persisted. Values are not validated;
/// callers are responsible for producing sane inputs.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsBundle {
    /// Average review response time in hours
    pub response_time: f64,
    /// Number of photos on the profile
    pub photo_count: f64,
    /// Photo quality (percent)
    pub photo_quality: f64,
    /// Share of reviews that received a reply (percent)
    pub review_reply_score: f64,
    /// Profile completion (percent)
    pub profile_completion: f64,
    /// Average position in local search results
    pub google_search_rank: f64,
    /// SEO score (percent)
    pub seo_score: f64,
    /// New reviews per week
    pub review_score: f64,
    /// 4-5 star reviews (percent)
    pub positive_reviews: f64,
    /// 1-2 star reviews (percent)
    pub negative_reviews: f64,
    /// Share of relevant searches showing the business in the local 3-pack (percent)
    pub local_pack_appearances: f64,
    /// Total number of reviews
    pub review_count: f64,
    /// Star rating
    pub rating: f64,
}

impl MetricsBundle {
    /// Raw value feeding a composite-score metric.
    #[must_use]
    pub const fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::SearchRank => self.google_search_rank,
            Metric::ProfileCompletion => self.profile_completion,
            Metric::SeoScore => self.seo_score,
            Metric::ReviewReplyRate => self.review_reply_score,
            Metric::ReviewVelocity => self.review_score,
            Metric::ResponseTime => self.response_time,
            Metric::PhotoCount => self.photo_count,
            Metric::PhotoQuality => self.photo_quality,
            Metric::PositiveSentiment => self.positive_reviews,
            Metric::LocalPackVisibility => self.local_pack_appearances,
        }
    }
}
