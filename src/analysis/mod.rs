//! Analysis orchestration.
//!
//! An analysis takes a business name, acquires a [`BusinessSnapshot`] from a
//! [`MetricsProvider`], then runs scoring and recommendation generation
//! synchronously over the snapshot's metrics. Each call is independent:
//! nothing is cached between analyses and a provider failure yields no
//! partial result.

mod provider;

pub use provider::{
    simulate, BusinessSnapshot, MetricsProvider, SimulatedProvider, StaticProvider,
    FALLBACK_ADDRESS,
};

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::error::{ErrorContext, GbpError, Result};
use crate::places::PlacesSource;
use crate::scoring::{
    ActionItem, Benchmarks, CompositeScorer, MetricsBundle, RecommendationEngine, ScoringWeights,
    SubScores,
};

/// Display fields and action items for one analysed business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisData {
    pub business_name: String,
    pub rating: f64,
    pub review_count: f64,
    pub address: String,
    pub google_search_rank: f64,
    pub profile_completion: f64,
    pub missing_fields: u32,
    pub seo_score: f64,
    pub review_score: f64,
    pub review_reply_score: f64,
    pub response_time: f64,
    pub photo_count: f64,
    pub photo_quality: f64,
    pub positive_reviews: f64,
    pub neutral_reviews: f64,
    pub negative_reviews: f64,
    pub local_pack_appearances: f64,
    pub action_items: Vec<ActionItem>,
}

impl AnalysisData {
    fn new(business_name: &str, snapshot: BusinessSnapshot, action_items: Vec<ActionItem>) -> Self {
        let m = snapshot.metrics;
        Self {
            business_name: business_name.to_string(),
            rating: m.rating,
            review_count: m.review_count,
            address: snapshot.address,
            google_search_rank: m.google_search_rank,
            profile_completion: m.profile_completion,
            missing_fields: snapshot.missing_fields,
            seo_score: m.seo_score,
            review_score: m.review_score,
            review_reply_score: m.review_reply_score,
            response_time: m.response_time,
            photo_count: m.photo_count,
            photo_quality: m.photo_quality,
            positive_reviews: m.positive_reviews,
            neutral_reviews: snapshot.neutral_reviews,
            negative_reviews: m.negative_reviews,
            local_pack_appearances: m.local_pack_appearances,
            action_items,
        }
    }

    /// Rebuild the metrics bundle these display fields were derived from
    #[must_use]
    pub const fn metrics(&self) -> MetricsBundle {
        MetricsBundle {
            response_time: self.response_time,
            photo_count: self.photo_count,
            photo_quality: self.photo_quality,
            review_reply_score: self.review_reply_score,
            profile_completion: self.profile_completion,
            google_search_rank: self.google_search_rank,
            seo_score: self.seo_score,
            review_score: self.review_score,
            positive_reviews: self.positive_reviews,
            negative_reviews: self.negative_reviews,
            local_pack_appearances: self.local_pack_appearances,
            review_count: self.review_count,
            rating: self.rating,
        }
    }
}

/// Result of analysing one business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Composite score, 0-100
    pub overall_score: u8,
    pub analysis_data: AnalysisData,
    pub sub_scores: SubScores,
}

/// Analysis orchestrator.
#[derive(Clone)]
pub struct Analyzer {
    provider: Arc<dyn MetricsProvider>,
    scorer: CompositeScorer,
    engine: RecommendationEngine,
}

impl Analyzer {
    /// Analyzer over `provider` with default benchmarks and weights.
    #[must_use]
    pub fn new(provider: Arc<dyn MetricsProvider>) -> Self {
        Self {
            provider,
            scorer: CompositeScorer::new(),
            engine: RecommendationEngine::default(),
        }
    }

    #[must_use]
    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.scorer = self.scorer.with_weights(weights);
        self
    }

    /// Use a custom benchmark table for both scoring and recommendations
    #[must_use]
    pub fn with_benchmarks(mut self, benchmarks: Benchmarks) -> Self {
        self.scorer = self.scorer.with_benchmarks(benchmarks.clone());
        self.engine = self.engine.with_benchmarks(benchmarks);
        self
    }

    /// Cap the number of action items per analysis
    #[must_use]
    pub fn with_max_recommendations(mut self, limit: usize) -> Self {
        self.engine = self.engine.with_limit(limit);
        self
    }

    /// Analyzer wired from configuration: a simulated provider over
    /// `places`, with the configured seed, latency, weights, benchmarks and
    /// recommendation cap.
    #[must_use]
    pub fn from_config(config: &AppConfig, places: Arc<dyn PlacesSource>) -> Self {
        let provider = SimulatedProvider::new(places)
            .with_seed(config.analysis.seed)
            .with_latency(config.analysis.latency());
        let mut analyzer = Self::new(Arc::new(provider))
            .with_max_recommendations(config.analysis.max_recommendations);
        if let Some(weights) = config.scoring.weights {
            analyzer = analyzer.with_weights(weights);
        }
        if let Some(benchmarks) = &config.scoring.benchmarks {
            analyzer = analyzer.with_benchmarks(benchmarks.clone());
        }
        analyzer
    }

    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Analyse a business by name.
    ///
    /// Blank names are rejected with [`GbpError::MissingInput`] before the
    /// provider is consulted.
    pub fn analyse(&self, business_name: &str) -> Result<AnalysisResult> {
        let name = business_name.trim();
        if name.is_empty() {
            return Err(GbpError::missing_input("business name is required"));
        }

        tracing::info!(business = name, provider = self.provider.name(), "Analysing business");

        let snapshot = self
            .provider
            .snapshot(name)
            .with_context(|| format!("analysing {name}"))?;

        let result = self.evaluate(name, snapshot);
        tracing::info!(
            business = name,
            score = result.overall_score,
            recommendations = result.analysis_data.action_items.len(),
            "Analysis complete"
        );
        Ok(result)
    }

    /// Score an already-acquired snapshot.
    #[must_use]
    pub fn evaluate(&self, business_name: &str, snapshot: BusinessSnapshot) -> AnalysisResult {
        let sub_scores = self.scorer.sub_scores(&snapshot.metrics);
        let overall_score = self.scorer.combine(&sub_scores);
        let action_items = self.engine.action_items(&snapshot.metrics);

        AnalysisResult {
            overall_score,
            analysis_data: AnalysisData::new(business_name, snapshot, action_items),
            sub_scores,
        }
    }
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("provider", &self.provider.name())
            .field("scorer", &self.scorer)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataSourceErrorKind;

    struct FailingProvider;

    impl MetricsProvider for FailingProvider {
        fn snapshot(&self, _business_name: &str) -> Result<BusinessSnapshot> {
            Err(GbpError::data_source(
                "fetch",
                DataSourceErrorKind::ProviderUnavailable("offline".to_string()),
            ))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    #[test]
    fn test_blank_name_rejected() {
        let analyzer = Analyzer::new(Arc::new(FailingProvider));
        // the failing provider is never reached
        assert!(matches!(
            analyzer.analyse("   "),
            Err(GbpError::MissingInput(_))
        ));
        assert!(matches!(analyzer.analyse(""), Err(GbpError::MissingInput(_))));
    }

    #[test]
    fn test_provider_failure_propagates() {
        let analyzer = Analyzer::new(Arc::new(FailingProvider));
        match analyzer.analyse("Cafe") {
            Err(err @ GbpError::DataSource { .. }) => {
                assert!(err.is_retryable());
                assert!(err.to_string().contains("analysing Cafe"), "{err}");
            }
            other => panic!("Expected DataSource error, got {other:?}"),
        }
    }

    #[test]
    fn test_name_is_trimmed() {
        let analyzer = Analyzer::new(Arc::new(StaticProvider::default()));
        let result = analyzer.analyse("  Cafe Nova ").expect("analysis");
        assert_eq!(result.analysis_data.business_name, "Cafe Nova");
    }

    #[test]
    fn test_metrics_round_trip_through_display_fields() {
        let metrics = MetricsBundle {
            response_time: 30.0,
            photo_count: 12.0,
            google_search_rank: 6.5,
            rating: 4.1,
            review_count: 55.0,
            ..Default::default()
        };
        let analyzer = Analyzer::new(Arc::new(StaticProvider::from_metrics(metrics)));
        let result = analyzer.analyse("Cafe").expect("analysis");
        assert_eq!(result.analysis_data.metrics(), metrics);
    }

    #[test]
    fn test_from_config_is_reproducible() {
        let config = AppConfig::builder().seed(11).build();
        let places: Arc<dyn PlacesSource> = Arc::new(crate::places::MockPlaces::new());
        let analyzer = Analyzer::from_config(&config, places);
        assert_eq!(analyzer.provider_name(), "simulated");
        let first = analyzer.analyse("Green Leaf").expect("analysis");
        let second = analyzer.analyse("Green Leaf").expect("analysis");
        assert_eq!(first, second);
    }

    #[test]
    fn test_max_recommendations() {
        let analyzer =
            Analyzer::new(Arc::new(StaticProvider::default())).with_max_recommendations(2);
        let result = analyzer.analyse("Cafe").expect("analysis");
        assert!(result.analysis_data.action_items.len() <= 2);
    }

    #[test]
    fn test_camel_case_output() {
        let analyzer = Analyzer::new(Arc::new(StaticProvider::default()));
        let json = serde_json::to_value(analyzer.analyse("Cafe").expect("analysis"))
            .expect("serialize");
        assert!(json.get("overallScore").is_some());
        assert!(json["analysisData"].get("actionItems").is_some());
        assert!(json["analysisData"].get("neutralReviews").is_some());
    }
}
