//! Metrics providers.
//!
//! A provider turns a business name into a [`BusinessSnapshot`]: the raw
//! [`MetricsBundle`] plus the display-only fields that do not feed scoring.
//! Acquisition is the only step of an analysis that can block or fail.

use std::sync::Arc;
use std::time::Duration;

use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{ErrorContext, Result};
use crate::places::{PlaceDetails, PlacesSource};
use crate::scoring::MetricsBundle;

/// Address shown when nothing better is known about the business
pub const FALLBACK_ADDRESS: &str = "Plot 81 block E Auto Nagar Visakhapatnam, Andhra Pradesh 530012";

/// Number of fillable fields on a Business Profile
const PROFILE_FIELDS: f64 = 15.0;

/// Raw measurements for one business plus display-only extras.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessSnapshot {
    pub metrics: MetricsBundle,
    pub address: String,
    /// 3-star reviews (percent)
    pub neutral_reviews: f64,
    pub missing_fields: u32,
}

/// Trait for metrics providers.
///
/// Implement this trait to plug in a real Business Profile data source.
pub trait MetricsProvider: Send + Sync {
    /// Acquire a snapshot for `business_name` (already trimmed, non-empty).
    fn snapshot(&self, business_name: &str) -> Result<BusinessSnapshot>;

    /// Get the name of this provider.
    fn name(&self) -> &'static str;
}

/// Provider returning a fixed snapshot for every business.
///
/// Used for replaying recorded data and in tests.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    snapshot: BusinessSnapshot,
}

impl StaticProvider {
    #[must_use]
    pub const fn new(snapshot: BusinessSnapshot) -> Self {
        Self { snapshot }
    }

    /// Provider over a bare metrics bundle with the fallback address
    #[must_use]
    pub fn from_metrics(metrics: MetricsBundle) -> Self {
        Self::new(BusinessSnapshot {
            metrics,
            address: FALLBACK_ADDRESS.to_string(),
            ..Default::default()
        })
    }
}

impl MetricsProvider for StaticProvider {
    fn snapshot(&self, _business_name: &str) -> Result<BusinessSnapshot> {
        Ok(self.snapshot.clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

/// Provider that simulates Business Profile metrics.
///
/// The business is looked up in a [`PlacesSource`]; its rating and review
/// count (when found) seed a set of bounded random generators correlated the
/// way real profiles tend to be: more reviews means faster replies and more
/// photos, higher ratings mean better ranks and sentiment.
pub struct SimulatedProvider {
    places: Arc<dyn PlacesSource>,
    seed: Option<u64>,
    latency: Duration,
}

impl SimulatedProvider {
    #[must_use]
    pub fn new(places: Arc<dyn PlacesSource>) -> Self {
        Self {
            places,
            seed: None,
            latency: Duration::ZERO,
        }
    }

    /// Fix the RNG seed. Every call then reproduces the same metrics for the
    /// same place data.
    #[must_use]
    pub const fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Artificial delay before each snapshot
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl MetricsProvider for SimulatedProvider {
    fn snapshot(&self, business_name: &str) -> Result<BusinessSnapshot> {
        if !self.latency.is_zero() {
            std::thread::sleep(self.latency);
        }

        let needle = business_name.to_lowercase();
        let prediction = self
            .places
            .autocomplete(business_name)
            .context("looking up business")?
            .into_iter()
            .find(|p| {
                p.structured_formatting
                    .main_text
                    .to_lowercase()
                    .contains(&needle)
            });

        let details = match &prediction {
            Some(p) => self
                .places
                .details(&p.place_id)
                .with_context(|| format!("fetching details for {}", p.place_id))?,
            None => None,
        };

        tracing::debug!(
            source = self.places.name(),
            matched = prediction.is_some(),
            has_details = details.is_some(),
            "Simulating metrics"
        );

        let mut snapshot = simulate(&mut self.rng(), details.as_ref());
        snapshot.address = prediction
            .map(|p| p.structured_formatting.secondary_text)
            .filter(|s| !s.is_empty())
            .or_else(|| {
                details
                    .map(|d| d.formatted_address)
                    .filter(|s| !s.is_empty())
            })
            .unwrap_or_else(|| FALLBACK_ADDRESS.to_string());

        Ok(snapshot)
    }

    fn name(&self) -> &'static str {
        "simulated"
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Derive a full snapshot from optional place details.
///
/// The address is left empty for the caller to fill in.
pub fn simulate<R: Rng>(rng: &mut R, details: Option<&PlaceDetails>) -> BusinessSnapshot {
    let mut u = || rng.gen::<f64>();

    let rating = details
        .and_then(|d| d.rating)
        .filter(|r| *r > 0.0)
        .unwrap_or_else(|| round1(3.5 + u() * 1.5))
        .clamp(1.0, 5.0);
    let review_count = details
        .and_then(|d| d.user_ratings_total)
        .filter(|n| *n > 0)
        .map_or_else(|| (u() * 100.0).floor() + 10.0, f64::from);

    let response_time = if review_count > 50.0 {
        8.0 + u() * 20.0
    } else {
        12.0 + u() * 120.0
    }
    .floor();

    let photo_count = if review_count > 30.0 {
        15.0 + u() * 20.0
    } else {
        5.0 + u() * 15.0
    }
    .floor();

    let photo_quality = if review_count > 40.0 {
        70.0 + u() * 20.0
    } else {
        40.0 + u() * 40.0
    }
    .floor();

    let local_pack_appearances = if rating > 4.0 && review_count > 20.0 {
        35.0 + u() * 25.0
    } else {
        10.0 + u() * 30.0
    }
    .floor();

    let google_search_rank = round1(if rating > 4.2 && review_count > 30.0 {
        3.0 + u() * 7.0
    } else {
        8.0 + u() * 22.0
    });

    let profile_completion = if rating > 4.0 {
        75.0 + u() * 20.0
    } else {
        50.0 + u() * 30.0
    }
    .floor();

    let missing_fields = ((100.0 - profile_completion) / 100.0 * PROFILE_FIELDS).floor();

    let seo_score = if profile_completion > 80.0 {
        65.0 + u() * 25.0
    } else {
        30.0 + u() * 40.0
    }
    .floor();

    let review_score = if rating > 4.0 {
        (u() * 2.0).floor() + 1.0
    } else {
        (u() * 2.0).floor()
    };

    let review_reply_score = if response_time < 24.0 {
        75.0 + u() * 20.0
    } else if response_time < 48.0 {
        50.0 + u() * 25.0
    } else {
        20.0 + u() * 30.0
    }
    .floor();

    let (positive, neutral) = if rating >= 4.5 {
        (80.0 + u() * 15.0, 5.0 + u() * 10.0)
    } else if rating >= 4.0 {
        (70.0 + u() * 15.0, 10.0 + u() * 10.0)
    } else if rating >= 3.5 {
        (55.0 + u() * 15.0, 15.0 + u() * 10.0)
    } else {
        (40.0 + u() * 20.0, 20.0 + u() * 15.0)
    };
    let negative = 100.0 - positive - neutral;

    BusinessSnapshot {
        metrics: MetricsBundle {
            response_time,
            photo_count,
            photo_quality,
            review_reply_score,
            profile_completion,
            google_search_rank,
            seo_score,
            review_score,
            positive_reviews: positive.floor(),
            negative_reviews: negative.floor(),
            local_pack_appearances,
            review_count,
            rating,
        },
        address: String::new(),
        neutral_reviews: neutral.floor(),
        // bounded by PROFILE_FIELDS, so the cast is lossless
        missing_fields: missing_fields.max(0.0) as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::places::MockPlaces;

    fn provider(seed: u64) -> SimulatedProvider {
        SimulatedProvider::new(Arc::new(MockPlaces::new())).with_seed(Some(seed))
    }

    #[test]
    fn test_static_provider() {
        let metrics = MetricsBundle {
            rating: 4.4,
            ..Default::default()
        };
        let p = StaticProvider::from_metrics(metrics);
        let snap = p.snapshot("anything").expect("static never fails");
        assert_eq!(snap.metrics, metrics);
        assert_eq!(snap.address, FALLBACK_ADDRESS);
        assert_eq!(p.name(), "static");
    }

    #[test]
    fn test_seeded_simulation_is_reproducible() {
        let a = provider(7).snapshot("Green Leaf").expect("snapshot");
        let b = provider(7).snapshot("Green Leaf").expect("snapshot");
        assert_eq!(a, b);
    }

    #[test]
    fn test_known_business_uses_place_data() {
        let snap = provider(1).snapshot("Green Leaf").expect("snapshot");
        assert!((snap.metrics.rating - 4.5).abs() < f64::EPSILON);
        assert!((snap.metrics.review_count - 421.0).abs() < f64::EPSILON);
        assert_eq!(snap.address, "Beach Road,  R K Beach");
        // 421 reviews: fast responses, many photos
        assert!((8.0..28.0).contains(&snap.metrics.response_time));
        assert!((15.0..35.0).contains(&snap.metrics.photo_count));
    }

    #[test]
    fn test_unknown_business_falls_back() {
        let snap = provider(3).snapshot("Nonexistent Bakery").expect("snapshot");
        assert_eq!(snap.address, FALLBACK_ADDRESS);
        assert!((3.5..=5.0).contains(&snap.metrics.rating));
        assert!((10.0..110.0).contains(&snap.metrics.review_count));
    }

    #[test]
    fn test_simulated_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let snap = simulate(&mut rng, None);
            let m = snap.metrics;
            assert!((1.0..=5.0).contains(&m.rating));
            assert!((0.0..=2.0).contains(&m.review_score));
            assert!((1.0..=30.0).contains(&m.google_search_rank));
            assert!(snap.missing_fields <= 7);
            let total = m.positive_reviews + snap.neutral_reviews + m.negative_reviews;
            // three floors lose at most 3 points
            assert!((97.0..=100.0).contains(&total), "sentiment total {total}");
        }
    }

    #[test]
    fn test_missing_fields_from_profile_completion() {
        let mut rng = StdRng::seed_from_u64(11);
        let snap = simulate(&mut rng, None);
        let expected = ((100.0 - snap.metrics.profile_completion) / 100.0 * 15.0).floor();
        assert!((f64::from(snap.missing_fields) - expected).abs() < f64::EPSILON);
    }
}
