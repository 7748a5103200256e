//! Property-based tests for scoring and recommendations.
//!
//! Scoring is total over finite input: arbitrary metric bundles, including
//! negative and far out-of-range values, must score in range and never panic.

use gbp_score::scoring::{CompositeScorer, MetricsBundle, RecommendationEngine, MAX_RECOMMENDATIONS};
use proptest::prelude::*;

fn any_value() -> impl Strategy<Value = f64> {
    prop_oneof![
        -1.0e6..1.0e6_f64,
        0.0..100.0_f64,
        Just(0.0),
        Just(f64::MAX),
        Just(f64::MIN),
    ]
}

prop_compose! {
    fn metrics()(
        a in any_value(), b in any_value(), c in any_value(), d in any_value(),
        e in any_value(), f in any_value(), g in any_value(), h in any_value(),
        i in any_value(), j in any_value(), k in any_value(), l in any_value(),
        m in any_value(),
    ) -> MetricsBundle {
        MetricsBundle {
            response_time: a,
            photo_count: b,
            photo_quality: c,
            review_reply_score: d,
            profile_completion: e,
            google_search_rank: f,
            seo_score: g,
            review_score: h,
            positive_reviews: i,
            negative_reviews: j,
            local_pack_appearances: k,
            review_count: l,
            rating: m,
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn overall_score_in_range(m in metrics()) {
        let scorer = CompositeScorer::new();
        let score = scorer.overall_score(&m);
        prop_assert!(score <= 100);
        prop_assert!(score >= 10, "lowest sub-score is 10, got {}", score);
        for sub in scorer.sub_scores(&m).as_array() {
            prop_assert!([100, 85, 60, 30, 10].contains(&sub));
        }
    }

    #[test]
    fn recommendations_capped_and_sorted(m in metrics()) {
        let recs = RecommendationEngine::default().generate(&m);
        prop_assert!(recs.len() <= MAX_RECOMMENDATIONS);
        for pair in recs.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(
                a.priority.rank() > b.priority.rank()
                    || (a.priority == b.priority && a.impact >= b.impact)
            );
        }
    }

    #[test]
    fn scoring_is_idempotent(m in metrics()) {
        let scorer = CompositeScorer::new();
        let engine = RecommendationEngine::default();
        prop_assert_eq!(scorer.overall_score(&m), scorer.overall_score(&m));
        prop_assert_eq!(engine.action_items(&m), engine.action_items(&m));
    }

    #[test]
    fn better_response_time_never_lowers_score(m in metrics(), delta in 0.0..500.0_f64) {
        let scorer = CompositeScorer::new();
        let worse = MetricsBundle { response_time: m.response_time + delta, ..m };
        prop_assert!(scorer.overall_score(&m) >= scorer.overall_score(&worse));
    }
}
