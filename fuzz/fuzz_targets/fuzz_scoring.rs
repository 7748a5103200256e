#![no_main]
use libfuzzer_sys::fuzz_target;

use gbp_score::scoring::{CompositeScorer, MetricsBundle, RecommendationEngine};

/// Fuzz scoring over arbitrary bit patterns, NaN and infinities included.
fuzz_target!(|data: [u64; 13]| {
    let v = data.map(f64::from_bits);
    let metrics = MetricsBundle {
        response_time: v[0],
        photo_count: v[1],
        photo_quality: v[2],
        review_reply_score: v[3],
        profile_completion: v[4],
        google_search_rank: v[5],
        seo_score: v[6],
        review_score: v[7],
        positive_reviews: v[8],
        negative_reviews: v[9],
        local_pack_appearances: v[10],
        review_count: v[11],
        rating: v[12],
    };
    assert!(CompositeScorer::new().overall_score(&metrics) <= 100);
    assert!(RecommendationEngine::default().generate(&metrics).len() <= 8);
});
