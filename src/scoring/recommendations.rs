//! Rule-based recommendation generation.
//!
//! Every rule is an independent predicate-plus-template over a
//! [`MetricsBundle`]; rules compare raw values against the benchmark table's
//! `poor` / `average` tiers, not against normalized sub-scores. Ranking and
//! capping live in [`rank_recommendations`] and never look at individual rules.

use serde::{Deserialize, Serialize};

use super::benchmarks::Benchmarks;
use super::metrics::MetricsBundle;

/// Maximum number of recommendations returned by the engine
pub const MAX_RECOMMENDATIONS: usize = 8;

/// Negative-review share above which the issue is urgent (percent)
const NEGATIVE_REVIEWS_HIGH: f64 = 15.0;
/// Negative-review share above which sentiment needs attention (percent)
const NEGATIVE_REVIEWS_MEDIUM: f64 = 10.0;
/// Ratings below this are flagged once there are enough reviews to matter
const RATING_FLOOR: f64 = 4.0;
const RATING_MIN_REVIEWS: f64 = 10.0;
/// Review volume below which collecting reviews is recommended
const REVIEW_VOLUME_FLOOR: f64 = 20.0;

/// Recommendation priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Sort rank: higher ranks are listed first
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Recommendation with its internal ranking weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub title: String,
    pub description: String,
    /// Estimated impact, used only for ranking within a priority
    pub impact: u32,
}

impl Recommendation {
    fn new(priority: Priority, title: &str, description: String, impact: u32) -> Self {
        Self {
            priority,
            title: title.to_string(),
            description,
            impact,
        }
    }

    /// Drop the internal impact weight for external consumers.
    #[must_use]
    pub fn into_action_item(self) -> ActionItem {
        ActionItem {
            priority: self.priority,
            title: self.title,
            description: self.description,
        }
    }
}

/// Externally visible recommendation (no impact weight).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItem {
    pub priority: Priority,
    pub title: String,
    pub description: String,
}

/// A named recommendation rule.
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub check: fn(&MetricsBundle, &Benchmarks) -> Option<Recommendation>,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

/// Built-in rule battery, evaluated in declaration order.
pub const RULES: &[Rule] = &[
    Rule {
        name: "response-time",
        check: response_time_rule,
    },
    Rule {
        name: "photo-count",
        check: photo_count_rule,
    },
    Rule {
        name: "photo-quality",
        check: photo_quality_rule,
    },
    Rule {
        name: "review-reply-rate",
        check: reply_rate_rule,
    },
    Rule {
        name: "profile-completion",
        check: profile_completion_rule,
    },
    Rule {
        name: "search-rank",
        check: search_rank_rule,
    },
    Rule {
        name: "seo-score",
        check: seo_rule,
    },
    Rule {
        name: "review-velocity",
        check: review_velocity_rule,
    },
    Rule {
        name: "negative-reviews",
        check: negative_reviews_rule,
    },
    Rule {
        name: "positive-sentiment",
        check: positive_sentiment_rule,
    },
    Rule {
        name: "local-pack",
        check: local_pack_rule,
    },
    Rule {
        name: "rating",
        check: rating_rule,
    },
    Rule {
        name: "review-volume",
        check: review_volume_rule,
    },
];

/// Recommendation engine over a benchmark table and a rule battery.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    benchmarks: Benchmarks,
    rules: Vec<Rule>,
    limit: usize,
}

impl RecommendationEngine {
    /// Engine with the built-in rules and default cap
    #[must_use]
    pub fn new(benchmarks: Benchmarks) -> Self {
        Self {
            benchmarks,
            rules: RULES.to_vec(),
            limit: MAX_RECOMMENDATIONS,
        }
    }

    /// Replace the rule battery
    #[must_use]
    pub fn with_rules(mut self, rules: Vec<Rule>) -> Self {
        self.rules = rules;
        self
    }

    /// Replace the benchmark table the rules compare against
    #[must_use]
    pub fn with_benchmarks(mut self, benchmarks: Benchmarks) -> Self {
        self.benchmarks = benchmarks;
        self
    }

    /// Cap the number of recommendations. Limits above
    /// [`MAX_RECOMMENDATIONS`] are clamped to it.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = if limit > MAX_RECOMMENDATIONS {
            MAX_RECOMMENDATIONS
        } else {
            limit
        };
        self
    }

    /// Run every rule, then rank and cap the results.
    #[must_use]
    pub fn generate(&self, metrics: &MetricsBundle) -> Vec<Recommendation> {
        let fired: Vec<Recommendation> = self
            .rules
            .iter()
            .filter_map(|rule| {
                let rec = (rule.check)(metrics, &self.benchmarks);
                if rec.is_some() {
                    tracing::trace!(rule = rule.name, "recommendation rule fired");
                }
                rec
            })
            .collect();

        let mut ranked = rank_recommendations(fired);
        ranked.truncate(self.limit);
        ranked
    }

    /// Generate recommendations with the impact weight removed.
    #[must_use]
    pub fn action_items(&self, metrics: &MetricsBundle) -> Vec<ActionItem> {
        self.generate(metrics)
            .into_iter()
            .map(Recommendation::into_action_item)
            .collect()
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new(Benchmarks::default())
    }
}

/// Sort by descending priority, then descending impact.
///
/// The sort is stable: full ties keep rule declaration order.
#[must_use]
pub fn rank_recommendations(mut recommendations: Vec<Recommendation>) -> Vec<Recommendation> {
    recommendations.sort_by(|a, b| {
        b.priority
            .rank()
            .cmp(&a.priority.rank())
            .then_with(|| b.impact.cmp(&a.impact))
    });
    recommendations
}

// ============================================================================
// Rules
// ============================================================================

fn response_time_rule(m: &MetricsBundle, b: &Benchmarks) -> Option<Recommendation> {
    let t = &b.response_time;
    if m.response_time > t.poor {
        Some(Recommendation::new(
            Priority::High,
            "Urgent: Improve Review Response Time",
            format!(
                "Your average response time is {} hours, which is significantly above the industry standard of 24 hours. \
                 Quick responses (under 12 hours) can increase customer trust by 40% and improve your ranking. \
                 Set up automated notifications and respond within 24 hours to all reviews.",
                m.response_time
            ),
            35,
        ))
    } else if m.response_time > t.average {
        Some(Recommendation::new(
            Priority::Medium,
            "Optimize Review Response Time",
            format!(
                "Your response time of {} hours is above the recommended 24-hour target. \
                 Responding within 12-24 hours can improve your visibility and customer satisfaction. \
                 Consider using an auto-reply tool for faster responses.",
                m.response_time
            ),
            25,
        ))
    } else {
        None
    }
}

fn photo_count_rule(m: &MetricsBundle, b: &Benchmarks) -> Option<Recommendation> {
    let t = &b.photo_count;
    if m.photo_count < t.poor {
        Some(Recommendation::new(
            Priority::High,
            "Critical: Add High-Quality Photos",
            format!(
                "You have only {} photos. Businesses with 20+ photos get 2x more engagement. \
                 Add photos of: exterior, interior, products/services, team, customer testimonials, and special features. \
                 Use high-resolution images (minimum 720x720px) with good lighting.",
                m.photo_count
            ),
            30,
        ))
    } else if m.photo_count < t.average {
        Some(Recommendation::new(
            Priority::Medium,
            "Expand Photo Gallery",
            format!(
                "You have {} photos. Aim for 15-20 photos to showcase your business better. \
                 Add photos of different areas, products, and customer experiences. \
                 Update photos quarterly to keep your profile fresh.",
                m.photo_count
            ),
            20,
        ))
    } else {
        None
    }
}

fn photo_quality_rule(m: &MetricsBundle, b: &Benchmarks) -> Option<Recommendation> {
    (m.photo_quality < b.photo_quality.poor).then(|| {
        Recommendation::new(
            Priority::High,
            "Improve Photo Quality",
            format!(
                "Your photo quality score is {}%. Low-quality photos hurt your credibility. \
                 Use professional photography, ensure good lighting, remove blurry images, and maintain consistent style. \
                 Consider hiring a professional photographer for key images.",
                m.photo_quality
            ),
            25,
        )
    })
}

fn reply_rate_rule(m: &MetricsBundle, b: &Benchmarks) -> Option<Recommendation> {
    let t = &b.review_reply_rate;
    if m.review_reply_score < t.poor {
        Some(Recommendation::new(
            Priority::High,
            "Respond to All Reviews",
            format!(
                "You're only responding to {}% of reviews. Google rewards businesses that respond to 80%+ of reviews with better rankings. \
                 Respond to every review within 24-48 hours, thank positive reviewers, and address negative feedback professionally.",
                m.review_reply_score
            ),
            30,
        ))
    } else if m.review_reply_score < t.average {
        Some(Recommendation::new(
            Priority::Medium,
            "Increase Review Response Rate",
            format!(
                "Your response rate is {}%. Aim for 80%+ to maximize visibility. \
                 Set aside 15 minutes daily to respond to reviews. \
                 Use personalized responses (avoid generic templates) and address specific points mentioned.",
                m.review_reply_score
            ),
            20,
        ))
    } else {
        None
    }
}

fn profile_completion_rule(m: &MetricsBundle, b: &Benchmarks) -> Option<Recommendation> {
    let t = &b.profile_completion;
    if m.profile_completion < t.poor {
        Some(Recommendation::new(
            Priority::High,
            "Complete Your Business Profile",
            format!(
                "Your profile is only {}% complete. Complete profiles rank 70% higher in local searches. \
                 Fill in: business hours, website, services, attributes, opening date, and all available fields. \
                 Add a detailed business description (750+ characters) with relevant keywords.",
                m.profile_completion
            ),
            35,
        ))
    } else if m.profile_completion < t.average {
        Some(Recommendation::new(
            Priority::Medium,
            "Enhance Profile Completeness",
            format!(
                "Your profile is {}% complete. Complete all sections including: attributes, services, products, and business updates. \
                 Add regular posts (at least 1-2 per week) to keep your profile active and engaging.",
                m.profile_completion
            ),
            20,
        ))
    } else {
        None
    }
}

fn search_rank_rule(m: &MetricsBundle, b: &Benchmarks) -> Option<Recommendation> {
    let t = &b.search_rank;
    if m.google_search_rank > t.poor {
        Some(Recommendation::new(
            Priority::High,
            "Improve Local Search Ranking",
            format!(
                "Your average search rank is {:.1}, which means you're missing potential customers. \
                 Businesses in the top 3 positions get 75% of clicks. \
                 Optimize by: improving review count/rating, adding relevant keywords, getting more reviews, \
                 and ensuring NAP (Name, Address, Phone) consistency across the web.",
                m.google_search_rank
            ),
            40,
        ))
    } else if m.google_search_rank > t.average {
        Some(Recommendation::new(
            Priority::Medium,
            "Optimize for Top 5 Rankings",
            format!(
                "Your current rank is {:.1}. To reach top 5: increase review frequency, \
                 optimize business description with local keywords, add more photos, post regularly, \
                 and encourage satisfied customers to leave reviews.",
                m.google_search_rank
            ),
            25,
        ))
    } else {
        None
    }
}

fn seo_rule(m: &MetricsBundle, b: &Benchmarks) -> Option<Recommendation> {
    let t = &b.seo_score;
    if m.seo_score < t.poor {
        Some(Recommendation::new(
            Priority::High,
            "Enhance SEO Optimization",
            format!(
                "Your SEO score is {}%, indicating poor optimization. \
                 Improve by: adding location-based keywords in business description, using relevant categories, \
                 adding services/products, optimizing business name with location, and building local citations.",
                m.seo_score
            ),
            30,
        ))
    } else if m.seo_score < t.average {
        Some(Recommendation::new(
            Priority::Medium,
            "Strengthen SEO Foundation",
            format!(
                "Your SEO score is {}%. Enhance by: adding more relevant keywords naturally, \
                 creating detailed service descriptions, adding FAQ section, \
                 and ensuring consistent business information across all platforms.",
                m.seo_score
            ),
            20,
        ))
    } else {
        None
    }
}

fn review_velocity_rule(m: &MetricsBundle, b: &Benchmarks) -> Option<Recommendation> {
    let t = &b.review_velocity;
    if m.review_score < t.poor {
        Some(Recommendation::new(
            Priority::High,
            "Increase Review Frequency",
            format!(
                "You're getting {} reviews per week. Aim for 2-3 reviews per week for optimal visibility. \
                 Implement a review request system: send follow-up emails/SMS after service, use QR codes, \
                 train staff to ask for reviews, and make it easy with direct links.",
                m.review_score
            ),
            35,
        ))
    } else if m.review_score < t.average {
        Some(Recommendation::new(
            Priority::Medium,
            "Boost Review Collection",
            format!(
                "You're getting {} review(s) per week. Increase to 2+ per week by: automating review requests, \
                 offering incentives (not for reviews, but for feedback), following up with customers, \
                 and using review collection tools.",
                m.review_score
            ),
            25,
        ))
    } else {
        None
    }
}

fn negative_reviews_rule(m: &MetricsBundle, _b: &Benchmarks) -> Option<Recommendation> {
    if m.negative_reviews > NEGATIVE_REVIEWS_HIGH {
        Some(Recommendation::new(
            Priority::High,
            "Address Negative Reviews",
            format!(
                "You have {}% negative reviews, which significantly impacts your reputation. \
                 Respond professionally to all negative reviews, address specific concerns, offer solutions, and follow up. \
                 Consider implementing a feedback system to catch issues before they become reviews.",
                m.negative_reviews
            ),
            40,
        ))
    } else if m.negative_reviews > NEGATIVE_REVIEWS_MEDIUM {
        Some(Recommendation::new(
            Priority::Medium,
            "Manage Review Sentiment",
            format!(
                "You have {}% negative reviews. Focus on improving service quality, addressing common complaints, \
                 and encouraging satisfied customers to leave positive reviews to balance the sentiment.",
                m.negative_reviews
            ),
            25,
        ))
    } else {
        None
    }
}

fn positive_sentiment_rule(m: &MetricsBundle, b: &Benchmarks) -> Option<Recommendation> {
    (m.positive_reviews < b.positive_sentiment.poor).then(|| {
        Recommendation::new(
            Priority::High,
            "Improve Customer Satisfaction",
            format!(
                "Only {}% of reviews are positive. This indicates service quality issues. \
                 Focus on: training staff, improving customer experience, addressing pain points, \
                 and following up with customers to ensure satisfaction.",
                m.positive_reviews
            ),
            35,
        )
    })
}

fn local_pack_rule(m: &MetricsBundle, b: &Benchmarks) -> Option<Recommendation> {
    let t = &b.local_pack_visibility;
    if m.local_pack_appearances < t.poor {
        Some(Recommendation::new(
            Priority::Medium,
            "Increase Local Pack Appearances",
            format!(
                "You're appearing in the local 3-pack for only {}% of relevant searches. \
                 Improve by: optimizing for local keywords, getting more reviews, \
                 ensuring accurate business information, and building local citations.",
                m.local_pack_appearances
            ),
            20,
        ))
    } else if m.local_pack_appearances < t.average {
        Some(Recommendation::new(
            Priority::Low,
            "Optimize Local Pack Performance",
            format!(
                "Your local pack visibility is {}%. To improve: focus on review quantity and quality, \
                 add location-specific content, and ensure your business is verified and active.",
                m.local_pack_appearances
            ),
            15,
        ))
    } else {
        None
    }
}

fn rating_rule(m: &MetricsBundle, _b: &Benchmarks) -> Option<Recommendation> {
    (m.rating < RATING_FLOOR && m.review_count > RATING_MIN_REVIEWS).then(|| {
        Recommendation::new(
            Priority::High,
            "Improve Overall Rating",
            format!(
                "Your rating of {:.1} stars is below the 4.5+ benchmark for top businesses. \
                 Focus on service quality improvements, address negative feedback, \
                 and encourage satisfied customers to share their positive experiences.",
                m.rating
            ),
            30,
        )
    })
}

fn review_volume_rule(m: &MetricsBundle, _b: &Benchmarks) -> Option<Recommendation> {
    (m.review_count < REVIEW_VOLUME_FLOOR).then(|| {
        Recommendation::new(
            Priority::Medium,
            "Build Review Volume",
            format!(
                "You have {} reviews. Businesses with 50+ reviews rank significantly higher. \
                 Implement a systematic review collection strategy: ask every customer, \
                 make it easy with QR codes, and follow up consistently.",
                m.review_count
            ),
            20,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn healthy() -> MetricsBundle {
        MetricsBundle {
            response_time: 6.0,
            photo_count: 25.0,
            photo_quality: 92.0,
            review_reply_score: 95.0,
            profile_completion: 98.0,
            google_search_rank: 2.1,
            seo_score: 88.0,
            review_score: 3.0,
            positive_reviews: 90.0,
            negative_reviews: 3.0,
            local_pack_appearances: 55.0,
            review_count: 120.0,
            rating: 4.8,
        }
    }

    fn fire(metrics: &MetricsBundle) -> Vec<Recommendation> {
        let b = Benchmarks::default();
        RULES
            .iter()
            .filter_map(|rule| (rule.check)(metrics, &b))
            .collect()
    }

    #[test]
    fn test_healthy_bundle_fires_nothing() {
        assert!(fire(&healthy()).is_empty());
    }

    #[test]
    fn test_response_time_tiers() {
        let mut m = healthy();
        m.response_time = 60.0;
        let recs = fire(&m);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].priority, Priority::Medium);
        assert_eq!(recs[0].impact, 25);
        assert!(recs[0].description.contains("60 hours"));

        m.response_time = 73.0;
        let recs = fire(&m);
        assert_eq!(recs[0].priority, Priority::High);
        assert_eq!(recs[0].title, "Urgent: Improve Review Response Time");

        // exactly on the average threshold does not fire
        m.response_time = 48.0;
        assert!(fire(&m).is_empty());
    }

    #[test]
    fn test_search_rank_formats_one_decimal() {
        let mut m = healthy();
        m.google_search_rank = 17.0;
        let recs = fire(&m);
        assert!(recs[0].description.contains("rank is 17.0"), "{}", recs[0].description);
    }

    #[test]
    fn test_rating_rule_needs_enough_reviews() {
        let mut m = healthy();
        m.rating = 3.5;
        m.review_count = 10.0;
        assert!(fire(&m).iter().all(|r| r.title != "Improve Overall Rating"));

        m.review_count = 11.0;
        let recs = fire(&m);
        let rating = recs
            .iter()
            .find(|r| r.title == "Improve Overall Rating")
            .expect("rating rule should fire");
        assert!(rating.description.contains("3.5 stars"));
    }

    #[test]
    fn test_review_velocity_zero_is_medium() {
        let mut m = healthy();
        m.review_score = 0.0;
        let recs = fire(&m);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].title, "Boost Review Collection");
    }

    #[test]
    fn test_local_pack_low_priority() {
        let mut m = healthy();
        m.local_pack_appearances = 20.0;
        let recs = fire(&m);
        assert_eq!(recs[0].priority, Priority::Low);
        assert_eq!(recs[0].impact, 15);
    }

    #[test]
    fn test_ranking_priority_then_impact() {
        let recs = vec![
            Recommendation::new(Priority::Low, "a", String::new(), 50),
            Recommendation::new(Priority::High, "b", String::new(), 25),
            Recommendation::new(Priority::Medium, "c", String::new(), 20),
            Recommendation::new(Priority::High, "d", String::new(), 40),
            Recommendation::new(Priority::Medium, "e", String::new(), 25),
        ];
        let titles: Vec<_> = rank_recommendations(recs)
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["d", "b", "e", "c", "a"]);
    }

    #[test]
    fn test_ranking_is_stable_on_ties() {
        let recs = vec![
            Recommendation::new(Priority::High, "first", String::new(), 30),
            Recommendation::new(Priority::High, "second", String::new(), 30),
        ];
        let ranked = rank_recommendations(recs);
        assert_eq!(ranked[0].title, "first");
        assert_eq!(ranked[1].title, "second");
    }

    #[test]
    fn test_engine_caps_results() {
        let worst = MetricsBundle {
            response_time: 200.0,
            negative_reviews: 80.0,
            google_search_rank: 30.0,
            rating: 1.0,
            ..Default::default()
        };
        let engine = RecommendationEngine::default();
        assert_eq!(engine.generate(&worst).len(), MAX_RECOMMENDATIONS);
        assert_eq!(engine.clone().with_limit(3).generate(&worst).len(), 3);
        assert_eq!(
            engine.with_limit(20).generate(&worst).len(),
            MAX_RECOMMENDATIONS
        );
    }

    #[test]
    fn test_custom_rule_battery() {
        let engine = RecommendationEngine::default().with_rules(vec![RULES[0]]);
        let mut m = healthy();
        m.response_time = 100.0;
        m.photo_count = 0.0;
        let recs = engine.generate(&m);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].title, "Urgent: Improve Review Response Time");
    }

    #[test]
    fn test_action_items_drop_impact() {
        let mut m = healthy();
        m.photo_quality = 10.0;
        let items = RecommendationEngine::default().action_items(&m);
        let json = serde_json::to_value(&items).expect("serialize");
        assert!(json[0].get("impact").is_none());
        assert_eq!(json[0]["priority"], "high");
    }
}
