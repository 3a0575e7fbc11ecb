//! Synthesis rules for fields the backend left out.
//!
//! Each method of [`SynthesisPolicy`] is the single source of the fallback
//! value for one result field. The random source is owned by the policy, so
//! a seeded policy is fully reproducible.

use chrono::{DateTime, Utc};

use crate::generate::{generate_long_form, generate_platform_content};
use crate::request::{ContentRequest, Platform};
use crate::result::{KeywordDensity, PlatformVersion, capitalize_label};

/// Processing time reported for demo results, in seconds.
pub const DEMO_PROCESSING_TIME: u64 = 45;
/// Quality score reported for demo results.
pub const DEMO_QUALITY_SCORE: &str = "9.2";
/// Word count reported for demo results.
pub const DEMO_WORD_COUNT: usize = 1200;

const QUALITY_CHECKS: [&str; 6] = [
    "Grammar and spelling accuracy",
    "Content structure and flow",
    "SEO optimization compliance",
    "Platform-specific formatting",
    "Brand voice consistency",
    "Factual accuracy verification",
];

const RECOMMENDATIONS: [&str; 4] = [
    "Consider adding more case studies for enhanced credibility",
    "Include recent statistics and data points",
    "Add visual content suggestions for better engagement",
    "Implement A/B testing for headline optimization",
];

const DEMO_RECOMMENDATIONS: [&str; 3] = [
    "Deploy backend API for full AI-generated content",
    "Configure proper environment variables",
    "Add more detailed keyword research",
];

const DEMO_NOTE: &str =
    "*Note: This is demo content. Deploy the backend API for full AI-generated content.*";

// Scores and densities are drawn in tenths so the one-decimal rendering
// never rounds past the upper bound.
const QUALITY_TENTHS: std::ops::RangeInclusive<u32> = 85..=100;
const DENSITY_TENTHS: std::ops::Range<u32> = 10..25;
const WORD_COUNT: std::ops::Range<usize> = 800..1300;

/// Fallback generator for every result field.
#[derive(Debug)]
pub struct SynthesisPolicy {
    rng: fastrand::Rng,
}

impl Default for SynthesisPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl SynthesisPolicy {
    /// Policy backed by an entropy-seeded generator.
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    /// Reproducible policy for tests and snapshots.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Quality score in `[8.5, 10.0]`, one decimal.
    pub fn quality_score(&mut self) -> String {
        tenths(self.rng.u32(QUALITY_TENTHS))
    }

    /// Word count in `[800, 1300)`.
    pub fn word_count(&mut self) -> usize {
        self.rng.usize(WORD_COUNT)
    }

    /// One density entry per keyword, each in `[1.0, 2.5)`.
    pub fn keyword_density(&mut self, keywords: &[String]) -> Vec<KeywordDensity> {
        keywords
            .iter()
            .map(|keyword| KeywordDensity {
                keyword: keyword.clone(),
                density: tenths(self.rng.u32(DENSITY_TENTHS)),
            })
            .collect()
    }
}

/// Deterministic fields: the same inputs always give the same value.
impl SynthesisPolicy {
    /// SEO title built around the topic.
    pub fn meta_title(topic: &str) -> String {
        format!("{topic}: Complete Guide & Best Practices 2024")
    }

    /// SEO description for backend results.
    pub fn meta_description(topic: &str) -> String {
        format!(
            "Comprehensive guide to {topic}. Learn key insights, trends, and applications with expert analysis and practical recommendations."
        )
    }

    /// Shorter SEO description used on demo results.
    pub fn demo_meta_description(topic: &str) -> String {
        format!("Comprehensive guide to {topic}. Learn key insights, trends, and applications.")
    }

    /// One generated version per requested platform, labels capitalized.
    pub fn platform_versions(topic: &str, platforms: &[Platform]) -> Vec<PlatformVersion> {
        platforms
            .iter()
            .map(|p| PlatformVersion {
                platform: capitalize_label(p.as_str()),
                content: generate_platform_content(topic, p.as_str()),
            })
            .collect()
    }

    /// The full QA check list.
    pub fn quality_checks() -> Vec<String> {
        to_owned_list(&QUALITY_CHECKS)
    }

    /// The shorter check list shown on demo results.
    pub fn demo_quality_checks() -> Vec<String> {
        to_owned_list(&QUALITY_CHECKS[..4])
    }

    /// Editorial follow-ups for backend results.
    pub fn recommendations() -> Vec<String> {
        to_owned_list(&RECOMMENDATIONS)
    }

    /// Recommendations that flag the result as demo data.
    pub fn demo_recommendations() -> Vec<String> {
        to_owned_list(&DEMO_RECOMMENDATIONS)
    }

    /// Long-form document for `request`.
    pub fn final_content(request: &ContentRequest) -> String {
        generate_long_form(
            &request.topic,
            request.content_type,
            request.target_audience,
            request.tone,
            &request.platforms,
        )
    }

    /// Long-form document for `request`, marked as demo content.
    pub fn demo_final_content(request: &ContentRequest) -> String {
        format!("{}\n\n{DEMO_NOTE}", Self::final_content(request))
    }

    /// Preview line shown on demo results.
    pub fn demo_sample_content(topic: &str) -> String {
        format!("Demo content for {topic}...")
    }

    /// Creation timestamp for results the server did not stamp.
    pub fn created_at() -> DateTime<Utc> {
        Utc::now()
    }
}

fn tenths(value: u32) -> String {
    format!("{}.{}", value / 10, value % 10)
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn keywords(list: &[&str]) -> Vec<String> {
        list.iter().map(|k| (*k).to_owned()).collect()
    }

    #[test]
    fn quality_score_stays_in_range() {
        let mut policy = SynthesisPolicy::with_seed(7);
        for _ in 0..500 {
            let score = policy.quality_score();
            let value: f64 = score.parse().unwrap();
            assert!((8.5..=10.0).contains(&value), "score {score} out of range");
            assert_eq!(score.split('.').nth(1).map(str::len), Some(1));
        }
    }

    #[test]
    fn word_count_stays_in_range() {
        let mut policy = SynthesisPolicy::with_seed(11);
        for _ in 0..500 {
            assert!(WORD_COUNT.contains(&policy.word_count()));
        }
    }

    #[test]
    fn one_density_per_keyword_in_range() {
        let mut policy = SynthesisPolicy::with_seed(3);
        let density = policy.keyword_density(&keywords(&["a", "b", "c"]));
        assert_eq!(density.len(), 3);
        assert_eq!(density[1].keyword, "b");
        for _ in 0..200 {
            for entry in policy.keyword_density(&keywords(&["x"])) {
                let value: f64 = entry.density.parse().unwrap();
                assert!((1.0..2.5).contains(&value), "density {value} out of range");
            }
        }
        assert!(policy.keyword_density(&[]).is_empty());
    }

    #[test]
    fn seeded_policies_agree() {
        let mut a = SynthesisPolicy::with_seed(42);
        let mut b = SynthesisPolicy::with_seed(42);
        assert_eq!(a.quality_score(), b.quality_score());
        assert_eq!(a.word_count(), b.word_count());
    }

    #[test]
    fn fixed_lists_have_documented_lengths() {
        assert_eq!(SynthesisPolicy::quality_checks().len(), 6);
        assert_eq!(SynthesisPolicy::recommendations().len(), 4);
        assert_eq!(SynthesisPolicy::demo_quality_checks().len(), 4);
        assert!(
            SynthesisPolicy::demo_recommendations()
                .iter()
                .any(|r| r.contains("Deploy backend API"))
        );
    }

    #[test]
    fn platform_versions_follow_request_order() {
        let versions =
            SynthesisPolicy::platform_versions("Rust", &[Platform::Instagram, Platform::Blog]);
        let labels: Vec<_> = versions.iter().map(|v| v.platform.as_str()).collect();
        assert_eq!(labels, vec!["Instagram", "Blog"]);
    }

    #[test]
    fn templates_embed_topic() {
        assert_eq!(
            SynthesisPolicy::meta_title("Rust"),
            "Rust: Complete Guide & Best Practices 2024"
        );
        assert!(SynthesisPolicy::meta_description("Rust").starts_with("Comprehensive guide to Rust."));
        assert_eq!(SynthesisPolicy::demo_sample_content("Rust"), "Demo content for Rust...");
    }
}
