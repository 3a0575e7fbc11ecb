//! The canonical result view model.
//!
//! Every field is always populated, so views never branch on missing data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::export::file_safe;
use crate::request::{Audience, ContentType, Platform, Tone};

/// Length of the dashboard preview, in characters.
pub const SAMPLE_CHARS: usize = 500;

/// Where a result's content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultOrigin {
    /// Generated by the content API.
    Backend,
    /// Synthesized locally because the API was unreachable.
    Demo,
}

/// Share of the text taken up by one keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordDensity {
    pub keyword: String,
    /// Percentage with one decimal, e.g. `"1.7"`.
    pub density: String,
}

/// Content adapted to one publishing platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformVersion {
    /// Display label, capitalized (`Twitter`, `Linkedin`).
    pub platform: String,
    pub content: String,
}

impl PlatformVersion {
    /// Lowercase file-name stem for this version, e.g. `twitter`.
    ///
    /// Path separators and dots are stripped, so the stem never names a
    /// location outside the directory it is joined onto.
    pub fn file_stem(&self) -> String {
        file_safe(&self.platform.to_lowercase()).unwrap_or_else(|| "platform".to_owned())
    }
}

/// Fully-populated result of one content request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentResult {
    pub topic: String,
    pub content_type: ContentType,
    pub target_audience: Audience,
    pub tone: Tone,
    pub platforms: Vec<Platform>,
    pub keywords: Vec<String>,
    /// Whole seconds.
    pub processing_time: u64,
    /// One decimal place, e.g. `"9.2"`.
    pub quality_score: String,
    pub word_count: usize,
    pub platform_count: usize,
    pub final_content: String,
    pub sample_content: String,
    pub meta_title: String,
    pub meta_description: String,
    pub keyword_density: Vec<KeywordDensity>,
    pub platform_versions: Vec<PlatformVersion>,
    pub quality_checks: Vec<String>,
    pub recommendations: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub origin: ResultOrigin,
}

impl ContentResult {
    /// Whether this result is locally synthesized demo data.
    pub fn is_demo(&self) -> bool {
        self.origin == ResultOrigin::Demo
    }

    /// Look up a platform version by key, ignoring case.
    pub fn platform_version(&self, platform: &str) -> Option<&PlatformVersion> {
        self.platform_versions
            .iter()
            .find(|v| v.platform.eq_ignore_ascii_case(platform))
    }
}

/// Display label for a lowercase platform key: first character uppercased.
pub fn capitalize_label(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// First [`SAMPLE_CHARS`] characters of `content`, followed by `...`.
pub fn sample_of(content: &str) -> String {
    let mut sample: String = content.chars().take(SAMPLE_CHARS).collect();
    sample.push_str("...");
    sample
}
