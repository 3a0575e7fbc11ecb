//! Mapping of backend payloads onto the canonical [`ContentResult`].
//!
//! [`from_backend`] fills every gap in a successful response from the
//! [`SynthesisPolicy`]. [`demo`] builds a result with no backend at all.

use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::ContentError;
use crate::request::{ContentRequest, Platform};
use crate::result::{
    ContentResult, KeywordDensity, PlatformVersion, ResultOrigin, capitalize_label, sample_of,
};
use crate::synthesis::{
    DEMO_PROCESSING_TIME, DEMO_QUALITY_SCORE, DEMO_WORD_COUNT, SynthesisPolicy,
};
use crate::wire::{ApiData, ApiEnvelope};

const GENERIC_FAILURE: &str = "Content creation failed";

/// Extract the payload of an envelope, or the failure it reports.
///
/// An envelope without `success: true` is an application failure even when
/// it carries data. A successful envelope without data yields an empty
/// payload, which the normalizer fills in entirely.
///
/// # Errors
///
/// Returns [`ContentError::Application`] with the server's message, or a
/// generic one when the server gave none.
pub fn unwrap_envelope(envelope: ApiEnvelope) -> Result<ApiData, ContentError> {
    if envelope.success == Some(true) {
        return Ok(envelope.data.unwrap_or_default());
    }
    Err(ContentError::Application {
        status: None,
        message: envelope
            .error
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| GENERIC_FAILURE.to_owned()),
    })
}

/// Build the canonical result from a successful backend payload.
///
/// `elapsed` is the locally measured request duration, used only when the
/// server does not report its own processing time.
pub fn from_backend(
    request: &ContentRequest,
    data: ApiData,
    elapsed: Duration,
    policy: &mut SynthesisPolicy,
) -> ContentResult {
    let topic = non_empty(data.topic).unwrap_or_else(|| request.topic.clone());
    let content_type = parse_or(data.content_type.as_deref(), request.content_type);
    let target_audience = parse_or(data.target_audience.as_deref(), request.target_audience);
    let tone = parse_or(data.tone.as_deref(), request.tone);

    let platform_count = data.platforms.as_ref().map_or(1, Vec::len);
    let platforms = echo_platforms(data.platforms.as_deref(), &request.platforms);

    let processing_time = whole_seconds(
        data.processing_time
            .unwrap_or_else(|| elapsed.as_secs_f64()),
    );

    let qa = data.qa_report.unwrap_or_default();
    let seo = data.seo_data.unwrap_or_default();

    let quality_score = match qa.quality_score {
        Some(score) => score.render(),
        None => policy.quality_score(),
    };

    let (final_content, word_count) = match non_empty(data.final_content) {
        Some(text) => {
            let words = text.split_whitespace().count();
            (text, words)
        }
        None => (SynthesisPolicy::final_content(request), policy.word_count()),
    };

    let meta_title = non_empty(seo.meta_title).unwrap_or_else(|| SynthesisPolicy::meta_title(&topic));
    let meta_description =
        non_empty(seo.meta_description).unwrap_or_else(|| SynthesisPolicy::meta_description(&topic));

    let keyword_density = match non_empty_list(seo.keyword_density) {
        Some(list) => list
            .into_iter()
            .map(|d| KeywordDensity {
                keyword: d.keyword,
                density: d.density.render(),
            })
            .collect(),
        None => policy.keyword_density(&request.keywords),
    };

    let platform_versions = match non_empty_list(data.platform_versions) {
        Some(map) => map
            .into_iter()
            .map(|(key, content)| PlatformVersion {
                platform: capitalize_label(&key),
                content,
            })
            .collect(),
        None => SynthesisPolicy::platform_versions(&request.topic, &request.platforms),
    };

    let created_at = data
        .created_at
        .as_deref()
        .and_then(parse_timestamp)
        .unwrap_or_else(SynthesisPolicy::created_at);

    ContentResult {
        topic,
        content_type,
        target_audience,
        tone,
        platforms,
        keywords: request.keywords.clone(),
        processing_time,
        quality_score,
        word_count,
        platform_count,
        sample_content: sample_of(&final_content),
        final_content,
        meta_title,
        meta_description,
        keyword_density,
        platform_versions,
        quality_checks: non_empty_list(qa.quality_checks)
            .unwrap_or_else(SynthesisPolicy::quality_checks),
        recommendations: non_empty_list(qa.recommendations)
            .unwrap_or_else(SynthesisPolicy::recommendations),
        created_at,
        origin: ResultOrigin::Backend,
    }
}

/// Build a complete demo result for when the backend is unreachable.
pub fn demo(request: &ContentRequest, policy: &mut SynthesisPolicy) -> ContentResult {
    ContentResult {
        topic: request.topic.clone(),
        content_type: request.content_type,
        target_audience: request.target_audience,
        tone: request.tone,
        platforms: request.platforms.clone(),
        keywords: request.keywords.clone(),
        processing_time: DEMO_PROCESSING_TIME,
        quality_score: DEMO_QUALITY_SCORE.to_owned(),
        word_count: DEMO_WORD_COUNT,
        platform_count: request.platforms.len(),
        final_content: SynthesisPolicy::demo_final_content(request),
        sample_content: SynthesisPolicy::demo_sample_content(&request.topic),
        meta_title: SynthesisPolicy::meta_title(&request.topic),
        meta_description: SynthesisPolicy::demo_meta_description(&request.topic),
        keyword_density: policy.keyword_density(&request.keywords),
        platform_versions: SynthesisPolicy::platform_versions(&request.topic, &request.platforms),
        quality_checks: SynthesisPolicy::demo_quality_checks(),
        recommendations: SynthesisPolicy::demo_recommendations(),
        created_at: SynthesisPolicy::created_at(),
        origin: ResultOrigin::Demo,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn non_empty_list<T>(value: Option<Vec<T>>) -> Option<Vec<T>> {
    value.filter(|v| !v.is_empty())
}

fn parse_or<T: std::str::FromStr + Copy>(raw: Option<&str>, fallback: T) -> T {
    raw.and_then(|s| s.parse().ok()).unwrap_or(fallback)
}

/// Server platforms that map to known keys, or the requested ones.
fn echo_platforms(server: Option<&[String]>, requested: &[Platform]) -> Vec<Platform> {
    let echoed: Vec<Platform> = server
        .unwrap_or_default()
        .iter()
        .filter_map(|p| p.parse().ok())
        .collect();
    if echoed.is_empty() {
        requested.to_vec()
    } else {
        echoed
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_seconds(secs: f64) -> u64 {
    if secs.is_finite() && secs > 0.0 {
        secs.round() as u64
    } else {
        0
    }
}

/// RFC 3339, or a naive ISO 8601 timestamp taken as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
