//! JSON shapes exchanged with the content API.
//!
//! Every response field is optional; filling the gaps is the normalizer's
//! job, not the decoder's. Report sections (`qaReport`, `seoData`) decode
//! leniently: a member of the wrong shape reads as absent instead of
//! failing the whole response.

use std::fmt;

use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::request::{Audience, ContentRequest, ContentType, Platform, Tone};

/// Path of the creation endpoint, relative to the API base URL.
pub const CREATE_CONTENT_PATH: &str = "/api/create-content";

/// Body of `POST /api/create-content`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContentBody {
    pub topic: String,
    pub content_type: ContentType,
    pub target_audience: Audience,
    pub tone: Tone,
    pub platforms: Vec<Platform>,
    pub keywords: Vec<String>,
}

impl From<&ContentRequest> for CreateContentBody {
    fn from(req: &ContentRequest) -> Self {
        Self {
            topic: req.topic.clone(),
            content_type: req.content_type,
            target_audience: req.target_audience,
            tone: req.tone,
            platforms: req.platforms.clone(),
            keywords: req.keywords.clone(),
        }
    }
}

/// Top-level response envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiEnvelope {
    pub success: Option<bool>,
    pub data: Option<ApiData>,
    pub error: Option<String>,
}

/// Error body of a non-2xx response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    pub error: Option<String>,
}

/// Payload of a successful creation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiData {
    pub topic: Option<String>,
    pub content_type: Option<String>,
    pub target_audience: Option<String>,
    pub tone: Option<String>,
    pub platforms: Option<Vec<String>>,
    /// Seconds, possibly fractional.
    pub processing_time: Option<f64>,
    pub final_content: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub qa_report: Option<QaReport>,
    #[serde(default, deserialize_with = "lenient")]
    pub seo_data: Option<SeoData>,
    /// Platform key → content, in the order the server sent them.
    #[serde(default, deserialize_with = "ordered_string_map")]
    pub platform_versions: Option<Vec<(String, String)>>,
    pub created_at: Option<String>,
}

/// QA section of a successful creation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QaReport {
    #[serde(default, deserialize_with = "lenient")]
    pub quality_score: Option<Score>,
    #[serde(default, deserialize_with = "lenient")]
    pub quality_checks: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub recommendations: Option<Vec<String>>,
}

/// SEO section of a successful creation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeoData {
    #[serde(default, deserialize_with = "lenient")]
    pub meta_title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub meta_description: Option<String>,
    /// Either a list of `{keyword, density}` or a map of
    /// `keyword -> {count, density}`.
    #[serde(default, deserialize_with = "keyword_densities")]
    pub keyword_density: Option<Vec<WireDensity>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireDensity {
    pub keyword: String,
    pub density: Score,
}

/// A numeric field the backend may send as a number or a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Score {
    Number(f64),
    Text(String),
}

impl Score {
    /// Numbers render with one decimal; strings pass through untouched.
    pub fn render(&self) -> String {
        match self {
            Self::Number(n) => format!("{n:.1}"),
            Self::Text(s) => s.clone(),
        }
    }
}

/// Decode `T`, or `None` if the value is null or of the wrong shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

fn keyword_densities<'de, D>(deserializer: D) -> Result<Option<Vec<WireDensity>>, D::Error>
where
    D: Deserializer<'de>,
{
    let densities = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        Some(Value::Object(map)) => map
            .into_iter()
            .filter_map(|(keyword, entry)| {
                let density = match entry {
                    Value::Object(fields) => fields.get("density").cloned()?,
                    bare => bare,
                };
                let density = serde_json::from_value(density).ok()?;
                Some(WireDensity { keyword, density })
            })
            .collect(),
        _ => return Ok(None),
    };
    Ok(Some(densities))
}

fn ordered_string_map<'de, D>(deserializer: D) -> Result<Option<Vec<(String, String)>>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OrderedMap;

    impl<'de> Visitor<'de> for OrderedMap {
        type Value = Option<Vec<(String, String)>>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of platform name to content")
        }

        fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
            d.deserialize_map(self)
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((key, value)) = map.next_entry::<String, String>()? {
                entries.push((key, value));
            }
            Ok(Some(entries))
        }
    }

    deserializer.deserialize_option(OrderedMap)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn body_uses_camel_case_wire_keys() {
        let req = ContentRequest {
            topic: "Rust".to_owned(),
            content_type: ContentType::SocialMedia,
            target_audience: Audience::Students,
            tone: Tone::Casual,
            platforms: vec![Platform::Twitter, Platform::Blog],
            keywords: vec!["memory safety".to_owned()],
        };
        let json = serde_json::to_value(CreateContentBody::from(&req)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "topic": "Rust",
                "contentType": "social_media",
                "targetAudience": "students",
                "tone": "casual",
                "platforms": ["twitter", "blog"],
                "keywords": ["memory safety"],
            })
        );
    }

    #[test]
    fn platform_versions_keep_server_order() {
        let data: ApiData = serde_json::from_str(
            r#"{"platformVersions": {"twitter": "t", "blog": "b", "linkedin": "l"}}"#,
        )
        .unwrap();
        let keys: Vec<_> = data
            .platform_versions
            .unwrap()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec!["twitter", "blog", "linkedin"]);
    }

    #[test]
    fn keyword_density_map_uses_inner_density() {
        let seo: SeoData = serde_json::from_str(
            r#"{"keyword_density": {"wasm": {"count": 0, "density": 0}, "rust": {"count": 1, "density": 33.33}}}"#,
        )
        .unwrap();
        let densities = seo.keyword_density.unwrap();
        assert_eq!(densities.len(), 2);
        assert_eq!(densities[0].keyword, "wasm");
        assert_eq!(densities[0].density.render(), "0.0");
        assert_eq!(densities[1].keyword, "rust");
        assert_eq!(densities[1].density.render(), "33.3");
    }

    #[test]
    fn keyword_density_list_still_decodes() {
        let seo: SeoData = serde_json::from_str(
            r#"{"keyword_density": [{"keyword": "rust", "density": "1.7"}, {"keyword": 3}]}"#,
        )
        .unwrap();
        let densities = seo.keyword_density.unwrap();
        assert_eq!(densities.len(), 1);
        assert_eq!(densities[0].density, Score::Text("1.7".to_owned()));
    }

    #[test]
    fn malformed_report_members_read_as_absent() {
        let data: ApiData = serde_json::from_str(
            r#"{
                "qaReport": {"quality_score": [9], "recommendations": "write more", "quality_checks": ["Tone"]},
                "seoData": {"meta_title": 7, "keyword_density": "high"}
            }"#,
        )
        .unwrap();
        let qa = data.qa_report.unwrap();
        assert!(qa.quality_score.is_none());
        assert!(qa.recommendations.is_none());
        assert_eq!(qa.quality_checks, Some(vec!["Tone".to_owned()]));
        let seo = data.seo_data.unwrap();
        assert!(seo.meta_title.is_none());
        assert!(seo.keyword_density.is_none());

        let data: ApiData = serde_json::from_str(r#"{"qaReport": "n/a", "seoData": 5}"#).unwrap();
        assert!(data.qa_report.is_none());
        assert!(data.seo_data.is_none());
    }

    #[test]
    fn missing_and_null_optionals_decode() {
        let data: ApiData =
            serde_json::from_str(r#"{"topic": "x", "platformVersions": null}"#).unwrap();
        assert!(data.platform_versions.is_none());
        assert!(data.qa_report.is_none());

        let envelope: ApiEnvelope = serde_json::from_str("{}").unwrap();
        assert!(envelope.success.is_none());
    }

    #[test]
    fn scores_accept_numbers_and_strings() {
        let qa: QaReport = serde_json::from_str(r#"{"quality_score": 9.31}"#).unwrap();
        assert_eq!(qa.quality_score.unwrap().render(), "9.3");
        let qa: QaReport = serde_json::from_str(r#"{"quality_score": "8.7"}"#).unwrap();
        assert_eq!(qa.quality_score.unwrap().render(), "8.7");
    }
}
