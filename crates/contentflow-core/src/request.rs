//! User-authored content requests.
//!
//! A [`ContentForm`] is what the user typed. [`ContentForm::validate`] turns
//! it into a [`ContentRequest`], which is the only thing the normalizer
//! accepts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Declares a closed select-field enum with its wire key and display label.
macro_rules! select_field {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($variant:ident => $key:literal, $label:literal;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $key)]
                $variant,
            )+
        }

        impl $name {
            /// Every option, in form order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Lowercase key sent to the backend.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $key,)+
                }
            }

            /// Human-readable label.
            pub fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let key = s.trim().to_ascii_lowercase();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == key)
                    .ok_or_else(|| ValidationError::UnknownOption {
                        field: $field,
                        value: s.to_owned(),
                    })
            }
        }
    };
}

select_field! {
    /// Kind of document to produce.
    ContentType, "content type" {
        BlogPost => "blog_post", "Blog Post";
        Article => "article", "Article";
        SocialMedia => "social_media", "Social Media";
        Newsletter => "newsletter", "Newsletter";
        Whitepaper => "whitepaper", "Whitepaper";
    }
}

select_field! {
    /// Who the content is written for.
    Audience, "audience" {
        General => "general", "General Audience";
        Professionals => "professionals", "Business Professionals";
        Students => "students", "Students & Learners";
        Entrepreneurs => "entrepreneurs", "Entrepreneurs";
        Technical => "technical", "Technical Experts";
    }
}

select_field! {
    /// Voice of the generated text.
    Tone, "tone" {
        Professional => "professional", "Professional";
        Casual => "casual", "Casual & Friendly";
        Formal => "formal", "Formal";
        Conversational => "conversational", "Conversational";
        Authoritative => "authoritative", "Authoritative";
    }
}

select_field! {
    /// Publishing target for a platform version.
    Platform, "platform" {
        Blog => "blog", "Blog/Website";
        Twitter => "twitter", "Twitter";
        Linkedin => "linkedin", "LinkedIn";
        Facebook => "facebook", "Facebook";
        Instagram => "instagram", "Instagram";
    }
}

/// Raw form input, exactly as entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentForm {
    pub topic: String,
    pub content_type: String,
    pub target_audience: String,
    pub tone: String,
    pub platforms: Vec<String>,
    /// Comma-separated keyword list.
    pub keywords: String,
}

impl Default for ContentForm {
    fn default() -> Self {
        Self {
            topic: String::new(),
            content_type: ContentType::BlogPost.as_str().to_owned(),
            target_audience: Audience::Professionals.as_str().to_owned(),
            tone: Tone::Professional.as_str().to_owned(),
            platforms: vec![Platform::Blog.as_str().to_owned()],
            keywords: String::new(),
        }
    }
}

impl ContentForm {
    /// Check the form and build a request from it.
    ///
    /// Topic is checked before platforms, so an empty form reports the
    /// missing topic first.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] for a blank topic, an empty platform
    /// selection, or an option outside its list.
    pub fn validate(&self) -> Result<ContentRequest, ValidationError> {
        let topic = self.topic.trim();
        if topic.is_empty() {
            return Err(ValidationError::EmptyTopic);
        }

        let mut platforms: Vec<Platform> = Vec::with_capacity(self.platforms.len());
        for raw in &self.platforms {
            let platform: Platform = raw.parse()?;
            if !platforms.contains(&platform) {
                platforms.push(platform);
            }
        }
        if platforms.is_empty() {
            return Err(ValidationError::NoPlatforms);
        }

        Ok(ContentRequest {
            topic: topic.to_owned(),
            content_type: self.content_type.parse()?,
            target_audience: self.target_audience.parse()?,
            tone: self.tone.parse()?,
            platforms,
            keywords: parse_keywords(&self.keywords),
        })
    }
}

/// A validated request, consumed once by the normalizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRequest {
    pub topic: String,
    pub content_type: ContentType,
    pub target_audience: Audience,
    pub tone: Tone,
    /// Non-empty, de-duplicated, in selection order.
    pub platforms: Vec<Platform>,
    pub keywords: Vec<String>,
}

impl ContentRequest {
    /// Lowercase platform keys, in selection order.
    pub fn platform_keys(&self) -> Vec<String> {
        self.platforms.iter().map(|p| p.as_str().to_owned()).collect()
    }
}

/// Split a comma-separated keyword string, dropping blanks.
pub fn parse_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_owned)
        .collect()
}
