//! Core library for `ContentFlow`.
//!
//! Validates content requests, runs the six-stage workflow animation beside
//! the request to the content API, and normalizes whatever comes back, or
//! synthesized demo content when the API is unreachable, into a fully
//! populated [`ContentResult`].
//!
//! # Example
//!
//! ```rust,no_run
//! use contentflow_core::{ClientConfig, ContentForm, StepSequencer, Studio};
//!
//! # async fn example() -> Result<(), contentflow_core::ContentError> {
//! let studio = Studio::http(&ClientConfig::from_env())?;
//! let form = ContentForm {
//!     topic: "Edge computing".to_owned(),
//!     platforms: vec!["twitter".to_owned(), "linkedin".to_owned()],
//!     keywords: "latency, iot".to_owned(),
//!     ..ContentForm::default()
//! };
//! let result = studio.submit(&form, &StepSequencer::default(), None).await?;
//! println!("{} words, score {}", result.word_count, result.quality_score);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod generate;
pub mod normalize;
pub mod request;
pub mod result;
pub mod sequencer;
pub mod state;
pub mod studio;
pub mod synthesis;
pub mod wire;

pub use client::{ContentApi, HttpContentApi};
pub use config::{ClientConfig, Environment};
pub use error::{ContentError, ValidationError};
pub use request::{Audience, ContentForm, ContentRequest, ContentType, Platform, Tone};
pub use result::{ContentResult, KeywordDensity, PlatformVersion, ResultOrigin};
pub use sequencer::{Stage, StageStatus, StepSequencer, StepTiming, WORKFLOW};
pub use state::{ContentStore, Snapshot, StoreReader};
pub use studio::{JoinPolicy, Studio};
pub use synthesis::SynthesisPolicy;
