//! Writing results to disk.
//!
//! Produces the same files the results view offers for download: the main
//! content, one file per platform version, and a JSON dump of the whole
//! result.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::ContentError;
use crate::result::ContentResult;

/// File name of the exported main content.
pub const CONTENT_FILE: &str = "content.txt";

/// Paths written by [`export_result`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportedFiles {
    pub content: PathBuf,
    pub platforms: Vec<PathBuf>,
    pub json: PathBuf,
}

impl ExportedFiles {
    /// Every written path, content first.
    pub fn all(&self) -> impl Iterator<Item = &Path> {
        std::iter::once(self.content.as_path())
            .chain(self.platforms.iter().map(PathBuf::as_path))
            .chain(std::iter::once(self.json.as_path()))
    }
}

/// Write `result` into `dir`, creating it if needed.
///
/// # Errors
///
/// Returns [`ContentError::Io`] if the directory or a file cannot be
/// written, or [`ContentError::Decode`] if the result cannot be serialized.
pub fn export_result(result: &ContentResult, dir: &Path) -> Result<ExportedFiles, ContentError> {
    fs::create_dir_all(dir)?;

    let content = dir.join(CONTENT_FILE);
    fs::write(&content, &result.final_content)?;

    let mut platforms = Vec::with_capacity(result.platform_versions.len());
    for version in &result.platform_versions {
        let path = dir.join(format!("{}-content.txt", version.file_stem()));
        fs::write(&path, &version.content)?;
        platforms.push(path);
    }

    let stamp = result.created_at.format("%Y%m%d_%H%M%S");
    let json = dir.join(format!("{}_complete_{stamp}.json", safe_topic(&result.topic)));
    fs::write(&json, serde_json::to_vec_pretty(result)?)?;

    info!(dir = %dir.display(), files = platforms.len() + 2, "exported content");

    Ok(ExportedFiles {
        content,
        platforms,
        json,
    })
}

/// File-name-safe form of a topic, or `content` if nothing is left.
pub fn safe_topic(topic: &str) -> String {
    file_safe(topic).unwrap_or_else(|| "content".to_owned())
}

/// Alphanumerics, `-` and `_` kept, spaces turned into `_`, everything else
/// dropped. `None` if nothing survives.
pub(crate) fn file_safe(raw: &str) -> Option<String> {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    let safe = kept.trim().replace(' ', "_");
    (!safe.is_empty()).then_some(safe)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::normalize;
    use crate::request::ContentForm;
    use crate::result::{PlatformVersion, capitalize_label};
    use crate::synthesis::SynthesisPolicy;

    #[test]
    fn safe_topic_strips_punctuation() {
        assert_eq!(safe_topic("AI & ML: 2024 trends!  "), "AI__ML_2024_trends");
        assert_eq!(safe_topic("edge-computing_101"), "edge-computing_101");
        assert_eq!(safe_topic("?!"), "content");
    }

    #[test]
    fn writes_content_platforms_and_json() {
        let req = ContentForm {
            topic: "Rust tips".to_owned(),
            platforms: vec!["twitter".to_owned(), "blog".to_owned()],
            ..ContentForm::default()
        }
        .validate()
        .unwrap();
        let result = normalize::demo(&req, &mut SynthesisPolicy::with_seed(4));

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("export");
        let files = export_result(&result, &out).unwrap();

        assert_eq!(fs::read_to_string(&files.content).unwrap(), result.final_content);
        let names: Vec<_> = files
            .platforms
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["twitter-content.txt", "blog-content.txt"]);

        let json_name = files.json.file_name().unwrap().to_string_lossy().into_owned();
        assert!(json_name.starts_with("Rust_tips_complete_"));
        let parsed: ContentResult =
            serde_json::from_slice(&fs::read(&files.json).unwrap()).unwrap();
        assert_eq!(parsed, result);
        assert_eq!(files.all().count(), 4);
    }

    #[test]
    fn platform_keys_cannot_leave_the_output_dir() {
        let req = ContentForm {
            topic: "Rust tips".to_owned(),
            ..ContentForm::default()
        }
        .validate()
        .unwrap();
        let mut result = normalize::demo(&req, &mut SynthesisPolicy::with_seed(8));
        result.platform_versions = ["../escape", "/tmp/abs", ".."]
            .into_iter()
            .map(|key| PlatformVersion {
                platform: capitalize_label(key),
                content: "x".to_owned(),
            })
            .collect();

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let files = export_result(&result, &out).unwrap();

        for path in files.all() {
            assert_eq!(path.parent(), Some(out.as_path()), "escaped: {}", path.display());
            assert!(path.exists());
        }
        assert!(!dir.path().join("escape-content.txt").exists());
        let names: Vec<_> = files
            .platforms
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec!["escape-content.txt", "tmpabs-content.txt", "platform-content.txt"]
        );
    }
}
